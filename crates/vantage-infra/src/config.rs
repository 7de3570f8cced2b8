//! Application configuration loading.
//!
//! Reads `config.toml` from the platform config directory
//! (`~/.config/vantage/` on Linux), overridable via the `VANTAGE_CONFIG`
//! environment variable. A missing file yields [`AppConfig::default`]; a
//! present-but-unreadable or malformed file is an error.

use std::path::{Path, PathBuf};

use vantage_types::config::AppConfig;
use vantage_types::error::ConfigError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "VANTAGE_CONFIG";

/// The default config file path: `{config_dir}/vantage/config.toml`.
///
/// `None` when the platform has no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vantage").join("config.toml"))
}

/// Resolve the config file location. `VANTAGE_CONFIG` wins over the
/// platform default.
pub fn config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

/// Load configuration from the resolved path.
pub async fn load_config() -> Result<AppConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path).await,
        None => Ok(AppConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// - File absent: [`AppConfig::default`]
/// - File present but unreadable: [`ConfigError::Io`]
/// - File present but not valid TOML for [`AppConfig`]:
///   [`ConfigError::Invalid`]
pub async fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(err) => return Err(ConfigError::Io(format!("{}: {err}", path.display()))),
    };

    toml::from_str::<AppConfig>(&content).map_err(|err| ConfigError::Invalid {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_from_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from(&tmp.path().join("config.toml")).await.unwrap();
        assert_eq!(config.model, "mistralai/mixtral-8x7b-instruct");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[tokio::test]
    async fn load_config_from_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
model = "openai/gpt-4o-mini"
temperature = 0.7
port = 8080
"#,
        )
        .await
        .unwrap();

        let config = load_config_from(&config_path).await.unwrap();
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.port, 8080);
        // Untouched fields keep their defaults
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.max_tokens, 1000);
    }

    #[tokio::test]
    async fn load_config_from_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_config_from(&config_path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[tokio::test]
    async fn load_config_from_wrong_value_type_errors() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "port = \"not-a-number\"")
            .await
            .unwrap();

        let err = load_config_from(&config_path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn default_config_path_points_into_vantage_dir() {
        let path = default_config_path().unwrap();
        assert!(path.ends_with("vantage/config.toml"));
    }

    #[test]
    fn config_path_env_override_wins() {
        // SAFETY: no other test touches VANTAGE_CONFIG, and the var is
        // removed again below.
        unsafe { std::env::set_var(CONFIG_ENV_VAR, "/tmp/custom-vantage.toml") };

        assert_eq!(
            config_path(),
            Some(PathBuf::from("/tmp/custom-vantage.toml"))
        );

        // SAFETY: set just above in this test.
        unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
    }
}
