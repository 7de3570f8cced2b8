//! Credential resolution from the environment.
//!
//! The completion API key is looked up across a fixed chain of environment
//! variables, first match wins. The resolved key is wrapped in
//! [`SecretString`] so it never reaches Debug output or logs. Resolution
//! happens once at startup: a missing key refuses to start the process
//! rather than failing on the first conversation turn.

use secrecy::SecretString;

use vantage_types::error::ConfigError;

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_VARS: [&str; 3] = ["VANTAGE_API_KEY", "OPENROUTER_API_KEY", "OPENAI_API_KEY"];

/// Resolve the completion API key from the environment.
///
/// Checks [`API_KEY_VARS`] in order; the first set, non-empty value wins.
/// Non-unicode values are skipped. Fails with
/// [`ConfigError::MissingCredential`] naming the accepted variables when
/// none is set.
pub fn resolve_api_key() -> Result<SecretString, ConfigError> {
    resolve_from(|var| std::env::var(var).ok())
}

fn resolve_from(lookup: impl Fn(&str) -> Option<String>) -> Result<SecretString, ConfigError> {
    for var in API_KEY_VARS {
        match lookup(var) {
            Some(value) if !value.trim().is_empty() => {
                tracing::debug!(source = var, "resolved completion API key");
                return Ok(SecretString::from(value));
            }
            _ => continue,
        }
    }
    Err(ConfigError::MissingCredential(API_KEY_VARS.join(" or ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_variable_wins() {
        let env = env_of(&[
            ("VANTAGE_API_KEY", "vantage-key"),
            ("OPENROUTER_API_KEY", "router-key"),
        ]);
        let key = resolve_from(|var| env.get(var).cloned()).unwrap();
        assert_eq!(key.expose_secret(), "vantage-key");
    }

    #[test]
    fn test_falls_through_to_later_variables() {
        let env = env_of(&[("OPENAI_API_KEY", "openai-key")]);
        let key = resolve_from(|var| env.get(var).cloned()).unwrap();
        assert_eq!(key.expose_secret(), "openai-key");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let env = env_of(&[
            ("VANTAGE_API_KEY", "   "),
            ("OPENROUTER_API_KEY", "router-key"),
        ]);
        let key = resolve_from(|var| env.get(var).cloned()).unwrap();
        assert_eq!(key.expose_secret(), "router-key");
    }

    #[test]
    fn test_missing_everywhere_names_the_variables() {
        let err = resolve_from(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
        let message = err.to_string();
        assert!(message.contains("VANTAGE_API_KEY"));
        assert!(message.contains("OPENROUTER_API_KEY"));
        assert!(message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_resolve_from_process_environment() {
        // SAFETY: no other test touches VANTAGE_API_KEY, and the var is
        // removed again below.
        unsafe { std::env::set_var("VANTAGE_API_KEY", "from-process-env") };

        let key = resolve_api_key().unwrap();
        assert_eq!(key.expose_secret(), "from-process-env");

        // SAFETY: set just above in this test.
        unsafe { std::env::remove_var("VANTAGE_API_KEY") };
    }
}
