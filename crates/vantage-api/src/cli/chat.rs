//! Interactive chat session and one-shot ask command.
//!
//! The chat loop reads terminal input, routes slash commands locally, and
//! sends everything else through the orchestrator. Extracted data tables
//! render as terminal tables; suggested visuals render as a chart outline
//! with the persona's metrics underneath.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use vantage_core::catalog::PersonaCatalog;
use vantage_core::orchestrator::{TurnError, TurnReply};
use vantage_types::chat::Session;
use vantage_types::insight::{CellValue, DataTable, Visuals};
use vantage_types::llm::{CompletionError, MessageRole};
use vantage_types::persona::Persona;

use crate::state::AppState;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show conversation history for this session.
    History,
    /// List the available personas.
    Personas,
    /// Show the active persona's default chart and metrics.
    Visuals,
    /// Switch to another persona.
    Switch(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/personas" => Some(ChatCommand::Personas),
        "/visuals" => Some(ChatCommand::Visuals),
        "/persona" | "/switch" => match arg {
            Some(id) if !id.is_empty() => Some(ChatCommand::Switch(id)),
            _ => Some(ChatCommand::Unknown(
                "/persona requires a persona id".to_string(),
            )),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!(
        "  {}  {}",
        style("/personas").cyan(),
        "List the available personas"
    );
    println!(
        "  {}   {}",
        style("/persona").cyan(),
        "Switch persona, e.g. /persona finance"
    );
    println!(
        "  {}   {}",
        style("/history").cyan(),
        "Show the conversation so far"
    );
    println!(
        "  {}   {}",
        style("/visuals").cyan(),
        "Show this persona's default chart and metrics"
    );
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}      {}", style("/exit").cyan(), "End the session");
    println!();
}

/// Run the interactive chat loop for a persona.
pub async fn run_chat(state: &AppState, persona_arg: Option<&str>) -> Result<()> {
    let persona = match persona_arg {
        Some(raw) => state.catalog.get(raw)?.clone(),
        None => pick_persona(&state.catalog)?,
    };

    let session = state.sessions.create(&persona);
    let session_id = session.id;
    let mut persona_id = persona.id;

    print_banner(&persona, &session);
    if let Some(welcome) = session.messages.first() {
        for line in welcome.content.lines() {
            println!("  {line}");
        }
        println!();
    }

    loop {
        let icon = state.catalog.by_id(persona_id).icon.clone();
        let line = match Input::<String>::new()
            .with_prompt(format!("{icon} You"))
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => {
                // Ctrl+D or a closed terminal
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
        };

        let text = line.trim().to_string();
        if text.is_empty() {
            continue;
        }

        if let Some(command) = parse(&text) {
            match command {
                ChatCommand::Help => print_help(),
                ChatCommand::Clear => {
                    let _ = console::Term::stdout().clear_screen();
                }
                ChatCommand::Exit => {
                    println!("  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::History => print_history(&state.sessions.get(&session_id)?),
                ChatCommand::Personas => print_persona_choices(&state.catalog),
                ChatCommand::Visuals => print_visuals(&state.catalog.visuals(persona_id)),
                ChatCommand::Switch(raw) => match state.catalog.get(&raw) {
                    Ok(next) => {
                        persona_id = next.id;
                        let updated = state.sessions.switch_persona(&session_id, next)?;
                        if let Some(notice) = updated.messages.last() {
                            println!();
                            for line in notice.content.lines() {
                                println!("  {line}");
                            }
                            println!();
                        }
                    }
                    Err(err) => {
                        println!("  {} {err}", style("!").yellow().bold());
                    }
                },
                ChatCommand::Unknown(detail) => {
                    println!(
                        "  {} {detail} {}",
                        style("!").yellow().bold(),
                        style("(see /help)").dim()
                    );
                }
            }
            continue;
        }

        let spinner = thinking_spinner();
        let result = state.orchestrator.respond(&session_id, &text).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => print_reply(&reply),
            Err(TurnError::Completion(err)) => {
                println!();
                println!("  {} {err}", style("✗").red().bold());
                if let CompletionError::UpstreamRateLimited {
                    retry_after_ms: Some(ms),
                } = &err
                {
                    println!(
                        "  {}",
                        style(format!("Try again in about {}s.", ms.div_ceil(1000))).dim()
                    );
                }
                println!();
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Ask a persona a single question and print the reply.
pub async fn ask(state: &AppState, persona_arg: &str, message: &str, json: bool) -> Result<()> {
    let persona = state.catalog.get(persona_arg)?.clone();
    let session = state.sessions.create(&persona);

    let spinner = (!json).then(thinking_spinner);
    let result = state.orchestrator.respond(&session.id, message).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let reply = result?;

    if json {
        let output = serde_json::json!({
            "persona": persona.id,
            "reply": reply.assistant.content,
            "payload": reply.assistant.payload,
            "suggested": reply.suggested,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", persona.icon, style(&persona.name).cyan().bold());
    print_reply(&reply);

    Ok(())
}

/// Prompt for a persona when none was given on the command line.
fn pick_persona(catalog: &PersonaCatalog) -> Result<Persona> {
    let personas = catalog.all();
    let items: Vec<String> = personas
        .iter()
        .map(|p| format!("{} {} - {}", p.icon, p.name, p.description))
        .collect();

    let choice = Select::new()
        .with_prompt("Pick a persona")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(personas[choice].clone())
}

fn print_banner(persona: &Persona, session: &Session) {
    println!();
    println!("  {} {}", persona.icon, style(&persona.name).cyan().bold());
    println!("  {}", style(&persona.description).dim());
    println!();
    println!(
        "  {} {}",
        style("Session:").bold(),
        style(session.id.to_string()).dim()
    );
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D or /exit to quit").dim()
    );
    println!();
}

fn print_reply(reply: &TurnReply) {
    println!();
    for line in reply.assistant.content.trim().lines() {
        println!("  {line}");
    }
    if let Some(payload) = &reply.assistant.payload {
        println!();
        println!("{}", render_table(payload));
    }
    if let Some(visuals) = &reply.suggested {
        println!();
        print_visuals(visuals);
    }
    println!();
}

fn print_history(session: &Session) {
    println!();
    for message in &session.messages {
        let speaker = match message.role {
            MessageRole::User => style("You").green().bold(),
            MessageRole::Assistant => style("Assistant").cyan().bold(),
            MessageRole::System => style("System").dim(),
        };
        println!(
            "  {} {}",
            style(format_timestamp(&message.created_at)).dim(),
            speaker
        );
        for line in message.content.lines() {
            println!("    {line}");
        }
        println!();
    }
}

fn print_persona_choices(catalog: &PersonaCatalog) {
    println!();
    for persona in catalog.all() {
        println!(
            "  {} {}  {}",
            persona.icon,
            style(&persona.name).cyan(),
            style(format!("/persona {}", persona.id)).dim()
        );
    }
    println!();
}

/// Print a chart outline and its companion metrics table.
fn print_visuals(visuals: &Visuals) {
    let chart = &visuals.chart;
    println!(
        "  {} {}",
        style(&chart.title).bold(),
        style(format!("({} chart)", chart.kind)).dim()
    );
    if !chart.labels.is_empty() {
        println!(
            "    {} {}",
            style("Labels:").dim(),
            chart.labels.join(", ")
        );
    }
    for series in &chart.series {
        let values = series
            .values
            .iter()
            .map(|v| format_number(*v))
            .collect::<Vec<_>>()
            .join(", ");
        println!("    {} {}: {}", style("•").dim(), series.name, values);
    }
    println!();
    println!("{}", render_table(&visuals.metrics));
}

/// Render a data table as a terminal table.
fn render_table(data: &DataTable) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        data.columns
            .iter()
            .map(|column| Cell::new(column).fg(Color::White))
            .collect::<Vec<_>>(),
    );

    for row in &data.rows {
        table.add_row(
            row.iter()
                .map(|cell| Cell::new(format_cell(cell)))
                .collect::<Vec<_>>(),
        );
    }

    table
}

// --- Formatting helpers ---

fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(text) => text.clone(),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%H:%M:%S").to_string()
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_switch_with_argument() {
        assert_eq!(
            parse("/persona finance"),
            Some(ChatCommand::Switch("finance".to_string()))
        );
        assert_eq!(
            parse("/switch research"),
            Some(ChatCommand::Switch("research".to_string()))
        );
    }

    #[test]
    fn test_parse_switch_without_argument() {
        assert_eq!(
            parse("/persona"),
            Some(ChatCommand::Unknown(
                "/persona requires a persona id".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/foo"),
            Some(ChatCommand::Unknown("/foo".to_string()))
        );
    }

    #[test]
    fn test_format_cell_drops_trailing_zeroes() {
        assert_eq!(format_cell(&CellValue::Number(22.0)), "22");
        assert_eq!(format_cell(&CellValue::Number(3.14159)), "3.14");
        assert_eq!(format_cell(&CellValue::Text("$2.5M".to_string())), "$2.5M");
    }

    #[test]
    fn test_render_table_includes_headers_and_rows() {
        let data = DataTable {
            columns: vec!["Metric".to_string(), "Value".to_string()],
            rows: vec![vec![
                CellValue::Text("Margin".to_string()),
                CellValue::Number(22.0),
            ]],
        };
        let rendered = render_table(&data).to_string();
        assert!(rendered.contains("Metric"));
        assert!(rendered.contains("Margin"));
        assert!(rendered.contains("22"));
    }

    #[test]
    fn test_format_timestamp_is_clock_time() {
        let dt = chrono::DateTime::parse_from_rfc3339("2025-03-01T14:30:05Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert_eq!(format_timestamp(&dt), "14:30:05");
    }
}
