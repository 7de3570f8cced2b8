//! Persona catalog CLI command.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::state::AppState;

/// List all personas in a rich colored table.
pub fn list_personas(state: &AppState, json: bool) -> Result<()> {
    let personas = state.catalog.all();

    if json {
        println!("{}", serde_json::to_string_pretty(personas)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Persona").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Focus areas").fg(Color::White),
        Cell::new("Data-driven").fg(Color::White),
    ]);

    for persona in personas {
        let name_display = format!("{} {}", persona.icon, persona.name);

        let numeric_cell = if persona.numeric_focus {
            Cell::new("● yes").fg(Color::Green)
        } else {
            Cell::new("○ no").fg(Color::DarkGrey)
        };

        table.add_row(vec![
            Cell::new(name_display).fg(Color::Cyan),
            Cell::new(persona.id.to_string()).fg(Color::White),
            Cell::new(&persona.description),
            Cell::new(persona.focus_areas.join(", ")).fg(Color::DarkGrey),
            numeric_cell,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  Start a conversation with: {}",
        style("vantage chat <persona>").yellow()
    );
    println!();

    Ok(())
}
