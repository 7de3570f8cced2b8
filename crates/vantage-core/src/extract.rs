//! Structured data extraction from completion replies.
//!
//! Scans reply text for machine-readable data: a fenced ```json block first,
//! then the first GitHub-style markdown table containing at least one numeric
//! cell. Currency signs, percent signs, and thousands separators are stripped
//! when deciding whether a cell is numeric. Prose-only replies yield `None`.

use serde_json::Value;
use vantage_types::insight::{CellValue, DataTable};

/// Extract a [`DataTable`] from reply text, if one is present.
///
/// Recognized shapes, tried in order:
/// 1. A fenced ```json block holding an array of flat objects (columns come
///    from the first object's keys) or a single flat object of name/value
///    pairs (rendered as a two-column Metric/Value table).
/// 2. The first markdown table whose body contains at least one numeric
///    cell. All-text tables are skipped; layout tables rarely carry data.
///
/// Returns `None` when neither shape is found. A fenced block that fails to
/// parse or holds nested values falls through to the markdown scan.
pub fn parse_data_table(response: &str) -> Option<DataTable> {
    if let Some(table) = fenced_json_block(response).and_then(table_from_json) {
        return Some(table);
    }
    first_markdown_table(response)
}

/// The body of the first fenced ```json block, trimmed.
fn fenced_json_block(response: &str) -> Option<&str> {
    let start = response.find("```json")?;
    let body = &response[start + "```json".len()..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn table_from_json(raw: &str) -> Option<DataTable> {
    let value: Value = serde_json::from_str(raw).ok()?;
    match value {
        Value::Array(items) => table_from_object_array(&items),
        Value::Object(map) => table_from_flat_object(&map),
        _ => None,
    }
}

/// `[{"Quarter": "Q1", "Revenue": 120}, ...]` with columns taken from the
/// first object's keys. Any nested value rejects the whole block.
fn table_from_object_array(items: &[Value]) -> Option<DataTable> {
    let first = items.first()?.as_object()?;
    let columns: Vec<String> = first.keys().cloned().collect();
    if columns.is_empty() {
        return None;
    }

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let object = item.as_object()?;
        let mut row = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match object.get(column) {
                Some(value) => cell_from_scalar(value)?,
                None => CellValue::Text(String::new()),
            };
            row.push(cell);
        }
        rows.push(row);
    }
    Some(DataTable { columns, rows })
}

/// `{"Revenue": 850, "Margin": 18.5}` rendered as a Metric/Value table,
/// one row per pair, in source order.
fn table_from_flat_object(map: &serde_json::Map<String, Value>) -> Option<DataTable> {
    if map.is_empty() {
        return None;
    }

    let mut rows = Vec::with_capacity(map.len());
    for (name, value) in map {
        let cell = cell_from_scalar(value)?;
        rows.push(vec![CellValue::Text(name.clone()), cell]);
    }
    Some(DataTable {
        columns: vec!["Metric".to_string(), "Value".to_string()],
        rows,
    })
}

/// Map a scalar JSON value to a cell. Numeric-looking strings ("22%",
/// "$1,050") become numbers; arrays and objects are not scalars.
fn cell_from_scalar(value: &Value) -> Option<CellValue> {
    match value {
        Value::Number(n) => Some(CellValue::Number(n.as_f64()?)),
        Value::String(s) => Some(parse_cell(s)),
        Value::Bool(b) => Some(CellValue::Text(b.to_string())),
        Value::Null => Some(CellValue::Text(String::new())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Scan for the first markdown table with at least one numeric body cell.
///
/// A table is a header row of `|`-delimited cells, a separator row of dashes,
/// and one or more body rows. Tables need at least two columns; ragged body
/// rows are kept as-is.
fn first_markdown_table(response: &str) -> Option<DataTable> {
    let lines: Vec<&str> = response.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if !looks_like_row(line) {
            i += 1;
            continue;
        }
        if i + 1 >= lines.len() || !is_separator_row(lines[i + 1].trim()) {
            i += 1;
            continue;
        }

        let columns = split_row(line);
        if columns.len() < 2 {
            i += 1;
            continue;
        }

        let mut rows = Vec::new();
        let mut j = i + 2;
        while j < lines.len() && looks_like_row(lines[j].trim()) {
            let cells = split_row(lines[j].trim());
            rows.push(cells.iter().map(|c| parse_cell(c)).collect());
            j += 1;
        }

        let table = DataTable { columns, rows };
        if !table.rows.is_empty() && has_numeric_cell(&table) {
            return Some(table);
        }

        // All-text or empty table: keep scanning past it.
        i = j.max(i + 1);
    }

    None
}

fn looks_like_row(line: &str) -> bool {
    line.starts_with('|') && line.len() > 1
}

/// `|---|:--:|` style rows: every cell is dashes with optional alignment
/// colons.
fn is_separator_row(line: &str) -> bool {
    if !looks_like_row(line) {
        return false;
    }
    let cells = split_row(line);
    !cells.is_empty()
        && cells
            .iter()
            .all(|c| !c.is_empty() && c.contains('-') && c.chars().all(|ch| ch == '-' || ch == ':'))
}

/// Split `| a | b |` into trimmed cell texts.
fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Numeric if the text parses as a float once `$`, `%`, thousands commas,
/// and a leading `+` are stripped. `"$2.5M"` stays text.
fn parse_cell(text: &str) -> CellValue {
    match parse_numeric(text) {
        Some(n) => CellValue::Number(n),
        None => CellValue::Text(text.to_string()),
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ','))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn has_numeric_cell(table: &DataTable) -> bool {
    table
        .rows
        .iter()
        .flatten()
        .any(|cell| cell.as_number().is_some())
}
