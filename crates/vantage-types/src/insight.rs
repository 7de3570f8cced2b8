//! Chart and table payload types for Vantage.
//!
//! `DataTable` is the unit handed to chart rendering: column-named rows of
//! number-or-text cells. `ChartSpec` describes a persona's default widget
//! without prescribing any particular rendering library -- the dashboard
//! frontend (or the terminal table renderer) decides how to draw it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of chart widget a spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Funnel,
    Radar,
    Bar,
    Waterfall,
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Funnel => write!(f, "funnel"),
            ChartKind::Radar => write!(f, "radar"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Waterfall => write!(f, "waterfall"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "funnel" => Ok(ChartKind::Funnel),
            "radar" => Ok(ChartKind::Radar),
            "bar" => Ok(ChartKind::Bar),
            "waterfall" => Ok(ChartKind::Waterfall),
            "scatter" => Ok(ChartKind::Scatter),
            other => Err(format!("invalid chart kind: '{other}'")),
        }
    }
}

/// A named series of numeric values within a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// A renderable chart description.
///
/// `labels` carries the category axis (funnel stages, radar spokes, bar
/// groups, waterfall phases, scatter point names); each series carries a
/// value per label. Scatter charts use two series: x values then y values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// A single table cell: either a number or free text.
///
/// Serializes untagged, so a table renders as plain JSON scalars
/// (`[850, "up 12%"]`) rather than tagged objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// The cell's numeric value, if it is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// Column-named rows of cells, the tabular unit handed to chart rendering.
///
/// Rows are expected (but not required) to have one cell per column;
/// best-effort extraction may produce ragged rows and consumers must
/// tolerate them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// True when the table carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A persona's default chart and metrics table, suggested to dashboards
/// before (or alongside) any conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visuals {
    pub chart: ChartSpec,
    pub metrics: DataTable,
}
