//! Persona profiles for Vantage.
//!
//! A persona is a fixed professional lens (e.g. Financial Analyst) that
//! shapes the tone and focus of generated responses. The set is closed:
//! five personas, defined once by the catalog at startup, never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PersonaError;
use crate::insight::{ChartSpec, DataTable};

/// Identifier for one of the five fixed personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    Sales,
    Research,
    Finance,
    Strategy,
    Product,
}

impl PersonaId {
    /// All persona ids, in catalog display order.
    pub const ALL: [PersonaId; 5] = [
        PersonaId::Sales,
        PersonaId::Research,
        PersonaId::Finance,
        PersonaId::Strategy,
        PersonaId::Product,
    ];
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonaId::Sales => write!(f, "sales"),
            PersonaId::Research => write!(f, "research"),
            PersonaId::Finance => write!(f, "finance"),
            PersonaId::Strategy => write!(f, "strategy"),
            PersonaId::Product => write!(f, "product"),
        }
    }
}

impl FromStr for PersonaId {
    type Err = PersonaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(PersonaId::Sales),
            "research" => Ok(PersonaId::Research),
            "finance" => Ok(PersonaId::Finance),
            "strategy" => Ok(PersonaId::Strategy),
            "product" => Ok(PersonaId::Product),
            other => Err(PersonaError::UnknownPersona(other.to_string())),
        }
    }
}

/// A fixed role profile that shapes generated responses.
///
/// Immutable once built by the catalog. `numeric_focus` marks domains whose
/// replies are expected to carry figures worth extracting and charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    /// Display name, e.g. "Financial Analyst".
    pub name: String,
    /// One-line description for selectors and banners.
    pub description: String,
    /// Emoji shown next to the name.
    pub icon: String,
    /// Short phrases describing what this persona pays attention to.
    pub focus_areas: Vec<String>,
    /// System prompt fragment; non-empty for every catalog persona.
    pub prompt_fragment: String,
    /// Whether replies should be scanned for numeric payloads.
    pub numeric_focus: bool,
    /// Chart suggested before any conversation has happened.
    pub default_chart: ChartSpec,
    /// Metrics table suggested alongside the default chart.
    pub default_metrics: DataTable,
}
