//! The fixed persona catalog.
//!
//! Five personas, defined here at startup and shared immutably for the life
//! of the process. Each carries its prompt fragment, focus areas, and the
//! default chart/metrics a dashboard shows before any conversation happens.
//! Pure lookup; no side effects.

use vantage_types::error::PersonaError;
use vantage_types::insight::{CellValue, ChartKind, ChartSeries, ChartSpec, DataTable, Visuals};
use vantage_types::persona::{Persona, PersonaId};

/// Static registry of the five personas.
///
/// Built once with [`PersonaCatalog::new`], then only read. Lookup by
/// string id goes through [`PersonaId`] parsing, so anything outside the
/// fixed set fails with `UnknownPersona`.
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// Build the catalog with all five persona profiles.
    pub fn new() -> Self {
        Self {
            personas: PersonaId::ALL.iter().map(|id| build_persona(*id)).collect(),
        }
    }

    /// Look up a persona by string id.
    ///
    /// Accepts the lowercase ids (`sales`, `research`, `finance`,
    /// `strategy`, `product`); anything else fails with
    /// [`PersonaError::UnknownPersona`].
    pub fn get(&self, id: &str) -> Result<&Persona, PersonaError> {
        let persona_id: PersonaId = id.parse()?;
        Ok(self.by_id(persona_id))
    }

    /// Look up a persona by typed id. Infallible: the catalog always holds
    /// every `PersonaId`.
    pub fn by_id(&self, id: PersonaId) -> &Persona {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .unwrap_or_else(|| unreachable!("catalog holds every PersonaId"))
    }

    /// All personas in display order (Sales, Research, Finance, Strategy,
    /// Product).
    pub fn all(&self) -> &[Persona] {
        &self.personas
    }

    /// A persona's default chart and metrics table, cloned for handing to
    /// renderers.
    pub fn visuals(&self, id: PersonaId) -> Visuals {
        let persona = self.by_id(id);
        Visuals {
            chart: persona.default_chart.clone(),
            metrics: persona.default_metrics.clone(),
        }
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn build_persona(id: PersonaId) -> Persona {
    match id {
        PersonaId::Sales => Persona {
            id,
            name: "Sales Executive".to_string(),
            description: "Focuses on revenue opportunities and sales strategies".to_string(),
            icon: "💰".to_string(),
            focus_areas: to_strings(&["revenue growth", "client acquisition", "sales metrics"]),
            prompt_fragment: "You are a sales executive. Focus on revenue opportunities, \
                sales metrics, pipeline value, conversion rates, and actionable sales \
                strategies. Provide specific numbers and revenue projections."
                .to_string(),
            numeric_focus: true,
            default_chart: sales_funnel(),
            default_metrics: sales_metrics(),
        },
        PersonaId::Research => Persona {
            id,
            name: "Market Researcher".to_string(),
            description: "Focuses on market trends and competitive analysis".to_string(),
            icon: "📊".to_string(),
            focus_areas: to_strings(&["market share", "industry trends", "competitive landscape"]),
            prompt_fragment: "You are a market researcher. Focus on market size, growth \
                rates, competitive analysis, consumer trends, and market share data. \
                Provide comprehensive market intelligence."
                .to_string(),
            numeric_focus: true,
            default_chart: research_radar(),
            default_metrics: research_metrics(),
        },
        PersonaId::Finance => Persona {
            id,
            name: "Financial Analyst".to_string(),
            description: "Focuses on financial metrics and ROI analysis".to_string(),
            icon: "💹".to_string(),
            focus_areas: to_strings(&["financial performance", "ROI analysis", "risk assessment"]),
            prompt_fragment: "You are a financial analyst. Focus on financial metrics, \
                ROI calculations, risk assessment, valuation, and investment \
                recommendations. Provide precise financial numbers."
                .to_string(),
            numeric_focus: true,
            default_chart: finance_bars(),
            default_metrics: finance_metrics(),
        },
        PersonaId::Strategy => Persona {
            id,
            name: "Strategic Planner".to_string(),
            description: "Focuses on long-term strategy and growth opportunities".to_string(),
            icon: "🛣️".to_string(),
            focus_areas: to_strings(&[
                "strategic initiatives",
                "growth opportunities",
                "market positioning",
            ]),
            prompt_fragment: "You are a strategic planner. Focus on long-term strategy, \
                growth opportunities, strategic initiatives, and implementation \
                roadmaps. Provide forward-looking insights."
                .to_string(),
            numeric_focus: false,
            default_chart: strategy_waterfall(),
            default_metrics: strategy_metrics(),
        },
        PersonaId::Product => Persona {
            id,
            name: "Product Manager".to_string(),
            description: "Focuses on product opportunities and feature analysis".to_string(),
            icon: "🎯".to_string(),
            focus_areas: to_strings(&["product-market fit", "feature analysis", "customer needs"]),
            prompt_fragment: "You are a product manager. Focus on product opportunities, \
                feature analysis, user needs, and product roadmap. Provide user-centric \
                recommendations."
                .to_string(),
            numeric_focus: false,
            default_chart: product_scatter(),
            default_metrics: product_metrics(),
        },
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn series(name: &str, values: &[f64]) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        values: values.to_vec(),
    }
}

fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

// --- Default charts, one per persona ---

fn sales_funnel() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Funnel,
        title: "Sales Funnel Performance".to_string(),
        labels: to_strings(&["Leads", "MQLs", "SQLs", "Opportunities", "Closed Won"]),
        series: vec![series("Prospects", &[1000.0, 800.0, 400.0, 200.0, 80.0])],
    }
}

fn research_radar() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Radar,
        title: "Market Position Analysis".to_string(),
        labels: to_strings(&[
            "Market Share",
            "Growth Rate",
            "Customer Sat",
            "Brand Awareness",
        ]),
        series: vec![series("Score", &[25.0, 18.0, 82.0, 65.0])],
    }
}

fn finance_bars() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Financial Performance".to_string(),
        labels: to_strings(&["2022", "2023", "2024", "2025"]),
        series: vec![
            series("Revenue ($M)", &[500.0, 650.0, 820.0, 1050.0]),
            series("Profit ($M)", &[75.0, 110.0, 160.0, 220.0]),
        ],
    }
}

fn strategy_waterfall() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Waterfall,
        title: "Strategic Implementation Timeline".to_string(),
        labels: to_strings(&["Foundation", "Growth", "Expansion", "Leadership"]),
        series: vec![series("Resource Units", &[1.0, 2.0, 2.0, 1.0])],
    }
}

fn product_scatter() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Scatter,
        title: "Feature Impact vs Effort Analysis".to_string(),
        labels: to_strings(&["Feature A", "Feature B", "Feature C", "Feature D"]),
        series: vec![
            series("Implementation Effort", &[30.0, 50.0, 70.0, 40.0]),
            series("Business Impact", &[85.0, 70.0, 60.0, 45.0]),
        ],
    }
}

// --- Default metrics tables, one per persona ---

fn sales_metrics() -> DataTable {
    DataTable {
        columns: to_strings(&["Metric", "Value", "Target"]),
        rows: vec![
            text_row(&["Pipeline Value", "$2.5M", "$3.0M"]),
            text_row(&["Conversion Rate", "22%", "25%"]),
            text_row(&["Avg Deal Size", "$125K", "$140K"]),
            text_row(&["Sales Cycle", "67 days", "60 days"]),
        ],
    }
}

fn research_metrics() -> DataTable {
    DataTable {
        columns: to_strings(&["Metric", "Value", "Trend"]),
        rows: vec![
            text_row(&["Market Size", "$15B", "Growing"]),
            text_row(&["Growth Rate", "18%", "Accelerating"]),
            text_row(&["Market Share", "12%", "Increasing"]),
            text_row(&["Competitors", "8 major", "Consolidating"]),
        ],
    }
}

fn finance_metrics() -> DataTable {
    DataTable {
        columns: to_strings(&["Metric", "Value", "YoY Growth"]),
        rows: vec![
            text_row(&["Revenue", "$850M", "+24%"]),
            text_row(&["Profit Margin", "18.5%", "+2.1%"]),
            text_row(&["ROI", "22%", "+3.5%"]),
            text_row(&["Valuation", "$4.2B", "+28%"]),
        ],
    }
}

fn strategy_metrics() -> DataTable {
    DataTable {
        columns: to_strings(&["Initiative", "Timeline", "Investment", "ROI Potential"]),
        rows: vec![
            text_row(&["Market Expansion", "6-12 months", "$5M", "35%"]),
            text_row(&["Product Innovation", "12-18 months", "$8M", "42%"]),
            text_row(&["Digital Transformation", "18-24 months", "$12M", "28%"]),
        ],
    }
}

fn product_metrics() -> DataTable {
    DataTable {
        columns: to_strings(&["Feature", "User Impact", "Development Effort", "Priority"]),
        rows: vec![
            text_row(&["AI Integration", "High", "High", "P0"]),
            text_row(&["Mobile App", "Medium", "Medium", "P1"]),
            text_row(&["API Access", "Low", "Low", "P2"]),
            text_row(&["Analytics", "High", "Medium", "P0"]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_holds_five_personas() {
        let catalog = PersonaCatalog::new();
        assert_eq!(catalog.all().len(), 5);
    }

    #[test]
    fn test_every_persona_has_nonempty_prompt_fragment() {
        let catalog = PersonaCatalog::new();
        for persona in catalog.all() {
            assert!(
                !persona.prompt_fragment.trim().is_empty(),
                "persona '{}' has an empty prompt fragment",
                persona.id
            );
        }
    }

    #[test]
    fn test_get_resolves_every_fixed_id() {
        let catalog = PersonaCatalog::new();
        for id in ["sales", "research", "finance", "strategy", "product"] {
            let persona = catalog.get(id).unwrap();
            assert_eq!(persona.id.to_string(), id);
        }
    }

    #[test]
    fn test_get_rejects_unknown_id() {
        let catalog = PersonaCatalog::new();
        let err = catalog.get("astrologer").unwrap_err();
        assert!(matches!(err, PersonaError::UnknownPersona(id) if id == "astrologer"));
    }

    #[test]
    fn test_get_rejects_empty_id() {
        let catalog = PersonaCatalog::new();
        assert!(matches!(
            catalog.get(""),
            Err(PersonaError::UnknownPersona(_))
        ));
    }

    #[test]
    fn test_display_order_is_stable() {
        let catalog = PersonaCatalog::new();
        let ids: Vec<PersonaId> = catalog.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, PersonaId::ALL);
    }

    #[test]
    fn test_numeric_focus_marks_quantitative_domains() {
        let catalog = PersonaCatalog::new();
        assert!(catalog.by_id(PersonaId::Sales).numeric_focus);
        assert!(catalog.by_id(PersonaId::Research).numeric_focus);
        assert!(catalog.by_id(PersonaId::Finance).numeric_focus);
        assert!(!catalog.by_id(PersonaId::Strategy).numeric_focus);
        assert!(!catalog.by_id(PersonaId::Product).numeric_focus);
    }

    #[test]
    fn test_every_persona_has_three_focus_areas() {
        let catalog = PersonaCatalog::new();
        for persona in catalog.all() {
            assert_eq!(persona.focus_areas.len(), 3, "persona '{}'", persona.id);
        }
    }

    #[test]
    fn test_default_charts_have_aligned_series() {
        let catalog = PersonaCatalog::new();
        for persona in catalog.all() {
            let chart = &persona.default_chart;
            assert!(!chart.labels.is_empty(), "persona '{}'", persona.id);
            for s in &chart.series {
                assert_eq!(
                    s.values.len(),
                    chart.labels.len(),
                    "series '{}' of persona '{}' misaligned",
                    s.name,
                    persona.id
                );
            }
        }
    }

    #[test]
    fn test_default_metrics_rows_match_columns() {
        let catalog = PersonaCatalog::new();
        for persona in catalog.all() {
            let table = &persona.default_metrics;
            assert!(!table.is_empty(), "persona '{}'", persona.id);
            for row in &table.rows {
                assert_eq!(row.len(), table.columns.len(), "persona '{}'", persona.id);
            }
        }
    }

    #[test]
    fn test_visuals_clones_persona_defaults() {
        let catalog = PersonaCatalog::new();
        let visuals = catalog.visuals(PersonaId::Finance);
        assert_eq!(visuals.chart.kind, ChartKind::Bar);
        assert_eq!(visuals.metrics.columns[0], "Metric");
    }
}
