//! Display rows for the areas, utility usage and per-period metrics tables.

use api::{Period, ResultModel};

use crate::core::{
    catalog,
    format::{format_currency, format_fixed, format_grouped, MISSING},
};

/// Text of the single row shown when no areas were supplied.
pub const EMPTY_AREAS: &str = "—";

pub const EMISSIONS_UNIT: &str = "tCO2e/yr";
pub const PENALTY_UNIT: &str = "$/yr";

#[derive(Debug, Clone, PartialEq)]
pub enum AreaRow {
    Entry { use_type: String, area: String },
    /// Spans both columns.
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UtilityRow {
    pub label: String,
    /// Grouped value followed by its unit, e.g. `"1,000,000 kWh"`.
    pub usage: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub label: &'static str,
    pub unit: &'static str,
    /// One cell per period, in period order.
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultTables {
    pub building_name: String,
    pub period_labels: Vec<String>,
    pub areas: Vec<AreaRow>,
    pub utilities: Vec<UtilityRow>,
    pub metrics: Vec<MetricRow>,
}

impl ResultTables {
    pub fn from_model(model: &ResultModel) -> Self {
        Self {
            building_name: model.building_name.clone(),
            period_labels: model.periods.iter().map(|p| p.label.clone()).collect(),
            areas: area_rows(model),
            utilities: utility_rows(model),
            metrics: metric_rows(&model.periods),
        }
    }

    pub fn metric(&self, label: &str) -> Option<&MetricRow> {
        self.metrics.iter().find(|row| row.label == label)
    }
}

fn area_rows(model: &ResultModel) -> Vec<AreaRow> {
    if model.areas.is_empty() {
        return vec![AreaRow::Placeholder(EMPTY_AREAS.to_string())];
    }
    model
        .areas
        .iter()
        .map(|(use_type, area)| AreaRow::Entry {
            use_type: use_type.clone(),
            area: format_grouped(*area),
        })
        .collect()
}

fn utility_rows(model: &ResultModel) -> Vec<UtilityRow> {
    let canonical = catalog::UTILITIES
        .iter()
        .filter(|kind| model.utility_usage.contains_key(kind.key))
        .map(|kind| UtilityRow {
            label: kind.label.to_string(),
            usage: format!("{} {}", format_grouped(model.utility(kind.key)), kind.unit),
        });

    let extra = model
        .utility_usage
        .keys()
        .filter(|key| catalog::utility(key).is_none())
        .map(|key| UtilityRow {
            label: key.clone(),
            usage: format_grouped(model.utility(key)),
        });

    canonical.chain(extra).collect()
}

fn metric_rows(periods: &[Period]) -> Vec<MetricRow> {
    let fixed_or_missing = |value: Option<f64>| {
        value
            .map(|v| format_fixed(v, 2))
            .unwrap_or_else(|| MISSING.to_string())
    };

    vec![
        MetricRow {
            label: "Emissions",
            unit: EMISSIONS_UNIT,
            values: periods
                .iter()
                .map(|p| format_fixed(p.total_emissions, 2))
                .collect(),
        },
        MetricRow {
            label: "Threshold",
            unit: EMISSIONS_UNIT,
            values: periods.iter().map(|p| fixed_or_missing(p.total_limit)).collect(),
        },
        MetricRow {
            label: "Carbon Over Threshold",
            unit: EMISSIONS_UNIT,
            values: periods.iter().map(|p| fixed_or_missing(p.overage)).collect(),
        },
        MetricRow {
            label: "Est Penalty",
            unit: PENALTY_UNIT,
            values: periods
                .iter()
                .map(|p| {
                    p.penalty
                        .map(format_currency)
                        .unwrap_or_else(|| MISSING.to_string())
                })
                .collect(),
        },
    ]
}
