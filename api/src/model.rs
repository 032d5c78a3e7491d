//! Wire contracts exchanged with the calculation and report services.
//!
//! Field names are camelCase on the wire. Numeric request fields default to
//! zero so that partially filled (or older) cached payloads still decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Canonical utility keys in display order.
pub const UTILITY_KEYS: [&str; 5] = ["electricity", "gas", "fuelOil2", "fuelOil4", "steam"];

/// One use-type row of the building input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UseTypeArea {
    #[serde(default)]
    pub use_type: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub area: f64,
}

/// Body of `POST /calculate`, also the shape persisted as the last request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub building_name: String,
    #[serde(default)]
    pub use_types: Vec<UseTypeArea>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub electricity: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub gas: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub fuel_oil2: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub fuel_oil4: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub steam: f64,
}

impl CalculationRequest {
    /// Sets a utility field by its wire key. Unknown keys are ignored.
    pub fn set_utility(&mut self, key: &str, value: f64) {
        match key {
            "electricity" => self.electricity = value,
            "gas" => self.gas = value,
            "fuelOil2" => self.fuel_oil2 = value,
            "fuelOil4" => self.fuel_oil4 = value,
            "steam" => self.steam = value,
            _ => {}
        }
    }

    /// Whether the request names its building at all; whitespace counts.
    pub fn has_building_name(&self) -> bool {
        !self.building_name.is_empty()
    }
}

/// One compliance period of a calculation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub label: String,
    /// tCO2e/yr.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub total_emissions: f64,
    /// Legal threshold in tCO2e/yr; `None` when no threshold applies.
    #[serde(default)]
    pub total_limit: Option<f64>,
    /// Upstream `max(0, emissions - limit)`, displayed as supplied.
    #[serde(default)]
    pub overage: Option<f64>,
    /// Estimated $/yr.
    #[serde(default)]
    pub penalty: Option<f64>,
}

/// Response of `POST /calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResultModel {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub building_name: String,
    /// Square feet per use type; unusable values decode as `0`.
    #[serde(default, deserialize_with = "areas_or_zero")]
    pub areas: BTreeMap<String, f64>,
    /// Usage per utility key; `None` for null or unusable values.
    #[serde(default, deserialize_with = "usage_or_none")]
    pub utility_usage: BTreeMap<String, Option<f64>>,
    pub periods: Vec<Period>,
}

impl ResultModel {
    /// Decodes a calculation response body.
    ///
    /// A body without a `periods` array is reported as
    /// [`ApiError::MissingPeriods`] rather than a generic decode failure.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        match value.get("periods") {
            Some(serde_json::Value::Array(_)) => Ok(serde_json::from_value(value)?),
            _ => Err(ApiError::MissingPeriods),
        }
    }

    /// Usage for a utility key, `0` when absent or null.
    pub fn utility(&self, key: &str) -> f64 {
        self.utility_usage.get(key).copied().flatten().unwrap_or(0.0)
    }
}

/// Body of `POST /generate-report`: the request shape plus an optional chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(flatten)]
    pub request: CalculationRequest,
    /// `data:image/png;base64,...` snapshot of the rendered chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_image_base64: Option<String>,
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).unwrap_or(0.0))
}

/// Numeric value of a loosely typed JSON field: numbers as-is, numeric
/// strings parsed, everything else unusable.
fn loose_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

fn areas_or_zero<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(use_type, value)| (use_type, loose_number(&value).unwrap_or(0.0)))
        .collect())
}

fn usage_or_none<'de, D>(deserializer: D) -> Result<BTreeMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, loose_number(&value)))
        .collect())
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
