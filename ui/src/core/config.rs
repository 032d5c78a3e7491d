//! Runtime configuration for service endpoints and local persistence.

use api::{ApiError, Endpoints};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the service base URL on native targets.
pub const API_BASE_ENV: &str = "LL97_API_BASE";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub calculate_path: String,
    pub report_path: String,
    /// Download name used when the report response carries no usable filename.
    pub fallback_report_filename: String,
    /// Storage key of the last submitted calculation request.
    pub cache_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            calculate_path: "/calculate".to_string(),
            report_path: "/generate-report".to_string(),
            fallback_report_filename: "ll97_report.pdf".to_string(),
            cache_key: "lastPayload".to_string(),
        }
    }
}

impl AppConfig {
    /// Picks the service base for the current platform.
    ///
    /// The web build talks to the origin that served it; native builds read
    /// [`API_BASE_ENV`] and fall back to [`DEFAULT_API_BASE`].
    pub fn detect() -> Self {
        let api_base = detected_base().unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        tracing::debug!(%api_base, "service base resolved");
        Self {
            api_base,
            ..Self::default()
        }
    }

    pub fn endpoints(&self) -> Result<Endpoints, ApiError> {
        Endpoints::new(&self.api_base, &self.calculate_path, &self.report_path)
    }
}

#[cfg(target_arch = "wasm32")]
fn detected_base() -> Option<String> {
    web_sys::window()?
        .location()
        .origin()
        .ok()
        .filter(|origin| origin.starts_with("http"))
}

#[cfg(not(target_arch = "wasm32"))]
fn detected_base() -> Option<String> {
    std::env::var(API_BASE_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = AppConfig::default();
        let endpoints = config.endpoints().unwrap();
        assert_eq!(endpoints.calculate.as_str(), "http://127.0.0.1:5000/calculate");
        assert_eq!(
            endpoints.report.as_str(),
            "http://127.0.0.1:5000/generate-report"
        );
        assert_eq!(config.fallback_report_filename, "ll97_report.pdf");
        assert_eq!(config.cache_key, "lastPayload");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "api_base": "https://ll97.example.org" }"#).unwrap();
        assert_eq!(config.api_base, "https://ll97.example.org");
        assert_eq!(config.report_path, "/generate-report");
    }

    #[test]
    fn malformed_base_fails_endpoint_resolution() {
        let config = AppConfig {
            api_base: "::nope".into(),
            ..AppConfig::default()
        };
        assert!(config.endpoints().is_err());
    }
}
