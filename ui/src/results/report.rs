//! Report payload assembly and submission.

use api::{ApiError, CalculationRequest, ReportPayload, ResultModel, ServiceClient, UseTypeArea};

use crate::results::export;

/// The single notice shown when a report cannot be produced.
pub const REPORT_FAILED_NOTICE: &str = "Failed to generate report";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report service failed: {0}")]
    Service(#[from] ApiError),

    #[error("Report delivery failed: {0}")]
    Delivery(String),
}

/// A report that reached the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredReport {
    pub filename: String,
    /// Where the file was written, on targets that save to disk.
    pub saved_path: Option<String>,
}

impl DeliveredReport {
    pub fn message(&self) -> String {
        match &self.saved_path {
            Some(path) => format!("Report saved to {path}"),
            None => format!("Downloading {}", self.filename),
        }
    }
}

/// Builds the body of a report request.
///
/// A cached request that names its building is sent verbatim. Anything else
/// is rebuilt from the rendered result so the report always matches what
/// the user is looking at.
pub fn build_report_payload(
    cached: Option<CalculationRequest>,
    model: &ResultModel,
    chart_png: Option<String>,
) -> ReportPayload {
    let request = match cached {
        Some(request) if request.has_building_name() => request,
        _ => request_from_model(model),
    };
    ReportPayload {
        request,
        chart_image_base64: chart_png,
    }
}

/// Reconstructs calculation inputs from a result. Unknown utility keys are
/// dropped; missing or null usage becomes `0`.
pub fn request_from_model(model: &ResultModel) -> CalculationRequest {
    let mut request = CalculationRequest {
        building_name: model.building_name.clone(),
        use_types: model
            .areas
            .iter()
            .map(|(use_type, area)| UseTypeArea {
                use_type: use_type.clone(),
                area: *area,
            })
            .collect(),
        ..Default::default()
    };
    for key in api::model::UTILITY_KEYS {
        request.set_utility(key, model.utility(key));
    }
    request
}

/// Sends `payload` to the report service and hands the file to the user.
pub async fn submit_report(
    client: &ServiceClient,
    payload: &ReportPayload,
    fallback_filename: &str,
) -> Result<DeliveredReport, ReportError> {
    let file = client.generate_report(payload, fallback_filename).await?;
    let saved_path = export::deliver_report(&file)
        .await
        .map_err(ReportError::Delivery)?;
    tracing::info!(filename = %file.filename, "report delivered");
    Ok(DeliveredReport {
        filename: file.filename,
        saved_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn model() -> ResultModel {
        ResultModel {
            building_name: "From Result".into(),
            areas: BTreeMap::from([
                ("Hotel".to_string(), 20_000.0),
                ("Office".to_string(), 50_000.0),
            ]),
            utility_usage: BTreeMap::from([
                ("electricity".to_string(), Some(1_000.0)),
                ("gas".to_string(), None),
                ("water".to_string(), Some(9.0)),
            ]),
            periods: Vec::new(),
        }
    }

    #[test]
    fn named_cache_is_used_verbatim() {
        let cached = CalculationRequest {
            building_name: "Cached Tower".into(),
            steam: 4.0,
            ..Default::default()
        };
        let payload = build_report_payload(Some(cached.clone()), &model(), None);
        assert_eq!(payload.request, cached);
        assert_eq!(payload.chart_image_base64, None);
    }

    #[test]
    fn whitespace_name_still_counts_as_named() {
        let cached = CalculationRequest {
            building_name: "  ".into(),
            gas: 99.0,
            ..Default::default()
        };
        let payload = build_report_payload(Some(cached.clone()), &model(), None);
        assert_eq!(payload.request, cached);
    }

    #[test]
    fn unnamed_or_missing_cache_is_rebuilt_from_model() {
        let unnamed = CalculationRequest {
            building_name: String::new(),
            gas: 99.0,
            ..Default::default()
        };
        for cached in [Some(unnamed), None] {
            let payload = build_report_payload(cached, &model(), Some("data:image/png;base64,AA".into()));
            let request = &payload.request;
            assert_eq!(request.building_name, "From Result");
            assert_eq!(
                request.use_types,
                vec![
                    UseTypeArea {
                        use_type: "Hotel".into(),
                        area: 20_000.0
                    },
                    UseTypeArea {
                        use_type: "Office".into(),
                        area: 50_000.0
                    },
                ]
            );
            assert_eq!(request.electricity, 1_000.0);
            assert_eq!(request.gas, 0.0);
            assert_eq!(request.steam, 0.0);
            assert_eq!(
                payload.chart_image_base64.as_deref(),
                Some("data:image/png;base64,AA")
            );
        }
    }

    #[test]
    fn delivered_report_message_mentions_location() {
        let saved = DeliveredReport {
            filename: "a.pdf".into(),
            saved_path: Some("/tmp/reports/a.pdf".into()),
        };
        assert_eq!(saved.message(), "Report saved to /tmp/reports/a.pdf");

        let downloaded = DeliveredReport {
            filename: "a.pdf".into(),
            saved_path: None,
        };
        assert_eq!(downloaded.message(), "Downloading a.pdf");
    }

    #[test]
    fn service_errors_convert() {
        let err: ReportError = ApiError::MissingPeriods.into();
        assert!(matches!(err, ReportError::Service(_)));
        assert!(err.to_string().starts_with("Report service failed"));
    }
}
