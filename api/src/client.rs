//! HTTP client for the calculation and report services.

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response, Url};

use crate::disposition::filename_from_content_disposition;
use crate::error::ApiError;
use crate::model::{CalculationRequest, ReportPayload, ResultModel};

/// Resolved service URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub calculate: Url,
    pub report: Url,
}

impl Endpoints {
    pub fn new(base: &str, calculate_path: &str, report_path: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base).map_err(|err| ApiError::InvalidUrl(format!("{base}: {err}")))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|err| ApiError::InvalidUrl(format!("{path}: {err}")))
        };
        Ok(Self {
            calculate: join(calculate_path)?,
            report: join(report_path)?,
        })
    }
}

/// A generated report as returned by the report service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    endpoints: Endpoints,
}

impl ServiceClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    pub fn with_client(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Posts the building input and decodes the per-period result.
    pub async fn calculate(&self, request: &CalculationRequest) -> Result<ResultModel, ApiError> {
        let url = self.endpoints.calculate.clone();
        tracing::debug!(
            %url,
            use_types = request.use_types.len(),
            "posting calculation request"
        );

        let response = self.http.post(url).json(request).send().await?;
        let response = ensure_success(response)?;
        let body = response.text().await?;
        let model = ResultModel::from_json(&body)?;

        tracing::debug!(periods = model.periods.len(), "calculation response decoded");
        Ok(model)
    }

    /// Posts the report payload and returns the document bytes.
    ///
    /// The filename comes from `Content-Disposition`, else `fallback_filename`.
    pub async fn generate_report(
        &self,
        payload: &ReportPayload,
        fallback_filename: &str,
    ) -> Result<ReportFile, ApiError> {
        let url = self.endpoints.report.clone();
        tracing::debug!(
            %url,
            with_chart = payload.chart_image_base64.is_some(),
            "posting report request"
        );

        let response = self.http.post(url).json(payload).send().await?;
        let response = ensure_success(response)?;

        let headers = response.headers();
        let disposition = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok());
        let filename = filename_from_content_disposition(disposition, fallback_filename);
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!(%filename, size = bytes.len(), "report received");

        Ok(ReportFile {
            filename,
            content_type,
            bytes,
        })
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let endpoint = response.url().path().to_string();
    tracing::warn!(%endpoint, status = status.as_u16(), "service returned an error status");
    Err(ApiError::Status {
        endpoint,
        status: status.as_u16(),
    })
}
