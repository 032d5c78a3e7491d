//! Error type shared by both service calls.

/// Failures talking to the calculation or report service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL or endpoint path could not be parsed.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connection refused, body read error, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{endpoint} responded with status {status}")]
    Status {
        /// Endpoint path that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the JSON shape we expect.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A calculation response arrived without a `periods` list.
    #[error("Calculation response is missing periods")]
    MissingPeriods,
}

impl ApiError {
    /// Status code carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
