//! Service contracts for the LL97 emissions app: the calculation and report
//! payloads plus an HTTP client for both backends.

pub mod client;
pub mod disposition;
pub mod error;
pub mod model;

pub use client::{Endpoints, ReportFile, ServiceClient};
pub use disposition::filename_from_content_disposition;
pub use error::ApiError;
pub use model::{CalculationRequest, Period, ReportPayload, ResultModel, UseTypeArea};
