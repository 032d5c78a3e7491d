//! Everything between a calculation response and what the user sees: series
//! and table derivation, the chart engine, report submission, and the view
//! state machine.

pub mod charts;
pub mod orchestrator;
pub mod report;
pub mod series;
pub mod snapshot;
pub mod tables;

mod detail;
pub use detail::ResultTablesPanel;

mod export;
pub use export::ReportPanel;

#[cfg(not(target_arch = "wasm32"))]
mod fonts;

pub use charts::{ChartSpec, EmissionsChart};
pub use orchestrator::{Orchestrator, ReportStatus, ResultsState, UiEvent, View};
pub use report::{build_report_payload, submit_report, ReportError};
pub use series::ChartSeries;
pub use tables::ResultTables;
