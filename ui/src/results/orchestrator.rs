//! Input/Results view state and the transitions driven by UI events.
//!
//! Everything here is synchronous and side-effect free; the dashboard
//! component performs the I/O and feeds outcomes back in.

use api::{ApiError, ResultModel};

use crate::results::charts::ChartSpec;
use crate::results::report::{DeliveredReport, ReportError, REPORT_FAILED_NOTICE};
use crate::results::series::ChartSeries;
use crate::results::tables::ResultTables;
use crate::views::input::FormSnapshot;

/// Events the dashboard reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Submit(FormSnapshot),
    ShowInput,
    GenerateReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Input,
    Results,
}

/// A calculation result prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub model: ResultModel,
    pub tables: ResultTables,
    pub chart: ChartSpec,
}

impl RenderedResults {
    pub fn new(model: ResultModel) -> Self {
        let tables = ResultTables::from_model(&model);
        let chart = ChartSpec::from_series(&ChartSeries::derive(&model.periods));
        Self {
            model,
            tables,
            chart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsState {
    /// Nothing calculated yet.
    #[default]
    Empty,
    Rendered(Box<RenderedResults>),
    /// The last calculation failed or had no periods.
    NoResults,
}

impl ResultsState {
    pub fn rendered(&self) -> Option<&RenderedResults> {
        match self {
            ResultsState::Rendered(rendered) => Some(rendered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportStatus {
    #[default]
    Idle,
    Working,
    Done(String),
    Failed(String),
}

/// Identifies one calculation request; only the newest one may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Orchestrator {
    view: View,
    results: ResultsState,
    report: ReportStatus,
    latest: u64,
    calculating: bool,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn results(&self) -> &ResultsState {
        &self.results
    }

    pub fn report(&self) -> &ReportStatus {
        &self.report
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating
    }

    /// Registers a new submission. Any response for an earlier ticket will
    /// be discarded.
    pub fn begin_calculation(&mut self) -> Ticket {
        self.latest += 1;
        self.calculating = true;
        Ticket(self.latest)
    }

    /// Applies a calculation outcome and switches to the results view.
    ///
    /// Returns `false` when the outcome belongs to a superseded ticket and
    /// was dropped.
    pub fn finish_calculation(
        &mut self,
        ticket: Ticket,
        outcome: Result<ResultModel, ApiError>,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale calculation response"
            );
            return false;
        }

        self.results = match outcome {
            Ok(model) if !model.periods.is_empty() => {
                ResultsState::Rendered(Box::new(RenderedResults::new(model)))
            }
            Ok(_) => {
                tracing::info!("calculation returned no periods");
                ResultsState::NoResults
            }
            Err(err) => {
                tracing::warn!(%err, "calculation failed");
                ResultsState::NoResults
            }
        };
        self.report = ReportStatus::Idle;
        self.calculating = false;
        self.view = View::Results;
        true
    }

    /// Back to the form. Results stay as they are.
    pub fn show_input(&mut self) {
        self.view = View::Input;
    }

    /// Starts a report for the rendered results.
    ///
    /// Returns `None` (and changes nothing) when there is nothing rendered or
    /// a report is already in flight.
    pub fn begin_report(&mut self) -> Option<RenderedResults> {
        if self.report == ReportStatus::Working {
            tracing::debug!("report already in flight; ignoring request");
            return None;
        }
        let rendered = self.results.rendered()?.clone();
        self.report = ReportStatus::Working;
        Some(rendered)
    }

    pub fn finish_report(&mut self, outcome: Result<DeliveredReport, ReportError>) {
        if self.report != ReportStatus::Working {
            return;
        }
        self.report = match outcome {
            Ok(delivered) => ReportStatus::Done(delivered.message()),
            Err(err) => {
                tracing::warn!(%err, "report generation failed");
                ReportStatus::Failed(REPORT_FAILED_NOTICE.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Period;

    fn model(label: &str) -> ResultModel {
        ResultModel {
            building_name: "Main St".into(),
            periods: vec![Period {
                label: label.into(),
                total_emissions: 120.0,
                total_limit: Some(100.0),
                overage: Some(20.0),
                penalty: Some(5_000.0),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn successful_calculation_renders_results() {
        let mut state = Orchestrator::new();
        assert_eq!(state.view(), View::Input);

        let ticket = state.begin_calculation();
        assert!(state.is_calculating());
        assert!(state.finish_calculation(ticket, Ok(model("2024-2029"))));

        assert_eq!(state.view(), View::Results);
        let rendered = state.results().rendered().unwrap();
        assert_eq!(rendered.tables.period_labels, vec!["2024-2029"]);
        assert_eq!(rendered.chart.bars[1].data, vec![20.0]);
        assert!(!state.is_calculating());
    }

    #[test]
    fn failures_and_empty_periods_show_no_results() {
        let mut state = Orchestrator::new();
        let ticket = state.begin_calculation();
        state.finish_calculation(ticket, Err(ApiError::MissingPeriods));
        assert_eq!(state.view(), View::Results);
        assert_eq!(state.results(), &ResultsState::NoResults);

        let ticket = state.begin_calculation();
        state.finish_calculation(ticket, Ok(ResultModel::default()));
        assert_eq!(state.results(), &ResultsState::NoResults);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = Orchestrator::new();
        let first = state.begin_calculation();
        let second = state.begin_calculation();

        assert!(state.finish_calculation(second, Ok(model("newest"))));
        assert!(!state.finish_calculation(first, Ok(model("stale"))));

        let rendered = state.results().rendered().unwrap();
        assert_eq!(rendered.model.periods[0].label, "newest");
    }

    #[test]
    fn show_input_keeps_results() {
        let mut state = Orchestrator::new();
        let ticket = state.begin_calculation();
        state.finish_calculation(ticket, Ok(model("2024-2029")));
        let before = state.results().clone();

        state.show_input();
        assert_eq!(state.view(), View::Input);
        assert_eq!(state.results(), &before);
    }

    #[test]
    fn report_requires_results_and_ignores_duplicates() {
        let mut state = Orchestrator::new();
        assert!(state.begin_report().is_none());
        assert_eq!(state.report(), &ReportStatus::Idle);

        let ticket = state.begin_calculation();
        state.finish_calculation(ticket, Ok(model("2024-2029")));
        assert!(state.begin_report().is_some());
        assert!(state.begin_report().is_none());
        assert_eq!(state.report(), &ReportStatus::Working);
    }

    #[test]
    fn report_failure_issues_single_notice_and_keeps_results() {
        let mut state = Orchestrator::new();
        let ticket = state.begin_calculation();
        state.finish_calculation(ticket, Ok(model("2024-2029")));
        let before = state.results().clone();

        state.begin_report();
        state.finish_report(Err(ReportError::Service(ApiError::Status {
            endpoint: "/generate-report".into(),
            status: 500,
        })));

        assert_eq!(
            state.report(),
            &ReportStatus::Failed("Failed to generate report".into())
        );
        assert_eq!(state.results(), &before);

        // A late duplicate outcome does not stack another notice.
        state.finish_report(Err(ReportError::Delivery("again".into())));
        assert_eq!(
            state.report(),
            &ReportStatus::Failed("Failed to generate report".into())
        );
    }

    #[test]
    fn report_success_reports_location() {
        let mut state = Orchestrator::new();
        let ticket = state.begin_calculation();
        state.finish_calculation(ticket, Ok(model("2024-2029")));
        state.begin_report();
        state.finish_report(Ok(DeliveredReport {
            filename: "ll97_report.pdf".into(),
            saved_path: None,
        }));
        assert_eq!(
            state.report(),
            &ReportStatus::Done("Downloading ll97_report.pdf".into())
        );
    }
}
