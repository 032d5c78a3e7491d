use dioxus::prelude::*;

use crate::results::{EmissionsChart, ReportPanel, ReportStatus, ResultTablesPanel, ResultsState};

/// Message shown when a calculation produced nothing to display.
pub const NO_RESULTS: &str = "No results.";

#[component]
pub fn ResultsView(
    results: ResultsState,
    report: ReportStatus,
    on_back: EventHandler<()>,
    on_report: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "page page-results",
            div { class: "results__toolbar",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| on_back.call(()),
                    "← Back to inputs"
                }
            }

            {match results {
                ResultsState::Rendered(rendered) => rsx! {
                    ResultTablesPanel { tables: rendered.tables.clone() }
                    EmissionsChart { spec: rendered.chart.clone() }
                    ReportPanel {
                        status: report,
                        on_generate: move |_| on_report.call(()),
                    }
                },
                ResultsState::NoResults | ResultsState::Empty => rsx! {
                    p { class: "results-card__placeholder", "{NO_RESULTS}" }
                },
            }}
        }
    }
}
