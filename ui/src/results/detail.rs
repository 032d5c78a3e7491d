use dioxus::prelude::*;

use crate::results::tables::{AreaRow, ResultTables};

#[component]
pub fn ResultTablesPanel(tables: ResultTables) -> Element {
    rsx! {
        div { class: "results__header",
            h2 { class: "results__building", "{tables.building_name}" }
        }

        div { class: "results__panels",
            section { class: "results-card results-detail",
                div { class: "results-card__header",
                    h3 { "Areas (sq ft)" }
                }
                table { class: "results-table",
                    thead {
                        tr {
                            th { class: "results-table__label", "Use Type" }
                            th { class: "results-table__value", "Area" }
                        }
                    }
                    tbody {
                        for (idx, row) in tables.areas.iter().enumerate() {
                            {match row {
                                AreaRow::Entry { use_type, area } => rsx! {
                                    tr { key: "{idx}",
                                        td { class: "results-table__label", "{use_type}" }
                                        td { class: "results-table__value", "{area}" }
                                    }
                                },
                                AreaRow::Placeholder(text) => rsx! {
                                    tr { key: "{idx}",
                                        td { class: "results-table__placeholder", colspan: "2", "{text}" }
                                    }
                                },
                            }}
                        }
                    }
                }
            }

            section { class: "results-card results-detail",
                div { class: "results-card__header",
                    h3 { "Utility Usage" }
                }
                table { class: "results-table",
                    thead {
                        tr {
                            th { class: "results-table__label", "Utility" }
                            th { class: "results-table__value", "Usage" }
                        }
                    }
                    tbody {
                        for row in tables.utilities.iter() {
                            tr { key: "{row.label}",
                                td { class: "results-table__label", "{row.label}" }
                                td { class: "results-table__value", "{row.usage}" }
                            }
                        }
                    }
                }
            }
        }

        section { class: "results-card results-metrics",
            table { class: "results-table results-table--metrics",
                thead {
                    tr {
                        th { class: "results-metrics__corner" }
                        for (idx, label) in tables.period_labels.iter().enumerate() {
                            th { key: "{idx}", "{label}" }
                        }
                    }
                }
                tbody {
                    for row in tables.metrics.iter() {
                        tr { key: "{row.label}",
                            td { class: "results-metrics__label",
                                span { "{row.label}" }
                                span { class: "results-metrics__unit", "({row.unit})" }
                            }
                            for (idx, value) in row.values.iter().enumerate() {
                                td { key: "{idx}", class: "results-metrics__value", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
