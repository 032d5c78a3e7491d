//! Building input form.

use dioxus::prelude::*;

use api::{CalculationRequest, UseTypeArea};

use crate::core::catalog::{DEFAULT_USE_TYPE, USE_TYPES, UTILITIES};
use crate::core::format::format_grouped;

/// One editable use-type row; `area` is the raw text typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UseTypeInput {
    pub use_type: String,
    pub area: String,
}

impl Default for UseTypeInput {
    fn default() -> Self {
        Self {
            use_type: DEFAULT_USE_TYPE.to_string(),
            area: String::new(),
        }
    }
}

/// Immutable copy of the form fields at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub building_name: String,
    pub use_types: Vec<UseTypeInput>,
    /// Raw utility text keyed like [`UTILITIES`], same order.
    pub utilities: Vec<(String, String)>,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            building_name: String::new(),
            use_types: vec![UseTypeInput::default()],
            utilities: UTILITIES
                .iter()
                .map(|kind| (kind.key.to_string(), String::new()))
                .collect(),
        }
    }
}

impl FormSnapshot {
    /// Prefills the form from an earlier request.
    pub fn from_request(request: &CalculationRequest) -> Self {
        let mut use_types: Vec<_> = request
            .use_types
            .iter()
            .map(|row| UseTypeInput {
                use_type: row.use_type.clone(),
                area: plain_number(row.area),
            })
            .collect();
        if use_types.is_empty() {
            use_types.push(UseTypeInput::default());
        }

        let utilities = UTILITIES
            .iter()
            .map(|kind| {
                let value = match kind.key {
                    "electricity" => request.electricity,
                    "gas" => request.gas,
                    "fuelOil2" => request.fuel_oil2,
                    "fuelOil4" => request.fuel_oil4,
                    _ => request.steam,
                };
                (kind.key.to_string(), plain_number(value))
            })
            .collect();

        Self {
            building_name: request.building_name.clone(),
            use_types,
            utilities,
        }
    }

    /// Converts the raw fields into a request.
    ///
    /// Unparsable numbers count as `0` and rows without a positive area are
    /// left out.
    pub fn to_request(&self) -> CalculationRequest {
        let mut request = CalculationRequest {
            building_name: self.building_name.clone(),
            use_types: self
                .use_types
                .iter()
                .filter_map(|row| {
                    let area = parse_lenient(&row.area);
                    (area > 0.0).then(|| UseTypeArea {
                        use_type: row.use_type.clone(),
                        area,
                    })
                })
                .collect(),
            ..Default::default()
        };
        for (key, raw) in &self.utilities {
            request.set_utility(key, parse_lenient(raw));
        }
        request
    }

    pub fn utility(&self, key: &str) -> &str {
        self.utilities
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn set_utility(&mut self, key: &str, value: String) {
        match self.utilities.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.utilities.push((key.to_string(), value)),
        }
    }
}

/// Parses user-typed numbers; thousands separators are tolerated and
/// anything else unusable becomes `0`.
pub fn parse_lenient(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn plain_number(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

#[component]
pub fn InputForm(
    initial: FormSnapshot,
    busy: bool,
    on_submit: EventHandler<FormSnapshot>,
) -> Element {
    let mut form = use_signal(|| initial);

    let rows = form.read().use_types.clone();
    let use_type_total: f64 = rows
        .iter()
        .map(|row| parse_lenient(&row.area))
        .filter(|area| *area > 0.0)
        .sum();

    rsx! {
        section { class: "page page-input",
            h1 { "LL97 Emissions Calculator" }
            p { "Enter the building's floor areas and annual utility usage to estimate emissions against each Local Law 97 compliance period." }

            form {
                class: "input-form",
                onsubmit: move |event| {
                    event.prevent_default();
                    on_submit.call(form.read().clone());
                },

                label { class: "input-form__field",
                    span { class: "input-form__label", "Building name" }
                    input {
                        r#type: "text",
                        value: "{form.read().building_name}",
                        oninput: move |event| form.write().building_name = event.value(),
                    }
                }

                fieldset { class: "input-form__group",
                    legend { "Property use types" }
                    for (idx, row) in rows.iter().enumerate() {
                        div { key: "{idx}", class: "input-form__row",
                            select {
                                value: "{row.use_type}",
                                onchange: move |event| {
                                    if let Some(slot) = form.write().use_types.get_mut(idx) {
                                        slot.use_type = event.value();
                                    }
                                },
                                for use_type in USE_TYPES.iter() {
                                    option {
                                        key: "{use_type}",
                                        value: "{use_type}",
                                        selected: *use_type == row.use_type,
                                        "{use_type}"
                                    }
                                }
                            }
                            input {
                                r#type: "number",
                                min: "0",
                                placeholder: "Area (sq ft)",
                                value: "{row.area}",
                                oninput: move |event| {
                                    if let Some(slot) = form.write().use_types.get_mut(idx) {
                                        slot.area = event.value();
                                    }
                                },
                            }
                            button {
                                r#type: "button",
                                class: "button button--ghost input-form__remove",
                                aria_label: "Remove use type",
                                onclick: move |_| {
                                    let mut form = form.write();
                                    if idx < form.use_types.len() {
                                        form.use_types.remove(idx);
                                    }
                                },
                                "×"
                            }
                        }
                    }
                    div { class: "input-form__row-actions",
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| form.write().use_types.push(UseTypeInput::default()),
                            "Add use type"
                        }
                        span { class: "input-form__hint", "Total {format_grouped(use_type_total)} sq ft" }
                    }
                }

                fieldset { class: "input-form__group",
                    legend { "Annual utility usage" }
                    for kind in UTILITIES.iter() {
                        label { key: "{kind.key}", class: "input-form__field",
                            span { class: "input-form__label", "{kind.label} ({kind.unit})" }
                            input {
                                r#type: "number",
                                min: "0",
                                step: "any",
                                value: "{form.read().utility(kind.key)}",
                                oninput: move |event| form.write().set_utility(kind.key, event.value()),
                            }
                        }
                    }
                }

                div { class: "input-form__actions",
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: busy,
                        if busy { "Calculating…" } else { "Calculate" }
                    }
                }
            }
        }
    }
}
