//! Shared UI crate for the LL97 emissions app: result derivation, the chart
//! engine, report submission and the Dioxus views used by every launcher.

pub mod core;
pub mod results;
pub mod views;

/// Shared stylesheet, embedded by the launchers.
pub const THEME_CSS: &str = include_str!("../assets/theme/main.css");
