//! Emissions-vs-threshold chart: the engine-neutral [`ChartSpec`], the
//! built-in SVG renderer, and the component that shows it once the engine is
//! ready.

use std::fmt::Write as _;

use dioxus::prelude::*;
use serde::Serialize;

use crate::core::{format::format_grouped, readiness::EngineReady};
use crate::results::series::{step_segments, ChartSeries, StepPoint};

pub const CHART_TITLE: &str = "LL97 Carbon Emissions";
pub const Y_AXIS_TITLE: &str = "tons CO2e/yr";
pub const BELOW_LIMIT_LABEL: &str = "Emissions Below Limit (tCO2e/yr)";
pub const OVERAGE_LABEL: &str = "Overage (tCO2e/yr)";
pub const LIMIT_LABEL: &str = "Emissions Limit (tCO2e/yr)";

const BELOW_LIMIT_COLOR: &str = "rgba(34,197,94,0.35)";
const OVERAGE_COLOR: &str = "rgba(234,179,8,0.75)";
const LIMIT_COLOR: &str = "#ef4444";
const STACK_ID: &str = "emissions";

/// On-screen chart size; the SVG scales to its container.
pub const DISPLAY_WIDTH: u32 = 960;
pub const DISPLAY_HEIGHT: u32 = 448;

// Share of each category taken by a bar.
const BAR_FRACTION: f64 = 0.7 * 0.85;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
    pub stack: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub points: Vec<StepPoint>,
    pub color: String,
    /// Interpolation mode; always `"after"`.
    pub stepped: String,
}

/// Everything a rendering engine needs to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub y_axis_title: String,
    pub labels: Vec<String>,
    /// Bottom-to-top stack order.
    pub bars: Vec<BarDataset>,
    pub threshold: LineDataset,
    pub ceiling: f64,
}

impl ChartSpec {
    pub fn from_series(series: &ChartSeries) -> Self {
        let bar = |label: &str, data: &[f64], color: &str| BarDataset {
            label: label.to_string(),
            data: data.to_vec(),
            color: color.to_string(),
            stack: STACK_ID.to_string(),
        };

        Self {
            title: CHART_TITLE.to_string(),
            y_axis_title: Y_AXIS_TITLE.to_string(),
            labels: series.labels.clone(),
            bars: vec![
                bar(BELOW_LIMIT_LABEL, &series.capped_emissions, BELOW_LIMIT_COLOR),
                bar(OVERAGE_LABEL, &series.overages, OVERAGE_COLOR),
            ],
            threshold: LineDataset {
                label: LIMIT_LABEL.to_string(),
                points: series.threshold_steps.clone(),
                color: LIMIT_COLOR.to_string(),
                stepped: "after".to_string(),
            },
            ceiling: series.ceiling,
        }
    }
}

/// Starts loading the rendering engine and returns its readiness handle.
///
/// Native builds load system fonts on a background thread. If that thread
/// cannot be started the handle never resolves to ready and the chart stays
/// hidden.
pub fn start_engine() -> EngineReady {
    let (signal, ready) = EngineReady::pair();

    #[cfg(not(target_arch = "wasm32"))]
    {
        let spawned = std::thread::Builder::new()
            .name("chart-fonts".into())
            .spawn(move || {
                let _ = crate::results::fonts::database();
                signal.resolve();
            });
        if let Err(err) = spawned {
            tracing::warn!(%err, "chart engine failed to start");
        }
    }

    // The browser renders SVG natively; nothing to load.
    #[cfg(target_arch = "wasm32")]
    signal.resolve();

    ready
}

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    axis_max: f64,
    categories: usize,
}

impl Frame {
    fn category_width(&self) -> f64 {
        self.width / self.categories.max(1) as f64
    }

    /// Maps a category coordinate (`i` is the centre of category `i`).
    fn x(&self, value: f64) -> f64 {
        self.left + (value + 0.5) * self.category_width()
    }

    fn y(&self, value: f64) -> f64 {
        self.top + self.height - (value / self.axis_max) * self.height
    }
}

/// Renders `spec` as a standalone SVG document.
pub fn render_svg(spec: &ChartSpec, width: u32, height: u32) -> String {
    let (w, h) = (f64::from(width), f64::from(height));
    let (axis_max, step) = axis_scale(spec.ceiling);
    let frame = Frame {
        left: 76.0,
        top: 56.0,
        width: (w - 76.0 - 24.0).max(1.0),
        height: (h - 56.0 - 92.0).max(1.0),
        axis_max,
        categories: spec.labels.len(),
    };

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}' font-family='sans-serif'>"
    );
    let _ = write!(svg, "<rect width='{width}' height='{height}' fill='#ffffff'/>");
    let _ = write!(
        svg,
        "<text x='{:.1}' y='32' text-anchor='middle' font-size='18' font-weight='600' fill='#111827'>{}</text>",
        w / 2.0,
        escape(&spec.title)
    );

    write_grid(&mut svg, &frame, step);
    write_bars(&mut svg, &frame, spec);
    write_threshold(&mut svg, &frame, spec);
    write_category_labels(&mut svg, &frame, &spec.labels);

    let _ = write!(
        svg,
        "<text transform='translate(20 {:.1}) rotate(-90)' text-anchor='middle' font-size='13' fill='#4b5563'>{}</text>",
        frame.top + frame.height / 2.0,
        escape(&spec.y_axis_title)
    );

    write_legend(&mut svg, spec, w, h);
    svg.push_str("</svg>");
    svg
}

fn write_grid(svg: &mut String, frame: &Frame, step: f64) {
    let right = frame.left + frame.width;
    let mut tick = 0.0;
    while tick <= frame.axis_max + step / 2.0 {
        let y = frame.y(tick);
        let _ = write!(
            svg,
            "<line x1='{:.2}' y1='{y:.2}' x2='{right:.2}' y2='{y:.2}' stroke='#e5e7eb' stroke-width='1'/>",
            frame.left
        );
        let _ = write!(
            svg,
            "<text x='{:.2}' y='{:.2}' text-anchor='end' font-size='12' fill='#6b7280'>{}</text>",
            frame.left - 8.0,
            y + 4.0,
            format_grouped(tick.round())
        );
        tick += step;
    }
}

fn write_bars(svg: &mut String, frame: &Frame, spec: &ChartSpec) {
    let bar_width = frame.category_width() * BAR_FRACTION;
    let mut stacked = vec![0.0_f64; spec.labels.len()];

    for dataset in &spec.bars {
        for (idx, value) in dataset.data.iter().enumerate() {
            let Some(base) = stacked.get_mut(idx) else {
                continue;
            };
            if *value <= 0.0 {
                continue;
            }
            let y_top = frame.y(*base + value);
            let y_bottom = frame.y(*base);
            *base += value;
            let _ = write!(
                svg,
                "<rect x='{:.2}' y='{y_top:.2}' width='{bar_width:.2}' height='{:.2}' rx='4' fill='{}'/>",
                frame.x(idx as f64) - bar_width / 2.0,
                (y_bottom - y_top).max(0.0),
                dataset.color
            );
        }
    }
}

fn write_threshold(svg: &mut String, frame: &Frame, spec: &ChartSpec) {
    let segments = step_segments(&spec.threshold.points);
    let color = &spec.threshold.color;
    let mut path = String::new();
    let mut previous: Option<usize> = None;

    for segment in &segments {
        let (x0, x1, y) = (
            frame.x(segment.x_start),
            frame.x(segment.x_end),
            frame.y(segment.y),
        );
        match previous {
            // Adjacent category: drop vertically at the shared boundary.
            Some(category) if category + 1 == segment.category => {
                let _ = write!(path, " L{x0:.2},{y:.2} L{x1:.2},{y:.2}");
            }
            _ => {
                let _ = write!(path, " M{x0:.2},{y:.2} L{x1:.2},{y:.2}");
            }
        }
        previous = Some(segment.category);
    }

    if !path.is_empty() {
        let _ = write!(
            svg,
            "<path d='{}' fill='none' stroke='{color}' stroke-width='2'/>",
            path.trim_start()
        );
    }
}

fn write_category_labels(svg: &mut String, frame: &Frame, labels: &[String]) {
    let baseline = frame.top + frame.height;
    let _ = write!(
        svg,
        "<line x1='{:.2}' y1='{baseline:.2}' x2='{:.2}' y2='{baseline:.2}' stroke='#9ca3af' stroke-width='1'/>",
        frame.left,
        frame.left + frame.width
    );
    for (idx, label) in labels.iter().enumerate() {
        let _ = write!(
            svg,
            "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='12' fill='#374151'>{}</text>",
            frame.x(idx as f64),
            baseline + 20.0,
            escape(label)
        );
    }
}

fn write_legend(svg: &mut String, spec: &ChartSpec, width: f64, height: f64) {
    let entries: Vec<(&str, &str, bool)> = spec
        .bars
        .iter()
        .map(|bar| (bar.label.as_str(), bar.color.as_str(), false))
        .chain(std::iter::once((
            spec.threshold.label.as_str(),
            spec.threshold.color.as_str(),
            true,
        )))
        .collect();

    // Rough width estimate; exact text metrics are not needed for a legend row.
    let entry_width = |label: &str| 12.0 + 6.0 + label.chars().count() as f64 * 6.6 + 20.0;
    let total: f64 = entries.iter().map(|(label, _, _)| entry_width(label)).sum();
    let mut x = ((width - total) / 2.0).max(8.0);
    let y = height - 28.0;

    for (label, color, is_line) in entries {
        if is_line {
            let _ = write!(
                svg,
                "<line x1='{x:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{color}' stroke-width='2'/>",
                y + 6.0,
                x + 12.0,
                y + 6.0
            );
        } else {
            let _ = write!(
                svg,
                "<rect x='{x:.2}' y='{y:.2}' width='12' height='12' rx='2' fill='{color}'/>"
            );
        }
        let _ = write!(
            svg,
            "<text x='{:.2}' y='{:.2}' font-size='12' fill='#374151'>{}</text>",
            x + 18.0,
            y + 10.5,
            escape(label)
        );
        x += entry_width(label);
    }
}

/// Axis maximum and tick step: whole-number ticks on a 1/2/5 progression.
fn axis_scale(ceiling: f64) -> (f64, f64) {
    if !(ceiling.is_finite() && ceiling > 0.0) {
        return (5.0, 1.0);
    }
    let raw_step = ceiling / 5.0;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = (nice * magnitude).max(1.0);
    let max = (ceiling / step).ceil() * step;
    (max.max(step), step)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[component]
pub fn EmissionsChart(spec: ChartSpec) -> Element {
    let engine = use_context::<EngineReady>();
    let loaded = use_resource(move || {
        let engine = engine.clone();
        async move { engine.wait().await }
    });

    if !matches!(*loaded.read(), Some(true)) {
        return rsx! {};
    }

    let markup = render_svg(&spec, DISPLAY_WIDTH, DISPLAY_HEIGHT);

    rsx! {
        section { class: "results-card results-chart",
            div {
                class: "results-chart__canvas",
                role: "img",
                aria_label: "{spec.title}",
                dangerous_inner_html: "{markup}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Period;

    fn spec() -> ChartSpec {
        let periods = vec![
            Period {
                label: "2024-2029".into(),
                total_emissions: 120.0,
                total_limit: Some(100.0),
                ..Default::default()
            },
            Period {
                label: "2030-2034".into(),
                total_emissions: 80.0,
                total_limit: Some(60.0),
                ..Default::default()
            },
            Period {
                label: "2035+".into(),
                total_emissions: 40.0,
                total_limit: None,
                ..Default::default()
            },
        ];
        ChartSpec::from_series(&ChartSeries::derive(&periods))
    }

    #[test]
    fn spec_carries_labels_and_datasets() {
        let spec = spec();
        assert_eq!(spec.title, CHART_TITLE);
        assert_eq!(spec.bars.len(), 2);
        assert_eq!(spec.bars[0].label, BELOW_LIMIT_LABEL);
        assert_eq!(spec.bars[0].data, vec![100.0, 60.0, 40.0]);
        assert_eq!(spec.bars[1].data, vec![20.0, 20.0, 0.0]);
        assert!(spec.bars.iter().all(|bar| bar.stack == "emissions"));
        assert_eq!(spec.threshold.points.len(), 4);
        assert_eq!(spec.threshold.stepped, "after");
    }

    #[test]
    fn spec_serializes_for_external_engines() {
        let value = serde_json::to_value(spec()).unwrap();
        assert_eq!(value["yAxisTitle"], Y_AXIS_TITLE);
        assert_eq!(value["threshold"]["points"][0]["x"], -0.5);
        assert_eq!(value["threshold"]["points"][0]["y"], 120.0);
        assert!(value["threshold"]["points"][3]["y"].is_null());
    }

    #[test]
    fn svg_contains_bars_threshold_and_text() {
        let svg = render_svg(&spec(), DISPLAY_WIDTH, DISPLAY_HEIGHT);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains("2035+"));
        // Five non-zero bar pieces: two capped+overage pairs and one plain bar.
        assert_eq!(svg.matches("rx='4'").count(), 5);
        // One threshold path, covering two adjacent categories only.
        assert_eq!(svg.matches("stroke='#ef4444' stroke-width='2'/>").count(), 2);
        let path_start = svg.find("<path d='").unwrap();
        let path = &svg[path_start..];
        assert_eq!(path[..path.find("' fill").unwrap()].matches('M').count(), 1);
    }

    #[test]
    fn svg_escapes_labels() {
        let mut spec = spec();
        spec.labels[0] = "<2024 & on>".into();
        let svg = render_svg(&spec, DISPLAY_WIDTH, DISPLAY_HEIGHT);
        assert!(svg.contains("&lt;2024 &amp; on&gt;"));
    }

    #[test]
    fn axis_scale_uses_round_whole_steps() {
        assert_eq!(axis_scale(120.0), (150.0, 50.0));
        assert_eq!(axis_scale(3.2), (4.0, 1.0));
        assert_eq!(axis_scale(0.0), (5.0, 1.0));
        assert_eq!(axis_scale(9_500.0), (10_000.0, 2_000.0));
    }
}
