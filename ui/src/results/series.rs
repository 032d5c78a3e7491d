//! Chart series derived from calculation periods.
//!
//! Each period becomes one stacked bar (the part of its emissions at or
//! under the threshold, plus the overage above it) and one step of the
//! threshold line. The line is meant for step-after interpolation: the
//! segment that ends at point `k` is drawn at `y_k`. Point `0` is an anchor
//! half a category left of the first bar at the chart ceiling; point `i + 1`
//! sits at `x = i + 0.5` with the limit of period `i`, so every category
//! `[i - 0.5, i + 0.5]` is spanned at its own threshold.

use api::Period;
use serde::Serialize;

/// One vertex of the stepped threshold line. `y` is `None` when the period
/// it closes has no threshold, which breaks the line there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepPoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// Horizontal piece of the threshold line covering one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSegment {
    pub category: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    /// Emissions at or under the threshold (the whole total without one).
    pub capped_emissions: Vec<f64>,
    /// Emissions above the threshold, `0` without one.
    pub overages: Vec<f64>,
    pub limits: Vec<Option<f64>>,
    /// `n + 1` points: the leading anchor, then one per period.
    pub threshold_steps: Vec<StepPoint>,
    /// Largest emissions total or limit, `0` for no periods.
    pub ceiling: f64,
}

impl ChartSeries {
    pub fn derive(periods: &[Period]) -> Self {
        let n = periods.len();
        let mut series = ChartSeries {
            labels: Vec::with_capacity(n),
            capped_emissions: Vec::with_capacity(n),
            overages: Vec::with_capacity(n),
            limits: Vec::with_capacity(n),
            threshold_steps: Vec::with_capacity(n + 1),
            ceiling: 0.0,
        };

        for period in periods {
            let total = period.total_emissions;
            let (capped, overage) = match period.total_limit {
                Some(limit) => (total.min(limit), (total - limit).max(0.0)),
                None => (total, 0.0),
            };

            series.labels.push(period.label.clone());
            series.capped_emissions.push(capped);
            series.overages.push(overage);
            series.limits.push(period.total_limit);
            series.ceiling = series
                .ceiling
                .max(total)
                .max(period.total_limit.unwrap_or(0.0));
        }

        series.threshold_steps.push(StepPoint {
            x: -0.5,
            y: Some(series.ceiling),
        });
        series
            .threshold_steps
            .extend(series.limits.iter().enumerate().map(|(idx, limit)| StepPoint {
                x: idx as f64 + 0.5,
                y: *limit,
            }));

        series
    }

    /// Per-category threshold segments, skipping periods without a limit.
    ///
    /// The vertical edge from the leading anchor down to the first limit is
    /// not part of any segment.
    pub fn segments(&self) -> Vec<StepSegment> {
        step_segments(&self.threshold_steps)
    }
}

/// Step-after segments of a threshold line: the piece ending at point `k`
/// spans `[x_{k-1}, x_k]` at `y_k`.
pub fn step_segments(points: &[StepPoint]) -> Vec<StepSegment> {
    points
        .windows(2)
        .enumerate()
        .filter_map(|(category, pair)| {
            let y = pair[1].y?;
            Some(StepSegment {
                category,
                x_start: pair[0].x,
                x_end: pair[1].x,
                y,
            })
        })
        .collect()
}
