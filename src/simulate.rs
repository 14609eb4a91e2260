//! Markdown simulator: estimate sales and revenue at an arbitrary markdown
//! depth from the four observed (markdown, sales) response points.
//!
//! The response curve is piecewise-linear through the observed points sorted
//! by depth, anchored at markdown 0 by extrapolating the shallowest segment.
//! Depths beyond the deepest observation extrapolate the last segment; sales
//! never go below zero. Queries outside [0, 1] are rejected.

use crate::data::model::ProductRecord;
use crate::error::{AdvisorError, Result};

/// Valid markdown query range.
pub const MARKDOWN_MIN: f64 = 0.0;
pub const MARKDOWN_MAX: f64 = 1.0;

/// Estimated outcome of applying a markdown to a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedPoint {
    /// Queried markdown depth, fraction in [0, 1].
    pub markdown: f64,
    /// Estimated units sold at that depth.
    pub sales: f64,
    /// Original price × (1 − markdown) × estimated sales.
    pub revenue: f64,
}

/// Estimate sales and revenue for `record` at the given markdown depth.
///
/// An observed depth reproduces its stored sales figure exactly.
pub fn simulate(record: &ProductRecord, markdown: f64) -> Result<SimulatedPoint> {
    if !(MARKDOWN_MIN..=MARKDOWN_MAX).contains(&markdown) || markdown.is_nan() {
        return Err(AdvisorError::OutOfRange {
            value: markdown,
            min: MARKDOWN_MIN,
            max: MARKDOWN_MAX,
        });
    }

    let curve = response_curve(record);
    let sales = interpolate(&curve, markdown).max(0.0);
    let revenue = record.original_price * (1.0 - markdown) * sales;

    Ok(SimulatedPoint {
        markdown,
        sales,
        revenue,
    })
}

/// The unmarked-down baseline: sales and revenue at markdown 0.
pub fn baseline(record: &ProductRecord) -> Result<SimulatedPoint> {
    simulate(record, 0.0)
}

// ---------------------------------------------------------------------------
// Response curve construction
// ---------------------------------------------------------------------------

/// Observed points sorted by depth, with a markdown-0 anchor prepended when
/// depth 0 is not itself observed.
fn response_curve(record: &ProductRecord) -> Vec<(f64, f64)> {
    let mut points = record.observed_points().to_vec();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    if points[0].0 > 0.0 {
        let anchor_sales = extrapolate_left(&points).max(0.0);
        points.insert(0, (0.0, anchor_sales));
    }
    points
}

/// Linear extrapolation of the shallowest segment back to markdown 0.
fn extrapolate_left(points: &[(f64, f64)]) -> f64 {
    let (x0, y0) = points[0];
    // First later point with a distinct depth, so the slope is defined.
    let next = points.iter().skip(1).find(|(x, _)| *x - x0 > 1e-12);
    match next {
        Some(&(x1, y1)) => {
            let slope = (y1 - y0) / (x1 - x0);
            y0 - slope * x0
        }
        None => y0,
    }
}

/// Piecewise-linear interpolation; beyond the last point, the final segment
/// extends linearly.
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let (last_x, last_y) = points[points.len() - 1];

    if x >= last_x {
        // Extrapolate the deepest segment.
        let prev = points
            .iter()
            .rev()
            .skip(1)
            .find(|(px, _)| last_x - *px > 1e-12);
        return match prev {
            Some(&(px, py)) => {
                let slope = (last_y - py) / (last_x - px);
                last_y + slope * (x - last_x)
            }
            None => last_y,
        };
    }

    // Half-open segments so an exact hit on a depth shared by duplicate
    // observations resolves to the later one.
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if x >= x0 && x < x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }

    last_y
}
