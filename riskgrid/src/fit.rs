//! Column width fitting.
//!
//! Every column gets a minimum width wide enough for its header label (and
//! filter icon), applied to the header and to every body cell in that
//! column so rows stay aligned.

use serde::{Deserialize, Serialize};

use crate::display::HeaderCell;
use crate::text::display_width;

/// Font used to render header labels. Measurements must use the same font
/// the surface renders headers in, or labels clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderFont {
    pub family: String,
    pub size: f32,
    pub weight: u16,
}

impl Default for HeaderFont {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            size: 13.0,
            weight: 600,
        }
    }
}

/// Measures rendered text width in surface units.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: &HeaderFont) -> f32;
}

/// Terminal measurement: one unit per display cell, font ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str, _font: &HeaderFont) -> f32 {
        display_width(text) as f32
    }
}

/// Extra space added around a measured header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Left plus right cell padding.
    pub base_padding: u16,
    /// Filter icon plus its gap, for filterable columns only.
    pub icon_allowance: u16,
    pub safety_margin: u16,
}

impl FitMetrics {
    pub const PIXELS: Self = Self {
        base_padding: 20,
        icon_allowance: 28,
        safety_margin: 6,
    };

    pub const CELLS: Self = Self {
        base_padding: 2,
        icon_allowance: 2,
        safety_margin: 1,
    };
}

impl Default for FitMetrics {
    fn default() -> Self {
        Self::CELLS
    }
}

pub fn min_width<M: TextMeasure + ?Sized>(
    label: &str,
    filterable: bool,
    font: &HeaderFont,
    metrics: &FitMetrics,
    measure: &M,
) -> u16 {
    let measured = measure.measure(label.trim(), font).max(0.0).ceil();
    // Float to int casts saturate, NaN becomes 0
    let measured = measured as u16;
    let icon = if filterable { metrics.icon_allowance } else { 0 };

    measured
        .saturating_add(metrics.base_padding)
        .saturating_add(icon)
        .saturating_add(metrics.safety_margin)
}

/// Minimum width per column, in header order.
pub fn fit_columns<M: TextMeasure + ?Sized>(
    headers: &[HeaderCell],
    font: &HeaderFont,
    metrics: &FitMetrics,
    measure: &M,
) -> Vec<u16> {
    headers
        .iter()
        .map(|header| {
            min_width(
                &header.label,
                header.filter.is_some(),
                font,
                metrics,
                measure,
            )
        })
        .collect()
}
