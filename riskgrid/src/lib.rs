//! Presentation engine for an embeddable risk data grid.
//!
//! Hosts push datasets as render envelopes; the engine filters rows by
//! column value, classifies severities into risk tiers, builds a display
//! tree, fits column widths to header labels and places floating dropdowns
//! and tooltips. Surfaces implement [`Surface`] and paint the tree.

pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod fit;
pub mod geometry;
pub mod message;
pub mod model;
pub mod position;
pub mod render;
pub mod severity;
pub mod text;
pub mod widget;

pub use config::WidgetConfig;
pub use display::{
    BodyCell, BodyRow, DisplayTree, FilterAffordance, FilterMenu, HeaderCell, MenuEntry,
};
pub use error::{ConfigError, EnvelopeError};
pub use filter::{unique_values, visible_rows, FilterState};
pub use fit::{CellMeasure, FitMetrics, HeaderFont, TextMeasure};
pub use geometry::{Rect, Size};
pub use model::{CellValue, Column, Dataset, Row};
pub use position::{place, Placement, PlacementOptions};
pub use render::{filter_menu, render};
pub use severity::{classify, severity_label, RiskTier};
pub use widget::{Floating, FloatingContent, Surface, Widget, WidgetEvent};
