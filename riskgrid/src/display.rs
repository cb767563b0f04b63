//! Display tree produced by the render pipeline.
//!
//! The tree is a plain description of what to show. Surfaces turn it into
//! actual UI and wire pointer handling; nothing here knows about a surface.

use crate::severity::RiskTier;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayTree {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<BodyRow>,
    /// Minimum width per column index, shared by header and body cells.
    pub min_widths: Vec<u16>,
    /// Rows in the dataset before filtering.
    pub total_rows: usize,
}

impl DisplayTree {
    pub fn header_index(&self, key: &str) -> Option<usize> {
        self.header.iter().position(|h| h.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// Present on filterable columns.
    pub filter: Option<FilterAffordance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterAffordance {
    /// Currently selected value, if the filter is set.
    pub active: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyRow {
    pub cells: Vec<BodyCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyCell {
    pub text: String,
    /// Severity coloring; `None` means uncolored.
    pub tone: Option<RiskTier>,
    /// Overflow is elided and the full text is available on hover.
    pub truncated: bool,
}

impl BodyCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Full text to show in a tooltip, for truncated cells.
    pub fn tooltip(&self) -> Option<&str> {
        self.truncated.then_some(self.text.as_str())
    }
}

/// A filter dropdown's entries: a leading "All" entry, then each candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMenu {
    pub column: String,
    pub entries: Vec<MenuEntry>,
}

impl FilterMenu {
    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    /// Value to select; `None` clears the filter.
    pub value: Option<String>,
    pub active: bool,
}
