//! Per-column equality filters.
//!
//! Filter state holds at most one selected display value per filterable
//! column. Visible rows are always derived from scratch from the dataset and
//! the state; nothing is cached between calls.

use std::collections::BTreeMap;

use crate::model::{CellValue, Dataset, Row};
use crate::severity::{severity_label, RiskTier};

pub const SEVERITY_KEY: &str = "severity";

/// Columns whose headers expose a filter menu. Fixed; hosts cannot extend it.
pub const FILTERABLE_COLUMNS: [&str; 3] = ["risk_type", "responsible_department", SEVERITY_KEY];

pub fn is_filterable(key: &str) -> bool {
    FILTERABLE_COLUMNS.contains(&key)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selected: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` for `key`, or clear the entry when `value` is `None` or
    /// empty. Keys outside [`FILTERABLE_COLUMNS`] are ignored and `false` is
    /// returned.
    pub fn set_filter(&mut self, key: &str, value: Option<&str>) -> bool {
        if !is_filterable(key) {
            log::debug!("ignoring filter on non-filterable column {key:?}");
            return false;
        }

        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.selected.insert(key.to_string(), value.to_string());
            }
            None => {
                self.selected.remove(key);
            }
        }
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.selected.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selected.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A row passes when it satisfies every active entry.
    pub fn matches(&self, row: &Row) -> bool {
        self.selected
            .iter()
            .all(|(key, value)| filter_value(key, row.get(key)) == *value)
    }
}

/// The value a cell is compared by. Severity goes through its label so
/// `"4"` and `"high"` both select as `"High"`; other columns compare their
/// raw text untouched.
pub fn filter_value(key: &str, value: &CellValue) -> String {
    if key == SEVERITY_KEY {
        severity_label(value)
    } else {
        value.text()
    }
}

/// Rows passing every active filter, in dataset order.
pub fn visible_rows<'a>(dataset: &'a Dataset, state: &FilterState) -> Vec<&'a Row> {
    dataset.rows.iter().filter(|row| state.matches(row)).collect()
}

/// Distinct candidate values for a column's filter menu.
///
/// Severity lists tier labels first (High, Medium, Low, whichever occur),
/// then any other labels in first-seen order. Other columns list their
/// distinct non-empty values in first-seen order.
pub fn unique_values(dataset: &Dataset, key: &str) -> Vec<String> {
    if key == SEVERITY_KEY {
        let labels = distinct(dataset.rows.iter().map(|row| severity_label(row.get(key))));
        let mut ordered: Vec<String> = RiskTier::MENU_ORDER
            .iter()
            .map(|tier| tier.label())
            .filter(|label| labels.iter().any(|l| l == label))
            .map(str::to_string)
            .collect();
        ordered.extend(
            labels
                .into_iter()
                .filter(|l| !RiskTier::MENU_ORDER.iter().any(|t| t.label() == l)),
        );
        ordered
    } else {
        distinct(
            dataset
                .rows
                .iter()
                .map(|row| row.get(key))
                .filter(|value| value.is_truthy())
                .map(CellValue::text),
        )
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
