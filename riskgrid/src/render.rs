//! Render pipeline: dataset + filter state in, display tree out.
//!
//! The whole tree is rebuilt on every change. There is no patching path.

use crate::config::WidgetConfig;
use crate::display::{
    BodyCell, BodyRow, DisplayTree, FilterAffordance, FilterMenu, HeaderCell, MenuEntry,
};
use crate::filter::{is_filterable, unique_values, visible_rows, FilterState, SEVERITY_KEY};
use crate::fit::{fit_columns, TextMeasure};
use crate::model::{CellValue, Column, Dataset};
use crate::severity::classify;
use crate::text::word_count;

/// Always rendered as plain text: never colored, never truncated.
pub const LIKELIHOOD_KEY: &str = "likelihood";

pub const ALL_LABEL: &str = "All";

pub fn render<M: TextMeasure + ?Sized>(
    dataset: &Dataset,
    state: &FilterState,
    config: &WidgetConfig,
    measure: &M,
) -> DisplayTree {
    let fallback;
    let dataset = if dataset.is_degenerate() {
        log::debug!("dataset has no columns, rendering fallback");
        fallback = Dataset::fallback();
        &fallback
    } else {
        dataset
    };

    let header: Vec<HeaderCell> = dataset
        .columns
        .iter()
        .map(|column| header_cell(column, state))
        .collect();

    let rows = visible_rows(dataset, state)
        .into_iter()
        .map(|row| BodyRow {
            cells: dataset
                .columns
                .iter()
                .map(|column| {
                    render_cell(&column.key, row.get(&column.key), config.truncate_words)
                })
                .collect(),
        })
        .collect();

    let min_widths = fit_columns(&header, &config.header_font, &config.fit, measure);

    DisplayTree {
        header,
        rows,
        min_widths,
        total_rows: dataset.rows.len(),
    }
}

fn header_cell(column: &Column, state: &FilterState) -> HeaderCell {
    let filter = is_filterable(&column.key).then(|| FilterAffordance {
        active: state.get(&column.key).map(str::to_string),
    });

    HeaderCell {
        key: column.key.clone(),
        label: column.label.clone(),
        filter,
    }
}

/// Display rules for one cell. Severity is toned by its risk tier, the
/// likelihood column is left alone, and anything longer than
/// `truncate_words` words is truncated.
pub fn render_cell(key: &str, value: &CellValue, truncate_words: usize) -> BodyCell {
    let text = value.text();

    match key {
        SEVERITY_KEY => BodyCell {
            text,
            tone: classify(value),
            truncated: false,
        },
        LIKELIHOOD_KEY => BodyCell::plain(text),
        _ => BodyCell {
            truncated: word_count(&text) > truncate_words,
            text,
            tone: None,
        },
    }
}

/// Entries of a column's filter dropdown: "All" then each candidate value.
pub fn filter_menu(dataset: &Dataset, state: &FilterState, key: &str) -> FilterMenu {
    let selected = state.get(key);

    let mut entries = vec![MenuEntry {
        label: ALL_LABEL.to_string(),
        value: None,
        active: selected.is_none(),
    }];
    entries.extend(unique_values(dataset, key).into_iter().map(|value| MenuEntry {
        active: selected == Some(value.as_str()),
        label: value.clone(),
        value: Some(value),
    }));

    FilterMenu {
        column: key.to_string(),
        entries,
    }
}
