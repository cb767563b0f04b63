//! Widget state and event handling.
//!
//! A [`Widget`] owns the current dataset, the filter state and the single
//! open floating element. Every event runs to completion, and any change to
//! the dataset or filters is followed by a full rebuild of the display tree
//! before `handle` returns.
//!
//! Precedence rules:
//! - a new payload replaces the dataset, clears filters and closes any
//!   floating element;
//! - opening a dropdown closes whatever floating element was open;
//! - hovering a truncated cell replaces an open dropdown with the tooltip;
//! - scrolling and resizing close both kinds of floating element.

use serde_json::Value;

use crate::config::WidgetConfig;
use crate::display::{DisplayTree, FilterMenu, MenuEntry};
use crate::filter::{is_filterable, visible_rows, FilterState};
use crate::fit::TextMeasure;
use crate::geometry::{Rect, Size};
use crate::message::parse_envelope;
use crate::model::{Dataset, Row};
use crate::position::{place, Placement};
use crate::render::{filter_menu, render};

/// Content whose size a surface must measure before it can be placed.
#[derive(Debug, Clone, Copy)]
pub enum FloatingContent<'a> {
    Menu(&'a FilterMenu),
    Tooltip(&'a str),
}

/// The rendering surface as seen by the widget: text metrics, the current
/// viewport and the measured size of floating content.
pub trait Surface: TextMeasure {
    fn viewport(&self) -> Size;
    fn floating_size(&self, content: FloatingContent<'_>, config: &WidgetConfig) -> Size;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Floating {
    Dropdown(Dropdown),
    Tooltip(Tooltip),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    pub menu: FilterMenu,
    pub anchor: Rect,
    pub placement: Placement,
    /// Keyboard highlight, an index into `menu.entries`.
    pub highlighted: usize,
}

impl Dropdown {
    pub fn highlighted_entry(&self) -> Option<&MenuEntry> {
        self.menu.entries.get(self.highlighted)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub anchor: Rect,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A message from the host, possibly not a render envelope.
    Payload(Value),
    FilterIconActivated { column: String, anchor: Rect },
    /// `None` is the "All" entry.
    FilterOptionSelected { column: String, value: Option<String> },
    /// Move the dropdown highlight by `delta` entries, wrapping.
    MenuMove { delta: i32 },
    /// Select the highlighted dropdown entry.
    MenuChoose,
    HoverEnter { text: String, anchor: Rect },
    HoverMove { text: String, anchor: Rect },
    HoverLeave,
    OutsideClick,
    Scroll,
    Resize { width: u16, height: u16 },
}

#[derive(Debug)]
pub struct Widget {
    config: WidgetConfig,
    dataset: Dataset,
    filters: FilterState,
    floating: Option<Floating>,
    tree: DisplayTree,
}

impl Widget {
    /// A widget showing the fallback dataset.
    pub fn new<S: Surface + ?Sized>(config: WidgetConfig, surface: &S) -> Self {
        let dataset = Dataset::fallback();
        let filters = FilterState::new();
        let tree = render(&dataset, &filters, &config, surface);
        Self {
            config,
            dataset,
            filters,
            floating: None,
            tree,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn floating(&self) -> Option<&Floating> {
        self.floating.as_ref()
    }

    pub fn tree(&self) -> &DisplayTree {
        &self.tree
    }

    pub fn visible_rows(&self) -> Vec<&Row> {
        visible_rows(&self.dataset, &self.filters)
    }

    /// Replace the dataset. Filters are cleared and floating elements closed.
    /// A dataset without columns is stored as the fallback dataset.
    pub fn load<S: Surface + ?Sized>(&mut self, dataset: Dataset, surface: &S) {
        let dataset = if dataset.is_degenerate() {
            log::debug!("dataset has no columns, using the fallback");
            Dataset::fallback()
        } else {
            dataset
        };
        log::info!(
            "rendering dataset: {} columns, {} rows",
            dataset.columns.len(),
            dataset.rows.len()
        );
        self.dataset = dataset;
        self.filters.clear();
        self.floating = None;
        self.rebuild(surface);
    }

    /// Apply one event. Returns `true` when the surface needs repainting.
    pub fn handle<S: Surface + ?Sized>(&mut self, event: WidgetEvent, surface: &S) -> bool {
        match event {
            WidgetEvent::Payload(message) => match parse_envelope(&message) {
                Ok(dataset) => {
                    self.load(dataset, surface);
                    true
                }
                Err(e) => {
                    log::debug!("dropping message: {e}");
                    false
                }
            },
            WidgetEvent::FilterIconActivated { column, anchor } => {
                self.open_dropdown(&column, anchor, surface)
            }
            WidgetEvent::FilterOptionSelected { column, value } => {
                self.select(&column, value.as_deref(), surface)
            }
            WidgetEvent::MenuMove { delta } => self.move_highlight(delta),
            WidgetEvent::MenuChoose => {
                let Some(Floating::Dropdown(dropdown)) = &self.floating else {
                    return false;
                };
                let Some(entry) = dropdown.highlighted_entry() else {
                    return false;
                };
                let column = dropdown.menu.column.clone();
                let value = entry.value.clone();
                self.select(&column, value.as_deref(), surface)
            }
            WidgetEvent::HoverEnter { text, anchor } | WidgetEvent::HoverMove { text, anchor } => {
                self.show_tooltip(text, anchor, surface)
            }
            WidgetEvent::HoverLeave => self.hide_tooltip(),
            WidgetEvent::OutsideClick | WidgetEvent::Scroll => self.close_floating(),
            WidgetEvent::Resize { width, height } => {
                log::debug!("viewport resized to {width}x{height}");
                self.floating = None;
                self.rebuild(surface);
                true
            }
        }
    }

    fn rebuild<M: TextMeasure + ?Sized>(&mut self, measure: &M) {
        self.tree = render(&self.dataset, &self.filters, &self.config, measure);
    }

    fn open_dropdown<S: Surface + ?Sized>(
        &mut self,
        column: &str,
        anchor: Rect,
        surface: &S,
    ) -> bool {
        if !is_filterable(column) || self.tree.header_index(column).is_none() {
            return false;
        }

        let menu = filter_menu(&self.dataset, &self.filters, column);
        let size = surface.floating_size(FloatingContent::Menu(&menu), &self.config);
        let placement = place(anchor, size, surface.viewport(), &self.config.dropdown);
        let highlighted = menu.active_index().unwrap_or(0);

        self.floating = Some(Floating::Dropdown(Dropdown {
            menu,
            anchor,
            placement,
            highlighted,
        }));
        true
    }

    fn select<S: Surface + ?Sized>(
        &mut self,
        column: &str,
        value: Option<&str>,
        surface: &S,
    ) -> bool {
        self.floating = None;
        if self.filters.set_filter(column, value) {
            log::debug!("filter {column} = {value:?}");
        }
        self.rebuild(surface);
        true
    }

    fn move_highlight(&mut self, delta: i32) -> bool {
        let Some(Floating::Dropdown(dropdown)) = &mut self.floating else {
            return false;
        };
        let len = dropdown.menu.entries.len() as i32;
        if len == 0 {
            return false;
        }
        dropdown.highlighted = (dropdown.highlighted as i32 + delta).rem_euclid(len) as usize;
        true
    }

    fn show_tooltip<S: Surface + ?Sized>(
        &mut self,
        text: String,
        anchor: Rect,
        surface: &S,
    ) -> bool {
        let size = surface.floating_size(FloatingContent::Tooltip(&text), &self.config);
        let placement = place(anchor, size, surface.viewport(), &self.config.tooltip);
        let tooltip = Tooltip {
            text,
            anchor,
            placement,
        };

        if let Some(Floating::Tooltip(current)) = &self.floating {
            if *current == tooltip {
                return false;
            }
        }
        self.floating = Some(Floating::Tooltip(tooltip));
        true
    }

    fn hide_tooltip(&mut self) -> bool {
        if matches!(self.floating, Some(Floating::Tooltip(_))) {
            self.floating = None;
            return true;
        }
        false
    }

    fn close_floating(&mut self) -> bool {
        self.floating.take().is_some()
    }
}
