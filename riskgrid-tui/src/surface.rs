//! Terminal implementation of the widget's [`Surface`].
//!
//! Floating element sizes computed here are the same ones `paint` draws, so
//! placement and painting agree.

use riskgrid::text::{display_width, wrap_words};
use riskgrid::{FilterMenu, FloatingContent, HeaderFont, Size, Surface, TextMeasure, WidgetConfig};

/// Border plus one space of padding on each side.
pub const FRAME: u16 = 4;
/// Menu lines are `"✓ label"`.
pub const MARKER: u16 = 2;

pub struct TerminalSurface {
    viewport: Size,
}

impl TerminalSurface {
    pub fn new(viewport: Size) -> Self {
        Self { viewport }
    }
}

impl TextMeasure for TerminalSurface {
    fn measure(&self, text: &str, _font: &HeaderFont) -> f32 {
        display_width(text) as f32
    }
}

impl Surface for TerminalSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn floating_size(&self, content: FloatingContent<'_>, config: &WidgetConfig) -> Size {
        match content {
            FloatingContent::Menu(menu) => menu_size(menu),
            FloatingContent::Tooltip(text) => tooltip_size(text, config.tooltip_max_width),
        }
    }
}

pub fn menu_size(menu: &FilterMenu) -> Size {
    let widest = menu
        .entries
        .iter()
        .map(|entry| display_width(&entry.label))
        .max()
        .unwrap_or(0);
    Size::new(
        clamp_u16(widest) + MARKER + FRAME,
        clamp_u16(menu.entries.len()).saturating_add(2),
    )
}

/// Tooltip text wrapped to fit inside `max_width` including the frame.
pub fn tooltip_lines(text: &str, max_width: u16) -> Vec<String> {
    let inner = usize::from(max_width.saturating_sub(FRAME).max(1));
    wrap_words(text.trim(), inner)
}

pub fn tooltip_size(text: &str, max_width: u16) -> Size {
    let lines = tooltip_lines(text, max_width);
    let widest = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
    Size::new(
        clamp_u16(widest) + FRAME,
        clamp_u16(lines.len()).saturating_add(2),
    )
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX / 2)
}
