//! Paints a widget's display tree and floating element into a [`Buffer`].
//!
//! Screen layout: header on row 0, a rule on row 1, body rows below, and a
//! status line on the last row. Columns are at least as wide as the tree's
//! minimum widths, with one cell of padding on each side.

use riskgrid::text::{display_width, truncate_to_width};
use riskgrid::widget::{Dropdown, Tooltip};
use riskgrid::{DisplayTree, Floating, Placement, Rect, Size, Widget, WidgetConfig};

use crate::buffer::{Buffer, Cell, TextStyle};
use crate::hit::{HitMap, HitTarget};
use crate::surface::tooltip_lines;
use crate::theme::Palette;

pub const HEADER_ROW: u16 = 0;
pub const BODY_TOP: u16 = 2;
const FILTER_ICON: char = '≡';
const ACTIVE_MARKER: char = '✓';

const BOLD: TextStyle = TextStyle {
    bold: true,
    dim: false,
    italic: false,
    underline: false,
    reverse: false,
};

const UNDERLINE: TextStyle = TextStyle {
    bold: false,
    dim: false,
    italic: false,
    underline: true,
    reverse: false,
};

/// Scroll offsets of the table: columns in cells, rows in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    pub x: u16,
    pub y: usize,
}

impl Scroll {
    pub fn clamp(&mut self, layout: &TableLayout, rows: usize, viewport: Size) {
        self.x = self.x.min(layout.max_scroll_x(viewport));
        self.y = self.y.min(layout.max_scroll_y(rows));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub widths: Vec<u16>,
    pub total_width: u16,
    pub body_height: u16,
}

impl TableLayout {
    pub fn compute(tree: &DisplayTree, config: &WidgetConfig, viewport: Size) -> Self {
        let widths: Vec<u16> = tree
            .min_widths
            .iter()
            .enumerate()
            .map(|(i, &min)| {
                let content = tree
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| {
                        let width = display_width(&cell.text);
                        if cell.truncated {
                            width.min(usize::from(config.truncated_width))
                        } else {
                            width
                        }
                    })
                    .max()
                    .unwrap_or(0);
                let content = u16::try_from(content).unwrap_or(u16::MAX).saturating_add(2);
                min.max(content)
            })
            .collect();

        let total_width = widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));

        Self {
            widths,
            total_width,
            // header, rule and status line
            body_height: viewport.height.saturating_sub(BODY_TOP + 1),
        }
    }

    pub fn max_scroll_x(&self, viewport: Size) -> u16 {
        self.total_width.saturating_sub(viewport.width)
    }

    pub fn max_scroll_y(&self, rows: usize) -> usize {
        rows.saturating_sub(usize::from(self.body_height))
    }

    /// Screen x of each column's left edge after horizontal scrolling.
    fn column_offsets(&self, scroll_x: u16) -> Vec<i32> {
        let mut x = -i32::from(scroll_x);
        self.widths
            .iter()
            .map(|w| {
                let left = x;
                x += i32::from(*w);
                left
            })
            .collect()
    }
}

/// Paint the whole widget. `scroll` is clamped to the current table size.
pub fn paint(widget: &Widget, scroll: &mut Scroll, palette: &Palette, buf: &mut Buffer) -> HitMap {
    let viewport = Size::new(buf.width(), buf.height());
    let tree = widget.tree();
    let layout = TableLayout::compute(tree, widget.config(), viewport);
    scroll.clamp(&layout, tree.rows.len(), viewport);

    let base = Cell::new(' ').with_fg(palette.text).with_bg(palette.background);
    buf.clear(base);

    let mut hits = HitMap::new();
    let offsets = layout.column_offsets(scroll.x);

    paint_header(tree, &layout, &offsets, palette, base, buf, &mut hits);
    buf.fill_row(
        0,
        i32::from(BODY_TOP - 1),
        viewport.width,
        base.with_fg(palette.border).with_char('─'),
    );
    paint_body(tree, &layout, &offsets, *scroll, palette, base, buf, &mut hits);
    paint_status(widget, palette, base, buf);

    match widget.floating() {
        Some(Floating::Dropdown(dropdown)) => paint_dropdown(dropdown, palette, buf, &mut hits),
        Some(Floating::Tooltip(tooltip)) => paint_tooltip(tooltip, widget.config(), palette, buf),
        None => {}
    }

    hits
}

fn paint_header(
    tree: &DisplayTree,
    layout: &TableLayout,
    offsets: &[i32],
    palette: &Palette,
    base: Cell,
    buf: &mut Buffer,
    hits: &mut HitMap,
) {
    let y = i32::from(HEADER_ROW);
    let viewport = Size::new(buf.width(), buf.height());

    for (i, header) in tree.header.iter().enumerate() {
        let (x, width) = (offsets[i], layout.widths[i]);
        let icon_space = if header.filter.is_some() { 2 } else { 0 };
        buf.set_str(
            x + 1,
            y,
            &header.label,
            width.saturating_sub(2 + icon_space),
            base.with_style(BOLD),
        );

        let Some(filter) = &header.filter else {
            continue;
        };
        let icon_x = x + i32::from(width) - 2;
        let fg = if filter.active.is_some() {
            palette.accent
        } else {
            palette.muted
        };
        buf.put(icon_x, y, base.with_fg(fg).with_char(FILTER_ICON));

        let anchor = clip_rect(icon_x, y, 1, 1, viewport);
        if !anchor.is_empty() {
            // The gap left of the icon is clickable too
            hits.push(
                clip_rect(icon_x - 1, y, 2, 1, viewport),
                HitTarget::FilterIcon {
                    column: header.key.clone(),
                    anchor,
                },
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_body(
    tree: &DisplayTree,
    layout: &TableLayout,
    offsets: &[i32],
    scroll: Scroll,
    palette: &Palette,
    base: Cell,
    buf: &mut Buffer,
    hits: &mut HitMap,
) {
    let viewport = Size::new(buf.width(), buf.height());
    let visible = tree
        .rows
        .iter()
        .enumerate()
        .skip(scroll.y)
        .take(usize::from(layout.body_height));

    for (screen_row, (row_index, row)) in visible.enumerate() {
        let y = i32::from(BODY_TOP) + screen_row as i32;

        for (i, cell) in row.cells.iter().enumerate() {
            let (x, width) = (offsets[i], layout.widths[i]);
            let inner = width.saturating_sub(2);

            let mut style = base;
            if let Some(tier) = cell.tone {
                style = style.with_fg(palette.tone(tier)).with_style(BOLD);
            }

            if !cell.truncated {
                buf.set_str(x + 1, y, &cell.text, inner, style);
                continue;
            }

            let elided = truncate_to_width(&cell.text, usize::from(inner));
            buf.set_str(x + 1, y, &elided, inner, style.with_style(UNDERLINE));

            let anchor = clip_rect(x, y, i32::from(width), 1, viewport);
            hits.push(
                anchor,
                HitTarget::TruncatedCell {
                    row: row_index,
                    column: i,
                    text: cell.text.clone(),
                    anchor,
                },
            );
        }
    }
}

fn paint_status(widget: &Widget, palette: &Palette, base: Cell, buf: &mut Buffer) {
    let Some(y) = buf.height().checked_sub(1) else {
        return;
    };
    if y < BODY_TOP {
        return;
    }

    let tree = widget.tree();
    let mut status = format!(" {} of {} rows", tree.rows.len(), tree.total_rows);
    for (key, value) in widget.filters().iter() {
        let label = tree
            .header_index(key)
            .map_or(key, |i| tree.header[i].label.as_str());
        status.push_str(&format!("  {label}: {value}"));
    }

    let style = base.with_fg(palette.muted).with_bg(palette.surface);
    buf.fill_row(0, i32::from(y), buf.width(), style);
    buf.set_str(0, i32::from(y), &status, buf.width(), style);

    let hint = "q quit ";
    let hint_width = display_width(hint) as u16;
    if display_width(&status) as u16 + hint_width < buf.width() {
        let x = i32::from(buf.width() - hint_width);
        buf.set_str(x, i32::from(y), hint, hint_width, style);
    }
}

fn paint_dropdown(dropdown: &Dropdown, palette: &Palette, buf: &mut Buffer, hits: &mut HitMap) {
    let viewport = Size::new(buf.width(), buf.height());
    let p = &dropdown.placement;
    paint_frame(p, palette, buf);
    hits.push(p.visible_rect(viewport), HitTarget::Dropdown);

    let inner = i32::from(p.size.width) - 2;
    for (index, entry) in dropdown.menu.entries.iter().enumerate() {
        let y = p.top + 1 + index as i32;
        let mut style = Cell::new(' ').with_fg(palette.text).with_bg(palette.surface);
        if index == dropdown.highlighted {
            style = style.with_fg(palette.background).with_bg(palette.accent);
        }
        buf.fill_row(p.left + 1, y, inner.max(0) as u16, style);

        let marker = if entry.active { ACTIVE_MARKER } else { ' ' };
        let line = format!("{marker} {}", entry.label);
        buf.set_str(p.left + 2, y, &line, (inner - 2).max(0) as u16, style);

        hits.push(
            clip_rect(p.left + 1, y, inner, 1, viewport),
            HitTarget::MenuOption { index },
        );
    }
}

fn paint_tooltip(tooltip: &Tooltip, config: &WidgetConfig, palette: &Palette, buf: &mut Buffer) {
    let p = &tooltip.placement;
    paint_frame(p, palette, buf);

    let style = Cell::new(' ').with_fg(palette.text).with_bg(palette.surface);
    let inner = p.size.width.saturating_sub(4);
    for (i, line) in tooltip_lines(&tooltip.text, config.tooltip_max_width)
        .iter()
        .enumerate()
    {
        buf.set_str(p.left + 2, p.top + 1 + i as i32, line, inner, style);
    }

    if let Some(arrow) = p.arrow_left {
        let (y, ch) = if p.flipped {
            (p.bottom() - 1, '▼')
        } else {
            (p.top, '▲')
        };
        buf.put(p.left + arrow, y, style.with_fg(palette.border).with_char(ch));
    }
}

fn paint_frame(p: &Placement, palette: &Palette, buf: &mut Buffer) {
    let (w, h) = (i32::from(p.size.width), i32::from(p.size.height));
    if w < 2 || h < 2 {
        return;
    }

    let fill = Cell::new(' ').with_fg(palette.border).with_bg(palette.surface);
    for dy in 0..h {
        for dx in 0..w {
            let top = dy == 0;
            let bottom = dy == h - 1;
            let left = dx == 0;
            let right = dx == w - 1;
            let ch = match (top, bottom, left, right) {
                (true, _, true, _) => '┌',
                (true, _, _, true) => '┐',
                (_, true, true, _) => '└',
                (_, true, _, true) => '┘',
                (true, ..) | (_, true, ..) => '─',
                (.., true, _) | (.., true) => '│',
                _ => ' ',
            };
            buf.put(p.left + dx, p.top + dy, fill.with_char(ch));
        }
    }
}

/// The on-screen part of a signed rectangle.
fn clip_rect(x: i32, y: i32, width: i32, height: i32, viewport: Size) -> Rect {
    let clamp = |v: i32, max: u16| v.clamp(0, i32::from(max)) as u16;
    let left = clamp(x, viewport.width);
    let top = clamp(y, viewport.height);
    let right = clamp(x + width, viewport.width);
    let bottom = clamp(y + height, viewport.height);
    Rect::new(left, top, right - left, bottom - top)
}
