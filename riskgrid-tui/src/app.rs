//! Terminal event loop: turns crossterm input and host envelopes into
//! widget events and repaints after every change.

use std::io;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use log::{debug, info, trace};
use riskgrid::{Floating, Widget, WidgetEvent};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::TuiConfig;
use crate::hit::{HitMap, HitTarget};
use crate::paint::{paint, Scroll, BODY_TOP};
use crate::surface::TerminalSurface;
use crate::terminal::Terminal;
use crate::theme::Palette;

const WHEEL_ROWS: usize = 3;
const HORIZONTAL_STEP: u16 = 4;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Repaint,
    Quit,
}

impl From<bool> for Control {
    fn from(changed: bool) -> Self {
        if changed {
            Control::Repaint
        } else {
            Control::Continue
        }
    }
}

pub struct App {
    widget: Widget,
    terminal: Terminal,
    palette: Palette,
    scroll: Scroll,
    hits: HitMap,
    /// Body row and column of the truncated cell under the pointer.
    hovered: Option<(usize, usize)>,
}

impl App {
    pub fn new(config: TuiConfig) -> Result<Self, AppError> {
        let terminal = Terminal::new()?;
        let surface = TerminalSurface::new(terminal.viewport()?);

        Ok(Self {
            widget: Widget::new(config.widget, &surface),
            terminal,
            palette: config.theme.palette(),
            scroll: Scroll::default(),
            hits: HitMap::new(),
            hovered: None,
        })
    }

    pub async fn run(mut self, mut feed: mpsc::Receiver<Value>) -> Result<(), AppError> {
        let mut events = EventStream::new();
        let mut feed_open = true;

        self.repaint()?;

        loop {
            let control = tokio::select! {
                Some(event) = events.next() => {
                    let event = event?;
                    trace!("Terminal event: {:?}", event);
                    self.on_terminal_event(event)?
                }
                message = feed.recv(), if feed_open => match message {
                    Some(value) => self.on_payload(value)?,
                    None => {
                        debug!("Feed ended");
                        feed_open = false;
                        Control::Continue
                    }
                },
                else => Control::Quit,
            };

            match control {
                Control::Quit => break,
                Control::Repaint => self.repaint()?,
                Control::Continue => {}
            }
        }

        info!("Shutting down");
        Ok(())
    }

    fn repaint(&mut self) -> io::Result<()> {
        self.hits = self
            .terminal
            .draw(|buf| paint(&self.widget, &mut self.scroll, &self.palette, buf))?;
        Ok(())
    }

    /// A surface measured against the terminal as it is right now.
    fn surface(&self) -> io::Result<TerminalSurface> {
        Ok(TerminalSurface::new(self.terminal.viewport()?))
    }

    fn dispatch(&mut self, event: WidgetEvent) -> io::Result<Control> {
        let surface = self.surface()?;
        Ok(self.widget.handle(event, &surface).into())
    }

    fn on_payload(&mut self, value: Value) -> io::Result<Control> {
        let control = self.dispatch(WidgetEvent::Payload(value))?;
        if control == Control::Repaint {
            info!(
                "Dataset loaded: {} columns, {} rows",
                self.widget.dataset().columns.len(),
                self.widget.dataset().rows.len()
            );
            self.scroll = Scroll::default();
            self.hovered = None;
        }
        Ok(control)
    }

    fn on_terminal_event(&mut self, event: CrosstermEvent) -> io::Result<Control> {
        match event {
            CrosstermEvent::Key(key) => self.on_key(key),
            CrosstermEvent::Mouse(mouse) => self.on_mouse(mouse),
            CrosstermEvent::Resize(width, height) => {
                self.dispatch(WidgetEvent::Resize { width, height })?;
                Ok(Control::Repaint)
            }
            _ => Ok(Control::Continue),
        }
    }

    fn dropdown_open(&self) -> bool {
        matches!(self.widget.floating(), Some(Floating::Dropdown(_)))
    }

    fn on_key(&mut self, key: KeyEvent) -> io::Result<Control> {
        if key.kind != KeyEventKind::Press {
            return Ok(Control::Continue);
        }

        let dropdown_open = self.dropdown_open();
        let page = self.page_rows();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Ok(Control::Quit)
            }
            KeyCode::Char('q') => Ok(Control::Quit),
            KeyCode::Esc => self.dispatch(WidgetEvent::OutsideClick),
            KeyCode::Up if dropdown_open => self.dispatch(WidgetEvent::MenuMove { delta: -1 }),
            KeyCode::Down if dropdown_open => self.dispatch(WidgetEvent::MenuMove { delta: 1 }),
            KeyCode::Enter if dropdown_open => self.dispatch(WidgetEvent::MenuChoose),
            KeyCode::Up => self.scroll_rows(-1),
            KeyCode::Down => self.scroll_rows(1),
            KeyCode::PageUp => self.scroll_rows(-page),
            KeyCode::PageDown => self.scroll_rows(page),
            KeyCode::Left => self.scroll_columns(-i32::from(HORIZONTAL_STEP)),
            KeyCode::Right => self.scroll_columns(i32::from(HORIZONTAL_STEP)),
            _ => Ok(Control::Continue),
        }
    }

    fn page_rows(&self) -> isize {
        let height = self.terminal.viewport().map_or(0, |size| size.height);
        height.saturating_sub(BODY_TOP + 1).max(1) as isize
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> io::Result<Control> {
        let (x, y) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_click(x, y),
            MouseEventKind::Moved => self.on_hover(x, y),
            MouseEventKind::ScrollUp => self.scroll_rows(-(WHEEL_ROWS as isize)),
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_ROWS as isize),
            MouseEventKind::ScrollLeft => self.scroll_columns(-i32::from(HORIZONTAL_STEP)),
            MouseEventKind::ScrollRight => self.scroll_columns(i32::from(HORIZONTAL_STEP)),
            _ => Ok(Control::Continue),
        }
    }

    fn on_click(&mut self, x: u16, y: u16) -> io::Result<Control> {
        let event = match self.hits.hit(x, y).cloned() {
            Some(HitTarget::FilterIcon { column, anchor }) => {
                WidgetEvent::FilterIconActivated { column, anchor }
            }
            Some(HitTarget::MenuOption { index }) => {
                let Some(Floating::Dropdown(dropdown)) = self.widget.floating() else {
                    return Ok(Control::Continue);
                };
                let Some(entry) = dropdown.menu.entries.get(index) else {
                    return Ok(Control::Continue);
                };
                WidgetEvent::FilterOptionSelected {
                    column: dropdown.menu.column.clone(),
                    value: entry.value.clone(),
                }
            }
            Some(HitTarget::Dropdown) => return Ok(Control::Continue),
            Some(HitTarget::TruncatedCell { .. }) | None => WidgetEvent::OutsideClick,
        };

        self.dispatch(event)
    }

    fn on_hover(&mut self, x: u16, y: u16) -> io::Result<Control> {
        match self.hits.hit(x, y).cloned() {
            Some(HitTarget::MenuOption { index }) => {
                let Some(Floating::Dropdown(dropdown)) = self.widget.floating() else {
                    return Ok(Control::Continue);
                };
                let delta = index as i32 - dropdown.highlighted as i32;
                if delta == 0 {
                    return Ok(Control::Continue);
                }
                self.dispatch(WidgetEvent::MenuMove { delta })
            }
            // Crossing cells on the way to a menu must not dismiss it
            _ if self.dropdown_open() => Ok(Control::Continue),
            Some(HitTarget::TruncatedCell {
                row,
                column,
                text,
                anchor,
            }) => {
                let showing = matches!(self.widget.floating(), Some(Floating::Tooltip(_)));
                let event = if showing && self.hovered == Some((row, column)) {
                    WidgetEvent::HoverMove { text, anchor }
                } else {
                    WidgetEvent::HoverEnter { text, anchor }
                };
                self.hovered = Some((row, column));
                self.dispatch(event)
            }
            _ => {
                if self.hovered.take().is_some() {
                    self.dispatch(WidgetEvent::HoverLeave)
                } else {
                    Ok(Control::Continue)
                }
            }
        }
    }

    fn scroll_rows(&mut self, delta: isize) -> io::Result<Control> {
        self.scroll.y = self.scroll.y.saturating_add_signed(delta);
        self.scrolled()
    }

    fn scroll_columns(&mut self, delta: i32) -> io::Result<Control> {
        let x = (i32::from(self.scroll.x) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll.x = x as u16;
        self.scrolled()
    }

    fn scrolled(&mut self) -> io::Result<Control> {
        self.dispatch(WidgetEvent::Scroll)?;
        self.hovered = None;
        Ok(Control::Repaint)
    }
}
