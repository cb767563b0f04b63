//! Placement of floating elements (filter dropdowns and tooltips).
//!
//! Both kinds share one algorithm: center under the anchor, clamp
//! horizontally into the viewport, and flip above the anchor when there is
//! no room below. Callers must place again every time an element opens,
//! with fresh anchor and content measurements.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOptions {
    /// Minimum distance kept from the viewport edges.
    pub padding: u16,
    /// Distance between the anchor and the floating element.
    pub gap: u16,
    /// When set, an arrow offset is computed and kept this far inside the
    /// element's horizontal edges.
    pub arrow_inset: Option<u16>,
}

impl PlacementOptions {
    pub const TOOLTIP_PIXELS: Self = Self {
        padding: 10,
        gap: 10,
        arrow_inset: Some(16),
    };

    pub const DROPDOWN_PIXELS: Self = Self {
        padding: 10,
        gap: 8,
        arrow_inset: None,
    };

    pub const TOOLTIP_CELLS: Self = Self {
        padding: 1,
        gap: 1,
        arrow_inset: Some(2),
    };

    pub const DROPDOWN_CELLS: Self = Self {
        padding: 1,
        gap: 0,
        arrow_inset: None,
    };
}

/// Where a floating element goes. Coordinates are signed: a flipped element
/// on a tiny viewport may start above the top edge, and surfaces clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub left: i32,
    pub top: i32,
    pub size: Size,
    /// Placed above the anchor because it did not fit below.
    pub flipped: bool,
    /// Arrow position relative to `left`.
    pub arrow_left: Option<i32>,
}

impl Placement {
    pub fn right(&self) -> i32 {
        self.left + i32::from(self.size.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top + i32::from(self.size.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (i32::from(x), i32::from(y));
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// The on-surface part of the element.
    pub fn visible_rect(&self, viewport: Size) -> Rect {
        let clamp = |v: i32, max: u16| v.clamp(0, i32::from(max)) as u16;
        let x = clamp(self.left, viewport.width);
        let y = clamp(self.top, viewport.height);
        let right = clamp(self.right(), viewport.width);
        let bottom = clamp(self.bottom(), viewport.height);
        Rect::new(x, y, right - x, bottom - y)
    }
}

pub fn place(anchor: Rect, size: Size, viewport: Size, opts: &PlacementOptions) -> Placement {
    let padding = i32::from(opts.padding);
    let gap = i32::from(opts.gap);
    let width = i32::from(size.width);
    let height = i32::from(size.height);
    let center = anchor.center_x();

    // Lower bound wins when the viewport is narrower than the element
    let max_left = i32::from(viewport.width) - width - padding;
    let left = (center - width / 2).min(max_left).max(padding);

    let below = i32::from(anchor.bottom()) + gap;
    let flipped = below + height > i32::from(viewport.height) - padding;
    let top = if flipped {
        i32::from(anchor.y) - gap - height
    } else {
        below
    };

    let arrow_left = opts.arrow_inset.map(|inset| {
        let inset = i32::from(inset);
        (center - left).min(width - inset).max(inset)
    });

    Placement {
        left,
        top,
        size,
        flipped,
        arrow_left,
    }
}
