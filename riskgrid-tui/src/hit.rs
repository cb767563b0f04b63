use riskgrid::Rect;

/// What lies under a screen position after a paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    FilterIcon { column: String, anchor: Rect },
    TruncatedCell { row: usize, column: usize, text: String, anchor: Rect },
    MenuOption { index: usize },
    /// Any other part of an open dropdown.
    Dropdown,
}

/// Hit regions in paint order. Later regions sit on top.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, target: HitTarget) {
        if !rect.is_empty() {
            self.regions.push((rect, target));
        }
    }

    /// Topmost target containing the point.
    pub fn hit(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| target)
    }
}
