//! Popup placement under the top bar item that spawned it.
//!
//! Items closer to the left edge of the window get a left-anchored popup,
//! the others a right-anchored one.

/// Default distance between the trigger item's midpoint and the popup edge.
pub const DEFAULT_INSET: f64 = 50.0;

/// Horizontal extent of the trigger item, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemRect {
    pub left: f64,
    pub right: f64,
}

impl ItemRect {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn midpoint(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}

/// Which window edge the popup is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

impl Align {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Popup offset from the anchored edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopupPosition {
    pub align: Align,
    pub px: f64,
}

impl PopupPosition {
    /// Inline style anchoring the popup, e.g. `right: 120px;`.
    pub fn css(&self) -> String {
        format!("{}: {}px;", self.align.as_css(), self.px)
    }
}

pub fn estimate(rect: ItemRect, viewport_width: f64) -> PopupPosition {
    estimate_with_inset(rect, viewport_width, DEFAULT_INSET)
}

pub fn estimate_with_inset(rect: ItemRect, viewport_width: f64, inset: f64) -> PopupPosition {
    let item_mid = rect.midpoint();
    if item_mid < viewport_width / 2.0 {
        PopupPosition {
            align: Align::Left,
            px: (item_mid - inset).max(0.0),
        }
    } else {
        PopupPosition {
            align: Align::Right,
            px: (viewport_width - item_mid - inset).max(0.0),
        }
    }
}

/// Last known popup position, with a `left: 0` placeholder until geometry arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    position: Option<PopupPosition>,
    inset: f64,
}

impl Default for PopupPlacement {
    fn default() -> Self {
        Self::new(DEFAULT_INSET)
    }
}

impl PopupPlacement {
    pub fn new(inset: f64) -> Self {
        Self {
            position: None,
            inset,
        }
    }

    pub fn get(&self) -> PopupPosition {
        self.position.unwrap_or_default()
    }

    /// Recompute from fresh geometry. Returns `true` only if the position moved.
    ///
    /// A viewport that has not been measured yet (width of zero or less) leaves
    /// the current position untouched.
    pub fn update(&mut self, rect: ItemRect, viewport_width: f64) -> bool {
        if viewport_width <= 0.0 {
            return false;
        }
        let next = estimate_with_inset(rect, viewport_width, self.inset);
        if self.position == Some(next) {
            return false;
        }
        self.position = Some(next);
        true
    }
}
