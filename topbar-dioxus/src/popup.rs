//! Popup expansion state.
//!
//! At most one item is expanded at a time. Switching between popups goes
//! straight from one `Expanded` state to the next.

use crate::store::ItemKey;

/// Which popup, if any, is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Closed,
    Expanded(String),
}

impl PopupState {
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Expanded(name) => Some(name),
        }
    }
}

/// Result of a successful [`Topbar::dismiss`](crate::Topbar::dismiss).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// Nothing was expanded.
    NotExpanded,
    Closed,
    /// The item's handler vetoed the dismissal.
    Blocked,
    /// The item's handler asked to be unregistered.
    Removed,
}

/// Expansion bookkeeping for the popup and the hamburger menu.
#[derive(Debug, Default)]
pub(crate) struct PopupController {
    expanded: Option<ItemKey>,
    menu_expanded: bool,
}

impl PopupController {
    pub fn expanded(&self) -> Option<ItemKey> {
        self.expanded
    }

    pub fn is_expanded(&self, key: ItemKey) -> bool {
        self.expanded == Some(key)
    }

    pub fn menu_expanded(&self) -> bool {
        self.menu_expanded
    }

    /// Expand `key`, collapsing the menu. Returns whether anything changed.
    pub fn select(&mut self, key: ItemKey) -> bool {
        let changed = self.expanded != Some(key) || self.menu_expanded;
        self.expanded = Some(key);
        self.menu_expanded = false;
        changed
    }

    /// Close the popup if `key` is the expanded item.
    pub fn close_if(&mut self, key: ItemKey) -> bool {
        if self.is_expanded(key) {
            self.expanded = None;
            true
        } else {
            false
        }
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_expanded = !self.menu_expanded;
        self.menu_expanded
    }

    /// Force everything closed. Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.expanded.is_some() || self.menu_expanded;
        self.expanded = None;
        self.menu_expanded = false;
        changed
    }
}
