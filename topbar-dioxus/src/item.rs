//! Top bar item records and the spec used to register them.

use std::fmt;
use std::sync::Arc;

use crate::error::TopbarError;

/// Callback deciding what happens when an expanded item's popup is dismissed.
pub type DismissHandler = Arc<dyn Fn() -> DismissReply + Send + Sync>;

/// Answer of a [`DismissHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DismissReply {
    /// Close the popup normally.
    #[default]
    Proceed,
    /// Keep the popup open.
    Block,
    /// Unregister the item, then close the popup.
    Remove,
    /// A sentinel the top bar does not understand. Dismissing fails.
    Unrecognized(String),
}

impl From<&str> for DismissReply {
    fn from(value: &str) -> Self {
        match value {
            "" => Self::Proceed,
            "block" => Self::Block,
            "remove" => Self::Remove,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<Option<&str>> for DismissReply {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Proceed, Self::from)
    }
}

/// Description of an item to register, built with chained setters.
///
/// `V` is the renderable fragment type of the view layer; the registry never
/// looks inside it.
pub struct ItemSpec<V> {
    pub(crate) name: String,
    pub(crate) content: V,
    pub(crate) popup: Option<V>,
    pub(crate) priority: i32,
    pub(crate) start_open: bool,
    pub(crate) on_dismiss: Option<DismissHandler>,
}

impl<V> ItemSpec<V> {
    pub fn new(name: impl Into<String>, content: V) -> Self {
        Self {
            name: name.into(),
            content,
            popup: None,
            priority: 0,
            start_open: false,
            on_dismiss: None,
        }
    }

    /// Content shown in a popup box when the item is clicked.
    #[must_use]
    pub fn popup(mut self, popup: V) -> Self {
        self.popup = Some(popup);
        self
    }

    /// Higher priorities sort first. Equal priorities keep registration order.
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Expand this item's popup as soon as it is registered.
    #[must_use]
    pub fn start_open(mut self, start_open: bool) -> Self {
        self.start_open = start_open;
        self
    }

    #[must_use]
    pub fn on_dismiss<F>(mut self, handler: F) -> Self
    where
        F: Fn() -> DismissReply + Send + Sync + 'static,
    {
        self.on_dismiss = Some(Arc::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the registration invariants that do not depend on other items.
    pub(crate) fn validate(&self) -> Result<(), TopbarError> {
        let invalid = |reason| TopbarError::InvalidConfiguration {
            name: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        // The name doubles as the item's CSS class.
        if self.name.chars().any(char::is_whitespace) {
            return Err(invalid("name must not contain whitespace"));
        }
        if self.popup.is_none() && (self.start_open || self.on_dismiss.is_some()) {
            return Err(invalid(
                "can't set start_open or on_dismiss without setting a popup",
            ));
        }
        Ok(())
    }

    pub(crate) fn into_item(self) -> Item<V> {
        Item {
            name: self.name,
            content: self.content,
            popup: self.popup,
            priority: self.priority,
            start_open: self.start_open,
            on_dismiss: self.on_dismiss,
        }
    }
}

/// A registered top bar item, as handed out by [`Topbar::items`](crate::Topbar::items).
#[derive(Clone)]
pub struct Item<V> {
    pub name: String,
    pub content: V,
    pub popup: Option<V>,
    pub priority: i32,
    pub start_open: bool,
    pub on_dismiss: Option<DismissHandler>,
}

impl<V> Item<V> {
    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }
}

impl<V: fmt::Debug> fmt::Debug for Item<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("content", &self.content)
            .field("popup", &self.popup)
            .field("priority", &self.priority)
            .field("start_open", &self.start_open)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}
