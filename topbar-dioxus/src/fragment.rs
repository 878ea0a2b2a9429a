//! Renderable content for top bar items in the Dioxus front end.

use std::fmt;
use std::sync::Arc;

use dioxus::prelude::*;

/// A render function shown as an item's button or popup body.
///
/// It renders inside its own scope, so it may use hooks. Closures may capture
/// state shared with the item's dismiss handler, which keeps that state
/// scoped to one registration instead of the whole process.
#[derive(Clone)]
pub struct Fragment(Arc<dyn Fn() -> Element + Send + Sync>);

impl Fragment {
    pub fn new(render: impl Fn() -> Element + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    pub fn render(&self) -> Element {
        (self.0)()
    }
}

/// Clones of one fragment are equal; separately created fragments are not.
impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fragment")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl From<fn() -> Element> for Fragment {
    fn from(render: fn() -> Element) -> Self {
        Self::new(render)
    }
}
