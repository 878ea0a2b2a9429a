//! Test helpers for registry tests.
//!
//! Items in tests use `&'static str` as their fragment type so snapshots can
//! be compared by name alone.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::item::{DismissReply, ItemSpec};
use crate::registry::{Topbar, TopbarChange};

pub type Recorded = Arc<Mutex<Vec<TopbarChange>>>;

/// Subscribe a listener that records every change in order.
pub fn record_changes<V>(topbar: &Topbar<V>) -> Recorded {
    let recorded: Recorded = Arc::default();
    let sink = Arc::clone(&recorded);
    topbar.subscribe(move |change| sink.lock().push(change.clone()));
    recorded
}

/// Item names in display order.
pub fn names(topbar: &Topbar<&'static str>) -> Vec<String> {
    topbar.items().into_iter().map(|item| item.name).collect()
}

/// Item with a popup and no dismiss handler.
pub fn popup_item(name: &'static str) -> ItemSpec<&'static str> {
    ItemSpec::new(name, name).popup("popup")
}

/// Item with a popup whose dismiss handler always answers `reply`.
pub fn dismissing_item(name: &'static str, reply: &'static str) -> ItemSpec<&'static str> {
    popup_item(name).on_dismiss(move || DismissReply::from(reply))
}

/// Register `spec`, panicking on failure.
pub fn register(
    topbar: &Topbar<&'static str>,
    spec: ItemSpec<&'static str>,
) -> crate::ItemHandle<&'static str> {
    topbar.register(spec).expect("register should succeed")
}

/// Assert that the popup of `name` is the visible one.
pub fn assert_expanded(topbar: &Topbar<&'static str>, name: &str) {
    let current = topbar.current_popup().map(|item| item.name);
    assert_eq!(
        current.as_deref(),
        Some(name),
        "\n--- expected popup ---\n{name}\n--- actual ---\n{current:?}\n"
    );
}
