//! Scenario tests for the top bar.
//!
//! These drive the registry the way the view layer does (register, click,
//! dismiss, reset) and check the observable state after each step.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use parking_lot::Mutex;

use crate::item::{DismissReply, ItemSpec};
use crate::popup::{DismissOutcome, PopupState};
use crate::registry::{Topbar, TopbarChange};
use crate::test_helpers::{
    assert_expanded, dismissing_item, names, popup_item, record_changes, register,
};
use crate::TopbarError;

// --- Ordering ---

#[test]
fn priority_then_registration_order() {
    let topbar = Topbar::new();
    register(&topbar, ItemSpec::new("a", "a").priority(1));
    register(&topbar, ItemSpec::new("b", "b").priority(5));
    register(&topbar, ItemSpec::new("c", "c").priority(1));
    assert_eq!(names(&topbar), ["b", "a", "c"]);
}

#[test]
fn order_stays_sorted_after_reregistration() {
    let topbar = Topbar::new();
    let a = register(&topbar, ItemSpec::new("a", "a").priority(1));
    register(&topbar, ItemSpec::new("b", "b").priority(5));
    register(&topbar, ItemSpec::new("c", "c").priority(1));
    register(&topbar, ItemSpec::new("d", "d"));

    a.unregister().expect("unregister should succeed");
    register(&topbar, ItemSpec::new("a", "a").priority(1));

    assert_eq!(names(&topbar), ["b", "c", "a", "d"]);
    let priorities: Vec<i32> = topbar.items().iter().map(|item| item.priority).collect();
    assert!(priorities.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn duplicate_name_is_rejected() {
    let topbar = Topbar::new();
    register(&topbar, ItemSpec::new("a", "first"));
    let err = topbar
        .register(ItemSpec::new("a", "second"))
        .expect_err("second registration should fail");

    assert_eq!(err, TopbarError::DuplicateName("a".into()));
    let items = topbar.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "first");
}

#[test]
fn items_never_contain_duplicate_names() {
    let topbar = Topbar::new();
    for name in ["a", "b", "a", "c", "b"] {
        let _ = topbar.register(ItemSpec::new(name, name));
    }
    let listed = names(&topbar);
    let unique: HashSet<&String> = listed.iter().collect();
    assert_eq!(listed.len(), unique.len());
    assert_eq!(listed.len(), 3);
}

// --- Expansion ---

#[test]
fn start_open_item_is_current_popup() {
    let topbar = Topbar::new();
    register(&topbar, popup_item("x").start_open(true));
    assert_expanded(&topbar, "x");
}

#[test]
fn select_switches_without_dismissing() {
    let topbar = Topbar::new();
    let dismissed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&dismissed);
    register(
        &topbar,
        popup_item("a").on_dismiss(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            DismissReply::Proceed
        }),
    );
    register(&topbar, popup_item("b"));

    assert!(topbar.select("a").expect("select should succeed"));
    assert!(topbar.select("b").expect("select should succeed"));
    assert_expanded(&topbar, "b");
    assert_eq!(dismissed.load(Ordering::SeqCst), 0);
}

#[test]
fn reselecting_keeps_popup_open() {
    let topbar = Topbar::new();
    register(&topbar, popup_item("a"));
    topbar.select("a").expect("select should succeed");
    let changes = record_changes(&topbar);
    topbar.select("a").expect("select should succeed");
    assert_expanded(&topbar, "a");
    assert!(changes.lock().is_empty());
}

#[test]
fn unregistering_expanded_item_closes_popup() {
    let topbar = Topbar::new();
    let handle = register(&topbar, popup_item("a").start_open(true));
    let changes = record_changes(&topbar);

    handle.unregister().expect("unregister should succeed");

    assert_eq!(topbar.popup_state(), PopupState::Closed);
    assert!(!handle.is_registered());
    assert_eq!(
        *changes.lock(),
        vec![
            TopbarChange::Expanded(None),
            TopbarChange::Unregistered("a".into()),
        ]
    );
}

#[test]
fn unregister_twice_is_a_noop() {
    let topbar = Topbar::new();
    let handle = register(&topbar, ItemSpec::new("a", "a"));
    handle.unregister().expect("unregister should succeed");
    let changes = record_changes(&topbar);
    handle.unregister().expect("second unregister should succeed");
    assert!(changes.lock().is_empty());
}

#[test]
fn stale_handle_keeps_new_registration() {
    let topbar = Topbar::new();
    let old = register(&topbar, ItemSpec::new("a", "old"));
    old.unregister().expect("unregister should succeed");
    let new = register(&topbar, ItemSpec::new("a", "new"));

    old.unregister().expect("stale unregister should succeed");

    assert!(new.is_registered());
    assert_eq!(topbar.get("a").map(|item| item.content), Some("new"));
}

// --- Dismissal ---

#[test]
fn dismiss_without_handler_closes() {
    let topbar = Topbar::new();
    register(&topbar, popup_item("a").start_open(true));
    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::Closed));
    assert!(topbar.current_popup().is_none());
    assert!(topbar.contains("a"));
}

#[test]
fn dismiss_when_closed_does_nothing() {
    let topbar: Topbar<&'static str> = Topbar::new();
    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::NotExpanded));
}

#[test]
fn empty_reply_proceeds() {
    let topbar = Topbar::new();
    register(&topbar, dismissing_item("a", "").start_open(true));
    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::Closed));
    assert!(topbar.current_popup().is_none());
}

#[test]
fn blocking_handler_keeps_popup() {
    let topbar = Topbar::new();
    register(&topbar, dismissing_item("a", "block").start_open(true));
    let changes = record_changes(&topbar);

    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::Blocked));
    assert_expanded(&topbar, "a");
    assert!(changes.lock().is_empty());
}

#[test]
fn removing_handler_unregisters_item() {
    let topbar = Topbar::new();
    let handle = register(&topbar, dismissing_item("a", "remove").start_open(true));
    register(&topbar, ItemSpec::new("b", "b"));
    let changes = record_changes(&topbar);

    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::Removed));

    assert!(topbar.current_popup().is_none());
    assert_eq!(names(&topbar), ["b"]);
    assert!(!handle.is_registered());
    assert_eq!(
        *changes.lock(),
        vec![
            TopbarChange::Unregistered("a".into()),
            TopbarChange::Expanded(None),
        ]
    );
}

#[test]
fn bogus_reply_fails_and_keeps_state() {
    let topbar = Topbar::new();
    register(&topbar, dismissing_item("a", "close-please").start_open(true));

    let err = topbar.dismiss().expect_err("bogus reply should fail");

    assert_eq!(
        err,
        TopbarError::InvalidDismissResult {
            name: "a".into(),
            value: "close-please".into(),
        }
    );
    assert_expanded(&topbar, "a");
}

#[test]
fn reset_bypasses_blocking_handler() {
    let topbar = Topbar::new();
    register(&topbar, dismissing_item("a", "block").start_open(true));
    topbar.toggle_menu().expect("toggle should succeed");

    topbar.reset();

    assert!(topbar.current_popup().is_none());
    assert!(!topbar.menu_expanded());
    assert!(topbar.contains("a"));
}

// --- Re-entrancy ---

#[test]
fn handler_cannot_register() {
    let topbar = Topbar::new();
    let inner_result = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&inner_result);
    let reentrant = topbar.clone();
    register(
        &topbar,
        popup_item("a").start_open(true).on_dismiss(move || {
            *slot.lock() = Some(reentrant.register(ItemSpec::new("b", "b")).map(|_| ()));
            DismissReply::Proceed
        }),
    );

    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::Closed));
    assert_eq!(
        *inner_result.lock(),
        Some(Err(TopbarError::Reentrant {
            operation: "register"
        }))
    );
    assert!(!topbar.contains("b"));
}

#[test]
fn listener_cannot_select() {
    let topbar = Topbar::new();
    register(&topbar, popup_item("a"));
    let inner_result = Arc::new(Mutex::new(Vec::new()));
    let slot = Arc::clone(&inner_result);
    let reentrant = topbar.clone();
    topbar.subscribe(move |_| slot.lock().push(reentrant.select("a")));

    topbar.toggle_menu().expect("toggle should succeed");

    assert_eq!(
        *inner_result.lock(),
        vec![Err(TopbarError::Reentrant { operation: "select" })]
    );
    assert!(topbar.current_popup().is_none());
}

#[test]
fn handler_may_reset() {
    let topbar = Topbar::new();
    let reentrant = topbar.clone();
    register(
        &topbar,
        popup_item("a").start_open(true).on_dismiss(move || {
            reentrant.reset();
            DismissReply::Block
        }),
    );

    assert_eq!(topbar.dismiss(), Ok(DismissOutcome::Closed));
    assert!(topbar.current_popup().is_none());
    assert_eq!(topbar.popup_state(), PopupState::Closed);
}

#[test]
fn other_threads_are_not_blocked_by_a_dispatch() {
    let topbar = Topbar::new();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = Mutex::new(entered_tx);
    let release_rx = Mutex::new(release_rx);
    let first_call = AtomicBool::new(true);
    topbar.subscribe(move |_| {
        if first_call.swap(false, Ordering::SeqCst) {
            entered_tx.lock().send(()).expect("main thread is waiting");
            release_rx.lock().recv().expect("main thread releases");
        }
    });

    let worker = topbar.clone();
    let dispatching = thread::spawn(move || worker.toggle_menu());
    entered_rx.recv().expect("listener should start");

    // The worker is still inside its listener here.
    let handle = topbar.register(ItemSpec::new("b", "b"));
    release_tx.send(()).expect("worker is waiting");

    assert!(handle.is_ok());
    assert_eq!(dispatching.join().expect("thread should finish"), Ok(true));
    assert_eq!(names(&topbar), ["b"]);
    assert!(topbar.menu_expanded());
}

#[test]
fn dispatching_thread_is_idle_after_listener_returns() {
    let topbar = Topbar::new();
    topbar.subscribe(|_| {});
    topbar.toggle_menu().expect("toggle should succeed");
    register(&topbar, ItemSpec::new("b", "b"));
    assert!(topbar.contains("b"));
}

#[test]
fn registry_is_usable_after_handler_panics() {
    let topbar = Topbar::new();
    register(
        &topbar,
        popup_item("a")
            .start_open(true)
            .on_dismiss(|| panic!("handler exploded")),
    );

    let shared = topbar.clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| shared.dismiss()));
    assert!(result.is_err());

    register(&topbar, ItemSpec::new("b", "b"));
    assert!(topbar.contains("b"));
}

// --- Listeners ---

#[test]
fn listeners_see_every_mutation() {
    let topbar = Topbar::new();
    let changes = record_changes(&topbar);

    let a = register(&topbar, popup_item("a"));
    topbar.select("a").expect("select should succeed");
    topbar.toggle_menu().expect("toggle should succeed");
    topbar.dismiss().expect("dismiss should succeed");
    a.unregister().expect("unregister should succeed");

    assert_eq!(
        *changes.lock(),
        vec![
            TopbarChange::Registered("a".into()),
            TopbarChange::Expanded(Some("a".into())),
            TopbarChange::MenuToggled(true),
            TopbarChange::Expanded(None),
            TopbarChange::Unregistered("a".into()),
        ]
    );
}

#[test]
fn topbar_is_shareable_across_threads() {
    let topbar = Topbar::new();
    let worker = topbar.clone();
    thread::spawn(move || {
        worker
            .register(ItemSpec::new("remote", "remote"))
            .expect("register should succeed");
    })
    .join()
    .expect("thread should finish");
    assert_eq!(names(&topbar), ["remote"]);
}
