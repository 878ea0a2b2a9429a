//! Demo application component and the sample items it shows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;

use crate::components::TopbarBar;
use crate::config::PopupConfig;
use crate::hooks::use_topbar;
use crate::{DismissReply, Fragment, ItemHandle, ItemSpec, Topbar};

/// Register the sample items shown by the demo.
///
/// The returned handles keep the caller in charge of unregistering them.
pub fn register_demo_items(topbar: &Topbar<Fragment>) -> Result<Vec<ItemHandle<Fragment>>> {
    let pinned = Arc::new(AtomicBool::new(false));
    let handles = vec![
        topbar.register(ItemSpec::new("title", Fragment::new(title_button)).priority(100))?,
        topbar.register(
            ItemSpec::new("welcome", Fragment::new(welcome_button))
                .popup(Fragment::new(welcome_popup))
                .priority(10)
                .start_open(true)
                .on_dismiss(|| DismissReply::Remove),
        )?,
        topbar.register(notifications_item(pinned))?,
        topbar.register(
            ItemSpec::new("account", Fragment::new(account_button))
                .popup(Fragment::new(account_popup))
                .priority(-10),
        )?,
    ];
    log::info!("Registered {} demo items", handles.len());
    Ok(handles)
}

/// Notifications item whose popup refuses to close while `pinned` is set.
///
/// The popup's pin button and the dismiss handler share `pinned`.
fn notifications_item(pinned: Arc<AtomicBool>) -> ItemSpec<Fragment> {
    let popup_pinned = Arc::clone(&pinned);
    ItemSpec::new("notifications", Fragment::new(notifications_button))
        .popup(Fragment::new(move || notifications_popup(&popup_pinned)))
        .on_dismiss(move || {
            if pinned.load(Ordering::Relaxed) {
                DismissReply::Block
            } else {
                DismissReply::Proceed
            }
        })
}

/// Root component of the demo window.
#[component]
pub fn App() -> Element {
    let topbar = use_topbar();
    let popup_config = use_context::<PopupConfig>();

    let topbar_reset = topbar.clone();
    let expanded = topbar
        .popup_state()
        .name()
        .map_or_else(|| "none".to_string(), str::to_string);
    let count = topbar.len();

    rsx! {
        document::Title { "topbar - {expanded}" }

        TopbarBar { topbar: topbar.clone(), inset: popup_config.inset }

        main {
            class: "demo-main",
            p { "{count} items registered, expanded popup: {expanded}" }
            button {
                onclick: move |_| {
                    log::info!("Resetting top bar");
                    topbar_reset.reset();
                },
                "Reset top bar"
            }
        }
    }
}

fn title_button() -> Element {
    rsx! { strong { "Sandbox" } }
}

fn welcome_button() -> Element {
    rsx! { span { "Welcome" } }
}

fn welcome_popup() -> Element {
    rsx! {
        h3 { "Welcome" }
        p { "Close this popup to remove the item from the top bar." }
    }
}

fn notifications_button() -> Element {
    rsx! { span { "Notifications" } }
}

fn notifications_popup(flag: &Arc<AtomicBool>) -> Element {
    let initial = flag.load(Ordering::Relaxed);
    let mut pinned = use_signal(move || initial);
    let label = if pinned() { "Unpin" } else { "Pin open" };
    let flag = Arc::clone(flag);

    rsx! {
        p { "No new notifications." }
        button {
            onclick: move |_| {
                let next = !pinned();
                flag.store(next, Ordering::Relaxed);
                pinned.set(next);
            },
            "{label}"
        }
    }
}

fn account_button() -> Element {
    rsx! { span { "Account" } }
}

fn account_popup() -> Element {
    rsx! { p { "Signed in as demo." } }
}
