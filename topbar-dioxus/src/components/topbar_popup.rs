//! Popup box shown under the expanded top bar item.
//!
//! The backdrop covers the window; clicking it, or the close button, asks the
//! registry to dismiss the popup. Clicks inside the frame stay inside.

use dioxus::prelude::*;

use crate::components::FragmentView;
use crate::position::PopupPosition;
use crate::{DismissOutcome, Fragment, Topbar};

fn dismiss_popup(topbar: &Topbar<Fragment>) {
    match topbar.dismiss() {
        Ok(DismissOutcome::Blocked) => log::info!("Popup dismissal blocked by item"),
        Ok(outcome) => log::debug!("Popup dismissed: {outcome:?}"),
        Err(err) => log::error!("Failed to dismiss popup: {err}"),
    }
}

/// Popup for the item called `name`, anchored at `position`.
#[component]
pub fn TopbarPopup(
    topbar: Topbar<Fragment>,
    name: String,
    position: PopupPosition,
    content: Fragment,
) -> Element {
    let topbar_close = topbar.clone();
    let frame_style = position.css();

    rsx! {
        div {
            class: "popup {name}",
            onclick: move |evt| {
                // Clicked outside the frame.
                evt.stop_propagation();
                dismiss_popup(&topbar);
            },

            div {
                class: "frame",
                style: "{frame_style}",
                onclick: move |evt| evt.stop_propagation(),

                button {
                    class: "close-popup",
                    title: "Close",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        dismiss_popup(&topbar_close);
                    },
                    "\u{00d7}"
                }

                FragmentView { fragment: content.clone() }
            }
        }
    }
}
