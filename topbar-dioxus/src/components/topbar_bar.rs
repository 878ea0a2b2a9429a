//! The top bar itself: one entry per registered item, in display order.
//!
//! Clicking an item that owns a popup expands it. The popup is positioned
//! under its item once the item's geometry has been read after layout.

use std::collections::HashMap;
use std::rc::Rc;

use dioxus::prelude::*;

use super::{FragmentView, TopbarPopup};
use crate::hooks::{use_topbar_version, use_viewport_width};
use crate::position::{ItemRect, PopupPlacement, DEFAULT_INSET};
use crate::{Fragment, Topbar};

/// Names in `mounted` whose item is no longer registered in `topbar`.
fn stale_names<T, V>(mounted: &HashMap<String, T>, topbar: &Topbar<V>) -> Vec<String> {
    mounted
        .keys()
        .filter(|name| !topbar.contains(name))
        .cloned()
        .collect()
}

/// Top bar component rendering every item of `topbar` plus the open popup.
#[component]
pub fn TopbarBar(
    topbar: Topbar<Fragment>,
    #[props(default = DEFAULT_INSET)] inset: f64,
) -> Element {
    let version = use_topbar_version(&topbar);
    let viewport_width = use_viewport_width();

    // Mounted item elements by name, for the deferred geometry read.
    let mut mounted: Signal<HashMap<String, Rc<MountedData>>> = use_signal(HashMap::new);
    let mut placement = use_signal(move || PopupPlacement::new(inset));

    // Forget elements of unregistered items.
    let topbar_for_prune = topbar.clone();
    use_effect(move || {
        let _ = *version.read();
        let stale = stale_names(&*mounted.peek(), &topbar_for_prune);
        if stale.is_empty() {
            return;
        }
        let mut mounted = mounted.write();
        for name in &stale {
            mounted.remove(name);
        }
    });

    let topbar_for_effect = topbar.clone();
    use_effect(move || {
        let _ = *version.read();
        let width = viewport_width();
        let Some(name) = topbar_for_effect.popup_state().name().map(str::to_string) else {
            return;
        };
        let Some(element) = mounted.read().get(&name).cloned() else {
            return;
        };
        spawn(async move {
            match element.get_client_rect().await {
                Ok(rect) => {
                    let mut next = *placement.peek();
                    if next.update(ItemRect::new(rect.min_x(), rect.max_x()), width) {
                        placement.set(next);
                    }
                }
                Err(err) => log::debug!("Could not measure top bar item {name}: {err:?}"),
            }
        });
    });

    let _ = *version.read();
    let items = topbar.items();
    let current = topbar.current_popup();
    let current_name = current.as_ref().map(|item| item.name.clone());
    let bar_class = if topbar.menu_expanded() {
        "topbar menu-expanded"
    } else {
        "topbar"
    };
    let topbar_menu = topbar.clone();

    rsx! {
        ul {
            class: "{bar_class}",

            li {
                class: "menu-button",
                onclick: move |_| {
                    if let Err(err) = topbar_menu.toggle_menu() {
                        log::warn!("Failed to toggle top bar menu: {err}");
                    }
                },
                "\u{2630}"
            }

            for item in items {
                {
                    let name = item.name.clone();
                    let mount_name = item.name.clone();
                    let has_popup = item.has_popup();
                    let topbar = topbar.clone();
                    let class = if current_name.as_deref() == Some(item.name.as_str()) {
                        format!("{} expanded", item.name)
                    } else {
                        item.name.clone()
                    };
                    rsx! {
                        li {
                            key: "{item.name}",
                            class: "{class}",
                            onmounted: move |evt: MountedEvent| {
                                mounted.write().insert(mount_name.clone(), evt.data());
                            },
                            onclick: move |evt: MouseEvent| {
                                if has_popup {
                                    evt.stop_propagation();
                                    evt.prevent_default();
                                    log::info!("Top bar item clicked: {name}");
                                    if let Err(err) = topbar.select(&name) {
                                        log::warn!("Failed to open popup {name}: {err}");
                                    }
                                }
                            },
                            FragmentView { fragment: item.content.clone() }
                        }
                    }
                }
            }
        }

        if let Some(item) = current {
            if let Some(popup) = item.popup {
                TopbarPopup {
                    topbar: topbar.clone(),
                    name: item.name.clone(),
                    position: placement.read().get(),
                    content: popup,
                }
            }
        }
    }
}
