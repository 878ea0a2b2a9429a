//! Topbar Dioxus - a top bar of named items with popups for Dioxus front ends
//!
//! The core of this crate is [`Topbar`], a registry of items (buttons and
//! menus). Each item may own a popup. At most one popup is visible at a
//! time, and an item's dismiss handler can veto closing its popup or
//! remove the item altogether.
//!
//! ## Quick Start
//!
//! ```no_run
//! use topbar_dioxus::{Fragment, ItemSpec, Topbar, TopbarConfig};
//! use dioxus::prelude::*;
//!
//! fn share_button() -> Element {
//!     rsx! { span { "Share" } }
//! }
//!
//! fn share_popup() -> Element {
//!     rsx! { p { "Share this grain" } }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let topbar = Topbar::new();
//!     let _share = topbar.register(
//!         ItemSpec::new("share", Fragment::new(share_button)).popup(Fragment::new(share_popup)),
//!     )?;
//!     topbar_dioxus::launch(TopbarConfig::default(), topbar)
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. `Topbar` owns the items and the expansion state behind a mutex, so it
//!    can be placed in Dioxus context and cloned into event handlers
//! 2. Registry mutations notify subscribers synchronously
//! 3. `use_topbar_version` turns those notifications into a signal that
//!    re-renders the bar
//! 4. Popup placement is computed from item geometry read after layout

pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod item;
pub mod popup;
pub mod position;
pub mod registry;

mod app;
mod fragment;
mod store;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_helpers;

use anyhow::Result;

// Convenience re-exports
pub use app::register_demo_items;
pub use config::TopbarConfig;
pub use error::TopbarError;
pub use fragment::Fragment;
pub use item::{DismissHandler, DismissReply, Item, ItemSpec};
pub use popup::{DismissOutcome, PopupState};
pub use position::{estimate, Align, ItemRect, PopupPosition};
pub use registry::{ItemHandle, ListenerId, Topbar, TopbarChange};

/// Stylesheet for the top bar and its popups.
pub const TOPBAR_CSS: &str = include_str!("../assets/topbar.css");

/// Launch a desktop window showing `topbar` above the demo content.
///
/// The window size and title come from `config.window`; the popup inset from
/// `config.popup`.
pub fn launch(config: TopbarConfig, topbar: Topbar<Fragment>) -> Result<()> {
    let custom_head = format!("<style>{TOPBAR_CSS}</style>");

    log::info!("Launching top bar window with {} items", topbar.len());

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(&config.window.title)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(
                            config.window.width,
                            config.window.height,
                        )),
                )
                .with_custom_head(custom_head),
        )
        .with_context(topbar)
        .with_context(config.popup.clone())
        .launch(app::App);

    Ok(())
}
