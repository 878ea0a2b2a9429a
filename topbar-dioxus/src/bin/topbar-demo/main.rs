//! Entry point for the topbar-demo binary.

mod args;
mod tracing_setup;

use anyhow::Result;
use topbar_dioxus::{Fragment, Topbar, TopbarConfig};

fn main() -> Result<()> {
    let args = args::parse_args();

    let config = match &args.config {
        Some(path) => TopbarConfig::load_from(path)?,
        None => TopbarConfig::load_default().unwrap_or_else(|err| {
            eprintln!("Warning: failed to load topbar.toml: {err}");
            eprintln!("Using default configuration");
            TopbarConfig::default()
        }),
    };

    // Set up tracing subscriber BEFORE Dioxus to prevent dioxus-logger from setting its own.
    tracing_setup::init(&config.logging);

    log::info!("Starting topbar-demo");

    let topbar: Topbar<Fragment> = Topbar::new();
    let _handles = topbar_dioxus::register_demo_items(&topbar)?;

    if let Some(name) = &args.open {
        if !topbar.select(name)? {
            log::warn!("No top bar popup named {name}");
        }
    }

    topbar_dioxus::launch(config, topbar)
}
