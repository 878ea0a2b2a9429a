//! Custom Dioxus hooks for top bar components.

use dioxus::prelude::*;

use crate::{Fragment, Topbar};

/// Script reporting the window width now and after every resize.
const VIEWPORT_WIDTH_SCRIPT: &str = r"
    dioxus.send(window.innerWidth);
    window.addEventListener('resize', () => dioxus.send(window.innerWidth));
    await new Promise(() => {});
";

/// Read the top bar from context and re-render the calling component on every change.
#[must_use]
pub fn use_topbar() -> Topbar<Fragment> {
    let topbar = use_context::<Topbar<Fragment>>();
    let version = use_topbar_version(&topbar);
    let _ = *version.read();
    topbar
}

/// A signal bumped after every mutation of `topbar`.
///
/// Reading it subscribes the reader (a component or an effect) to registry
/// changes. The subscription is dropped with the component.
#[must_use]
pub fn use_topbar_version(topbar: &Topbar<Fragment>) -> Signal<usize, SyncStorage> {
    let version = use_signal_sync(|| 0_usize);
    let subscription = use_hook(|| {
        let topbar = topbar.clone();
        let id = topbar.subscribe(move |change| {
            log::trace!("Top bar changed: {change:?}");
            let mut version = version;
            *version.write() += 1;
        });
        (topbar, id)
    });
    use_drop(move || {
        let (topbar, id) = subscription;
        topbar.unsubscribe(id);
    });
    version
}

/// Current window width in CSS pixels, updated on resize.
///
/// Reads `0.0` until the webview reports its first measurement.
#[must_use]
pub fn use_viewport_width() -> Signal<f64> {
    let mut width = use_signal(|| 0.0_f64);
    use_future(move || async move {
        let mut eval = document::eval(VIEWPORT_WIDTH_SCRIPT);
        while let Ok(value) = eval.recv::<f64>().await {
            if (*width.peek() - value).abs() > f64::EPSILON {
                width.set(value);
            }
        }
        log::warn!("Viewport width channel closed");
    });
    width
}
