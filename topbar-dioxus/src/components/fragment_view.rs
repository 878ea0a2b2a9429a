use dioxus::prelude::*;

use crate::Fragment;

/// Renders a [`Fragment`] in its own component scope.
#[component]
pub fn FragmentView(fragment: Fragment) -> Element {
    fragment.render()
}
