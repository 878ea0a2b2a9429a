//! UI components for the top bar.

mod fragment_view;
mod topbar_bar;
mod topbar_popup;

pub use fragment_view::FragmentView;
pub use topbar_bar::TopbarBar;
pub use topbar_popup::TopbarPopup;
