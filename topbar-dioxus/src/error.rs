//! Errors surfaced by the top bar registry.
//!
//! Every variant describes a caller defect rather than a transient condition,
//! so none of them are meant to be retried.

use thiserror::Error;

/// Error returned by [`Topbar`](crate::Topbar) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopbarError {
    /// An item with this name is already registered.
    #[error("duplicate top bar item name: {0}")]
    DuplicateName(String),

    /// The item spec violates a registration invariant.
    #[error("invalid top bar item `{name}`: {reason}")]
    InvalidConfiguration { name: String, reason: &'static str },

    /// A dismiss handler answered with a value that has no meaning.
    #[error("top bar item `{name}` dismiss handler returned bogus result: {value:?}")]
    InvalidDismissResult { name: String, value: String },

    /// The registry was mutated from inside a dismiss handler or change listener.
    #[error("cannot {operation} while the top bar is dispatching a handler")]
    Reentrant { operation: &'static str },
}
