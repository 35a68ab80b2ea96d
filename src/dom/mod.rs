//! Document model - element arena and tree queries.
//!
//! A minimal headless document tree:
//! - Elements are indices into a thread-local arena (parallel to how the
//!   component registry hands out indices)
//! - Mutation API: classes, attributes, inline styles, text, value, rect
//! - Queries: by class/tag, by fragment identifier, `closest`, `contains`
//!
//! The host page builds the tree and supplies geometry; spark-page only
//! reads it and flips presentation state on it.

mod arena;
mod element;
mod query;

pub use arena::*;
pub use element::*;
pub use query::*;
