//! # spark-page
//!
//! Headless page interactivity engine for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! spark-page models the interactive surface of a static page - document
//! tree, events, timers, viewport, location - as explicit in-memory state,
//! and wires five independent behaviors over it at page-ready time:
//!
//! ```text
//! host tree + geometry → init_page() → behaviors react to dispatched events
//! ```
//!
//! The host owns markup, styling, and layout; it builds the element tree,
//! supplies rects, dispatches events, and advances the virtual clock.
//! spark-page owns only the transient UI state: menu open/closed, field
//! validity, pending reveals, submission in flight.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rect, class-name contract, glyphs)
//! - [`dom`] - Element arena, mutation API, tree queries
//! - [`events`] - Click/blur/submit dispatch with bubbling
//! - [`timers`] - Deterministic virtual-clock timer queue
//! - [`viewport`] - Scroll state and intersection watching
//! - [`location`] - Page identity and programmatic navigation
//! - [`behaviors`] - The five page behaviors
//! - [`page`] - Page-ready wiring and teardown

pub mod behaviors;
pub mod dom;
pub mod events;
pub mod location;
pub mod page;
pub mod timers;
pub mod types;
pub mod viewport;

// Re-export commonly used items
pub use types::*;

pub use dom::{
    DomError, add_class, append_child, closest_with_class, contains, create_element,
    descendants_with_class, descendants_with_tag, find_by_fragment, has_class, query_all_class,
    query_all_tag, query_class, remove_class, set_attribute, set_fragment_id, set_rect,
    set_required, set_text, set_value,
};

pub use events::{
    EventKind, PageEvent, dispatch_blur, dispatch_click, dispatch_submit, last_event, on_blur,
    on_click, on_document_click, on_submit,
};

pub use timers::{TimerHandle, advance, cancel, set_timeout};

pub use viewport::{
    IntersectionEntry, IntersectionOptions, ScrollBehavior, ScrollRequest, check_intersections,
    scroll_to, scroll_y, set_viewport_height,
};

pub use location::{current_page, navigate, pending_navigation, set_pathname, take_navigation};

pub use behaviors::{
    form::{SubmitState, submit_state, validate_field},
    nav::{MenuState, menu_state},
};

pub use page::{init_page, reset_page_state};
