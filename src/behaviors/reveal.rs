//! Scroll-reveal behavior - one-shot fade-in on first visibility.
//!
//! Watches content cards and section headings; the first time one is
//! sufficiently visible it gains the `fade-in` class (the transition is
//! styling's job) and is dropped from observation. Reveal is one-way:
//! an element is never re-observed and never loses the class.

use std::cell::Cell;

use log::debug;

use crate::dom;
use crate::types::class;
use crate::viewport::{self, IntersectionOptions};

// =============================================================================
// TUNING
// =============================================================================

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Bottom root-margin: contracts the viewport so elements reveal slightly
/// before they reach the true viewport bottom.
pub const REVEAL_BOTTOM_MARGIN_PX: f32 = -50.0;

thread_local! {
    static REVEAL_OBSERVER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// The reveal observer id, once initialized.
pub fn reveal_observer() -> Option<usize> {
    REVEAL_OBSERVER.with(|cell| cell.get())
}

// =============================================================================
// INIT
// =============================================================================

/// Wire the scroll-reveal behavior over all cards and section titles.
///
/// The initial visibility pass is run by `init_page` after all behaviors
/// are wired, so elements already in view reveal immediately.
pub fn init_reveal() {
    let observer = viewport::create_observer(
        IntersectionOptions {
            threshold: REVEAL_THRESHOLD,
            root_margin_bottom: REVEAL_BOTTOM_MARGIN_PX,
        },
        |entry| {
            debug!("reveal: node {}", entry.node);
            dom::add_class(entry.node, class::FADE_IN);
            viewport::unobserve(entry.observer, entry.node);
        },
    );

    for node in dom::query_all_class(class::CARD) {
        viewport::observe(observer, node);
    }
    for node in dom::query_all_class(class::SECTION_TITLE) {
        viewport::observe(observer, node);
    }

    REVEAL_OBSERVER.with(|cell| cell.set(Some(observer)));
}

/// Reset reveal state (for testing).
pub fn reset_reveal_state() {
    if let Some(observer) = reveal_observer() {
        viewport::disconnect(observer);
    }
    REVEAL_OBSERVER.with(|cell| cell.set(None));
}

// =============================================================================
// TESTS
// =============================================================================
