//! Page lifecycle - the page-ready initialization routine.
//!
//! [`init_page`] is the single entry point, the equivalent of wiring
//! everything on the page-ready signal. It runs each behavior's init
//! exactly once, in a fixed order, then runs one intersection check so
//! elements already in view reveal immediately. Calling it again is a
//! no-op until [`reset_page_state`].

use std::cell::Cell;

use log::debug;

use crate::behaviors::{active_link, form, nav, reveal, smooth_scroll};
use crate::{dom, events, location, timers, viewport};

thread_local! {
    static INITIALIZED: Cell<bool> = const { Cell::new(false) };
}

/// Whether the page has been initialized.
pub fn is_initialized() -> bool {
    INITIALIZED.with(|cell| cell.get())
}

/// Wire all five behaviors. Host calls this once the document tree and
/// geometry are in place.
pub fn init_page() {
    if INITIALIZED.with(|cell| cell.replace(true)) {
        debug!("init_page called again; ignoring");
        return;
    }

    nav::init_navigation();
    active_link::init_active_link();
    reveal::init_reveal();
    form::init_forms();
    smooth_scroll::init_smooth_scroll();

    // Initial visibility pass for elements already in view.
    viewport::check_intersections();
}

/// Tear down the whole engine (page unload / tests).
pub fn reset_page_state() {
    nav::reset_nav_state();
    reveal::reset_reveal_state();
    form::reset_form_state();
    events::reset_event_state();
    timers::reset_timer_state();
    viewport::reset_viewport_state();
    location::reset_location_state();
    dom::reset_dom_state();
    INITIALIZED.with(|cell| cell.set(false));
}

// =============================================================================
// TESTS
// =============================================================================
