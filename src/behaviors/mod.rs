//! Behaviors - the five independent page behaviors.
//!
//! Each behavior is an `init_*` function invoked once at page-ready time
//! by [`crate::page::init_page`]. They share no state: each wires its own
//! listeners and keeps whatever little state it has in its own module.
//!
//! - **nav** - mobile menu toggle, outside-click close, logo redirect
//! - **active_link** - marks the nav link for the current page
//! - **reveal** - one-shot fade-in when elements scroll into view
//! - **form** - blur/submit validation and the simulated submission flow
//! - **smooth_scroll** - animated scrolling for in-page fragment links

pub mod active_link;
pub mod form;
pub mod nav;
pub mod reveal;
pub mod smooth_scroll;
