//! Smooth-scroll behavior - animated scrolling for in-page links.
//!
//! Every anchor whose `href` is a non-empty fragment gets a click
//! handler. The target is looked up FIRST; only when it exists is the
//! default jump suppressed and the viewport scrolled so the target's top
//! edge meets the viewport top. A dangling fragment changes nothing and
//! leaves default navigation alone.

use log::debug;

use crate::dom;
use crate::events;
use crate::viewport::{self, ScrollBehavior};

/// Wire smooth scrolling over all in-page fragment links.
pub fn init_smooth_scroll() {
    for link in dom::query_all_tag("a") {
        let Some(href) = dom::get_attribute(link, "href") else {
            continue;
        };
        // Bare "#" is not an in-page target.
        if !href.starts_with('#') || href.len() <= 1 {
            continue;
        }

        let fragment = href[1..].to_string();
        let _ = events::on_click(link, move |_| {
            match dom::find_by_fragment(&fragment) {
                Some(target) => {
                    debug!("smooth scroll to #{fragment}");
                    viewport::scroll_to(dom::rect_of(target).top(), ScrollBehavior::Smooth);
                    true // existence confirmed, so the default jump is suppressed
                }
                None => false,
            }
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================
