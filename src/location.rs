//! Location - current page identity and programmatic navigation.
//!
//! A thin stand-in for the host's location object. The pathname is set by
//! the host at page load; behaviors read the page identity from it.
//! Programmatic navigation (the logo click) is recorded rather than
//! performed - leaving the page is the host's job.

use log::debug;
use spark_signals::{Signal, signal};

use crate::types::HOME_PAGE;

thread_local! {
    static PATHNAME: Signal<String> = signal(String::new());
    static PENDING_NAVIGATION: Signal<Option<String>> = signal(None);
}

/// Set the current pathname (host, at page load).
pub fn set_pathname(pathname: impl Into<String>) {
    PATHNAME.with(|s| s.set(pathname.into()));
}

/// Current pathname.
pub fn pathname() -> String {
    PATHNAME.with(|s| s.get())
}

/// Page identity: the last path segment, defaulting to the canonical home
/// page when the segment is empty ("/" or "").
pub fn current_page() -> String {
    let pathname = pathname();
    let segment = pathname.rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        HOME_PAGE.to_string()
    } else {
        segment.to_string()
    }
}

/// Request navigation to another page. Recorded, not performed.
pub fn navigate(href: impl Into<String>) {
    let href = href.into();
    debug!("navigate to {href}");
    PENDING_NAVIGATION.with(|s| s.set(Some(href)));
}

/// The navigation requested since the last check, if any.
pub fn pending_navigation() -> Option<String> {
    PENDING_NAVIGATION.with(|s| s.get())
}

/// Consume the pending navigation (host, when it performs the redirect).
pub fn take_navigation() -> Option<String> {
    PENDING_NAVIGATION.with(|s| {
        let pending = s.get();
        s.set(None);
        pending
    })
}

/// Reset location state (for testing).
pub fn reset_location_state() {
    PATHNAME.with(|s| s.set(String::new()));
    PENDING_NAVIGATION.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_location_state();
    }

    #[test]
    fn test_current_page_from_last_segment() {
        setup();
        set_pathname("/site/about.html");
        assert_eq!(current_page(), "about.html");
    }

    #[test]
    fn test_empty_segment_defaults_to_home() {
        setup();
        set_pathname("");
        assert_eq!(current_page(), HOME_PAGE);

        set_pathname("/");
        assert_eq!(current_page(), HOME_PAGE);

        set_pathname("/site/");
        assert_eq!(current_page(), HOME_PAGE);
    }

    #[test]
    fn test_navigation_recorded_and_taken() {
        setup();
        assert_eq!(pending_navigation(), None);

        navigate(HOME_PAGE);
        assert_eq!(pending_navigation().as_deref(), Some(HOME_PAGE));

        assert_eq!(take_navigation().as_deref(), Some(HOME_PAGE));
        assert_eq!(pending_navigation(), None);
    }
}
