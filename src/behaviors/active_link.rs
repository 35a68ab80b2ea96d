//! Active-link behavior - marks the nav link for the current page.
//!
//! Runs once at page-ready time. For every link under the nav menu the
//! pre-existing `active` marker is cleared, then set again if the link's
//! `href` matches the current page identity. A match nested inside a
//! `.dropdown` grouping also marks the dropdown's own top-level link -
//! except on the secondary home page, whose link lives in a dropdown but
//! must not light up its parent. A final override then forces the
//! secondary home link itself active, since the suppression rule would
//! otherwise leave it unmarked.

use log::debug;

use crate::dom;
use crate::location;
use crate::types::{HOME_PAGE, SECONDARY_HOME_PAGE, class};

/// Whether a link target matches the current page identity.
///
/// The canonical home identity matches both the empty segment (already
/// normalized by [`location::current_page`]) and its explicit filename.
fn matches_page(href: &str, current_page: &str) -> bool {
    href == current_page || (current_page == HOME_PAGE && href == HOME_PAGE)
}

/// Mark the nav link matching the current page.
pub fn init_active_link() {
    let current_page = location::current_page();
    let Some(menu) = dom::query_class(class::NAV_MENU) else {
        debug!("nav menu missing; active-link marking skipped");
        return;
    };

    let links = dom::descendants_with_tag(menu, "a");
    for &link in &links {
        dom::remove_class(link, class::ACTIVE);

        let Some(href) = dom::get_attribute(link, "href") else {
            continue;
        };
        if !matches_page(&href, &current_page) {
            continue;
        }

        dom::add_class(link, class::ACTIVE);
        debug!("active link: {href}");

        // Bubble activation to the dropdown's own top-level link, unless
        // the current page is the secondary home (a submenu item whose
        // parent must stay unmarked).
        if let Some(dropdown) = dom::closest_with_class(link, class::DROPDOWN) {
            if let Some(&parent_link) = dom::descendants_with_tag(dropdown, "a").first() {
                if !dom::has_class(parent_link, class::ACTIVE)
                    && current_page != SECONDARY_HOME_PAGE
                {
                    dom::add_class(parent_link, class::ACTIVE);
                }
            }
        }
    }

    // Preserved special case: the secondary home link is always forced
    // active on its own page, independent of the pass above.
    if current_page == SECONDARY_HOME_PAGE {
        let secondary = links
            .iter()
            .find(|&&link| dom::get_attribute(link, "href").as_deref() == Some(SECONDARY_HOME_PAGE));
        if let Some(&link) = secondary {
            dom::add_class(link, class::ACTIVE);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{
        add_class, append_child, create_element, has_class, reset_dom_state, set_attribute,
    };
    use crate::location::{reset_location_state, set_pathname};

    fn setup() {
        reset_dom_state();
        reset_location_state();
    }

    /// Nav menu layout used across tests:
    ///
    /// ```text
    /// nav-menu
    /// ├── a[href=index.html]
    /// ├── a[href=about.html]
    /// └── li.dropdown
    ///     ├── a[href=services.html]   (parent link)
    ///     ├── a[href=web.html]
    ///     └── a[href=home2.html]
    /// ```
    struct NavLinks {
        home: usize,
        about: usize,
        services: usize,
        web: usize,
        home2: usize,
    }

    fn build_menu() -> NavLinks {
        let menu = create_element("nav");
        add_class(menu, class::NAV_MENU);

        let home = create_element("a");
        set_attribute(home, "href", "index.html");
        append_child(menu, home).unwrap();

        let about = create_element("a");
        set_attribute(about, "href", "about.html");
        append_child(menu, about).unwrap();

        let dropdown = create_element("li");
        add_class(dropdown, class::DROPDOWN);
        append_child(menu, dropdown).unwrap();

        let services = create_element("a");
        set_attribute(services, "href", "services.html");
        append_child(dropdown, services).unwrap();

        let web = create_element("a");
        set_attribute(web, "href", "web.html");
        append_child(dropdown, web).unwrap();

        let home2 = create_element("a");
        set_attribute(home2, "href", "home2.html");
        append_child(dropdown, home2).unwrap();

        NavLinks {
            home,
            about,
            services,
            web,
            home2,
        }
    }

    #[test]
    fn test_exact_match_marks_only_that_link() {
        setup();
        let links = build_menu();
        set_pathname("/about.html");
        init_active_link();

        assert!(has_class(links.about, class::ACTIVE));
        assert!(!has_class(links.home, class::ACTIVE));
        assert!(!has_class(links.services, class::ACTIVE));
        assert!(!has_class(links.home2, class::ACTIVE));
    }

    #[test]
    fn test_empty_page_marks_home_link() {
        setup();
        let links = build_menu();
        set_pathname("");
        init_active_link();

        assert!(has_class(links.home, class::ACTIVE));
        assert!(!has_class(links.about, class::ACTIVE));
    }

    #[test]
    fn test_dropdown_child_bubbles_to_parent_link() {
        setup();
        let links = build_menu();
        set_pathname("/web.html");
        init_active_link();

        assert!(has_class(links.web, class::ACTIVE));
        assert!(has_class(links.services, class::ACTIVE)); // parent marked too
    }

    #[test]
    fn test_secondary_home_does_not_bubble_but_is_active() {
        setup();
        let links = build_menu();
        set_pathname("/home2.html");
        init_active_link();

        assert!(has_class(links.home2, class::ACTIVE));
        assert!(!has_class(links.services, class::ACTIVE)); // suppressed
        assert!(!has_class(links.home, class::ACTIVE));
    }

    #[test]
    fn test_stale_markers_are_cleared() {
        setup();
        let links = build_menu();
        add_class(links.home, class::ACTIVE);
        add_class(links.web, class::ACTIVE);
        set_pathname("/about.html");
        init_active_link();

        assert!(!has_class(links.home, class::ACTIVE));
        assert!(!has_class(links.web, class::ACTIVE));
        assert!(has_class(links.about, class::ACTIVE));
    }

    #[test]
    fn test_missing_menu_is_a_noop() {
        setup();
        set_pathname("/about.html");
        init_active_link(); // no nav menu exists; must not panic
    }
}
