//! Navigation behavior - mobile menu toggle and logo redirect.
//!
//! The menu has one piece of state, open or closed, held in an explicit
//! [`MenuState`] signal. The `active` class on the menu container and the
//! toggle glyph are synchronized FROM that state - they are presentation,
//! never the source of truth.
//!
//! Invariant: the toggle glyph always reflects the menu state.

use log::debug;
use spark_signals::{Signal, signal};

use crate::dom;
use crate::events;
use crate::location;
use crate::types::{HOME_PAGE, MENU_CLOSED_GLYPH, MENU_OPEN_GLYPH, class};

// =============================================================================
// MENU STATE
// =============================================================================

/// Explicit menu state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    fn flipped(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

thread_local! {
    static MENU_STATE: Signal<MenuState> = signal(MenuState::Closed);
}

/// Current menu state.
pub fn menu_state() -> MenuState {
    MENU_STATE.with(|s| s.get())
}

/// Write the state and synchronize the visual markers to it.
fn apply_menu_state(menu: usize, toggle: usize, state: MenuState) {
    MENU_STATE.with(|s| s.set(state));
    match state {
        MenuState::Open => {
            dom::add_class(menu, class::ACTIVE);
            dom::set_text(toggle, MENU_OPEN_GLYPH);
        }
        MenuState::Closed => {
            dom::remove_class(menu, class::ACTIVE);
            dom::set_text(toggle, MENU_CLOSED_GLYPH);
        }
    }
}

// =============================================================================
// INIT
// =============================================================================

/// Wire the navigation behavior.
///
/// - Toggle click flips the menu (and never reaches the outside-click
///   handler)
/// - A click outside both menu and toggle closes an open menu
/// - A click on any link inside the menu closes it
/// - Logo click navigates home
///
/// Missing toggle or menu container is a graceful no-op, not an error.
pub fn init_navigation() {
    let toggle = dom::query_class(class::MENU_TOGGLE);
    let menu = dom::query_class(class::NAV_MENU);

    match (toggle, menu) {
        (Some(toggle), Some(menu)) => {
            apply_menu_state(menu, toggle, MenuState::Closed);

            let _ = events::on_click(toggle, move |_| {
                let next = menu_state().flipped();
                debug!("menu toggle: {next:?}");
                apply_menu_state(menu, toggle, next);
                true
            });

            let _ = events::on_document_click(move |event| {
                if menu_state() == MenuState::Open {
                    let target = event.target();
                    if !dom::contains(menu, target) && !dom::contains(toggle, target) {
                        debug!("outside click: closing menu");
                        apply_menu_state(menu, toggle, MenuState::Closed);
                    }
                }
                false
            });

            for link in dom::descendants_with_tag(menu, "a") {
                let _ = events::on_click(link, move |_| {
                    apply_menu_state(menu, toggle, MenuState::Closed);
                    false
                });
            }
        }
        _ => debug!("menu toggle or container missing; navigation skipped"),
    }

    if let Some(logo) = dom::query_class(class::LOGO) {
        let _ = events::on_click(logo, |_| {
            location::navigate(HOME_PAGE);
            false
        });
    }
}

/// Reset menu state (for testing).
pub fn reset_nav_state() {
    MENU_STATE.with(|s| s.set(MenuState::Closed));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{add_class, append_child, create_element, has_class, reset_dom_state, text_of};
    use crate::events::{dispatch_click, reset_event_state};
    use crate::location::{pending_navigation, reset_location_state};

    fn setup() {
        reset_dom_state();
        reset_event_state();
        reset_location_state();
        reset_nav_state();
    }

    struct NavPage {
        toggle: usize,
        menu: usize,
        link: usize,
        outside: usize,
    }

    fn build_page() -> NavPage {
        let root = create_element("body");
        let toggle = create_element("button");
        add_class(toggle, class::MENU_TOGGLE);
        let menu = create_element("nav");
        add_class(menu, class::NAV_MENU);
        let link = create_element("a");
        let outside = create_element("div");
        append_child(root, toggle).unwrap();
        append_child(root, menu).unwrap();
        append_child(menu, link).unwrap();
        append_child(root, outside).unwrap();
        NavPage {
            toggle,
            menu,
            link,
            outside,
        }
    }

    #[test]
    fn test_toggle_flips_state_class_and_glyph() {
        setup();
        let page = build_page();
        init_navigation();

        assert_eq!(menu_state(), MenuState::Closed);
        assert_eq!(text_of(page.toggle), MENU_CLOSED_GLYPH);

        dispatch_click(page.toggle);
        assert_eq!(menu_state(), MenuState::Open);
        assert!(has_class(page.menu, class::ACTIVE));
        assert_eq!(text_of(page.toggle), MENU_OPEN_GLYPH);

        dispatch_click(page.toggle);
        assert_eq!(menu_state(), MenuState::Closed);
        assert!(!has_class(page.menu, class::ACTIVE));
        assert_eq!(text_of(page.toggle), MENU_CLOSED_GLYPH);
    }

    #[test]
    fn test_outside_click_closes_open_menu() {
        setup();
        let page = build_page();
        init_navigation();

        dispatch_click(page.toggle);
        assert_eq!(menu_state(), MenuState::Open);

        dispatch_click(page.outside);
        assert_eq!(menu_state(), MenuState::Closed);
        assert_eq!(text_of(page.toggle), MENU_CLOSED_GLYPH);
    }

    #[test]
    fn test_click_inside_menu_does_not_close_via_outside_handler() {
        setup();
        let page = build_page();
        init_navigation();

        dispatch_click(page.toggle);
        // The menu container itself is not a link; clicking it keeps the
        // menu open.
        dispatch_click(page.menu);
        assert_eq!(menu_state(), MenuState::Open);
    }

    #[test]
    fn test_link_click_closes_menu() {
        setup();
        let page = build_page();
        init_navigation();

        dispatch_click(page.toggle);
        assert_eq!(menu_state(), MenuState::Open);

        dispatch_click(page.link);
        assert_eq!(menu_state(), MenuState::Closed);
    }

    #[test]
    fn test_missing_controls_is_a_noop() {
        setup();
        let lone = create_element("div");
        init_navigation(); // neither toggle nor menu exists

        dispatch_click(lone);
        assert_eq!(menu_state(), MenuState::Closed);
    }

    #[test]
    fn test_logo_click_navigates_home() {
        setup();
        let logo = create_element("div");
        add_class(logo, class::LOGO);
        init_navigation();

        assert_eq!(pending_navigation(), None);
        dispatch_click(logo);
        assert_eq!(pending_navigation().as_deref(), Some(HOME_PAGE));
    }
}
