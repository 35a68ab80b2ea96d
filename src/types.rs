//! Core types for spark-page.
//!
//! These types define the foundation that everything builds on.
//! They flow through the document model and the behavior modules.

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in document coordinates (CSS pixels).
///
/// Geometry is supplied by the host page - spark-page never computes layout.
/// `y` grows downward, so `top()` is `y` and `bottom()` is `y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge in document coordinates.
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge in document coordinates.
    #[inline]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// =============================================================================
// Class-name contract
// =============================================================================

/// Class names the behaviors recognize on the host page.
///
/// This is the full markup contract: the host tags its elements with these
/// classes and the behaviors find them by query. Nothing else about the
/// markup is assumed.
pub mod class {
    /// Hamburger button that opens/closes the mobile menu.
    pub const MENU_TOGGLE: &str = "menu-toggle";
    /// Container holding the navigation links.
    pub const NAV_MENU: &str = "nav-menu";
    /// Marker for the open menu and for the current-page link.
    pub const ACTIVE: &str = "active";
    /// Navigation grouping with a parent link and nested child links.
    pub const DROPDOWN: &str = "dropdown";
    /// Content card revealed on scroll.
    pub const CARD: &str = "card";
    /// Section heading revealed on scroll.
    pub const SECTION_TITLE: &str = "section-title";
    /// Reveal marker; the transition itself is owned by styling.
    pub const FADE_IN: &str = "fade-in";
    /// Form field participating in validation.
    pub const FORM_CONTROL: &str = "form-control";
    /// Inline error container next to a form field.
    pub const ERROR_MESSAGE: &str = "error-message";
    /// Success banner inside a form.
    pub const SUCCESS_MESSAGE: &str = "success-message";
    /// Visibility marker for error/success messages.
    pub const SHOW: &str = "show";
    /// Spinner span injected into the submit button while sending.
    pub const LOADING: &str = "loading";
    /// Site logo; clicking it navigates home.
    pub const LOGO: &str = "logo";
}

// =============================================================================
// Page identity
// =============================================================================

/// Canonical home page. Matches both the empty path segment and its
/// explicit filename.
pub const HOME_PAGE: &str = "index.html";

/// Secondary home page. Modeled as a dropdown submenu item that must not
/// bubble activation to its parent link (see `behaviors::active_link`).
pub const SECONDARY_HOME_PAGE: &str = "home2.html";

// =============================================================================
// Menu glyphs
// =============================================================================

/// Toggle glyph shown while the menu is closed.
pub const MENU_CLOSED_GLYPH: &str = "☰";

/// Toggle glyph shown while the menu is open.
pub const MENU_OPEN_GLYPH: &str = "✕";
