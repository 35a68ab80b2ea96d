//! Element data - the per-node record stored in the arena.

use std::collections::HashMap;

use bitflags::bitflags;

use crate::types::Rect;

bitflags! {
    /// Packed boolean element state.
    ///
    /// `REQUIRED` mirrors the markup `required` attribute on form controls.
    /// `DISABLED` is the submit-control in-flight flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        const REQUIRED = 1 << 0;
        const DISABLED = 1 << 1;
    }
}

/// A single element in the document tree.
///
/// Fields are intentionally flat - behaviors read and write them through
/// the arena's accessor functions, never through shared references.
#[derive(Debug, Default)]
pub struct Element {
    /// Lowercase tag name ("a", "form", "button", ...).
    pub tag: String,
    /// Fragment identifier (the `id` attribute), used by smooth scroll.
    pub fragment_id: Option<String>,
    /// CSS classes, order-preserving, no duplicates.
    pub classes: Vec<String>,
    /// Plain attributes (`href`, `name`, `type`, ...).
    pub attributes: HashMap<String, String>,
    /// Inline style properties (only `border-color` is written today).
    pub styles: HashMap<String, String>,
    /// Text content (link labels, button labels, message text).
    pub text: String,
    /// Current value of a form control.
    pub value: String,
    /// Packed boolean state.
    pub flags: ElementFlags,
    /// Geometry in document coordinates, supplied by the host.
    pub rect: Rect,
    /// Tree links.
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl Element {
    /// Create a detached element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}
