//! Element arena - thread-local storage and mutation API.
//!
//! Follows the registry pattern: elements live in a thread-local arena,
//! indices are stable for the page lifetime, and every accessor is a free
//! function. `reset_dom_state()` clears everything (page unload / tests).

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

use crate::types::Rect;

use super::element::{Element, ElementFlags};

// =============================================================================
// Errors
// =============================================================================

/// Structural misuse of the document tree.
///
/// Validation failures are NOT errors - they are form state. This type only
/// covers host mistakes while building the tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("unknown element index {0}")]
    UnknownElement(usize),
    #[error("element {0} cannot be attached inside its own subtree")]
    CircularAttach(usize),
    #[error("element {0} already has a parent")]
    AlreadyAttached(usize),
}

// =============================================================================
// Arena state
// =============================================================================

thread_local! {
    /// All elements, indexed by creation order.
    static ELEMENTS: RefCell<Vec<Element>> = RefCell::new(Vec::new());

    /// Fragment identifier -> element index.
    static FRAGMENT_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());
}

/// Create a detached element, returning its index.
pub fn create_element(tag: impl Into<String>) -> usize {
    ELEMENTS.with(|elements| {
        let mut elements = elements.borrow_mut();
        elements.push(Element::new(tag));
        elements.len() - 1
    })
}

/// Check whether an index refers to an element.
pub fn exists(index: usize) -> bool {
    ELEMENTS.with(|elements| index < elements.borrow().len())
}

/// Number of elements in the document.
pub fn element_count() -> usize {
    ELEMENTS.with(|elements| elements.borrow().len())
}

/// Clear the whole document (page unload / tests).
pub fn reset_dom_state() {
    ELEMENTS.with(|elements| elements.borrow_mut().clear());
    FRAGMENT_INDEX.with(|map| map.borrow_mut().clear());
}

/// Run a closure with a shared borrow of an element.
pub(crate) fn with_element<R>(index: usize, f: impl FnOnce(&Element) -> R) -> Option<R> {
    ELEMENTS.with(|elements| {
        let elements = elements.borrow();
        elements.get(index).map(f)
    })
}

/// Run a closure with a mutable borrow of an element.
pub(crate) fn with_element_mut<R>(index: usize, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
    ELEMENTS.with(|elements| {
        let mut elements = elements.borrow_mut();
        elements.get_mut(index).map(f)
    })
}

// =============================================================================
// Tree construction
// =============================================================================

/// Attach `child` under `parent`.
///
/// Rejects unknown indices, re-attachment, and cycles (attaching an
/// ancestor under its own descendant).
pub fn append_child(parent: usize, child: usize) -> Result<(), DomError> {
    if !exists(parent) {
        return Err(DomError::UnknownElement(parent));
    }
    if !exists(child) {
        return Err(DomError::UnknownElement(child));
    }
    if parent == child {
        return Err(DomError::CircularAttach(child));
    }
    if with_element(child, |e| e.parent.is_some()).unwrap_or(false) {
        return Err(DomError::AlreadyAttached(child));
    }
    // Walk up from parent; hitting child means parent is inside child's subtree.
    let mut cursor = parent_of(parent);
    while let Some(ancestor) = cursor {
        if ancestor == child {
            return Err(DomError::CircularAttach(child));
        }
        cursor = parent_of(ancestor);
    }

    with_element_mut(parent, |e| e.children.push(child));
    with_element_mut(child, |e| e.parent = Some(parent));
    Ok(())
}

/// Parent index, if attached.
pub fn parent_of(index: usize) -> Option<usize> {
    with_element(index, |e| e.parent).flatten()
}

/// Child indices in document order.
pub fn children_of(index: usize) -> Vec<usize> {
    with_element(index, |e| e.children.clone()).unwrap_or_default()
}

// =============================================================================
// Classes
// =============================================================================

/// Add a class (no-op if already present).
pub fn add_class(index: usize, class: &str) {
    with_element_mut(index, |e| {
        if !e.classes.iter().any(|c| c == class) {
            e.classes.push(class.to_string());
        }
    });
}

/// Remove a class (no-op if absent).
pub fn remove_class(index: usize, class: &str) {
    with_element_mut(index, |e| {
        e.classes.retain(|c| c != class);
    });
}

/// Check for a class.
pub fn has_class(index: usize, class: &str) -> bool {
    with_element(index, |e| e.classes.iter().any(|c| c == class)).unwrap_or(false)
}

/// Snapshot of the class list.
pub fn class_list(index: usize) -> Vec<String> {
    with_element(index, |e| e.classes.clone()).unwrap_or_default()
}

// =============================================================================
// Attributes
// =============================================================================

/// Set an attribute value.
pub fn set_attribute(index: usize, key: &str, value: impl Into<String>) {
    with_element_mut(index, |e| {
        e.attributes.insert(key.to_string(), value.into());
    });
}

/// Get an attribute value.
pub fn get_attribute(index: usize, key: &str) -> Option<String> {
    with_element(index, |e| e.attributes.get(key).cloned()).flatten()
}

/// Check whether an attribute is present.
pub fn has_attribute(index: usize, key: &str) -> bool {
    with_element(index, |e| e.attributes.contains_key(key)).unwrap_or(false)
}

// =============================================================================
// Inline styles
// =============================================================================

/// Set an inline style property.
pub fn set_inline_style(index: usize, property: &str, value: impl Into<String>) {
    with_element_mut(index, |e| {
        e.styles.insert(property.to_string(), value.into());
    });
}

/// Get an inline style property.
pub fn inline_style(index: usize, property: &str) -> Option<String> {
    with_element(index, |e| e.styles.get(property).cloned()).flatten()
}

/// Clear an inline style property (back to stylesheet default).
pub fn clear_inline_style(index: usize, property: &str) {
    with_element_mut(index, |e| {
        e.styles.remove(property);
    });
}

// =============================================================================
// Content, value, flags, geometry
// =============================================================================

/// Tag name.
pub fn tag_of(index: usize) -> String {
    with_element(index, |e| e.tag.clone()).unwrap_or_default()
}

/// Set text content.
pub fn set_text(index: usize, text: impl Into<String>) {
    with_element_mut(index, |e| e.text = text.into());
}

/// Text content.
pub fn text_of(index: usize) -> String {
    with_element(index, |e| e.text.clone()).unwrap_or_default()
}

/// Set a form control's value.
pub fn set_value(index: usize, value: impl Into<String>) {
    with_element_mut(index, |e| e.value = value.into());
}

/// A form control's current value.
pub fn value_of(index: usize) -> String {
    with_element(index, |e| e.value.clone()).unwrap_or_default()
}

/// Mark a control required (the markup `required` attribute).
pub fn set_required(index: usize, required: bool) {
    with_element_mut(index, |e| e.flags.set(ElementFlags::REQUIRED, required));
}

/// Whether a control is required.
pub fn is_required(index: usize) -> bool {
    with_element(index, |e| e.flags.contains(ElementFlags::REQUIRED)).unwrap_or(false)
}

/// Enable/disable a control (submit button while in flight).
pub fn set_disabled(index: usize, disabled: bool) {
    with_element_mut(index, |e| e.flags.set(ElementFlags::DISABLED, disabled));
}

/// Whether a control is disabled.
pub fn is_disabled(index: usize) -> bool {
    with_element(index, |e| e.flags.contains(ElementFlags::DISABLED)).unwrap_or(false)
}

/// Set host-supplied geometry.
pub fn set_rect(index: usize, rect: Rect) {
    with_element_mut(index, |e| e.rect = rect);
}

/// Geometry in document coordinates.
pub fn rect_of(index: usize) -> Rect {
    with_element(index, |e| e.rect).unwrap_or_default()
}

// =============================================================================
// Fragment identifiers
// =============================================================================

/// Assign a fragment identifier (the `id` attribute) to an element.
///
/// Later assignments of the same identifier win, matching how a browser
/// resolves duplicate ids to a single element.
pub fn set_fragment_id(index: usize, id: impl Into<String>) {
    let id = id.into();
    with_element_mut(index, |e| e.fragment_id = Some(id.clone()));
    FRAGMENT_INDEX.with(|map| {
        map.borrow_mut().insert(id, index);
    });
}

/// Fragment identifier of an element.
pub fn fragment_id(index: usize) -> Option<String> {
    with_element(index, |e| e.fragment_id.clone()).flatten()
}

/// Resolve a fragment identifier to an element.
pub fn find_by_fragment(id: &str) -> Option<usize> {
    FRAGMENT_INDEX.with(|map| map.borrow().get(id).copied())
}

// =============================================================================
// TESTS
// =============================================================================
