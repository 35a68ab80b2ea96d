//! Tree queries - linear scans over the element arena.
//!
//! The collections involved are tiny (a page has dozens of elements), so
//! everything is a straight scan in document order. Document order for
//! arena-wide queries is creation order; for subtree queries it is
//! preorder depth-first.

use super::arena::{children_of, element_count, has_class, parent_of, tag_of, with_element};

// =============================================================================
// Arena-wide queries
// =============================================================================

/// First element carrying a class, in document order.
pub fn query_class(class: &str) -> Option<usize> {
    (0..element_count()).find(|&index| has_class(index, class))
}

/// All elements carrying a class, in document order.
pub fn query_all_class(class: &str) -> Vec<usize> {
    (0..element_count())
        .filter(|&index| has_class(index, class))
        .collect()
}

/// All elements with a tag name, in document order.
pub fn query_all_tag(tag: &str) -> Vec<usize> {
    (0..element_count())
        .filter(|&index| with_element(index, |e| e.tag == tag).unwrap_or(false))
        .collect()
}

// =============================================================================
// Subtree queries
// =============================================================================

/// All descendants of `root` in preorder (excluding `root` itself).
pub fn descendants(root: usize) -> Vec<usize> {
    let mut result = Vec::new();
    let mut stack: Vec<usize> = children_of(root);
    stack.reverse();
    while let Some(index) = stack.pop() {
        result.push(index);
        let mut kids = children_of(index);
        kids.reverse();
        stack.extend(kids);
    }
    result
}

/// Descendants of `root` with the given tag, in preorder.
pub fn descendants_with_tag(root: usize, tag: &str) -> Vec<usize> {
    descendants(root)
        .into_iter()
        .filter(|&index| tag_of(index) == tag)
        .collect()
}

/// Descendants of `root` with the given class, in preorder.
pub fn descendants_with_class(root: usize, class: &str) -> Vec<usize> {
    descendants(root)
        .into_iter()
        .filter(|&index| has_class(index, class))
        .collect()
}

/// First descendant of `root` with the given class.
pub fn first_descendant_with_class(root: usize, class: &str) -> Option<usize> {
    descendants(root)
        .into_iter()
        .find(|&index| has_class(index, class))
}

// =============================================================================
// Ancestry
// =============================================================================

/// Nearest ancestor (including `index` itself) carrying a class.
///
/// Same contract as the platform `closest()`: self-inclusive.
pub fn closest_with_class(index: usize, class: &str) -> Option<usize> {
    let mut cursor = Some(index);
    while let Some(current) = cursor {
        if has_class(current, class) {
            return Some(current);
        }
        cursor = parent_of(current);
    }
    None
}

/// Whether `node` is `ancestor` or lies inside its subtree.
///
/// Same contract as the platform `contains()`: self-inclusive.
pub fn contains(ancestor: usize, node: usize) -> bool {
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        if current == ancestor {
            return true;
        }
        cursor = parent_of(current);
    }
    false
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::arena::{add_class, append_child, create_element, reset_dom_state};

    fn setup() {
        reset_dom_state();
    }

    /// nav > (li > a), (li.dropdown > a, ul > (li > a), (li > a))
    fn build_nav() -> (usize, Vec<usize>) {
        let nav = create_element("nav");
        let li1 = create_element("li");
        let a1 = create_element("a");
        append_child(nav, li1).unwrap();
        append_child(li1, a1).unwrap();

        let li2 = create_element("li");
        add_class(li2, "dropdown");
        let a2 = create_element("a");
        let ul = create_element("ul");
        let li3 = create_element("li");
        let a3 = create_element("a");
        let li4 = create_element("li");
        let a4 = create_element("a");
        append_child(nav, li2).unwrap();
        append_child(li2, a2).unwrap();
        append_child(li2, ul).unwrap();
        append_child(ul, li3).unwrap();
        append_child(li3, a3).unwrap();
        append_child(ul, li4).unwrap();
        append_child(li4, a4).unwrap();

        (nav, vec![a1, a2, a3, a4])
    }

    #[test]
    fn test_descendants_preorder() {
        setup();
        let (nav, links) = build_nav();
        let anchors = descendants_with_tag(nav, "a");
        assert_eq!(anchors, links); // document order preserved
    }

    #[test]
    fn test_query_class_document_order() {
        setup();
        let first = create_element("div");
        let second = create_element("div");
        add_class(first, "card");
        add_class(second, "card");
        assert_eq!(query_class("card"), Some(first));
        assert_eq!(query_all_class("card"), vec![first, second]);
        assert_eq!(query_class("missing"), None);
    }

    #[test]
    fn test_closest_is_self_inclusive() {
        setup();
        let (_, links) = build_nav();
        let dropdown_child = links[2];
        let found = closest_with_class(dropdown_child, "dropdown");
        assert!(found.is_some());
        // A link outside the dropdown finds nothing.
        assert_eq!(closest_with_class(links[0], "dropdown"), None);
        // Self-inclusive: asking the dropdown itself returns it.
        let dropdown = found.unwrap();
        assert_eq!(closest_with_class(dropdown, "dropdown"), Some(dropdown));
    }

    #[test]
    fn test_contains() {
        setup();
        let (nav, links) = build_nav();
        assert!(contains(nav, links[3]));
        assert!(contains(nav, nav));
        let stray = create_element("div");
        assert!(!contains(nav, stray));
    }

    #[test]
    fn test_first_descendant_with_class() {
        setup();
        let root = create_element("form");
        let group = create_element("div");
        let error = create_element("span");
        add_class(error, "error-message");
        append_child(root, group).unwrap();
        append_child(group, error).unwrap();
        assert_eq!(first_descendant_with_class(root, "error-message"), Some(error));
        assert_eq!(first_descendant_with_class(group, "success-message"), None);
    }
}
