//! Viewport - scroll state and intersection watching.
//!
//! Models the host window: a scroll offset over the document plus a
//! visible height. Geometry comes from element rects (host-supplied);
//! this module only decides what is visible.
//!
//! Intersection watching mirrors the platform observer shape: an observer
//! is created with options (visibility threshold, bottom root-margin) and
//! a callback, then individual elements are observed/unobserved. Checks
//! are explicit - `scroll_to` runs one, and the page runs one at init for
//! elements already in view. A watcher fires on every check while its
//! threshold is met; one-shot consumers unobserve from inside the
//! callback.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;
use spark_signals::{Signal, signal};

use crate::dom;

// =============================================================================
// TYPES
// =============================================================================

/// Viewport height used until the host sets one.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

/// How a programmatic scroll should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Auto,
    /// Animated scroll (the animation itself is owned by the host).
    Smooth,
}

/// A recorded programmatic scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub y: f32,
    pub behavior: ScrollBehavior,
}

/// Observer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionOptions {
    /// Fraction of the element that must be visible (0.0 - 1.0).
    pub threshold: f32,
    /// Adjustment to the viewport's bottom edge in pixels. Negative values
    /// contract the viewport, so elements qualify slightly early.
    pub root_margin_bottom: f32,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin_bottom: 0.0,
        }
    }
}

/// One qualifying intersection, passed to the observer callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub observer: usize,
    pub node: usize,
    pub ratio: f32,
}

type ObserverCallback = Rc<dyn Fn(&IntersectionEntry)>;

struct Observer {
    options: IntersectionOptions,
    callback: ObserverCallback,
    observed: Vec<usize>,
}

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static SCROLL_Y: Signal<f32> = signal(0.0);
    static VIEWPORT_HEIGHT: RefCell<f32> = const { RefCell::new(DEFAULT_VIEWPORT_HEIGHT) };
    static LAST_SCROLL: RefCell<Option<ScrollRequest>> = const { RefCell::new(None) };
    static OBSERVERS: RefCell<HashMap<usize, Observer>> = RefCell::new(HashMap::new());
    static NEXT_OBSERVER_ID: RefCell<usize> = const { RefCell::new(0) };
}

/// Current scroll offset.
pub fn scroll_y() -> f32 {
    SCROLL_Y.with(|s| s.get())
}

/// Set the visible height (host window size).
pub fn set_viewport_height(height: f32) {
    VIEWPORT_HEIGHT.with(|h| *h.borrow_mut() = height);
}

/// Visible height.
pub fn viewport_height() -> f32 {
    VIEWPORT_HEIGHT.with(|h| *h.borrow())
}

/// The last programmatic scroll, if any.
pub fn last_scroll() -> Option<ScrollRequest> {
    LAST_SCROLL.with(|s| *s.borrow())
}

/// Scroll the viewport so document offset `y` sits at its top edge.
///
/// Clamps below zero, records the request, and runs an intersection check.
pub fn scroll_to(y: f32, behavior: ScrollBehavior) {
    let y = y.max(0.0);
    trace!("scroll to {y} ({behavior:?})");
    SCROLL_Y.with(|s| s.set(y));
    LAST_SCROLL.with(|s| *s.borrow_mut() = Some(ScrollRequest { y, behavior }));
    check_intersections();
}

// =============================================================================
// OBSERVERS
// =============================================================================

/// Create an observer. Elements are added with [`observe`].
pub fn create_observer<F>(options: IntersectionOptions, callback: F) -> usize
where
    F: Fn(&IntersectionEntry) + 'static,
{
    let id = NEXT_OBSERVER_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    });
    OBSERVERS.with(|observers| {
        observers.borrow_mut().insert(
            id,
            Observer {
                options,
                callback: Rc::new(callback),
                observed: Vec::new(),
            },
        );
    });
    id
}

/// Start watching an element (no-op if already watched).
pub fn observe(observer: usize, node: usize) {
    OBSERVERS.with(|observers| {
        let mut observers = observers.borrow_mut();
        if let Some(obs) = observers.get_mut(&observer) {
            if !obs.observed.contains(&node) {
                obs.observed.push(node);
            }
        }
    });
}

/// Stop watching an element.
pub fn unobserve(observer: usize, node: usize) {
    OBSERVERS.with(|observers| {
        let mut observers = observers.borrow_mut();
        if let Some(obs) = observers.get_mut(&observer) {
            obs.observed.retain(|&n| n != node);
        }
    });
}

/// Drop an observer and everything it watches.
pub fn disconnect(observer: usize) {
    OBSERVERS.with(|observers| {
        observers.borrow_mut().remove(&observer);
    });
}

/// Whether an element is currently watched.
pub fn is_observed(observer: usize, node: usize) -> bool {
    OBSERVERS.with(|observers| {
        observers
            .borrow()
            .get(&observer)
            .map(|obs| obs.observed.contains(&node))
            .unwrap_or(false)
    })
}

/// Number of elements an observer is watching.
pub fn observed_count(observer: usize) -> usize {
    OBSERVERS.with(|observers| {
        observers
            .borrow()
            .get(&observer)
            .map(|obs| obs.observed.len())
            .unwrap_or(0)
    })
}

// =============================================================================
// INTERSECTION
// =============================================================================

/// Visible fraction of a rect under the given viewport window.
///
/// Returns (ratio, overlap). A zero-height rect counts as fully visible
/// while it touches the window.
fn visibility(top: f32, bottom: f32, height: f32, view_top: f32, view_bottom: f32) -> (f32, f32) {
    let overlap = bottom.min(view_bottom) - top.max(view_top);
    if height <= 0.0 {
        let ratio = if overlap >= 0.0 { 1.0 } else { 0.0 };
        return (ratio, overlap);
    }
    ((overlap / height).clamp(0.0, 1.0), overlap)
}

/// Evaluate every observer against the current viewport and fire
/// callbacks for qualifying elements.
///
/// Entries are collected first and callbacks run outside the registry
/// borrow, so a callback may unobserve (the one-shot pattern) or even
/// disconnect.
pub fn check_intersections() {
    let view_top = scroll_y();
    let height = viewport_height();

    let mut due: Vec<(IntersectionEntry, ObserverCallback)> = Vec::new();
    OBSERVERS.with(|observers| {
        let observers = observers.borrow();
        for (&id, obs) in observers.iter() {
            let view_bottom = view_top + height + obs.options.root_margin_bottom;
            for &node in &obs.observed {
                let rect = dom::rect_of(node);
                let (ratio, overlap) =
                    visibility(rect.top(), rect.bottom(), rect.height, view_top, view_bottom);
                if overlap > 0.0 && ratio >= obs.options.threshold {
                    due.push((
                        IntersectionEntry {
                            observer: id,
                            node,
                            ratio,
                        },
                        obs.callback.clone(),
                    ));
                }
            }
        }
    });

    for (entry, callback) in due {
        trace!(
            "intersection: node {} ratio {:.2} (observer {})",
            entry.node, entry.ratio, entry.observer
        );
        callback(&entry);
    }
}

/// Reset scroll and observers (for testing).
pub fn reset_viewport_state() {
    SCROLL_Y.with(|s| s.set(0.0));
    VIEWPORT_HEIGHT.with(|h| *h.borrow_mut() = DEFAULT_VIEWPORT_HEIGHT);
    LAST_SCROLL.with(|s| *s.borrow_mut() = None);
    OBSERVERS.with(|observers| observers.borrow_mut().clear());
    NEXT_OBSERVER_ID.with(|next| *next.borrow_mut() = 0);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{create_element, reset_dom_state, set_rect};
    use crate::types::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_dom_state();
        reset_viewport_state();
    }

    #[test]
    fn test_scroll_clamps_and_records() {
        setup();
        scroll_to(-50.0, ScrollBehavior::Smooth);
        assert_eq!(scroll_y(), 0.0);
        assert_eq!(
            last_scroll(),
            Some(ScrollRequest {
                y: 0.0,
                behavior: ScrollBehavior::Smooth
            })
        );
    }

    #[test]
    fn test_offscreen_element_does_not_fire() {
        setup();
        let el = create_element("div");
        set_rect(el, Rect::new(0.0, 2000.0, 100.0, 100.0));

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        let obs = create_observer(
            IntersectionOptions {
                threshold: 0.1,
                root_margin_bottom: -50.0,
            },
            move |_| fired_clone.set(true),
        );
        observe(obs, el);

        check_intersections();
        assert!(!fired.get());

        // Scrolling it into view fires the callback via scroll_to's check.
        scroll_to(1500.0, ScrollBehavior::Auto);
        assert!(fired.get());
    }

    #[test]
    fn test_bottom_margin_contracts_viewport() {
        setup();
        set_viewport_height(800.0);
        let el = create_element("div");
        // Sits right at the true viewport bottom: top 780, height 100.
        // Effective bottom with -50 margin is 750, so only 0 px visible.
        set_rect(el, Rect::new(0.0, 780.0, 100.0, 100.0));

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        let obs = create_observer(
            IntersectionOptions {
                threshold: 0.1,
                root_margin_bottom: -50.0,
            },
            move |_| fired_clone.set(true),
        );
        observe(obs, el);

        check_intersections();
        assert!(!fired.get());

        // 40 px above the effective bottom: 40/100 = 0.4 >= 0.1.
        set_rect(el, Rect::new(0.0, 710.0, 100.0, 100.0));
        check_intersections();
        assert!(fired.get());
    }

    #[test]
    fn test_threshold_gates_firing() {
        setup();
        set_viewport_height(800.0);
        let el = create_element("div");
        // 5% visible: top 790, height 200, effective bottom 800.
        set_rect(el, Rect::new(0.0, 790.0, 100.0, 200.0));

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        let obs = create_observer(
            IntersectionOptions {
                threshold: 0.1,
                root_margin_bottom: 0.0,
            },
            move |_| fired_clone.set(true),
        );
        observe(obs, el);

        check_intersections();
        assert!(!fired.get());

        // 10% visible qualifies.
        set_rect(el, Rect::new(0.0, 780.0, 100.0, 200.0));
        check_intersections();
        assert!(fired.get());
    }

    #[test]
    fn test_callback_can_unobserve() {
        setup();
        let el = create_element("div");
        set_rect(el, Rect::new(0.0, 100.0, 100.0, 100.0));

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let obs = create_observer(IntersectionOptions::default(), move |entry| {
            count_clone.set(count_clone.get() + 1);
            unobserve(entry.observer, entry.node);
        });
        observe(obs, el);

        check_intersections();
        check_intersections();
        assert_eq!(count.get(), 1);
        assert!(!is_observed(obs, el));
    }

    #[test]
    fn test_observe_deduplicates() {
        setup();
        let el = create_element("div");
        let obs = create_observer(IntersectionOptions::default(), |_| {});
        observe(obs, el);
        observe(obs, el);
        assert_eq!(observed_count(obs), 1);

        disconnect(obs);
        assert_eq!(observed_count(obs), 0);
    }
}
