//! Events - page event types, listener registry, bubbling dispatch.
//!
//! State and handler registry for the three event kinds the behaviors
//! consume. Does NOT own any real input source - the host (or a test)
//! dispatches events explicitly.
//!
//! # API
//!
//! - `on_click(node, handler)` / `on_blur` / `on_submit` - per-node listeners
//! - `on_document_click(handler)` - document-level listener (outside-click)
//! - `dispatch_click(target)` - bubble from target to root, then document
//! - `last_event()` - last dispatched event
//!
//! A handler returns `true` to consume the event: bubbling stops after the
//! current node and the default action is suppressed (the dispatch return
//! value). Click events bubble; blur and submit are delivered to their
//! target only, matching platform semantics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;
use spark_signals::{Signal, signal};

use crate::dom;

// =============================================================================
// TYPES
// =============================================================================

/// Event kind, used as registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Blur,
    Submit,
}

/// A dispatched page event.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// Pointer click on an element.
    Click { target: usize },
    /// A form control lost focus.
    Blur { target: usize },
    /// A form was submitted.
    Submit { form: usize },
}

impl PageEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Blur { .. } => EventKind::Blur,
            Self::Submit { .. } => EventKind::Submit,
        }
    }

    /// The element the event was dispatched to.
    pub fn target(&self) -> usize {
        match self {
            Self::Click { target } | Self::Blur { target } => *target,
            Self::Submit { form } => *form,
        }
    }
}

/// Handler for page events. Return true to consume the event.
pub type EventHandler = Rc<dyn Fn(&PageEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<PageEvent>> = signal(None);
}

/// Get the last dispatched event.
pub fn last_event() -> Option<PageEvent> {
    LAST_EVENT.with(|s| s.get())
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    node_handlers: HashMap<(usize, EventKind), Vec<(usize, EventHandler)>>,
    document_handlers: HashMap<EventKind, Vec<(usize, EventHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            node_handlers: HashMap::new(),
            document_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Subscribe to an event kind on a specific element.
/// Return true from the handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(node: usize, kind: EventKind, handler: F) -> impl FnOnce()
where
    F: Fn(&PageEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.node_handlers
            .entry((node, kind))
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.node_handlers.get_mut(&(node, kind)) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.node_handlers.remove(&(node, kind));
                }
            }
        });
    }
}

/// Subscribe to clicks on an element. Returns cleanup function.
pub fn on_click<F>(node: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&PageEvent) -> bool + 'static,
{
    on(node, EventKind::Click, handler)
}

/// Subscribe to blur on an element. Returns cleanup function.
pub fn on_blur<F>(node: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&PageEvent) -> bool + 'static,
{
    on(node, EventKind::Blur, handler)
}

/// Subscribe to submit on a form element. Returns cleanup function.
pub fn on_submit<F>(node: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&PageEvent) -> bool + 'static,
{
    on(node, EventKind::Submit, handler)
}

/// Subscribe to clicks at the document level.
///
/// Document handlers run after the bubble path, and only when no node
/// handler consumed the event. Returns cleanup function.
pub fn on_document_click<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&PageEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.document_handlers
            .entry(EventKind::Click)
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.document_handlers.get_mut(&EventKind::Click) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.document_handlers.remove(&EventKind::Click);
                }
            }
        });
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

fn handlers_for(node: usize, kind: EventKind) -> Vec<EventHandler> {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.node_handlers
            .get(&(node, kind))
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    })
}

fn document_handlers_for(kind: EventKind) -> Vec<EventHandler> {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.document_handlers
            .get(&kind)
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    })
}

/// Dispatch a click: target, then ancestors, then document handlers.
///
/// All handlers on a node run even if one consumes; a consumed event stops
/// before the next node and skips document handlers. Returns true if any
/// handler consumed the event (i.e. the default action is suppressed).
pub fn dispatch_click(target: usize) -> bool {
    let event = PageEvent::Click { target };
    LAST_EVENT.with(|s| s.set(Some(event.clone())));
    trace!("dispatch click on {target}");

    // Bubble path, computed up front so handlers can mutate the tree.
    let mut path = vec![target];
    let mut cursor = dom::parent_of(target);
    while let Some(node) = cursor {
        path.push(node);
        cursor = dom::parent_of(node);
    }

    let mut consumed = false;
    for node in path {
        for handler in handlers_for(node, EventKind::Click) {
            consumed |= handler(&event);
        }
        if consumed {
            return true;
        }
    }

    for handler in document_handlers_for(EventKind::Click) {
        consumed |= handler(&event);
    }
    consumed
}

/// Dispatch blur to a single element (no bubbling).
pub fn dispatch_blur(target: usize) {
    let event = PageEvent::Blur { target };
    LAST_EVENT.with(|s| s.set(Some(event.clone())));
    for handler in handlers_for(target, EventKind::Blur) {
        handler(&event);
    }
}

/// Dispatch submit to a form element (no bubbling).
///
/// Returns true if a handler consumed the event (default navigation
/// suppressed - the form handler always consumes).
pub fn dispatch_submit(form: usize) -> bool {
    let event = PageEvent::Submit { form };
    LAST_EVENT.with(|s| s.set(Some(event.clone())));
    let mut consumed = false;
    for handler in handlers_for(form, EventKind::Submit) {
        consumed |= handler(&event);
    }
    consumed
}

// =============================================================================
// CLEANUP
// =============================================================================

/// Clear all handlers and state.
pub fn reset_event_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.node_handlers.clear();
        reg.document_handlers.clear();
        reg.next_id = 0;
    });
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================
