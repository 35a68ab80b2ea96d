//! Timers - deterministic virtual-clock timer queue.
//!
//! The engine has no event loop of its own, so time is explicit: nothing
//! fires until the host calls `advance(ms)`. Due callbacks run in schedule
//! order (earliest deadline first, ties broken by creation order) and run
//! outside the queue borrow, so a callback may schedule or cancel further
//! timers.
//!
//! Every `set_timeout` returns a [`TimerHandle`] that can be cancelled.
//! This is what lets the form handler cancel a stale success auto-hide
//! when a newer submission settles.

use std::cell::RefCell;

use log::trace;

// =============================================================================
// TYPES
// =============================================================================

/// Opaque handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle(usize);

struct TimerEntry {
    id: usize,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

struct TimerQueue {
    now: u64,
    next_id: usize,
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

thread_local! {
    static QUEUE: RefCell<TimerQueue> = RefCell::new(TimerQueue::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Schedule `callback` to run `delay_ms` from the current virtual time.
pub fn set_timeout<F>(delay_ms: u64, callback: F) -> TimerHandle
where
    F: FnOnce() + 'static,
{
    QUEUE.with(|queue| {
        let mut queue = queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + delay_ms;
        queue.entries.push(TimerEntry {
            id,
            due,
            callback: Box::new(callback),
        });
        trace!("timer {id} scheduled at +{delay_ms}ms (due {due})");
        TimerHandle(id)
    })
}

/// Cancel a pending timer. Returns true if it was still pending.
pub fn cancel(handle: TimerHandle) -> bool {
    QUEUE.with(|queue| {
        let mut queue = queue.borrow_mut();
        let before = queue.entries.len();
        queue.entries.retain(|entry| entry.id != handle.0);
        queue.entries.len() != before
    })
}

/// Advance the virtual clock by `ms`, running every timer that comes due.
///
/// The clock steps to each deadline in turn before running its callback,
/// so a callback that schedules a follow-up timer measures its delay from
/// its own deadline - and the follow-up also fires if it falls within the
/// same advance window.
pub fn advance(ms: u64) {
    let target = QUEUE.with(|queue| queue.borrow().now + ms);

    loop {
        // Pop the earliest due entry, if any, without holding the borrow
        // while its callback runs.
        let next = QUEUE.with(|queue| {
            let mut queue = queue.borrow_mut();
            let position = queue
                .entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.due <= target)
                .min_by_key(|(_, entry)| (entry.due, entry.id))
                .map(|(position, _)| position);
            match position {
                Some(position) => {
                    let entry = queue.entries.swap_remove(position);
                    queue.now = queue.now.max(entry.due);
                    Some(entry)
                }
                None => {
                    queue.now = target;
                    None
                }
            }
        });

        match next {
            Some(entry) => {
                trace!("timer {} firing at {}", entry.id, entry.due);
                (entry.callback)();
            }
            None => break,
        }
    }
}

/// Current virtual time in milliseconds.
pub fn now() -> u64 {
    QUEUE.with(|queue| queue.borrow().now)
}

/// Number of timers still pending.
pub fn pending_count() -> usize {
    QUEUE.with(|queue| queue.borrow().entries.len())
}

/// Clear all timers and rewind the clock (for testing).
pub fn reset_timer_state() {
    QUEUE.with(|queue| {
        let mut queue = queue.borrow_mut();
        queue.entries.clear();
        queue.now = 0;
        queue.next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================
