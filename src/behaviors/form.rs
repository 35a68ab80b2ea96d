//! Form behavior - field validation and the simulated submission flow.
//!
//! Per form: Idle -> (validate) -> Invalid | Submitting -> Idle.
//!
//! - Blur on any form control revalidates just that control
//! - Submit validates every control; any failure aborts with inline
//!   errors left visible
//! - A valid submit disables the button, swaps its label for a loading
//!   indicator, waits a fixed delay standing in for the network round
//!   trip, then shows a success banner, clears the fields, restores the
//!   button, and schedules the banner to auto-hide
//!
//! Validation failures are form state, never `Err`: the user edits and
//! retries. The success auto-hide timer is cancellable - a newer
//! submission cancels a stale pending hide so an old timer can no longer
//! hide a fresh banner.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::dom;
use crate::events;
use crate::timers::{self, TimerHandle};
use crate::types::class;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Simulated network round-trip for a submission.
pub const SUBMIT_DELAY_MS: u64 = 1500;

/// How long the success banner stays up.
pub const SUCCESS_HIDE_DELAY_MS: u64 = 5000;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const SUCCESS_MESSAGE_TEXT: &str = "Thank you! Your message has been sent successfully.";
pub const SENDING_LABEL: &str = "Sending...";

/// Border color applied to an invalid field.
pub const ERROR_BORDER_COLOR: &str = "#ff4444";

/// Fallback label if a button never had its original captured.
const FALLBACK_SUBMIT_LABEL: &str = "Submit";

/// Attribute caching a submit button's pristine label.
const ORIGINAL_TEXT_ATTR: &str = "data-original-text";

const BORDER_COLOR_PROPERTY: &str = "border-color";

// =============================================================================
// VALIDATION PATTERNS
// =============================================================================

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

// Loose international shape: optional leading +, digit groups with
// optional parens, separated by -, space or dot, 1-9 trailing digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?(?:[-\s.]?[(]?[0-9]{1,4}[)]?)*[-\s.]?[0-9]{1,9}$")
        .expect("phone pattern compiles")
});

/// `local@domain.tld`-shaped check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Loose international-phone-shaped check.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

// =============================================================================
// FORM STATE
// =============================================================================

/// Submission state per form instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Default)]
struct FormRuntime {
    state: SubmitState,
    /// Pending success auto-hide, cancelled when a newer submission settles.
    pending_hide: Option<TimerHandle>,
}

thread_local! {
    static FORMS: RefCell<HashMap<usize, FormRuntime>> = RefCell::new(HashMap::new());
}

/// Submission state of a form (Idle for unknown forms).
pub fn submit_state(form: usize) -> SubmitState {
    FORMS.with(|forms| {
        forms
            .borrow()
            .get(&form)
            .map(|runtime| runtime.state)
            .unwrap_or_default()
    })
}

fn set_submit_state(form: usize, state: SubmitState) {
    FORMS.with(|forms| {
        forms.borrow_mut().entry(form).or_default().state = state;
    });
}

fn take_pending_hide(form: usize) -> Option<TimerHandle> {
    FORMS.with(|forms| {
        forms
            .borrow_mut()
            .get_mut(&form)
            .and_then(|runtime| runtime.pending_hide.take())
    })
}

fn set_pending_hide(form: usize, handle: Option<TimerHandle>) {
    FORMS.with(|forms| {
        forms.borrow_mut().entry(form).or_default().pending_hide = handle;
    });
}

// =============================================================================
// FIELD VALIDATION
// =============================================================================

/// First failing rule for a field, if any. Rules in priority order:
/// required-but-empty, then email shape, then phone shape. Shape rules
/// only apply to non-empty values.
pub fn validation_error(field: usize) -> Option<&'static str> {
    let raw = dom::value_of(field);
    let value = raw.trim();

    if dom::is_required(field) && value.is_empty() {
        return Some(REQUIRED_MESSAGE);
    }

    match dom::get_attribute(field, "name").as_deref() {
        Some("email") if !value.is_empty() && !is_valid_email(value) => {
            Some(INVALID_EMAIL_MESSAGE)
        }
        Some("phone") if !value.is_empty() && !is_valid_phone(value) => {
            Some(INVALID_PHONE_MESSAGE)
        }
        _ => None,
    }
}

/// Sibling error-message container for a field (under its parent group).
fn error_container(field: usize) -> Option<usize> {
    dom::parent_of(field)
        .and_then(|parent| dom::first_descendant_with_class(parent, class::ERROR_MESSAGE))
}

/// Revalidate one field, updating its inline error presentation.
///
/// Clears any previous error first, then re-shows one if a rule fails.
/// Returns whether the field is valid.
pub fn validate_field(field: usize) -> bool {
    let error = error_container(field);
    if let Some(error) = error {
        dom::remove_class(error, class::SHOW);
        dom::clear_inline_style(field, BORDER_COLOR_PROPERTY);
    }

    match validation_error(field) {
        Some(message) => {
            debug!("field {field} invalid: {message}");
            if let Some(error) = error {
                dom::set_text(error, message);
                dom::add_class(error, class::SHOW);
                dom::set_inline_style(field, BORDER_COLOR_PROPERTY, ERROR_BORDER_COLOR);
            }
            false
        }
        None => true,
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// First submit-typed button inside a form.
fn submit_button_of(form: usize) -> Option<usize> {
    dom::descendants_with_tag(form, "button")
        .into_iter()
        .find(|&button| dom::get_attribute(button, "type").as_deref() == Some("submit"))
}

fn handle_submit(form: usize) {
    // The disabled button already blocks this in the UI; the state check
    // keeps the machine consistent if a submit is dispatched anyway.
    if submit_state(form) == SubmitState::Submitting {
        debug!("form {form}: submit ignored while in flight");
        return;
    }

    let mut all_valid = true;
    for field in dom::descendants_with_class(form, class::FORM_CONTROL) {
        if !validate_field(field) {
            all_valid = false;
        }
    }
    if !all_valid {
        debug!("form {form}: submission aborted, invalid fields");
        return;
    }

    debug!("form {form}: submitting");
    set_submit_state(form, SubmitState::Submitting);

    if let Some(button) = submit_button_of(form) {
        dom::set_disabled(button, true);
        dom::add_class(button, class::LOADING);
        dom::set_text(button, SENDING_LABEL);
    }

    timers::set_timeout(SUBMIT_DELAY_MS, move || settle_submission(form));
}

/// Simulated round trip finished: success banner, reset, restore button.
fn settle_submission(form: usize) {
    if let Some(success) = dom::first_descendant_with_class(form, class::SUCCESS_MESSAGE) {
        dom::set_text(success, SUCCESS_MESSAGE_TEXT);
        dom::add_class(success, class::SHOW);

        // A hide scheduled by an earlier submission must not clip this
        // banner short.
        if let Some(stale) = take_pending_hide(form) {
            timers::cancel(stale);
        }
        let handle = timers::set_timeout(SUCCESS_HIDE_DELAY_MS, move || {
            dom::remove_class(success, class::SHOW);
            set_pending_hide(form, None);
        });
        set_pending_hide(form, Some(handle));
    }

    for field in dom::descendants_with_class(form, class::FORM_CONTROL) {
        dom::set_value(field, "");
    }

    if let Some(button) = submit_button_of(form) {
        dom::set_disabled(button, false);
        dom::remove_class(button, class::LOADING);
        let original = dom::get_attribute(button, ORIGINAL_TEXT_ATTR)
            .unwrap_or_else(|| FALLBACK_SUBMIT_LABEL.to_string());
        dom::set_text(button, original);
    }

    debug!("form {form}: settled");
    set_submit_state(form, SubmitState::Idle);
}

// =============================================================================
// INIT
// =============================================================================

/// Cache every submit button's pristine label so it can be restored
/// verbatim after a submission. Runs once per button: a label captured
/// earlier is never overwritten.
fn capture_submit_labels() {
    for button in dom::query_all_tag("button") {
        if dom::get_attribute(button, "type").as_deref() != Some("submit") {
            continue;
        }
        if !dom::has_attribute(button, ORIGINAL_TEXT_ATTR) {
            dom::set_attribute(button, ORIGINAL_TEXT_ATTR, dom::text_of(button));
        }
    }
}

/// Wire every form on the page: blur validation per control, submit
/// handling per form, and one-time label capture.
pub fn init_forms() {
    for form in dom::query_all_tag("form") {
        FORMS.with(|forms| {
            forms.borrow_mut().entry(form).or_default();
        });

        let _ = events::on_submit(form, move |_| {
            handle_submit(form);
            true // default page navigation is always prevented
        });

        for field in dom::descendants_with_class(form, class::FORM_CONTROL) {
            let _ = events::on_blur(field, move |_| {
                validate_field(field);
                false
            });
        }
    }

    capture_submit_labels();
}

/// Reset form runtime state (for testing).
pub fn reset_form_state() {
    FORMS.with(|forms| forms.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================
