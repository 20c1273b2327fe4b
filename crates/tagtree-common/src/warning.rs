//! Parser diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the parser to report terminal parse failures, and by the
//! `parse-trace` feature to print state transitions.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock leaves the set intact, so keep using it.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a problem in `component` (prints once per unique message)
///
/// Returns `true` if this call printed, `false` if the message was already
/// reported. Keep `message` free of offsets and other per-call detail: every
/// distinct message stays in the registry until [`clear_warnings`].
///
/// # Example
/// ```
/// use tagtree_common::warning::{has_warned, warn_once};
///
/// assert!(warn_once("Markup Parser", "mismatched close tag"));
/// assert!(!warn_once("Markup Parser", "mismatched close tag"));
/// assert!(has_warned("Markup Parser", "mismatched close tag"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[tagtree {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Whether `warn_once` has already reported this exact message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call before parsing a new document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

/// Print a trace line for `component`. Never deduplicated.
pub fn trace(component: &str, message: &str) {
    eprintln!("{}", format!("[tagtree {component}] {message}").dimmed());
}
