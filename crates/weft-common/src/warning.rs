//! Engine warnings with colored terminal output.
//!
//! Provides deduplication so a stylesheet that repeats the same bad fragment
//! hundreds of times reports it once. Used by the selector parser, the
//! cascade, and the resolver to report input they had to drop or default.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // The set is only ever inserted into or cleared, so a poisoned guard
    // still holds a usable set.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about dropped or defaulted input (prints once per unique message)
///
/// # Example
/// ```
/// use weft_common::warning::warn_once;
///
/// warn_once("CSS", "unknown char '>' at 4 in `div > p`");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(warning_key(component, message));

    if should_print {
        let line = format!("[Weft {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Whether `warn_once` has already reported this exact message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&warning_key(component, message)))
}

/// Clear all recorded warnings (call when reloading every stylesheet)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
