//! Engine warnings routed through `tracing`.
//!
//! Provides deduplication to avoid spamming the same warning multiple times,
//! e.g. an unknown rule id named in a rule set that is reused for every file
//! of a run. Used by the rule runtime.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Emit a warning for `component` once per unique message.
///
/// Returns `true` when the warning was emitted, `false` when it had already
/// been seen earlier in the process.
///
/// # Example
/// ```ignore
/// let _ = warn_once("Rules", "unknown rule `tag-pairs` in rule set");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
    should_emit
}

#[cfg(test)]
mod tests {
    use super::warn_once;

    #[test]
    fn repeated_message_is_emitted_once() {
        let message = "repeated_message_is_emitted_once";
        assert!(warn_once("Test", message));
        assert!(!warn_once("Test", message));
        assert!(warn_once("Other", message));
    }
}
