//! Tests for resetting the warning registry.
//!
//! Kept in their own test binary: clearing is process-wide and would race
//! the assertions in other registry tests.

use tagtree_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_clear_warnings_allows_reporting_again() {
    assert!(warn_once("Test", "cleared"));
    assert!(warn_once("Other", "cleared"));
    assert!(!warn_once("Test", "cleared"));

    clear_warnings();
    assert!(!has_warned("Test", "cleared"));
    assert!(!has_warned("Other", "cleared"));

    assert!(warn_once("Test", "cleared"));
    assert!(has_warned("Test", "cleared"));
}
