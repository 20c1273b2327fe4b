//! Tests for the deduplicating warning registry.

use tagtree_common::warning::{has_warned, warn_once};

#[test]
fn test_warn_once_records_message() {
    assert!(!has_warned("Test", "first message"));
    assert!(warn_once("Test", "first message"));
    assert!(has_warned("Test", "first message"));
}

#[test]
fn test_warnings_are_keyed_by_component() {
    assert!(warn_once("Tokenizer", "shared text"));
    assert!(warn_once("Builder", "shared text"));
    assert!(has_warned("Tokenizer", "shared text"));
    assert!(!has_warned("Loader", "shared text"));
}

#[test]
fn test_repeated_warning_is_printed_once() {
    assert!(warn_once("Test", "repeated"));
    assert!(!warn_once("Test", "repeated"));
    assert!(!warn_once("Test", "repeated"));
}
