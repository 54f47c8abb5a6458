//! Deferred Tests
//!
//! Tests for the single-assignment result holder.

use std::sync::Arc;
use std::thread;

use respkv::{Deferred, ErrorKind};

// =============================================================================
// Basic Tests
// =============================================================================

#[test]
fn test_new_is_pending() {
    let result: Deferred<i64> = Deferred::new();
    assert!(!result.is_done());
}

#[test]
fn test_get_before_set_fails() {
    let result: Deferred<Option<String>> = Deferred::new();
    let err = result.get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalState);
}

#[test]
fn test_set_then_get() {
    let result = Deferred::new();
    result.set(Some("v1".to_string())).unwrap();

    assert!(result.is_done());
    assert_eq!(result.get().unwrap(), Some("v1".to_string()));
    // Reads are repeatable
    assert_eq!(result.get().unwrap(), Some("v1".to_string()));
}

#[test]
fn test_second_set_fails_and_keeps_first() {
    let result = Deferred::new();
    result.set(1i64).unwrap();

    let err = result.set(2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalState);
    assert_eq!(result.get().unwrap(), 1);
}

#[test]
fn test_clones_share_slot() {
    let result: Deferred<i64> = Deferred::default();
    let alias = result.clone();

    alias.set(42).unwrap();
    assert_eq!(result.get().unwrap(), 42);
    assert!(result.set(43).is_err());
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_visible_across_threads() {
    let result: Deferred<i64> = Deferred::new();
    let writer = result.clone();

    thread::spawn(move || writer.set(7).unwrap()).join().unwrap();

    assert_eq!(result.get().unwrap(), 7);
}

#[test]
fn test_concurrent_set_exactly_one_wins() {
    let result: Arc<Deferred<usize>> = Arc::new(Deferred::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let result = Arc::clone(&result);
            thread::spawn(move || result.set(i).is_ok())
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert!(result.get().unwrap() < 8);
}
