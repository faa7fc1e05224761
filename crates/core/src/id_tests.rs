// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

// --- define_id! macro tests ---

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId("tst-");
}

#[test]
fn define_id_hash_map_lookup() {
    let id = TestId::new();
    let mut map = HashMap::new();
    map.insert(id, 42);
    assert_eq!(map.get(id.as_str()), Some(&42));
}

#[test]
fn define_id_has_prefix() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst-"));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn define_id_from_string_round_trips() {
    let id = TestId::from_string("tst-fixed-value");
    assert_eq!(id.as_str(), "tst-fixed-value");
    assert_eq!(id.suffix(), "fixed-value");
}

#[test]
fn define_id_short_truncates_suffix() {
    let id = TestId::from_string("tst-abcdefghij");
    assert_eq!(id.short(4), "abcd");
}

#[test]
fn define_id_short_returns_full_when_shorter() {
    let id = TestId::from_string("tst-abc");
    assert_eq!(id.short(8), "abc");
}

#[test]
fn define_id_display_matches_as_str() {
    let id = TestId::from_string("tst-xyz");
    assert_eq!(id.to_string(), "tst-xyz");
}

#[test]
fn short_fn_on_str() {
    let s = "abcdefghijklmnop";
    assert_eq!(short(s, 8), "abcdefgh");
    assert_eq!(short(s, 100), s);
    assert_eq!(short("abc", 8), "abc");
}

// --- TaskId tests ---

#[test]
fn task_id_next_after_empty_is_one() {
    assert_eq!(TaskId::next_after(std::iter::empty()), TaskId(1));
}

#[test]
fn task_id_next_after_existing_increments_max() {
    let existing = vec![TaskId(1), TaskId(5), TaskId(3)];
    assert_eq!(TaskId::next_after(existing.into_iter()), TaskId(6));
}

#[test]
fn task_id_displays_as_bare_integer() {
    assert_eq!(TaskId(42).to_string(), "42");
}

#[test]
fn task_id_serializes_as_integer() {
    let json = serde_json::to_string(&TaskId(7)).unwrap();
    assert_eq!(json, "7");
}
