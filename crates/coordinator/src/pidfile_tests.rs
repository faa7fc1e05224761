// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn write_then_read_round_trips_the_pid() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("db");
    write_pidfile(&db_path, 4242).unwrap();
    assert_eq!(read_pidfile(&db_path), Some(4242));
}

#[test]
fn read_returns_none_when_missing() {
    let dir = tempdir().unwrap();
    assert_eq!(read_pidfile(&dir.path().join("db")), None);
}

#[test]
fn remove_deletes_the_file() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("db");
    write_pidfile(&db_path, 1).unwrap();
    remove_pidfile(&db_path);
    assert_eq!(read_pidfile(&db_path), None);
}
