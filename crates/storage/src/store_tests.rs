// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use klauss_core::config::CliOverrides;
use tempfile::tempdir;

fn test_store(dir: &std::path::Path) -> Store {
    let config = Config::resolve(
        CliOverrides {
            db_path: Some(dir.join("db")),
            ..Default::default()
        },
        dir,
    )
    .unwrap();
    Store::open(&config).unwrap()
}

#[test]
fn transact_persists_across_opens() {
    let dir = tempdir().unwrap();
    let store = test_store(dir.path());

    store
        .transact::<_, _, StoreError>(|state| {
            state.jobs.push(klauss_core::Job::new("first job", 0));
            Ok(())
        })
        .unwrap();

    let store2 = test_store(dir.path());
    let snapshot = store2.snapshot().unwrap();
    assert_eq!(snapshot.jobs.len(), 1);
    assert_eq!(snapshot.jobs[0].description, "first job");
}

#[test]
fn transact_rolls_back_on_error() {
    let dir = tempdir().unwrap();
    let store = test_store(dir.path());

    let result = store.transact::<_, (), StoreError>(|state| {
        state.jobs.push(klauss_core::Job::new("never saved", 0));
        Err(StoreError::CreateDir {
            path: dir.path().to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "forced failure"),
        })
    });
    assert!(result.is_err());

    let snapshot = store.snapshot().unwrap();
    assert!(snapshot.jobs.is_empty());
}

#[test]
fn snapshot_on_empty_store_is_default() {
    let dir = tempdir().unwrap();
    let store = test_store(dir.path());
    let snapshot = store.snapshot().unwrap();
    assert!(snapshot.tasks.is_empty());
}

#[test]
fn concurrent_transactions_serialize_without_losing_writes() {
    let dir = tempdir().unwrap();
    let store = std::sync::Arc::new(test_store(dir.path()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .transact::<_, _, StoreError>(|state| {
                        state.jobs.push(klauss_core::Job::new(format!("job-{i}"), 0));
                        Ok(())
                    })
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.jobs.len(), 8);
}

#[test]
fn retry_lock_succeeds_immediately_when_unlocked() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("probe.lock");
    let mut attempts = 0;
    retry_lock(
        || {
            attempts += 1;
            Ok(())
        },
        &path,
    )
    .unwrap();
    assert_eq!(attempts, 1);
}

#[test]
fn retry_lock_surfaces_transient_after_exhausting_attempts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("probe.lock");
    let mut attempts = 0;
    let err = retry_lock(
        || {
            attempts += 1;
            Err(std::io::Error::new(std::io::ErrorKind::WouldBlock, "locked"))
        },
        &path,
    )
    .unwrap_err();
    assert_eq!(attempts, RETRY_MAX_ATTEMPTS);
    assert!(matches!(err, StoreError::Transient { attempts: RETRY_MAX_ATTEMPTS, .. }));
}
