// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jittered poll interval for the claim loop, so many idle workers don't
//! all hammer the store on the same tick.

use rand::Rng;
use std::time::Duration;

const POLL_MIN_MS: u64 = 1000;
const POLL_MAX_MS: u64 = 3000;

pub fn jittered_poll_interval() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(POLL_MIN_MS..=POLL_MAX_MS))
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
