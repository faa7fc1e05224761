// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `klauss` binary: each test shells out to the
//! built binary against a throwaway project directory.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli/init_config.rs"]
mod init_config;
#[path = "specs/cli/lifecycle.rs"]
mod lifecycle;
#[path = "specs/cli/submit_and_list.rs"]
mod submit_and_list;
