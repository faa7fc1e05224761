// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the effective prompt sent to the executor CLI: a shared-context
//! preamble, then any `context_files` contents, then the task's own prompt.

use klauss_core::Task;
use std::collections::HashMap;

/// Per-file truncation budget so one oversized context file can't starve
/// the rest of the prompt.
const CONTEXT_FILE_BUDGET_BYTES: usize = 8192;

pub fn build_prompt(task: &Task, shared_context: &HashMap<String, String>) -> String {
    let mut sections = Vec::new();

    if !shared_context.is_empty() {
        let mut preamble = String::from("Project Conventions (follow these):\n");
        let mut entries: Vec<_> = shared_context.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            preamble.push_str(&format!("{key}: {value}\n"));
        }
        sections.push(preamble);
    }

    for path in &task.context_files {
        match std::fs::read_to_string(path) {
            Ok(contents) => sections.push(format!("# {path}\n{}", truncate(&contents))),
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to read context file, skipping");
            }
        }
    }

    sections.push(task.description.clone());
    sections.join("\n\n")
}

fn truncate(s: &str) -> String {
    if s.len() <= CONTEXT_FILE_BUDGET_BYTES {
        return s.to_string();
    }
    let mut end = CONTEXT_FILE_BUDGET_BYTES;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\n... [truncated]", &s[..end])
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
