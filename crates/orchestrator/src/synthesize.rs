// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Formats collected task results into a single text blob a controlling
//! process can feed back to the executor CLI for summarization. Pure — no
//! state mutation, no I/O.

use crate::wait::CollectedResults;

pub fn synthesize_results(results: &CollectedResults, synthesis_prompt: &str) -> String {
    let mut out = String::new();
    out.push_str(synthesis_prompt);
    out.push_str("\n\n");

    if !results.completed.is_empty() {
        out.push_str(&format!("Completed tasks ({}):\n", results.completed.len()));
        let mut ids: Vec<_> = results.completed.keys().copied().collect();
        ids.sort();
        for id in ids {
            let outcome = &results.completed[&id];
            out.push_str(&format!("- task {id}: {}\n", first_line(&outcome.stdout)));
        }
        out.push('\n');
    }

    if !results.failed.is_empty() {
        out.push_str(&format!("Failed tasks ({}):\n", results.failed.len()));
        let mut ids: Vec<_> = results.failed.keys().copied().collect();
        ids.sort();
        for id in ids {
            let outcome = &results.failed[&id];
            let reason = outcome.error_message.as_deref().unwrap_or("unknown error");
            out.push_str(&format!("- task {id}: {reason}\n"));
        }
    }

    out
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

#[cfg(test)]
#[path = "synthesize_tests.rs"]
mod tests;
