// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal fixed-width table renderer for `text`-format command output.

use std::io::Write;

pub struct Column {
    pub header: String,
    pub status: bool,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Column {
            header: header.to_string(),
            status: false,
        }
    }

    /// Like `left`, but rendered with the status color helpers.
    pub fn status(header: &str) -> Self {
        Column {
            header: header.to_string(),
            status: true,
        }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn render(&self, out: &mut impl Write) {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.header.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.len());
                }
            }
        }

        let header_line: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c.header, width = w))
            .collect();
        let _ = writeln!(out, "{}", crate::color::header(&header_line.join("  ")));

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let padded = format!("{:<width$}", cell, width = w);
                    if self.columns.get(i).is_some_and(|c| c.status) {
                        crate::color::context(&padded)
                    } else {
                        padded
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", line.join("  "));
        }
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
