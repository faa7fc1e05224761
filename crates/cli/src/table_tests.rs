// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn render_pads_columns_to_widest_cell() {
    std::env::set_var("NO_COLOR", "1");
    let mut table = Table::new(vec![Column::left("ID"), Column::left("NAME")]);
    table.row(vec!["1".to_string(), "short".to_string()]);
    table.row(vec!["22".to_string(), "a-much-longer-name".to_string()]);

    let mut out = Vec::new();
    table.render(&mut out);
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[2].contains("a-much-longer-name"));
}

#[test]
fn render_with_no_rows_prints_only_header() {
    std::env::set_var("NO_COLOR", "1");
    let table = Table::new(vec![Column::left("NAME")]);
    let mut out = Vec::new();
    table.render(&mut out);
    assert_eq!(String::from_utf8(out).unwrap(), "NAME\n");
}
