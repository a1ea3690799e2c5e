//! Result rendering.
//!
//! Turns the value a pipeline produced into the text printed after the
//! `< ` prefix. Scalars print literally, a single record prints as a
//! labeled block, and a list of records sharing fields prints as an
//! aligned table. This is plain text, not a widget layer.

use grush_types::{Record, Value};

/// Render a result value for display.
pub fn render(value: &Value) -> String {
    match value {
        Value::Record(record) => render_block(record),
        Value::List(records) => render_list(records),
        scalar => scalar.to_string(),
    }
}

fn render_block(record: &Record) -> String {
    let mut out = String::new();
    for (name, value) in record.iter() {
        out.push_str(&format!("{name}: {value}\n"));
    }
    // Drop the trailing newline so callers control line endings.
    out.pop();
    out
}

fn render_list(records: &[Record]) -> String {
    if records.is_empty() {
        return "(empty)".to_string();
    }
    match columns(records) {
        Some(columns) => render_table(records, &columns),
        None => records
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Column order for a table: the first record's field order, with fields
/// that only appear later appended in encounter order. Returns None when
/// some record shares no field with the first, in which case the list is
/// too ragged for a table.
fn columns(records: &[Record]) -> Option<Vec<String>> {
    let mut columns: Vec<String> = records[0].names().map(String::from).collect();
    for record in &records[1..] {
        if !record.names().any(|n| columns.iter().any(|c| c == n)) {
            return None;
        }
        for name in record.names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    Some(columns)
}

fn render_table(records: &[Record], columns: &[String]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| match record.get(column) {
                    Some(value) => value.to_string(),
                    None => String::new(),
                })
                .collect()
        })
        .collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    render_row(&mut out, columns.iter().map(String::as_str), &widths);
    for row in &rows {
        out.push('\n');
        render_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn render_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{cell:<width$}", width = widths[i]));
    }
    out.push_str(line.trim_end());
}
