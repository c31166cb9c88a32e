// ── Result formatting ──
//
// Lists of records become a Markdown table keyed on the first record's
// fields; everything else falls back to a plain string. Records are not
// checked for uniformity: fields a row lacks render as empty cells.

use std::fmt::Write;

use merakly_api::Record;
use serde_json::Value;

use crate::dispatch::RawResult;

/// Render a tool result for display.
pub fn format_result(result: &RawResult) -> String {
    match result {
        RawResult::Records(records) => match records.first() {
            Some(first) => markdown_table(first, records.iter().map(Some)),
            None => "[]".into(),
        },
        RawResult::Value(Value::Array(items)) => match items.first() {
            Some(Value::Object(first)) => {
                markdown_table(first, items.iter().map(Value::as_object))
            }
            _ => format_value(&Value::Array(items.clone())),
        },
        RawResult::Value(value) => format_value(value),
        RawResult::Text(text) => text.clone(),
    }
}

fn markdown_table<'a>(
    header_source: &Record,
    rows: impl Iterator<Item = Option<&'a Record>>,
) -> String {
    let headers: Vec<&str> = header_source.keys().map(String::as_str).collect();

    let mut out = String::new();
    let _ = writeln!(out, "| {} |", headers.join(" | "));
    let _ = writeln!(out, "| {} |", vec!["---"; headers.len()].join(" | "));

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.and_then(|r| r.get(*h)).map(cell).unwrap_or_default())
            .collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    out
}

/// One table cell: strings unquoted, null empty, everything else as JSON.
/// Pipes and line breaks would break the table layout, so they are escaped.
fn cell(value: &Value) -> String {
    let raw = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    raw.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
