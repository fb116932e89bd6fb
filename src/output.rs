//! Output — prints a [`NormalizedLogsView`] as plain log lines or as JSON.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use logframe_core::config::{OutputConfig, OutputFormat};
use logframe_core::{LogLevel, LogRow, NormalizedLogsView};
use serde_json::{json, Value};

/// Render `view` in the configured format. Every line ends with `\n`.
pub fn render(view: &NormalizedLogsView<'_>, config: &OutputConfig) -> anyhow::Result<String> {
    match config.format {
        OutputFormat::Lines => Ok(render_lines(view, config)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&view_to_json(view))?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// The resolved column roles and every row as a JSON document.
pub fn view_to_json(view: &NormalizedLogsView<'_>) -> Value {
    let rows: Vec<Value> = view.rows().map(|row| row_to_json(&row)).collect();
    json!({
        "shape": view.shape.to_string(),
        "fields": {
            "time": view.time_field.name,
            "body": view.body_field.name,
            "timeNanosecond": view.time_nanosecond_field.map(|c| &c.name),
            "severity": view.severity_field.map(|c| &c.name),
            "id": view.id_field.map(|c| &c.name),
        },
        "hasAttributes": view.attributes.is_some(),
        "extraFields": view.extra_fields.iter().map(|c| &c.name).collect::<Vec<_>>(),
        "rows": rows,
    })
}

fn row_to_json(row: &LogRow<'_>) -> Value {
    json!({
        "time": row.time_ms,
        "timeNs": row.time_ns,
        "timestamp": row.timestamp().map(|ts| ts.to_rfc3339()),
        "body": row.body,
        "severity": row.severity,
        "id": row.id,
        "attributes": row.attributes,
    })
}

/// One line per row: `[timestamp] [LEVEL] body {k=v, ...}`.
pub fn render_lines(view: &NormalizedLogsView<'_>, config: &OutputConfig) -> String {
    let mut out = String::new();
    for row in view.rows() {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if config.show_timestamps {
            parts.push(
                row.timestamp()
                    .map_or_else(|| "-".to_string(), |ts| format_timestamp(ts, &config.timestamp_format)),
            );
        }
        if let Some(severity) = row.severity {
            let label = LogLevel::from_severity(severity)
                .map_or_else(|| severity.to_uppercase(), |level| level.to_string());
            parts.push(format!("[{label}]"));
        }
        parts.push(row.body.unwrap_or_default().to_string());
        if config.show_attributes {
            if let Some(attributes) = row.attributes.filter(|a| !a.is_empty()) {
                let pairs: Vec<String> = attributes.iter().map(|(k, v)| format!("{k}={v}")).collect();
                parts.push(format!("{{{}}}", pairs.join(", ")));
            }
        }
        out.push_str(&parts.join(" "));
        out.push('\n');
    }
    out
}

/// Falls back to RFC 3339 when `format` is not a valid strftime string.
fn format_timestamp(ts: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(format)).is_err() {
        return ts.to_rfc3339();
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
