//! Representative log frames, one per known schema.
//!
//! The frame-building fixtures mirror what each producer actually emits; the
//! `*_JSON` constants are the same shapes in wire form for decoding and CLI
//! tests.

use logframe_core::{Frame, FrameMeta};

use super::builders::{labels, object_row, FrameBuilder};

pub const T0: i64 = 1687185711795;
pub const T1: i64 = 1687185711995;

/// Dataplane frame: `log-lines` tag, columns in a non-canonical order.
pub fn dataplane_frame() -> Frame {
    FrameBuilder::new()
        .string("id", ["id1", "id2"])
        .string("body", ["line1", "line2"])
        .object(
            "attributes",
            [
                object_row(&[("counter", "38141"), ("label", "val2"), ("level", "warning")]),
                object_row(&[("counter", "38143"), ("label", "val2"), ("level", "info")]),
            ],
        )
        .string("severity", ["info", "debug"])
        .time("timestamp", [T0, T1])
        .meta(FrameMeta::log_lines())
        .build()
}

/// Legacy multi-frame result: labels hang off the `line` column.
pub fn legacy_frame() -> Frame {
    FrameBuilder::new()
        .time("ts", [T0, T1])
        .labeled_string(
            "line",
            ["line1", "line2"],
            labels(&[("counter", "34543"), ("lable", "val3"), ("level", "info")]),
        )
        .string("tsNs", ["1687185711795123456", "1687185711995987654"])
        .string("id", ["id1", "id2"])
        .build()
}

/// Single-frame labeled result: one labels object per row.
pub fn labeled_frame() -> Frame {
    FrameBuilder::new()
        .object(
            "labels",
            [
                object_row(&[("counter", "38141"), ("label", "val2"), ("level", "warning")]),
                object_row(&[("counter", "38143"), ("label", "val2"), ("level", "info")]),
            ],
        )
        .time("Time", [T0, T1])
        .string("Line", ["line1", "line2"])
        .string("tsNs", ["1687185711795123456", "1687185711995987654"])
        .string("id", ["id1", "id2"])
        .meta(FrameMeta::labeled_time_values())
        .build()
}

/// Search-backend frame: no tag, a `level` column and an opaque `_source`.
pub fn search_frame() -> Frame {
    FrameBuilder::new()
        .time("Time", [T0, T1])
        .string("Line", ["line1", "line2"])
        .object(
            "_source",
            [
                object_row(&[("counter", "38141"), ("label", "val2"), ("level", "warning")]),
                object_row(&[("counter", "38143"), ("label", "val2"), ("level", "info")]),
            ],
        )
        .string("level", ["info", "error"])
        .string("hostname", ["h1", "h2"])
        .build()
}

/// Legacy frame in wire form.
pub const LEGACY_FRAME_JSON: &str = r#"{
  "name": "legacy",
  "fields": [
    { "name": "ts", "type": "time", "values": [1687185711795, 1687185711995] },
    { "name": "line", "type": "string", "values": ["line1", "line2"],
      "labels": { "counter": "34543", "level": "info" } },
    { "name": "tsNs", "type": "string", "values": ["1687185711795123456", "1687185711995987654"] },
    { "name": "id", "type": "string", "values": ["id1", "id2"] }
  ]
}"#;

/// Dataplane frame in wire form.
pub const DATAPLANE_FRAME_JSON: &str = r#"{
  "meta": { "type": "log-lines" },
  "fields": [
    { "name": "timestamp", "type": "time", "values": [0, 1000] },
    { "name": "body", "type": "string", "values": ["started", "stopped"] },
    { "name": "severity", "type": "string", "values": ["info", "error"] },
    { "name": "attributes", "type": "other", "values": [{ "pod": "api-1" }, { "pod": "api-2" }] }
  ]
}"#;

/// A metrics frame: numbers over time, nothing to use as a log body.
pub const METRICS_FRAME_JSON: &str = r#"{
  "fields": [
    { "name": "time", "type": "time", "values": [0, 1000] },
    { "name": "value", "type": "number", "values": [1.5, 2.5] }
  ]
}"#;
