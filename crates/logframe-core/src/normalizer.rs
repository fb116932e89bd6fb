//! Normalizer — resolves a [`Frame`] into a canonical [`NormalizedLogsView`].
//!
//! Log frames reach us in several historical schemas that disagree on column
//! names, metadata tags and where per-row labels live. Shapes are attempted in
//! a fixed order and the first one whose time and body columns resolve wins:
//!
//! | Shape | Selected by | time | body | severity | id | nanos | attributes |
//! |-------|-------------|------|------|----------|----|-------|------------|
//! | [`LogsShape::Dataplane`] | `meta.type = "log-lines"` | `timestamp` | `body` | `severity` | `id` | – | `attributes` |
//! | [`LogsShape::LabeledTimeValues`] | `meta.custom.frameType` | `Time` | `Line` | `level` | `id` | `tsNs` | `labels` |
//! | [`LogsShape::Legacy`] | column names | `ts` | `line` | – | `id` | `tsNs` | `labels` |
//! | [`LogsShape::Generic`] | anything else | first time column | first other string column | configured names | – | – | – |
//!
//! Named shapes without a row-level attributes column fall back to the body
//! column's per-column labels, repeated for every row.

use serde_json::Value;
use tracing::debug;

use crate::config::NormalizeConfig;
use crate::types::{
    Column, FieldType, Frame, FrameMeta, Labels, LogLevel, LABELED_TIME_VALUES_FRAME_TYPE,
};

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Which log-frame schema a frame was resolved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogsShape {
    Dataplane,
    LabeledTimeValues,
    Legacy,
    Generic,
}

impl std::fmt::Display for LogsShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogsShape::Dataplane => write!(f, "dataplane"),
            LogsShape::LabeledTimeValues => write!(f, "labeled-time-values"),
            LogsShape::Legacy => write!(f, "legacy"),
            LogsShape::Generic => write!(f, "generic"),
        }
    }
}

/// Column names of a schema that is recognised by name.
struct NamedShape {
    time: &'static str,
    body: &'static str,
    severity: Option<&'static str>,
    id: &'static str,
    time_ns: Option<&'static str>,
    attributes: &'static str,
}

const DATAPLANE: NamedShape = NamedShape {
    time: "timestamp",
    body: "body",
    severity: Some("severity"),
    id: "id",
    time_ns: None,
    attributes: "attributes",
};

const LABELED_TIME_VALUES: NamedShape = NamedShape {
    time: "Time",
    body: "Line",
    severity: Some("level"),
    id: "id",
    time_ns: Some("tsNs"),
    attributes: "labels",
};

const LEGACY: NamedShape = NamedShape {
    time: "ts",
    body: "line",
    severity: None,
    id: "id",
    time_ns: Some("tsNs"),
    attributes: "labels",
};

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Canonical projection of a logs frame. Column fields borrow from the frame;
/// only `attributes` is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLogsView<'a> {
    pub shape: LogsShape,
    /// Epoch milliseconds.
    pub time_field: &'a Column,
    pub body_field: &'a Column,
    /// Decimal nanosecond timestamps, when the producer supplies them.
    pub time_nanosecond_field: Option<&'a Column>,
    pub severity_field: Option<&'a Column>,
    pub id_field: Option<&'a Column>,
    /// One map per row. `None` means the frame carries no attributes at all,
    /// which is not the same as rows with empty maps.
    pub attributes: Option<Vec<Labels>>,
    /// Columns not claimed by any role above, in frame order.
    pub extra_fields: Vec<&'a Column>,
    length: usize,
}

impl NormalizedLogsView<'_> {
    /// Row count.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn row(&self, index: usize) -> Option<LogRow<'_>> {
        if index >= self.length {
            return None;
        }
        Some(LogRow {
            index,
            time_ms: self.time_field.time_at(index),
            time_ns: self.time_nanosecond_field.and_then(|c| c.string_at(index)),
            body: self.body_field.string_at(index),
            severity: self.severity_field.and_then(|c| c.string_at(index)),
            id: self.id_field.and_then(|c| c.string_at(index)),
            attributes: self.attributes.as_ref().and_then(|a| a.get(index)),
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = LogRow<'_>> + '_ {
        (0..self.length).filter_map(move |i| self.row(i))
    }
}

/// One row of a [`NormalizedLogsView`]. Null cells read as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRow<'a> {
    pub index: usize,
    pub time_ms: Option<i64>,
    pub time_ns: Option<&'a str>,
    pub body: Option<&'a str>,
    pub severity: Option<&'a str>,
    pub id: Option<&'a str>,
    pub attributes: Option<&'a Labels>,
}

impl LogRow<'_> {
    /// Row timestamp, at nanosecond precision when the nanosecond column
    /// parses, otherwise from the millisecond value.
    pub fn timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        if let Some(nanos) = self.time_ns.and_then(|ns| ns.trim().parse::<i64>().ok()) {
            return Some(chrono::DateTime::<chrono::Utc>::from_timestamp_nanos(nanos));
        }
        self.time_ms
            .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
    }

    pub fn severity_level(&self) -> Option<LogLevel> {
        self.severity.and_then(LogLevel::from_severity)
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Resolve `frame` with the default configuration.
pub fn normalize(frame: &Frame) -> Option<NormalizedLogsView<'_>> {
    Normalizer::default().normalize(frame)
}

/// Frame-to-view resolver. Holds no per-call state.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

/// Columns a shape resolved, before attributes are built.
struct Roles<'a> {
    shape: LogsShape,
    time: &'a Column,
    body: &'a Column,
    time_ns: Option<&'a Column>,
    severity: Option<&'a Column>,
    id: Option<&'a Column>,
    attributes: Option<&'a Column>,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Build the canonical view, or `None` when no shape yields both a time
    /// and a body column.
    pub fn normalize<'a>(&self, frame: &'a Frame) -> Option<NormalizedLogsView<'a>> {
        let Some(roles) = self.resolve(frame) else {
            debug!(
                columns = frame.columns().len(),
                "no time and body columns resolved; not a logs frame"
            );
            return None;
        };
        debug!(shape = %roles.shape, rows = frame.len(), "normalized logs frame");
        Some(build_view(frame, roles))
    }

    /// The shape [`Normalizer::normalize`] would pick.
    pub fn detect_shape(&self, frame: &Frame) -> Option<LogsShape> {
        self.resolve(frame).map(|roles| roles.shape)
    }

    fn resolve<'a>(&self, frame: &'a Frame) -> Option<Roles<'a>> {
        candidate_shapes(frame.meta()).find_map(|shape| {
            let roles = match shape {
                LogsShape::Dataplane => named_roles(frame, shape, &DATAPLANE),
                LogsShape::LabeledTimeValues => named_roles(frame, shape, &LABELED_TIME_VALUES),
                LogsShape::Legacy => named_roles(frame, shape, &LEGACY),
                LogsShape::Generic => self.generic_roles(frame),
            };
            if roles.is_none() {
                debug!(%shape, "shape did not match");
            }
            roles
        })
    }

    fn generic_roles<'a>(&self, frame: &'a Frame) -> Option<Roles<'a>> {
        let time = frame.columns_of_type(FieldType::Time).next()?;
        let severity = self.severity_column(frame);
        let body = frame
            .columns_of_type(FieldType::String)
            .find(|c| !severity.is_some_and(|s| std::ptr::eq(*c, s)))?;
        Some(Roles {
            shape: LogsShape::Generic,
            time,
            body,
            time_ns: None,
            severity,
            id: None,
            attributes: None,
        })
    }

    /// First configured name with an exact match, then the first with an
    /// ASCII case-insensitive match.
    fn severity_column<'a>(&self, frame: &'a Frame) -> Option<&'a Column> {
        let names = &self.config.severity_names;
        let strings = || frame.columns_of_type(FieldType::String);
        names
            .iter()
            .find_map(|name| strings().find(|c| c.name == *name))
            .or_else(|| {
                names
                    .iter()
                    .find_map(|name| strings().find(|c| c.name.eq_ignore_ascii_case(name)))
            })
    }
}

/// Shapes to try for this metadata, in priority order.
fn candidate_shapes(meta: Option<&FrameMeta>) -> impl Iterator<Item = LogsShape> {
    let dataplane = meta.is_some_and(FrameMeta::is_log_lines);
    let labeled =
        meta.and_then(FrameMeta::custom_frame_type) == Some(LABELED_TIME_VALUES_FRAME_TYPE);
    [
        (LogsShape::Dataplane, dataplane),
        (LogsShape::LabeledTimeValues, labeled),
        (LogsShape::Legacy, true),
        (LogsShape::Generic, true),
    ]
    .into_iter()
    .filter_map(|(shape, enabled)| enabled.then_some(shape))
}

fn named_roles<'a>(frame: &'a Frame, shape: LogsShape, names: &NamedShape) -> Option<Roles<'a>> {
    Some(Roles {
        shape,
        time: typed_column(frame, names.time, FieldType::Time)?,
        body: typed_column(frame, names.body, FieldType::String)?,
        time_ns: names
            .time_ns
            .and_then(|name| typed_column(frame, name, FieldType::String)),
        severity: names
            .severity
            .and_then(|name| typed_column(frame, name, FieldType::String)),
        id: typed_column(frame, names.id, FieldType::String),
        attributes: typed_column(frame, names.attributes, FieldType::Other),
    })
}

/// A mistyped column counts as missing.
fn typed_column<'a>(frame: &'a Frame, name: &str, field_type: FieldType) -> Option<&'a Column> {
    frame.column(name).filter(|c| c.field_type() == field_type)
}

fn build_view<'a>(frame: &'a Frame, roles: Roles<'a>) -> NormalizedLogsView<'a> {
    let attributes = match roles.shape {
        LogsShape::Generic => None,
        _ => attributes_for(frame, &roles),
    };

    let claimed = [
        Some(roles.time),
        Some(roles.body),
        roles.time_ns,
        roles.severity,
        roles.id,
        roles.attributes,
    ];
    let extra_fields = frame
        .columns()
        .iter()
        .filter(|c| !claimed.iter().flatten().any(|r| std::ptr::eq(*r, *c)))
        .collect();

    NormalizedLogsView {
        shape: roles.shape,
        time_field: roles.time,
        body_field: roles.body,
        time_nanosecond_field: roles.time_ns,
        severity_field: roles.severity,
        id_field: roles.id,
        attributes,
        extra_fields,
        length: frame.len(),
    }
}

/// Row-level object column first, then the body column's labels repeated for
/// every row.
fn attributes_for(frame: &Frame, roles: &Roles<'_>) -> Option<Vec<Labels>> {
    if let Some(rows) = roles.attributes.and_then(Column::as_objects) {
        return Some(rows.iter().map(labels_from_object).collect());
    }
    roles
        .body
        .labels
        .as_ref()
        .map(|labels| vec![labels.clone(); frame.len()])
}

fn labels_from_object(value: &Value) -> Labels {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect(),
        _ => Labels::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
