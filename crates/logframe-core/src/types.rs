//! Core types for logframe-core.
//!
//! This module defines the data model the normalizer reads: a [`Frame`] of
//! named, typed [`Column`]s with optional [`FrameMeta`], the [`Labels`] map
//! used for per-column and per-row metadata, and the [`LogLevel`] scale that
//! severity strings are mapped onto.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// String key/value metadata, ordered by key.
pub type Labels = BTreeMap<String, String>;

/// `meta.type` tag of frames that follow the dataplane logs contract.
pub const LOG_LINES_FRAME_TYPE: &str = "log-lines";

/// `meta.custom.frameType` tag of single-frame labeled log results.
pub const LABELED_TIME_VALUES_FRAME_TYPE: &str = "LabeledTimeValues";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a frame cannot be constructed or decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    #[error("column {column:?} has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column name {0:?}")]
    DuplicateColumn(String),
    #[error("column {column:?} ({field_type}) has an invalid value at row {row}: {value}")]
    InvalidValue {
        column: String,
        field_type: FieldType,
        row: usize,
        value: Value,
    },
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Time,
    Number,
    Boolean,
    Other,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Time => write!(f, "time"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Other => write!(f, "other"),
        }
    }
}

/// Typed storage for a column. `None` marks a null cell; `other` columns keep
/// raw JSON and use `Value::Null` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    String(Vec<Option<String>>),
    /// Epoch milliseconds.
    Time(Vec<Option<i64>>),
    Number(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Other(Vec<Value>),
}

impl ColumnValues {
    pub fn field_type(&self) -> FieldType {
        match self {
            ColumnValues::String(_) => FieldType::String,
            ColumnValues::Time(_) => FieldType::Time,
            ColumnValues::Number(_) => FieldType::Number,
            ColumnValues::Boolean(_) => FieldType::Boolean,
            ColumnValues::Other(_) => FieldType::Other,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::String(v) => v.len(),
            ColumnValues::Time(v) => v.len(),
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Other(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_json(column: &str, field_type: FieldType, values: Vec<Value>) -> Result<Self, FrameError> {
        Ok(match field_type {
            FieldType::String => {
                ColumnValues::String(decode(column, field_type, values, |v| v.as_str().map(str::to_owned))?)
            }
            FieldType::Time => ColumnValues::Time(decode(column, field_type, values, |v| {
                // Some producers emit millis as floats.
                v.as_i64()
                    .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            })?),
            FieldType::Number => ColumnValues::Number(decode(column, field_type, values, Value::as_f64)?),
            FieldType::Boolean => ColumnValues::Boolean(decode(column, field_type, values, Value::as_bool)?),
            FieldType::Other => ColumnValues::Other(values),
        })
    }

    fn to_json(&self) -> Vec<Value> {
        fn encode<T: Clone + Into<Value>>(values: &[Option<T>]) -> Vec<Value> {
            values
                .iter()
                .map(|v| v.clone().map_or(Value::Null, Into::into))
                .collect()
        }
        match self {
            ColumnValues::String(v) => encode(v),
            ColumnValues::Time(v) => encode(v),
            ColumnValues::Number(v) => encode(v),
            ColumnValues::Boolean(v) => encode(v),
            ColumnValues::Other(v) => v.clone(),
        }
    }
}

fn decode<T>(
    column: &str,
    field_type: FieldType,
    values: Vec<Value>,
    convert: impl Fn(&Value) -> Option<T>,
) -> Result<Vec<Option<T>>, FrameError> {
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            if value.is_null() {
                return Ok(None);
            }
            match convert(&value) {
                Some(v) => Ok(Some(v)),
                None => Err(FrameError::InvalidValue {
                    column: column.to_string(),
                    field_type,
                    row,
                    value,
                }),
            }
        })
        .collect()
}

/// A named, typed column. `labels` are per-column, not per-row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColumn", into = "RawColumn")]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
    pub labels: Option<Labels>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
            labels: None,
        }
    }

    /// String column with no nulls.
    pub fn strings<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(
            name,
            ColumnValues::String(values.into_iter().map(|v| Some(v.into())).collect()),
        )
    }

    /// Time column of epoch milliseconds with no nulls.
    pub fn times(name: impl Into<String>, millis: impl IntoIterator<Item = i64>) -> Self {
        Self::new(name, ColumnValues::Time(millis.into_iter().map(Some).collect()))
    }

    pub fn numbers(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, ColumnValues::Number(values.into_iter().map(Some).collect()))
    }

    /// `other`-typed column, typically one JSON object per row.
    pub fn objects(name: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(name, ColumnValues::Other(values.into_iter().collect()))
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.values.field_type()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_strings(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_times(&self) -> Option<&[Option<i64>]> {
        match &self.values {
            ColumnValues::Time(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_objects(&self) -> Option<&[Value]> {
        match &self.values {
            ColumnValues::Other(v) => Some(v),
            _ => None,
        }
    }

    /// Value at `row` of a string column; `None` for nulls, out-of-range rows
    /// and non-string columns.
    pub fn string_at(&self, row: usize) -> Option<&str> {
        self.as_strings()?.get(row)?.as_deref()
    }

    /// Value at `row` of a time column.
    pub fn time_at(&self, row: usize) -> Option<i64> {
        *self.as_times()?.get(row)?
    }
}

/// Wire form of a column: `{"name", "type", "values", "labels"?}`.
#[derive(Serialize, Deserialize)]
struct RawColumn {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<Labels>,
}

impl TryFrom<RawColumn> for Column {
    type Error = FrameError;

    fn try_from(raw: RawColumn) -> Result<Self, Self::Error> {
        let values = ColumnValues::from_json(&raw.name, raw.field_type, raw.values)?;
        Ok(Column {
            name: raw.name,
            values,
            labels: raw.labels,
        })
    }
}

impl From<Column> for RawColumn {
    fn from(column: Column) -> Self {
        RawColumn {
            field_type: column.field_type(),
            values: column.values.to_json(),
            name: column.name,
            labels: column.labels,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Frame-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameMeta {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub frame_type: Option<String>,
    /// Producer-specific metadata; `custom.frameType` is the only key read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl FrameMeta {
    pub fn log_lines() -> Self {
        Self {
            frame_type: Some(LOG_LINES_FRAME_TYPE.to_string()),
            custom: None,
        }
    }

    pub fn labeled_time_values() -> Self {
        Self {
            frame_type: None,
            custom: Some(serde_json::json!({ "frameType": LABELED_TIME_VALUES_FRAME_TYPE })),
        }
    }

    pub fn is_log_lines(&self) -> bool {
        self.frame_type.as_deref() == Some(LOG_LINES_FRAME_TYPE)
    }

    pub fn custom_frame_type(&self) -> Option<&str> {
        self.custom.as_ref()?.get("frameType")?.as_str()
    }
}

/// An ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame", into = "RawFrame")]
pub struct Frame {
    name: Option<String>,
    meta: Option<FrameMeta>,
    columns: Vec<Column>,
    length: usize,
}

impl Frame {
    /// Build a frame, checking that column lengths agree and names are unique.
    /// The row count is taken from the first column.
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        let length = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.len() != length {
                return Err(FrameError::LengthMismatch {
                    column: column.name.clone(),
                    expected: length,
                    actual: column.len(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(FrameError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self {
            name: None,
            meta: None,
            columns,
            length,
        })
    }

    /// A frame with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            name: None,
            meta: None,
            columns: Vec::new(),
            length: 0,
        }
    }

    pub fn with_meta(mut self, meta: FrameMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn meta(&self) -> Option<&FrameMeta> {
        self.meta.as_ref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Row count.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns of the given type, in frame order.
    pub fn columns_of_type(&self, field_type: FieldType) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(move |c| c.field_type() == field_type)
    }
}

/// Wire form of a frame: `{"name"?, "meta"?, "fields": [...]}`.
#[derive(Serialize, Deserialize)]
struct RawFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<FrameMeta>,
    #[serde(default)]
    fields: Vec<Column>,
}

impl TryFrom<RawFrame> for Frame {
    type Error = FrameError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        let mut frame = Frame::new(raw.fields)?;
        frame.name = raw.name;
        frame.meta = raw.meta;
        Ok(frame)
    }
}

impl From<Frame> for RawFrame {
    fn from(frame: Frame) -> Self {
        RawFrame {
            name: frame.name,
            meta: frame.meta,
            fields: frame.columns,
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Log severity level, normalised across producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Map a producer's severity string onto a level. Case-insensitive;
    /// unknown spellings give `None`.
    pub fn from_severity(severity: &str) -> Option<Self> {
        match severity.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" | "dbug" => Some(LogLevel::Debug),
            "info" | "information" | "notice" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" | "err" | "eror" => Some(LogLevel::Error),
            "fatal" | "critical" | "crit" | "emerg" | "alert" | "panic" => Some(LogLevel::Fatal),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Fatal => write!(f, "FATAL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
