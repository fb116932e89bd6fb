//! Test builders — ergonomic constructors for `Frame` and `Labels`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use logframe_core::{Column, ColumnValues, Frame, FrameMeta, Labels};
use serde_json::Value;

// ---------------------------------------------------------------------------
// FrameBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Frame`] test fixtures.
///
/// # Example
///
/// ```rust
/// let frame = FrameBuilder::new()
///     .time("ts", [1687185711795])
///     .string("line", ["hello"])
///     .meta(FrameMeta::log_lines())
///     .build();
/// ```
#[derive(Default)]
pub struct FrameBuilder {
    columns: Vec<Column>,
    meta: Option<FrameMeta>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(mut self, name: &str, millis: impl IntoIterator<Item = i64>) -> Self {
        self.columns.push(Column::times(name, millis));
        self
    }

    pub fn string<'s>(mut self, name: &str, values: impl IntoIterator<Item = &'s str>) -> Self {
        self.columns.push(Column::strings(name, values));
        self
    }

    /// String column carrying per-column labels.
    pub fn labeled_string<'s>(
        mut self,
        name: &str,
        values: impl IntoIterator<Item = &'s str>,
        labels: Labels,
    ) -> Self {
        self.columns
            .push(Column::strings(name, values).with_labels(labels));
        self
    }

    pub fn number(mut self, name: &str, values: impl IntoIterator<Item = f64>) -> Self {
        self.columns.push(Column::numbers(name, values));
        self
    }

    pub fn object(mut self, name: &str, values: impl IntoIterator<Item = Value>) -> Self {
        self.columns.push(Column::objects(name, values));
        self
    }

    pub fn column(mut self, name: &str, values: ColumnValues) -> Self {
        self.columns.push(Column::new(name, values));
        self
    }

    pub fn meta(mut self, meta: FrameMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> Frame {
        let frame = Frame::new(self.columns).expect("test frame must be well formed");
        match self.meta {
            Some(meta) => frame.with_meta(meta),
            None => frame,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build a `Labels` map from string pairs.
pub fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Build a JSON object row from string pairs.
pub fn object_row(pairs: &[(&str, &str)]) -> Value {
    Value::Object(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect(),
    )
}
