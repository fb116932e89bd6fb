//! logframe — normalize log data frames.
//!
//! Re-exports the [`logframe_core`] API and adds the [`output`] layer used by
//! the `logframe` binary, so integration tests can import both from one place.
//!
//! # Architecture
//!
//! ```text
//! stdin / file ──► Frame (serde) ──► Normalizer ──► output ──► stdout
//! ```

pub mod output;

pub use logframe_core::config;
pub use logframe_core::{
    normalize, Column, ColumnValues, FieldType, Frame, FrameError, FrameMeta, Labels, LogLevel,
    LogRow, LogsShape, NormalizedLogsView, Normalizer,
};
