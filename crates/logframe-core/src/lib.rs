//! logframe-core — log frame model and normalizer.
//!
//! Log data frames arrive in several historical schemas (dataplane
//! `log-lines`, labeled-time-values, legacy `ts`/`line`, and untagged frames
//! from search backends). This crate decodes frames into a typed model and
//! resolves any of those schemas into one canonical logs view.
//!
//! # Architecture
//!
//! ```text
//! JSON ──► Frame ──► Normalizer ──► NormalizedLogsView
//!                        ▲
//!                     Config
//! ```
//!
//! Normalization is a pure, synchronous function of the frame. The view
//! borrows the frame's columns; only per-row attributes are computed.

pub mod config;
pub mod normalizer;
pub mod types;

pub use normalizer::{normalize, LogRow, LogsShape, NormalizedLogsView, Normalizer};
pub use types::{Column, ColumnValues, FieldType, Frame, FrameError, FrameMeta, Labels, LogLevel};
