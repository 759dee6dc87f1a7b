//! TrimCut Core - Foundation types for cutting ranges out of media
//!
//! This crate provides:
//! - Time representation (TimeValue, Timeline) and `HH:MM:SS` parsing
//! - Deletion intervals and keep segments
//! - The interval complement engine that turns one into the other
//!
//! Everything here is pure computation and safe to call from any thread.

pub mod engine;
pub mod error;
pub mod interval;
pub mod time;

pub use engine::{compute_keep_segments, keep_segments_for, kept_duration, removed_duration};
pub use error::{CutError, CutErrorKind, Result, TimeFormatError, TrimCutError};
pub use interval::{Interval, IntervalField, KeepSegment, RawInterval};
pub use time::{TimeValue, Timeline};
