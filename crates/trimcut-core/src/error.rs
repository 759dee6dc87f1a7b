//! Error types for TrimCut.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::interval::IntervalField;
use crate::time::TimeValue;

/// Failure to read a single time value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("time format must be HH:MM:SS, got {0:?}")]
    FieldCount(String),

    #[error("{unit} field {field:?} of {text:?} is not a non-negative integer")]
    NotAnInteger {
        text: String,
        unit: &'static str,
        field: String,
    },

    #[error("time {0:?} is too large")]
    Overflow(String),

    #[error("seconds must be finite and non-negative, got {0}")]
    InvalidSeconds(String),
}

/// Failure of a keep-segment computation.
///
/// Any of these aborts the whole computation; no partial segment list is
/// ever produced. Interval numbers are 1-based, in the order supplied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CutError {
    #[error("timeline duration must be positive, got {duration}")]
    InvalidTimeline { duration: String },

    #[error("interval {index}: invalid {field} time: {source}")]
    TimeFormat {
        index: usize,
        field: IntervalField,
        #[source]
        source: TimeFormatError,
    },

    #[error("interval {index}: start must precede end ({start} is not before {end})")]
    InvalidInterval {
        index: usize,
        start: TimeValue,
        end: TimeValue,
    },

    #[error("interval {index}: end time {end} exceeds media duration {duration}")]
    IntervalOutOfRange {
        index: usize,
        end: TimeValue,
        duration: TimeValue,
    },

    #[error("no content remains after removing the given intervals")]
    NoRemainingContent,
}

impl CutError {
    /// The structured kind, for shells that present errors by category.
    pub fn kind(&self) -> CutErrorKind {
        match self {
            Self::InvalidTimeline { .. } => CutErrorKind::InvalidTimeline,
            Self::TimeFormat { .. } => CutErrorKind::TimeFormat,
            Self::InvalidInterval { .. } => CutErrorKind::InvalidInterval,
            Self::IntervalOutOfRange { .. } => CutErrorKind::IntervalOutOfRange,
            Self::NoRemainingContent => CutErrorKind::NoRemainingContent,
        }
    }
}

/// Category of a [`CutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CutErrorKind {
    InvalidTimeline,
    TimeFormat,
    InvalidInterval,
    IntervalOutOfRange,
    NoRemainingContent,
}

impl fmt::Display for CutErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidTimeline => "Invalid timeline",
            Self::TimeFormat => "Time format error",
            Self::InvalidInterval => "Invalid interval",
            Self::IntervalOutOfRange => "Interval out of range",
            Self::NoRemainingContent => "No remaining content",
        };
        f.write_str(name)
    }
}

/// Main error type for TrimCut operations.
#[derive(Error, Debug)]
pub enum TrimCutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cut(#[from] CutError),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Encoder error: {0}")]
    Encoder(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type alias for TrimCut operations.
pub type Result<T> = std::result::Result<T, TrimCutError>;
