//! Deletion intervals and the keep segments computed from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::{TimeValue, Timeline};

/// Which end of an interval a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntervalField {
    Start,
    End,
}

impl fmt::Display for IntervalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// A deletion range as typed by the user, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterval {
    pub start: String,
    pub end: String,
}

impl RawInterval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// True when either side is empty after trimming (an unfinished row).
    pub fn is_blank(&self) -> bool {
        self.start.trim().is_empty() || self.end.trim().is_empty()
    }
}

impl<S: Into<String>, E: Into<String>> From<(S, E)> for RawInterval {
    fn from((start, end): (S, E)) -> Self {
        Self::new(start, end)
    }
}

/// A validated deletion range, `start < end`.
///
/// Orders by start, then end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: TimeValue,
    end: TimeValue,
}

impl Interval {
    /// Returns `None` unless `start < end`.
    pub fn try_new(start: TimeValue, end: TimeValue) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> TimeValue {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimeValue {
        self.end
    }

    /// Whether the interval ends within the timeline.
    #[inline]
    pub fn fits(&self, timeline: &Timeline) -> bool {
        self.end <= timeline.duration()
    }
}

/// A range of the source to retain. Only produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct KeepSegment {
    start: TimeValue,
    end: TimeValue,
}

impl KeepSegment {
    pub(crate) fn new(start: TimeValue, end: TimeValue) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> TimeValue {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimeValue {
        self.end
    }

    /// Length of the segment.
    #[inline]
    pub fn duration(&self) -> TimeValue {
        self.end.saturating_sub(self.start)
    }

    /// Check if a time is within this segment (start inclusive, end exclusive).
    #[inline]
    pub fn contains(&self, time: TimeValue) -> bool {
        time >= self.start && time < self.end
    }
}

impl fmt::Display for KeepSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
