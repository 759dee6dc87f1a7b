//! Interval complement: from deletion ranges to the segments that survive.
//!
//! Given a bounded timeline `[0, duration]` and a set of ranges to delete,
//! produce the ordered, non-overlapping ranges to keep. Input may be
//! unsorted and may overlap or touch; the sweep takes the furthest end seen
//! so far, so a short interval nested inside a longer one never pulls the
//! cursor backwards.

use tracing::debug;

use crate::error::CutError;
use crate::interval::{Interval, IntervalField, KeepSegment, RawInterval};
use crate::time::{TimeValue, Timeline};

/// Parse, validate, and complement a set of raw deletion ranges.
///
/// Every pair is parsed as `HH:MM:SS` and checked before anything is
/// computed; the first failure is returned and no segments are produced.
pub fn compute_keep_segments(
    timeline: &Timeline,
    deletions: &[RawInterval],
) -> Result<Vec<KeepSegment>, CutError> {
    let intervals = deletions
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_interval(timeline, i + 1, raw))
        .collect::<Result<Vec<_>, _>>()?;

    keep_segments_for(timeline, &intervals)
}

/// Complement already-parsed intervals over the timeline.
pub fn keep_segments_for(
    timeline: &Timeline,
    intervals: &[Interval],
) -> Result<Vec<KeepSegment>, CutError> {
    let duration = timeline.duration();
    if let Some((i, interval)) = intervals
        .iter()
        .enumerate()
        .find(|(_, interval)| !interval.fits(timeline))
    {
        return Err(CutError::IntervalOutOfRange {
            index: i + 1,
            end: interval.end(),
            duration,
        });
    }

    let mut sorted = intervals.to_vec();
    sorted.sort();

    let mut segments = Vec::with_capacity(sorted.len() + 1);
    let mut cursor = TimeValue::ZERO;
    for interval in &sorted {
        if cursor < interval.start() {
            segments.push(KeepSegment::new(cursor, interval.start()));
        }
        cursor = cursor.max(interval.end());
    }
    if cursor < duration {
        segments.push(KeepSegment::new(cursor, duration));
    }

    debug!(
        deletions = intervals.len(),
        segments = segments.len(),
        %duration,
        "Computed keep segments"
    );

    if segments.is_empty() {
        return Err(CutError::NoRemainingContent);
    }
    Ok(segments)
}

/// Total time retained by `segments`.
pub fn kept_duration(segments: &[KeepSegment]) -> TimeValue {
    segments
        .iter()
        .fold(TimeValue::ZERO, |acc, seg| acc + seg.duration())
}

/// Total time removed from the timeline (overlaps counted once).
pub fn removed_duration(timeline: &Timeline, segments: &[KeepSegment]) -> TimeValue {
    timeline.duration().saturating_sub(kept_duration(segments))
}

fn parse_interval(
    timeline: &Timeline,
    index: usize,
    raw: &RawInterval,
) -> Result<Interval, CutError> {
    let field = |field: IntervalField, text: &str| {
        TimeValue::parse_hms(text).map_err(|source| CutError::TimeFormat {
            index,
            field,
            source,
        })
    };
    let start = field(IntervalField::Start, &raw.start)?;
    let end = field(IntervalField::End, &raw.end)?;

    let interval =
        Interval::try_new(start, end).ok_or(CutError::InvalidInterval { index, start, end })?;
    if !interval.fits(timeline) {
        return Err(CutError::IntervalOutOfRange {
            index,
            end,
            duration: timeline.duration(),
        });
    }
    Ok(interval)
}
