//! End-to-end checks of the keep-segment engine through its public API.

use trimcut_core::{
    compute_keep_segments, CutError, CutErrorKind, KeepSegment, RawInterval, TimeValue, Timeline,
};

fn timeline(secs: u32) -> Timeline {
    Timeline::new(TimeValue::from_secs(secs)).unwrap()
}

fn cuts(pairs: &[(&str, &str)]) -> Vec<RawInterval> {
    pairs.iter().map(|&p| RawInterval::from(p)).collect()
}

fn as_secs(segments: &[KeepSegment]) -> Vec<(f64, f64)> {
    segments
        .iter()
        .map(|s| (s.start().to_seconds_f64(), s.end().to_seconds_f64()))
        .collect()
}

// ── Documented scenarios ───────────────────────────────────────

#[test]
fn overlapping_cuts_leave_only_the_tail() {
    let segments = compute_keep_segments(
        &timeline(20),
        &cuts(&[("00:00:00", "00:00:10"), ("00:00:05", "00:00:15")]),
    )
    .unwrap();
    assert_eq!(as_secs(&segments), vec![(15.0, 20.0)]);
}

#[test]
fn deleting_everything_is_an_error() {
    let err = compute_keep_segments(&timeline(20), &cuts(&[("00:00:00", "00:00:20")])).unwrap_err();
    assert_eq!(err.kind(), CutErrorKind::NoRemainingContent);
}

#[test]
fn no_cuts_keeps_the_whole_timeline() {
    let segments = compute_keep_segments(&timeline(20), &[]).unwrap();
    assert_eq!(as_secs(&segments), vec![(0.0, 20.0)]);
}

#[test]
fn adjacent_cuts_consume_the_timeline() {
    let err = compute_keep_segments(
        &timeline(10),
        &cuts(&[("00:00:00", "00:00:05"), ("00:00:05", "00:00:10")]),
    )
    .unwrap_err();
    assert_eq!(err, CutError::NoRemainingContent);
}

#[test]
fn two_field_time_is_a_format_error() {
    let err = compute_keep_segments(&timeline(20), &cuts(&[("1:2", "00:00:10")])).unwrap_err();
    assert_eq!(err.kind(), CutErrorKind::TimeFormat);
    assert!(err.to_string().contains("start"));
}

#[test]
fn end_past_duration_is_out_of_range() {
    let err = compute_keep_segments(&timeline(20), &cuts(&[("00:00:00", "00:00:25")])).unwrap_err();
    assert_eq!(err.kind(), CutErrorKind::IntervalOutOfRange);
}

#[test]
fn zero_duration_timeline_is_rejected() {
    let err = Timeline::from_seconds_f64(0.0).unwrap_err();
    assert_eq!(err.kind(), CutErrorKind::InvalidTimeline);
}

// ── Ordering and coverage ─────────────────────────────────────

#[test]
fn segments_are_strictly_ordered_and_cover_the_rest() {
    let tl = timeline(3600);
    let deletions = cuts(&[
        ("00:50:00", "00:55:00"),
        ("00:00:30", "00:01:00"),
        ("00:10:00", "00:20:00"),
        ("00:15:00", "00:16:00"),
        ("00:59:00", "01:00:00"),
    ]);
    let segments = compute_keep_segments(&tl, &deletions).unwrap();

    assert_eq!(
        as_secs(&segments),
        vec![
            (0.0, 30.0),
            (60.0, 600.0),
            (1200.0, 3000.0),
            (3300.0, 3540.0),
        ]
    );
    for pair in segments.windows(2) {
        assert!(pair[0].end() <= pair[1].start());
    }

    let kept = trimcut_core::kept_duration(&segments);
    let removed = trimcut_core::removed_duration(&tl, &segments);
    assert_eq!(kept + removed, tl.duration());
    assert_eq!(removed, TimeValue::from_secs(30 + 600 + 300 + 60));
}

#[test]
fn every_permutation_gives_the_same_segments() {
    let tl = timeline(100);
    let base = [
        ("00:00:10", "00:00:20"),
        ("00:00:15", "00:00:40"),
        ("00:01:00", "00:01:05"),
    ];
    let expected = compute_keep_segments(&tl, &cuts(&base)).unwrap();

    let orders = [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    for order in orders {
        let permuted: Vec<_> = order.iter().map(|&i| base[i]).collect();
        assert_eq!(compute_keep_segments(&tl, &cuts(&permuted)).unwrap(), expected);
    }
}
