//! Integration tests for the cut pipeline.
//!
//! Drives `run_cut` against an in-memory media service that records every
//! call, so ordering and all-or-nothing behavior can be checked without
//! FFmpeg.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use trimcut_core::{CutError, KeepSegment, Result, TimeValue, TrimCutError};
use trimcut_media::{
    plan_cut, run_cut, ClipFile, CutCancel, CutJob, CutProgress, CutStage, MediaProbe,
    MediaService, MergedMedia,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Probe,
    Extract(usize, f64, f64),
    Concat(Vec<usize>),
    Export(PathBuf),
}

struct RecordingService {
    duration: TimeValue,
    has_video: bool,
    calls: Mutex<Vec<Call>>,
    merged: Mutex<Vec<PathBuf>>,
}

impl RecordingService {
    fn new(duration_secs: u32) -> Self {
        Self {
            duration: TimeValue::from_secs(duration_secs),
            has_video: true,
            calls: Mutex::new(Vec::new()),
            merged: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn touched_media(&self) -> bool {
        self.calls().iter().any(|c| !matches!(c, Call::Probe))
    }
}

impl MediaService for RecordingService {
    fn probe(&self, path: &Path) -> Result<MediaProbe> {
        self.calls.lock().push(Call::Probe);
        Ok(MediaProbe {
            path: path.to_path_buf(),
            duration: self.duration,
            has_video: self.has_video,
            has_audio: true,
            format: "mov,mp4,m4a,3gp,3g2,mj2".into(),
        })
    }

    fn extract_subrange(
        &self,
        _source: &MediaProbe,
        segment: &KeepSegment,
        index: usize,
    ) -> Result<ClipFile> {
        self.calls.lock().push(Call::Extract(
            index,
            segment.start().to_seconds_f64(),
            segment.end().to_seconds_f64(),
        ));
        Ok(ClipFile {
            index,
            segment: *segment,
            path: PathBuf::from(format!("segment_{index:04}.mp4")),
        })
    }

    fn concatenate(&self, clips: &[ClipFile], destination: &Path) -> Result<MergedMedia> {
        self.calls
            .lock()
            .push(Call::Concat(clips.iter().map(|c| c.index).collect()));
        let segments: Vec<_> = clips.iter().map(|c| c.segment).collect();
        let extension = destination.extension().unwrap_or_default();
        Ok(MergedMedia {
            path: Path::new("merged").with_extension(extension),
            duration: trimcut_core::kept_duration(&segments),
            clip_count: clips.len(),
        })
    }

    fn export(&self, merged: &MergedMedia, destination: &Path) -> Result<()> {
        self.calls.lock().push(Call::Export(destination.to_path_buf()));
        self.merged.lock().push(merged.path.clone());
        Ok(())
    }
}

fn source_file() -> tempfile::NamedTempFile {
    tempfile::Builder::new().suffix(".mp4").tempfile().unwrap()
}

// ── Successful runs ────────────────────────────────────────────

#[test]
fn segments_are_extracted_and_joined_in_timeline_order() {
    let input = source_file();
    let service = RecordingService::new(60);
    let job = CutJob::new(input.path(), "/out/edited.mp4")
        .with_interval("00:00:40", "00:00:50")
        .with_interval("00:00:05", "00:00:10");

    let report = run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap();

    assert_eq!(
        service.calls(),
        vec![
            Call::Probe,
            Call::Extract(0, 0.0, 5.0),
            Call::Extract(1, 10.0, 40.0),
            Call::Extract(2, 50.0, 60.0),
            Call::Concat(vec![0, 1, 2]),
            Call::Export(PathBuf::from("/out/edited.mp4")),
        ]
    );
    assert_eq!(report.kept, TimeValue::from_secs(45));
    assert_eq!(report.removed, TimeValue::from_secs(15));
    assert_eq!(report.output, PathBuf::from("/out/edited.mp4"));
}

#[test]
fn progress_runs_from_probe_to_done() {
    let input = source_file();
    let service = RecordingService::new(30);
    let job = CutJob::new(input.path(), "out.mp4").with_interval("00:00:10", "00:00:20");

    let seen = Mutex::new(Vec::<CutProgress>::new());
    run_cut(&service, &job, |p| seen.lock().push(p), &CutCancel::new()).unwrap();
    let seen = seen.into_inner();

    let stages: Vec<_> = seen.iter().map(|p| p.stage).collect();
    assert_eq!(
        stages,
        vec![
            CutStage::Probing,
            CutStage::Extracting,
            CutStage::Extracting,
            CutStage::Concatenating,
            CutStage::Done,
        ]
    );
    let last = seen.last().unwrap();
    assert_eq!(last.completed, last.total);
    assert_eq!(last.fraction(), 1.0);
}

#[test]
fn blank_rows_are_ignored() {
    let input = source_file();
    let service = RecordingService::new(20);
    let job = CutJob::new(input.path(), "out.mp4")
        .with_interval("", "")
        .with_interval("00:00:05", "");

    let report = run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap();
    assert_eq!(report.segments.len(), 1);
    assert_eq!(report.removed, TimeValue::ZERO);
}

#[test]
fn plan_does_not_touch_media() {
    let input = source_file();
    let service = RecordingService::new(20);
    let job = CutJob::new(input.path(), "out.mp4").with_interval("00:00:00", "00:00:05");

    let plan = plan_cut(&service, &job).unwrap();
    assert_eq!(plan.segments.len(), 1);
    assert_eq!(plan.removed(), TimeValue::from_secs(5));
    assert_eq!(service.calls(), vec![Call::Probe]);
}

// ── Failures abort before any media work ──────────────────────

#[test]
fn bad_interval_aborts_before_extraction() {
    let input = source_file();
    let service = RecordingService::new(20);
    let job = CutJob::new(input.path(), "out.mp4")
        .with_interval("00:00:01", "00:00:02")
        .with_interval("00:00:10", "00:00:25");

    let err = run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap_err();
    assert!(matches!(
        err,
        TrimCutError::Cut(CutError::IntervalOutOfRange { index: 2, .. })
    ));
    assert!(!service.touched_media());
}

#[test]
fn full_deletion_aborts_before_extraction() {
    let input = source_file();
    let service = RecordingService::new(10);
    let job = CutJob::new(input.path(), "out.mp4")
        .with_interval("00:00:00", "00:00:05")
        .with_interval("00:00:05", "00:00:10");

    let err = run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap_err();
    assert!(matches!(err, TrimCutError::Cut(CutError::NoRemainingContent)));
    assert!(!service.touched_media());
}

#[test]
fn missing_input_is_not_found() {
    let service = RecordingService::new(10);
    let job = CutJob::new("/no/such/input.mp4", "out.mp4");
    let err = run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap_err();
    assert!(matches!(err, TrimCutError::NotFound(_)));
    assert!(service.calls().is_empty());
}

#[test]
fn output_may_not_overwrite_input() {
    let input = source_file();
    let service = RecordingService::new(10);
    let job = CutJob::new(input.path(), input.path());
    let err = plan_cut(&service, &job).unwrap_err();
    assert!(matches!(err, TrimCutError::InvalidParameter(_)));
}

#[test]
fn output_may_not_overwrite_input_through_another_spelling() {
    let input = source_file();
    let dir = input.path().parent().unwrap();
    let name = input.path().file_name().unwrap();
    let service = RecordingService::new(10);
    let job = CutJob::new(input.path(), dir.join(".").join(name))
        .with_interval("00:00:01", "00:00:02");

    let err = run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap_err();
    assert!(matches!(err, TrimCutError::InvalidParameter(_)));
    assert!(service.calls().is_empty());
}

#[test]
fn merged_media_uses_the_destination_container() {
    let input = source_file();
    let service = RecordingService::new(20);
    let job = CutJob::new(input.path(), "/out/edited.mkv").with_interval("00:00:05", "00:00:10");

    run_cut(&service, &job, |_| {}, &CutCancel::new()).unwrap();
    assert_eq!(*service.merged.lock(), vec![PathBuf::from("merged.mkv")]);
}

#[test]
fn audio_only_source_is_rejected() {
    let input = source_file();
    let mut service = RecordingService::new(10);
    service.has_video = false;
    let job = CutJob::new(input.path(), "out.mp4");
    let err = plan_cut(&service, &job).unwrap_err();
    assert!(matches!(err, TrimCutError::Media(_)));
}

#[test]
fn cancelled_job_never_exports() {
    let input = source_file();
    let service = RecordingService::new(30);
    let job = CutJob::new(input.path(), "out.mp4").with_interval("00:00:10", "00:00:20");
    let cancel = CutCancel::new();

    let err = run_cut(
        &service,
        &job,
        |p| {
            if p.stage == CutStage::Extracting {
                cancel.cancel();
            }
        },
        &cancel,
    )
    .unwrap_err();

    assert!(matches!(err, TrimCutError::Cancelled));
    let calls = service.calls();
    assert_eq!(calls.len(), 2, "probe and one extraction only: {calls:?}");
    assert!(!calls.iter().any(|c| matches!(c, Call::Export(_))));
}
