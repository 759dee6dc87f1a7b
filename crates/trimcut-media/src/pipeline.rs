//! Cut pipeline: probe, compute keep segments, extract, join, export.
//!
//! The keep segments are computed up front, so malformed or out-of-range
//! intervals are reported before any media work starts.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use trimcut_core::{
    compute_keep_segments, kept_duration, removed_duration, KeepSegment, RawInterval, Result,
    TimeValue, TrimCutError,
};

use crate::probe::MediaProbe;
use crate::service::MediaService;

/// What to cut and where to put the result.
#[derive(Debug, Clone)]
pub struct CutJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Ranges to delete, as typed. Rows with an empty side are ignored.
    pub intervals: Vec<RawInterval>,
}

impl CutJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            intervals: Vec::new(),
        }
    }

    /// Add a deletion range.
    pub fn with_interval(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.intervals.push(RawInterval::new(start, end));
        self
    }

    /// Intervals that are fully filled in.
    pub fn filled_intervals(&self) -> Vec<RawInterval> {
        self.intervals
            .iter()
            .filter(|raw| !raw.is_blank())
            .cloned()
            .collect()
    }
}

/// The step a progress report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CutStage {
    /// Reading the source; reported before anything is known.
    Probing,
    /// A segment finished extracting.
    Extracting,
    /// All segments joined.
    Concatenating,
    /// Result written to the destination.
    Done,
}

/// Progress information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutProgress {
    pub stage: CutStage,
    /// Steps finished so far.
    pub completed: usize,
    /// Total steps (one per segment, plus concatenation and export).
    pub total: usize,
}

impl CutProgress {
    /// Completion fraction (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Handle for cancelling a cut between steps.
#[derive(Debug, Clone)]
pub struct CutCancel(Arc<AtomicBool>);

impl CutCancel {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check if cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(TrimCutError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CutCancel {
    fn default() -> Self {
        Self::new()
    }
}

/// The source and the segments that will be kept from it.
#[derive(Debug, Clone)]
pub struct CutPlan {
    pub source: MediaProbe,
    pub segments: Vec<KeepSegment>,
}

impl CutPlan {
    pub fn kept(&self) -> TimeValue {
        kept_duration(&self.segments)
    }

    pub fn removed(&self) -> TimeValue {
        self.source.duration.saturating_sub(self.kept())
    }
}

/// Outcome of a finished cut.
#[derive(Debug, Clone, Serialize)]
pub struct CutReport {
    pub output: PathBuf,
    pub segments: Vec<KeepSegment>,
    pub kept: TimeValue,
    pub removed: TimeValue,
}

/// Probe the input and compute what will be kept, without touching media.
pub fn plan_cut(service: &dyn MediaService, job: &CutJob) -> Result<CutPlan> {
    if !job.input.exists() {
        return Err(TrimCutError::NotFound(format!(
            "Input file not found: {}",
            job.input.display()
        )));
    }
    if same_file(&job.input, &job.output)? {
        return Err(TrimCutError::InvalidParameter(
            "Output must not overwrite the input file".into(),
        ));
    }

    let source = service.probe(&job.input)?;
    if !source.has_video {
        return Err(TrimCutError::Media(format!(
            "{} has no video stream",
            job.input.display()
        )));
    }
    let timeline = source.timeline()?;

    let intervals = job.filled_intervals();
    if intervals.len() < job.intervals.len() {
        debug!(
            skipped = job.intervals.len() - intervals.len(),
            "Ignoring incomplete interval rows"
        );
    }
    let segments = compute_keep_segments(&timeline, &intervals)?;
    info!(
        input = %job.input.display(),
        duration = %timeline.duration(),
        deletions = intervals.len(),
        segments = segments.len(),
        removed = %removed_duration(&timeline, &segments),
        "Planned cut"
    );

    Ok(CutPlan { source, segments })
}

/// Whether `output` names the existing `input` file, however it is spelled.
fn same_file(input: &Path, output: &Path) -> Result<bool> {
    if input == output {
        return Ok(true);
    }
    if !output.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(input)? == fs::canonicalize(output)?)
}

/// Run a cut job to completion.
///
/// `on_progress` is called after each step. `cancel` is checked before each
/// step; a cancelled job returns [`TrimCutError::Cancelled`] and leaves the
/// destination untouched.
pub fn run_cut(
    service: &dyn MediaService,
    job: &CutJob,
    on_progress: impl Fn(CutProgress),
    cancel: &CutCancel,
) -> Result<CutReport> {
    on_progress(CutProgress {
        stage: CutStage::Probing,
        completed: 0,
        total: 0,
    });
    let plan = plan_cut(service, job)?;

    let total = plan.segments.len() + 2;
    let mut clips = Vec::with_capacity(plan.segments.len());
    for (index, segment) in plan.segments.iter().enumerate() {
        cancel.check()?;
        clips.push(service.extract_subrange(&plan.source, segment, index)?);
        on_progress(CutProgress {
            stage: CutStage::Extracting,
            completed: index + 1,
            total,
        });
    }

    cancel.check()?;
    let merged = service.concatenate(&clips, &job.output)?;
    on_progress(CutProgress {
        stage: CutStage::Concatenating,
        completed: total - 1,
        total,
    });

    cancel.check()?;
    service.export(&merged, &job.output)?;
    on_progress(CutProgress {
        stage: CutStage::Done,
        completed: total,
        total,
    });

    Ok(CutReport {
        output: job.output.clone(),
        kept: plan.kept(),
        removed: plan.removed(),
        segments: plan.segments,
    })
}
