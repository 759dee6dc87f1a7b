//! TrimCut Media - FFmpeg integration for cutting and joining
//!
//! This crate handles:
//! - Media file probing (duration, stream layout)
//! - The `MediaService` seam and its FFmpeg implementation
//! - Encoder settings for extracted segments
//! - The cut pipeline driving a `MediaService` with computed keep segments

pub mod encode;
pub mod ffmpeg;
pub mod pipeline;
pub mod probe;
pub mod service;

pub use encode::{AudioCodec, EncodeSettings, VideoCodec};
pub use ffmpeg::FfmpegService;
pub use pipeline::{plan_cut, run_cut, CutCancel, CutJob, CutPlan, CutProgress, CutReport, CutStage};
pub use probe::MediaProbe;
pub use service::{ClipFile, MediaService, MergedMedia};

/// Log the FFmpeg binary in use (call once at startup).
pub fn init() {
    let ffmpeg = ffmpeg_sidecar::paths::ffmpeg_path();
    tracing::info!(ffmpeg = %ffmpeg.display(), "TrimCut media initialized");
}
