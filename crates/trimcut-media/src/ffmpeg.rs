//! FFmpeg-backed media service.
//!
//! Uses ffmpeg-sidecar to drive FFmpeg as a subprocess. Segments are
//! re-encoded into a private work directory, joined with the concat demuxer
//! using stream copy into the destination's container, and the result is
//! moved into place.

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, trace, warn};
use trimcut_core::{kept_duration, KeepSegment, Result, TrimCutError};

use crate::encode::EncodeSettings;
use crate::probe::MediaProbe;
use crate::service::{ClipFile, MediaService, MergedMedia};

/// Media service that shells out to FFmpeg.
pub struct FfmpegService {
    settings: EncodeSettings,
    work_dir: TempDir,
}

impl FfmpegService {
    /// Create a service with a fresh work directory under the system temp dir.
    pub fn new(settings: EncodeSettings) -> Result<Self> {
        Self::with_work_root(settings, &std::env::temp_dir(), false)
    }

    /// Create a service whose work directory lives under `root`.
    ///
    /// With `keep` set the directory and its intermediate clips survive drop.
    pub fn with_work_root(settings: EncodeSettings, root: &Path, keep: bool) -> Result<Self> {
        settings.validate()?;
        fs::create_dir_all(root)?;
        let work_dir = tempfile::Builder::new()
            .prefix("trimcut-")
            .disable_cleanup(keep)
            .tempdir_in(root)?;
        debug!(work_dir = %work_dir.path().display(), keep, "Created work directory");
        Ok(Self { settings, work_dir })
    }

    /// Fail early with a readable error when FFmpeg cannot be found.
    pub fn check_installed() -> Result<()> {
        if ffmpeg_sidecar::command::ffmpeg_is_installed() {
            Ok(())
        } else {
            Err(TrimCutError::NotFound(
                "ffmpeg executable not found on PATH".into(),
            ))
        }
    }

    pub fn settings(&self) -> &EncodeSettings {
        &self.settings
    }

    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    fn clip_path(&self, index: usize) -> PathBuf {
        self.work_dir.path().join(format!(
            "segment_{index:04}.{}",
            self.settings.video_codec.extension()
        ))
    }

    /// Merged file name inside the work dir. The extension follows the
    /// destination so FFmpeg picks the container the user asked for.
    fn merged_path(&self, destination: &Path) -> PathBuf {
        let extension = destination
            .extension()
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| OsStr::new(self.settings.video_codec.extension()));
        self.work_dir.path().join("merged").with_extension(extension)
    }

    fn extract_command(
        &self,
        source: &Path,
        segment: &KeepSegment,
        clip: &Path,
    ) -> FfmpegCommand {
        let start = segment.start().to_seconds_f64();
        let length = segment.duration().to_seconds_f64();
        let mut command = FfmpegCommand::new();
        command
            .hide_banner()
            .overwrite()
            .seek(format!("{start:.6}"))
            .input(source)
            .duration(format!("{length:.6}"))
            .args(self.settings.ffmpeg_args())
            .args(["-avoid_negative_ts", "make_zero"])
            .output(clip);
        command
    }

    fn concat_command(list: &Path, merged: &Path) -> FfmpegCommand {
        let mut command = FfmpegCommand::new();
        command
            .hide_banner()
            .overwrite()
            .format("concat")
            .args(["-safe", "0"])
            .input(list)
            .args(["-c", "copy"])
            .output(merged);
        command
    }

    /// Run a command to completion, forwarding FFmpeg's own errors to the log.
    fn run(&self, mut command: FfmpegCommand, step: &str) -> Result<()> {
        let mut child = command
            .spawn()
            .map_err(|e| TrimCutError::Encoder(format!("Failed to spawn ffmpeg: {e}")))?;
        let events = child
            .iter()
            .map_err(|e| TrimCutError::Encoder(format!("Failed to read ffmpeg output: {e}")))?;

        let mut last_error = None;
        for event in events {
            match event {
                FfmpegEvent::Error(message)
                | FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                    warn!(step, "ffmpeg: {}", message);
                    last_error = Some(message);
                }
                FfmpegEvent::Progress(progress) => {
                    trace!(step, time = %progress.time, speed = progress.speed, "ffmpeg progress");
                }
                _ => {}
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(TrimCutError::Encoder(format!(
                "ffmpeg {step} failed ({status}){}",
                last_error.map(|e| format!(": {e}")).unwrap_or_default()
            )));
        }
        Ok(())
    }
}

impl MediaService for FfmpegService {
    fn probe(&self, path: &Path) -> Result<MediaProbe> {
        MediaProbe::probe(path)
    }

    fn extract_subrange(
        &self,
        source: &MediaProbe,
        segment: &KeepSegment,
        index: usize,
    ) -> Result<ClipFile> {
        let path = self.clip_path(index);
        debug!(index, %segment, "Extracting segment");
        let command = self.extract_command(&source.path, segment, &path);
        self.run(command, "extract")?;

        Ok(ClipFile {
            index,
            segment: *segment,
            path,
        })
    }

    fn concatenate(&self, clips: &[ClipFile], destination: &Path) -> Result<MergedMedia> {
        if clips.is_empty() {
            return Err(TrimCutError::InvalidParameter(
                "Nothing to concatenate".into(),
            ));
        }

        let list_path = self.work_dir.path().join("concat_list.txt");
        fs::write(&list_path, concat_list(clips))?;

        let path = self.merged_path(destination);
        let command = Self::concat_command(&list_path, &path);
        self.run(command, "concat")?;

        let segments: Vec<KeepSegment> = clips.iter().map(|c| c.segment).collect();
        Ok(MergedMedia {
            path,
            duration: kept_duration(&segments),
            clip_count: clips.len(),
        })
    }

    fn export(&self, merged: &MergedMedia, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Rename fails across filesystems; fall back to a copy.
        if fs::rename(&merged.path, destination).is_err() {
            fs::copy(&merged.path, destination)?;
        }
        info!(output = %destination.display(), duration = %merged.duration, "Exported");
        Ok(())
    }
}

/// Concat demuxer script listing `clips` in order.
fn concat_list(clips: &[ClipFile]) -> String {
    clips
        .iter()
        .map(|clip| {
            let path = clip.path.to_string_lossy().replace('\\', "/");
            format!("file '{}'\n", path.replace('\'', r"'\''"))
        })
        .collect()
}
