//! Media file probing to get metadata without full decode.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use trimcut_core::{Result, TimeValue, Timeline, TrimCutError};

/// Information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaProbe {
    /// File path
    pub path: PathBuf,
    /// Duration
    pub duration: TimeValue,
    pub has_video: bool,
    pub has_audio: bool,
    /// Container format, as named by ffprobe (e.g. `mov,mp4,m4a,3gp,3g2,mj2`)
    pub format: String,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    #[serde(default)]
    format_name: String,
}

#[derive(Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
}

impl MediaProbe {
    /// Probe a media file with ffprobe.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TrimCutError::NotFound(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let ffprobe = ffmpeg_sidecar::ffprobe::ffprobe_path();
        debug!(ffprobe = %ffprobe.display(), path = %path.display(), "Probing media");
        let output = Command::new(&ffprobe)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .map_err(|e| TrimCutError::Media(format!("Failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            return Err(TrimCutError::Media(format!(
                "ffprobe failed on {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::from_ffprobe_json(path, &output.stdout)
    }

    /// Build a probe from ffprobe's `-print_format json` output.
    pub fn from_ffprobe_json(path: &Path, json: &[u8]) -> Result<Self> {
        let parsed: FfprobeOutput = serde_json::from_slice(json)
            .map_err(|e| TrimCutError::Serialization(format!("Bad ffprobe output: {e}")))?;

        let raw_duration = parsed.format.duration.ok_or_else(|| {
            TrimCutError::Media(format!("{} has no known duration", path.display()))
        })?;
        let seconds: f64 = raw_duration.trim().parse().map_err(|_| {
            TrimCutError::Media(format!("Unreadable duration {raw_duration:?}"))
        })?;
        let duration = TimeValue::from_seconds_f64(seconds)
            .map_err(|e| TrimCutError::Media(format!("Invalid duration: {e}")))?;

        let has_stream = |kind: &str| {
            parsed
                .streams
                .iter()
                .any(|s| s.codec_type.as_deref() == Some(kind))
        };

        Ok(Self {
            path: path.to_path_buf(),
            duration,
            has_video: has_stream("video"),
            has_audio: has_stream("audio"),
            format: parsed.format.format_name,
        })
    }

    /// The timeline cuts are measured against.
    pub fn timeline(&self) -> Result<Timeline> {
        Ok(Timeline::new(self.duration)?)
    }
}
