//! Encoder settings for extracted segments.
//!
//! Segments are re-encoded when cut so that cut points land on the exact
//! requested time rather than the nearest keyframe; the concatenation step
//! then stream-copies, so every segment must share these settings.

use serde::{Deserialize, Serialize};

/// Video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    H264,
    H265,
    Vp9,
}

impl VideoCodec {
    /// FFmpeg encoder name.
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::H264 => "libx264",
            Self::H265 => "libx265",
            Self::Vp9 => "libvpx-vp9",
        }
    }

    /// Container extension used for intermediate segment files.
    pub fn extension(self) -> &'static str {
        match self {
            Self::H264 | Self::H265 => "mp4",
            Self::Vp9 => "webm",
        }
    }
}

/// Audio codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Aac,
    Opus,
    Flac,
}

impl AudioCodec {
    /// FFmpeg encoder name.
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Opus => "libopus",
            Self::Flac => "flac",
        }
    }
}

/// How extracted segments are encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeSettings {
    pub video_codec: VideoCodec,
    pub audio_codec: AudioCodec,
    /// CRF value (0-51 for H.264/H.265, lower = better). Encoder default if unset.
    pub crf: Option<u32>,
    /// Encoder speed preset, e.g. `veryfast`. Only passed to x264/x265.
    pub preset: Option<String>,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: VideoCodec::H264,
            audio_codec: AudioCodec::Aac,
            crf: None,
            preset: None,
        }
    }
}

impl EncodeSettings {
    /// Output-side FFmpeg arguments for a segment encode.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.video_codec.ffmpeg_encoder().to_string(),
            "-c:a".to_string(),
            self.audio_codec.ffmpeg_encoder().to_string(),
        ];

        if let Some(crf) = self.crf {
            args.extend_from_slice(&["-crf".into(), crf.to_string()]);
        }
        if let Some(preset) = &self.preset {
            if matches!(self.video_codec, VideoCodec::H264 | VideoCodec::H265) {
                args.extend_from_slice(&["-preset".into(), preset.clone()]);
            }
        }

        // Keep players happy regardless of source pixel format.
        args.extend_from_slice(&["-pix_fmt".into(), "yuv420p".into()]);
        args
    }

    /// Reject values FFmpeg would only fail on later.
    pub fn validate(&self) -> trimcut_core::Result<()> {
        if let Some(crf) = self.crf {
            let max = match self.video_codec {
                VideoCodec::H264 | VideoCodec::H265 => 51,
                VideoCodec::Vp9 => 63,
            };
            if crf > max {
                return Err(trimcut_core::TrimCutError::InvalidParameter(format!(
                    "crf {crf} out of range for {} (0-{max})",
                    self.video_codec.ffmpeg_encoder()
                )));
            }
        }
        Ok(())
    }
}
