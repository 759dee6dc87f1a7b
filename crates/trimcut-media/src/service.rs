//! The media-processing seam the cut pipeline drives.

use std::path::{Path, PathBuf};
use trimcut_core::{KeepSegment, Result, TimeValue};

use crate::probe::MediaProbe;

/// One extracted range of the source, ready to be joined.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipFile {
    /// Position in the final output (0-based).
    pub index: usize,
    pub segment: KeepSegment,
    pub path: PathBuf,
}

/// The joined clips, not yet at their final destination.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMedia {
    pub path: PathBuf,
    pub duration: TimeValue,
    pub clip_count: usize,
}

/// Decode/encode collaborator.
///
/// Implementations must keep clip order: `concatenate` receives clips in
/// timeline order and must emit them in exactly that order.
pub trait MediaService: Send {
    /// Read duration and stream layout of a source file.
    fn probe(&self, path: &Path) -> Result<MediaProbe>;

    /// Cut `segment` out of `source` as a standalone clip.
    fn extract_subrange(
        &self,
        source: &MediaProbe,
        segment: &KeepSegment,
        index: usize,
    ) -> Result<ClipFile>;

    /// Join clips, in the given order, into one piece of media in the
    /// container that `destination` names.
    fn concatenate(&self, clips: &[ClipFile], destination: &Path) -> Result<MergedMedia>;

    /// Write merged media to its final location.
    fn export(&self, merged: &MergedMedia, destination: &Path) -> Result<()>;
}
