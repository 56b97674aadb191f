//! Clip export: PNG encoding, sharing, and direct download.
//!
//! Sharing goes through the [`ShareTarget`] seam so the library never talks
//! to a platform share sheet directly. The policy mirrors the viewer: if the
//! target reports that sharing is unsupported, the clip falls back to a
//! direct download and the caller shows a single advisory; a dismissed share
//! sheet is logged and otherwise ignored. Both paths are terminal — no retry.

use super::{ClipError, ShareError};
use image::{ImageFormat, RgbaImage};
use log::{debug, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// A clip handed to the platform share mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Fixed filename for the attachment.
    pub filename: String,
    /// Share sheet title.
    pub title: String,
    /// Accompanying caption text.
    pub text: String,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

/// Platform share mechanism seam.
pub trait ShareTarget {
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// The no-platform default: sharing is never available, callers always
/// take the download fallback.
pub struct NoShareSheet;

impl ShareTarget for NoShareSheet {
    fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}

/// How a share attempt concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform accepted the clip.
    Shared,
    /// The user dismissed the share sheet; nothing more to do.
    Dismissed,
    /// Sharing was unavailable; the clip was saved directly instead.
    /// Callers surface a one-time advisory for this case.
    SavedTo(PathBuf),
}

/// Encode a composed clip as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ClipError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Hand a composed clip to the share target, falling back to a direct
/// download in `fallback_dir` when sharing is unsupported.
pub fn share_clip(
    target: &impl ShareTarget,
    image: &RgbaImage,
    slug: &str,
    title: &str,
    caption: &str,
    fallback_dir: &Path,
) -> Result<ShareOutcome, ClipError> {
    let request = ShareRequest {
        filename: format!("{slug}-clip.png"),
        title: title.to_string(),
        text: caption.to_string(),
        png: encode_png(image)?,
    };

    match target.share(&request) {
        Ok(()) => Ok(ShareOutcome::Shared),
        Err(ShareError::Unsupported) => {
            let path = download_clip(image, fallback_dir, slug)?;
            Ok(ShareOutcome::SavedTo(path))
        }
        Err(ShareError::Cancelled) => {
            debug!("share sheet dismissed");
            Ok(ShareOutcome::Dismissed)
        }
        Err(ShareError::Failed(reason)) => {
            // One log line, no retry; the clip is still on screen.
            warn!("sharing failed: {reason}");
            Ok(ShareOutcome::Dismissed)
        }
    }
}

/// Write the clip as `{slug}-clip-{timestamp_ms}.png` in `dir`.
///
/// The millisecond timestamp keeps repeated downloads from clobbering
/// each other.
pub fn download_clip(image: &RgbaImage, dir: &Path, slug: &str) -> Result<PathBuf, ClipError> {
    download_clip_at(image, dir, slug, chrono::Utc::now().timestamp_millis())
}

/// [`download_clip`] with an explicit timestamp, for deterministic tests.
pub fn download_clip_at(
    image: &RgbaImage,
    dir: &Path,
    slug: &str,
    timestamp_ms: i64,
) -> Result<PathBuf, ClipError> {
    let path = dir.join(format!("{slug}-clip-{timestamp_ms}.png"));
    std::fs::write(&path, encode_png(image)?)?;
    Ok(path)
}
