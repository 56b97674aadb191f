//! Clip production — crop a page region, brand it, export it.
//!
//! The module is split into:
//! - **Session**: the transient crop selection over the current page image
//! - **Layout**: pure geometry for the branded output (unit testable)
//! - **Compositor**: pixel work — bands, brand mark, text, crop placement
//! - **Export**: PNG encoding, the [`ShareTarget`] seam, download fallback

mod compositor;
mod export;
mod layout;
mod session;

use thiserror::Error;

pub use compositor::{BrandAssets, Compositor};
pub use export::{
    NoShareSheet, ShareOutcome, ShareRequest, ShareTarget, download_clip, download_clip_at,
    encode_png, share_clip,
};
pub use layout::ClipLayout;
pub use session::{ClipTool, CropRect, CropSession};

#[derive(Error, Debug)]
pub enum ClipError {
    /// The clipping tool is closed; there is nothing to compose.
    #[error("no active crop session")]
    NoActiveSession,
    /// The selection does not intersect the page image.
    #[error("crop selection is empty")]
    EmptyCrop,
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ShareError {
    /// No share mechanism on this platform; callers fall back to download.
    #[error("sharing is not supported here")]
    Unsupported,
    /// The user dismissed the share sheet.
    #[error("share cancelled")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
}
