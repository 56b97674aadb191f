//! Crop sessions: the transient selection rectangle during clipping.
//!
//! A [`CropSession`] exists only while the clipping tool is open. It holds
//! the source page image and the selection in pixel coordinates relative to
//! that image. [`ClipTool`] owns the lifecycle: opening replaces any prior
//! session, closing destroys it.

use super::ClipError;
use image::RgbaImage;
use image::imageops;
use std::str::FromStr;

/// A pixel rectangle within the source page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with an image of the given dimensions. `None` when the
    /// rectangle lies outside the image or has no area.
    pub fn clamped_to(&self, image_width: u32, image_height: u32) -> Option<CropRect> {
        if self.x >= image_width || self.y >= image_height {
            return None;
        }
        let width = self.width.min(image_width - self.x);
        let height = self.height.min(image_height - self.y);
        if width == 0 || height == 0 {
            return None;
        }
        Some(CropRect {
            x: self.x,
            y: self.y,
            width,
            height,
        })
    }
}

impl FromStr for CropRect {
    type Err = ClipError;

    /// Parse the CLI form `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, w, h] = parts.as_slice() else {
            return Err(ClipError::EmptyCrop);
        };
        let parse = |v: &str| v.parse::<u32>().map_err(|_| ClipError::EmptyCrop);
        Ok(CropRect::new(parse(x)?, parse(y)?, parse(w)?, parse(h)?))
    }
}

/// The active selection over one page image.
#[derive(Debug, Clone)]
pub struct CropSession {
    source: RgbaImage,
    rect: CropRect,
}

impl CropSession {
    pub fn new(source: RgbaImage, rect: CropRect) -> Self {
        Self { source, rect }
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    /// Replace the selection rectangle (the user dragged a new region).
    pub fn set_rect(&mut self, rect: CropRect) {
        self.rect = rect;
    }

    /// The selected pixels, clamped to the source bounds.
    ///
    /// `None` when the selection does not cover any pixel; callers treat
    /// that the same as a missing session.
    pub fn cropped(&self) -> Option<RgbaImage> {
        let rect = self
            .rect
            .clamped_to(self.source.width(), self.source.height())?;
        Some(
            imageops::crop_imm(&self.source, rect.x, rect.y, rect.width, rect.height).to_image(),
        )
    }
}

/// Owner of the crop session lifecycle.
///
/// Mirrors the clipping-tool toggle: opening the tool starts a session over
/// the currently displayed page image, closing it (or opening a new one)
/// destroys the previous session.
#[derive(Debug, Default)]
pub struct ClipTool {
    session: Option<CropSession>,
}

impl ClipTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any existing one.
    pub fn open(&mut self, source: RgbaImage, rect: CropRect) {
        self.session = Some(CropSession::new(source, rect));
    }

    pub fn close(&mut self) {
        self.session = None;
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CropSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut CropSession> {
        self.session.as_mut()
    }
}
