//! Pure geometry for the branded clip canvas.
//!
//! Everything here is arithmetic over the crop dimensions and the named
//! constants in [`BrandingConfig`] — no I/O, no pixels. The compositor
//! consumes the computed layout; tests exercise the numbers directly.
//!
//! The contract:
//! - `output_width = max(crop_width, min_width)` so branding text stays
//!   legible on small crops;
//! - `scale = output_width / reference_width`, and every band height,
//!   font size, margin, and stroke scales linearly with it;
//! - `output_height = crop_height + header_height + footer_height`.

use crate::config::BrandingConfig;

/// Computed canvas layout for one crop.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipLayout {
    pub output_width: u32,
    pub output_height: u32,
    /// `output_width / reference_width`.
    pub scale: f64,
    pub header_height: u32,
    pub footer_height: u32,
    pub crop_width: u32,
    pub crop_height: u32,
    /// Horizontal offset centering the crop on the canvas.
    pub crop_x: u32,
    /// Vertical offset of the crop: the header sits above it.
    pub crop_y: u32,
    pub margin: u32,
    pub separator_stroke: u32,
    pub logo_height: u32,
    pub date_font_size: u32,
    pub slogan_font_size: u32,
    pub slogan_sub_font_size: u32,
}

fn scaled(value: u32, scale: f64) -> u32 {
    (f64::from(value) * scale).round() as u32
}

impl ClipLayout {
    /// Compute the layout for a crop of the given pixel dimensions.
    pub fn compute(crop: (u32, u32), branding: &BrandingConfig) -> ClipLayout {
        let (crop_width, crop_height) = crop;
        let output_width = crop_width.max(branding.min_width);
        let scale = f64::from(output_width) / f64::from(branding.reference_width);

        let header_height = scaled(branding.header_height, scale);
        let footer_height = scaled(branding.footer_height, scale);

        ClipLayout {
            output_width,
            output_height: crop_height + header_height + footer_height,
            scale,
            header_height,
            footer_height,
            crop_width,
            crop_height,
            crop_x: (output_width - crop_width) / 2,
            crop_y: header_height,
            margin: scaled(branding.margin, scale),
            separator_stroke: scaled(branding.separator_stroke, scale).max(1),
            logo_height: scaled(branding.logo_height, scale),
            date_font_size: scaled(branding.date_font_size, scale),
            slogan_font_size: scaled(branding.slogan_font_size, scale),
            slogan_sub_font_size: scaled(branding.slogan_sub_font_size, scale),
        }
    }

    /// Brand mark box: aspect-ratio-preserving at `logo_height`, centered
    /// horizontally, vertically centered in the header band.
    ///
    /// `None` when the natural dimensions are degenerate.
    pub fn logo_box(&self, natural: (u32, u32)) -> Option<(i64, i64, u32, u32)> {
        let (natural_w, natural_h) = natural;
        if natural_w == 0 || natural_h == 0 || self.logo_height == 0 {
            return None;
        }
        let height = self.logo_height;
        let width =
            (f64::from(natural_w) / f64::from(natural_h) * f64::from(height)).round() as u32;
        if width == 0 {
            return None;
        }
        let x = (i64::from(self.output_width) - i64::from(width)) / 2;
        let y = (i64::from(self.header_height) - i64::from(height)) / 2;
        Some((x, y, width, height))
    }

    /// Thin separator at the header/content boundary, inset by the margin.
    /// Returns `(x, y, width, height)`.
    pub fn separator_rect(&self) -> (u32, u32, u32, u32) {
        let width = self.output_width.saturating_sub(2 * self.margin);
        let y = self.header_height.saturating_sub(self.separator_stroke);
        (self.margin, y, width.max(1), self.separator_stroke)
    }

    /// Top-left anchor of the left-aligned date label.
    pub fn date_anchor(&self) -> (i32, i32) {
        let y = (self.header_height / 2).saturating_sub(self.date_font_size / 2);
        (self.margin as i32, y as i32)
    }

    /// Top edge of the footer band.
    pub fn footer_top(&self) -> u32 {
        self.output_height - self.footer_height
    }

    /// Top-left y of the footer main line, centered around 40% into the band.
    pub fn slogan_text_top(&self) -> i32 {
        let center = f64::from(self.footer_top()) + 0.4 * f64::from(self.footer_height);
        (center - f64::from(self.slogan_font_size) / 2.0).round() as i32
    }

    /// Top-left y of the footer sub line, centered around 75% into the band.
    pub fn slogan_sub_text_top(&self) -> i32 {
        let center = f64::from(self.footer_top()) + 0.75 * f64::from(self.footer_height);
        (center - f64::from(self.slogan_sub_font_size) / 2.0).round() as i32
    }
}
