//! The clip compositor: renders the branded canvas around a cropped region.
//!
//! Drawing order, back to front: background fill, brand mark, date label,
//! header/content separator, cropped region, footer band, slogan text.
//!
//! Missing brand assets degrade gracefully: a missing logo or font skips
//! that visual element (logged once at load) rather than failing the whole
//! composition. The two hard failures are a closed clipping tool and an
//! empty crop — both are typed errors the caller must check before export.

use super::layout::ClipLayout;
use super::session::ClipTool;
use super::ClipError;
use crate::config::{BrandingConfig, SiteConfig, parse_hex_color};
use ab_glyph::{FontVec, PxScale};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::warn;

/// Brand mark and font, loaded once per compositor.
pub struct BrandAssets {
    pub logo: Option<RgbaImage>,
    pub font: Option<FontVec>,
}

impl BrandAssets {
    /// Load assets from the configured paths. Missing or undecodable files
    /// are warnings, not errors; the corresponding element is skipped.
    pub fn load(branding: &BrandingConfig) -> Self {
        let logo = match image::open(&branding.logo) {
            Ok(img) => Some(img.to_rgba8()),
            Err(err) => {
                warn!(
                    "brand mark unavailable ({}): {err}; clips will omit the logo",
                    branding.logo.display()
                );
                None
            }
        };
        let font = match std::fs::read(&branding.font) {
            Ok(data) => match FontVec::try_from_vec(data) {
                Ok(font) => Some(font),
                Err(err) => {
                    warn!(
                        "brand font unreadable ({}): {err}; clips will omit text",
                        branding.font.display()
                    );
                    None
                }
            },
            Err(err) => {
                warn!(
                    "brand font unavailable ({}): {err}; clips will omit text",
                    branding.font.display()
                );
                None
            }
        };
        BrandAssets { logo, font }
    }

    pub fn empty() -> Self {
        BrandAssets {
            logo: None,
            font: None,
        }
    }
}

/// Composes branded clip images from crop sessions.
pub struct Compositor {
    branding: BrandingConfig,
    slogan: String,
    slogan_sub: String,
    assets: BrandAssets,
}

impl Compositor {
    /// Build a compositor for the site, loading brand assets from disk.
    pub fn new(config: &SiteConfig) -> Self {
        Self::with_assets(config, BrandAssets::load(&config.branding))
    }

    /// Build with pre-loaded assets. Used by tests and embedders that
    /// already hold the logo/font bytes.
    pub fn with_assets(config: &SiteConfig, assets: BrandAssets) -> Self {
        Compositor {
            branding: config.branding.clone(),
            slogan: config.slogan_line(),
            slogan_sub: config.branding.slogan_sub.clone(),
            assets,
        }
    }

    /// Render the branded canvas for the tool's active crop session.
    ///
    /// Fails when the tool is closed or the selection is empty; callers
    /// must check before attempting to export.
    pub fn compose(&self, tool: &ClipTool, date_label: &str) -> Result<RgbaImage, ClipError> {
        let session = tool.session().ok_or(ClipError::NoActiveSession)?;
        let crop = session.cropped().ok_or(ClipError::EmptyCrop)?;
        let layout = ClipLayout::compute((crop.width(), crop.height()), &self.branding);

        let background = color(&self.branding.background, [255, 255, 255]);
        let mut canvas =
            RgbaImage::from_pixel(layout.output_width, layout.output_height, background);

        self.draw_header(&mut canvas, &layout, date_label);

        // Separator at the header/content boundary.
        let (sep_x, sep_y, sep_w, sep_h) = layout.separator_rect();
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(sep_x as i32, sep_y as i32).of_size(sep_w, sep_h),
            color(&self.branding.separator_color, [238, 238, 238]),
        );

        // The cropped region, horizontally centered below the header.
        imageops::overlay(
            &mut canvas,
            &crop,
            i64::from(layout.crop_x),
            i64::from(layout.crop_y),
        );

        self.draw_footer(&mut canvas, &layout);
        Ok(canvas)
    }

    fn draw_header(&self, canvas: &mut RgbaImage, layout: &ClipLayout, date_label: &str) {
        if let Some(logo) = &self.assets.logo {
            if let Some((x, y, w, h)) = layout.logo_box((logo.width(), logo.height())) {
                let scaled = imageops::resize(logo, w, h, FilterType::Lanczos3);
                imageops::overlay(canvas, &scaled, x, y);
            }
        }

        if let Some(font) = &self.assets.font {
            let (x, y) = layout.date_anchor();
            draw_text_mut(
                canvas,
                color(&self.branding.date_color, [51, 51, 51]),
                x,
                y,
                PxScale::from(layout.date_font_size as f32),
                font,
                date_label,
            );
        }
    }

    fn draw_footer(&self, canvas: &mut RgbaImage, layout: &ClipLayout) {
        draw_filled_rect_mut(
            canvas,
            Rect::at(0, layout.footer_top() as i32)
                .of_size(layout.output_width, layout.footer_height),
            color(&self.branding.accent, [0, 128, 0]),
        );

        let Some(font) = &self.assets.font else {
            return;
        };
        let slogan_color = color(&self.branding.slogan_color, [255, 255, 255]);

        let scale = PxScale::from(layout.slogan_font_size as f32);
        let (text_w, _) = text_size(scale, font, &self.slogan);
        draw_text_mut(
            canvas,
            slogan_color,
            centered_x(layout.output_width, text_w),
            layout.slogan_text_top(),
            scale,
            font,
            &self.slogan,
        );

        if !self.slogan_sub.is_empty() {
            let sub_scale = PxScale::from(layout.slogan_sub_font_size as f32);
            let (sub_w, _) = text_size(sub_scale, font, &self.slogan_sub);
            draw_text_mut(
                canvas,
                slogan_color,
                centered_x(layout.output_width, sub_w),
                layout.slogan_sub_text_top(),
                sub_scale,
                font,
                &self.slogan_sub,
            );
        }
    }
}

fn centered_x(canvas_width: u32, text_width: u32) -> i32 {
    (i64::from(canvas_width) - i64::from(text_width)) as i32 / 2
}

/// Resolve a configured hex color, falling back to the stock value.
/// Config validation already rejected malformed colors, so the fallback
/// only covers hand-built configs that skipped `validate()`.
fn color(value: &str, fallback: [u8; 3]) -> Rgba<u8> {
    let [r, g, b] = parse_hex_color(value).unwrap_or(fallback);
    Rgba([r, g, b, 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::session::CropRect;

    fn compositor() -> Compositor {
        Compositor::with_assets(&SiteConfig::default(), BrandAssets::empty())
    }

    fn page(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    fn open_tool(width: u32, height: u32, rect: CropRect) -> ClipTool {
        let mut tool = ClipTool::new();
        tool.open(page(width, height, [40, 50, 60, 255]), rect);
        tool
    }

    #[test]
    fn closed_tool_is_an_error() {
        let tool = ClipTool::new();
        assert!(matches!(
            compositor().compose(&tool, "30-01-2026"),
            Err(ClipError::NoActiveSession)
        ));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let tool = open_tool(100, 100, CropRect::new(200, 200, 50, 50));
        assert!(matches!(
            compositor().compose(&tool, "30-01-2026"),
            Err(ClipError::EmptyCrop)
        ));
    }

    #[test]
    fn output_dimensions_follow_the_contract() {
        // 400x300 crop: floored to 600 wide, scale 0.75
        let tool = open_tool(500, 400, CropRect::new(50, 50, 400, 300));
        let out = compositor().compose(&tool, "30-01-2026").unwrap();
        assert_eq!(out.width(), 600);
        assert_eq!(out.height(), 300 + 120 + 83);
    }

    #[test]
    fn wide_crop_keeps_its_own_width() {
        let tool = open_tool(1200, 500, CropRect::new(0, 0, 1000, 200));
        let out = compositor().compose(&tool, "30-01-2026").unwrap();
        assert_eq!(out.width(), 1000);
    }

    #[test]
    fn header_background_is_white_and_footer_is_accent() {
        let tool = open_tool(500, 400, CropRect::new(0, 0, 400, 300));
        let out = compositor().compose(&tool, "30-01-2026").unwrap();

        // Top-left corner: background fill.
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        // Inside the footer band: accent fill.
        assert_eq!(
            out.get_pixel(5, out.height() - 5),
            &Rgba([0, 128, 0, 255])
        );
    }

    #[test]
    fn crop_lands_centered_below_the_header() {
        let tool = open_tool(500, 400, CropRect::new(0, 0, 400, 300));
        let out = compositor().compose(&tool, "30-01-2026").unwrap();
        let layout = ClipLayout::compute((400, 300), &BrandingConfig::default());

        // First crop pixel.
        assert_eq!(
            out.get_pixel(layout.crop_x, layout.crop_y),
            &Rgba([40, 50, 60, 255])
        );
        // Left of the crop: still background.
        assert_eq!(
            out.get_pixel(layout.crop_x - 1, layout.crop_y),
            &Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn logo_is_scaled_into_the_header() {
        let mut assets = BrandAssets::empty();
        // 2:1 red logo.
        assets.logo = Some(page(200, 100, [200, 0, 0, 255]));
        let compositor = Compositor::with_assets(&SiteConfig::default(), assets);

        let tool = open_tool(900, 700, CropRect::new(0, 0, 800, 400));
        let out = compositor.compose(&tool, "30-01-2026").unwrap();

        // Scale 1.0: logo box is 240x120 centered in the 160-high header.
        assert_eq!(out.get_pixel(400, 80), &Rgba([200, 0, 0, 255]));
        // Outside the logo box, the header stays background.
        assert_eq!(out.get_pixel(10, 80), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn separator_line_is_drawn_at_the_boundary() {
        let tool = open_tool(900, 700, CropRect::new(0, 0, 800, 400));
        let out = compositor().compose(&tool, "30-01-2026").unwrap();
        // Scale 1.0: separator spans y in [158, 160).
        assert_eq!(out.get_pixel(400, 159), &Rgba([238, 238, 238, 255]));
    }

    #[test]
    fn missing_assets_still_produce_contract_dimensions() {
        let tool = open_tool(500, 400, CropRect::new(0, 0, 400, 300));
        let out = compositor().compose(&tool, "30-01-2026").unwrap();
        assert_eq!((out.width(), out.height()), (600, 503));
    }
}
