//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User files are
//! sparse: stock defaults are the base layer and the file overrides only
//! the keys it names. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "The Daily Edition"      # Brand name used in share captions
//! url = "https://example.org"     # Site URL shown in the clip footer
//! slug = "daily-edition"          # Filename stem for downloads
//!
//! [paths]
//! papers_root = "papers"          # Root of per-edition image directories
//! editions = "editions.toml"      # Catalog file
//!
//! [documents]
//! source = "local"                # "local" or "remote"
//! remote_base_url = ""            # Required when source = "remote"
//!
//! [branding]
//! reference_width = 800           # Width at which scale factor = 1.0
//! min_width = 600                 # Output width floor (legible text)
//! header_height = 160             # Header band height at reference width
//! footer_height = 110             # Footer band height at reference width
//! logo_height = 120               # Brand mark height at reference width
//! margin = 20                     # Horizontal inset at reference width
//! separator_stroke = 2            # Separator line width at reference width
//! date_font_size = 20             # Date label size at reference width
//! slogan_font_size = 24           # Footer main line size at reference width
//! slogan_sub_font_size = 16       # Footer sub line size at reference width
//! background = "#ffffff"
//! accent = "#008000"              # Footer band fill
//! date_color = "#333333"
//! separator_color = "#eeeeee"
//! slogan_color = "#ffffff"
//! slogan = ""                     # Defaults to "Read the full edition at {url}"
//! slogan_sub = ""                 # Second footer line, e.g. a credit
//! logo = "assets/logo.png"        # Brand mark; skipped when missing
//! font = "assets/brand.ttf"       # TTF for all text; skipped when missing
//! ```

use crate::catalog::DocumentSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in captions and filenames.
    pub site: SiteIdentity,
    /// Filesystem layout.
    pub paths: PathsConfig,
    /// Where edition documents are served from.
    pub documents: DocumentsConfig,
    /// Clip branding layout constants and assets.
    pub branding: BrandingConfig,
}

/// Brand identity strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Brand name, used as the share title.
    pub name: String,
    /// Public URL, shown in the clip footer slogan.
    pub url: String,
    /// Filename stem for downloaded clips and documents.
    pub slug: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: "The Daily Edition".to_string(),
            url: "https://example.org".to_string(),
            slug: "daily-edition".to_string(),
        }
    }
}

/// Filesystem layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root directory holding one subdirectory per edition date.
    pub papers_root: PathBuf,
    /// Catalog file location.
    pub editions: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            papers_root: PathBuf::from("papers"),
            editions: PathBuf::from("editions.toml"),
        }
    }
}

/// Document serving variant. `source` selects local files next to the
/// page images or a remote upload URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentsConfig {
    /// `"local"` or `"remote"`.
    pub source: String,
    /// Base URL for the remote variant.
    pub remote_base_url: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            source: "local".to_string(),
            remote_base_url: String::new(),
        }
    }
}

impl DocumentsConfig {
    /// Resolve the typed document source. Call after `validate()`.
    pub fn document_source(&self) -> DocumentSource {
        if self.source == "remote" {
            DocumentSource::Remote {
                base_url: self.remote_base_url.clone(),
            }
        } else {
            DocumentSource::Local
        }
    }
}

/// Clip branding layout constants.
///
/// All pixel values are expressed at `reference_width`; the compositor
/// scales them linearly by `output_width / reference_width` so the
/// branded bands keep their proportions across crop sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    /// Width at which the scale factor is exactly 1.0.
    pub reference_width: u32,
    /// Output width floor, guaranteeing legible branding text.
    pub min_width: u32,
    /// Header band height at reference width.
    pub header_height: u32,
    /// Footer band height at reference width.
    pub footer_height: u32,
    /// Brand mark height at reference width.
    pub logo_height: u32,
    /// Horizontal inset for the date label and separator.
    pub margin: u32,
    /// Separator line width at reference width.
    pub separator_stroke: u32,
    /// Date label font size at reference width.
    pub date_font_size: u32,
    /// Footer main line font size at reference width.
    pub slogan_font_size: u32,
    /// Footer sub line font size at reference width.
    pub slogan_sub_font_size: u32,
    /// Canvas background fill.
    pub background: String,
    /// Footer band fill.
    pub accent: String,
    /// Date label color.
    pub date_color: String,
    /// Separator line color.
    pub separator_color: String,
    /// Footer text color.
    pub slogan_color: String,
    /// Footer main line. Empty means "Read the full edition at {site.url}".
    pub slogan: String,
    /// Footer sub line. Empty means no sub line is drawn.
    pub slogan_sub: String,
    /// Brand mark image. Skipped when the file is missing.
    pub logo: PathBuf,
    /// TTF font for all text. Text is skipped when the file is missing.
    pub font: PathBuf,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            reference_width: 800,
            min_width: 600,
            header_height: 160,
            footer_height: 110,
            logo_height: 120,
            margin: 20,
            separator_stroke: 2,
            date_font_size: 20,
            slogan_font_size: 24,
            slogan_sub_font_size: 16,
            background: "#ffffff".to_string(),
            accent: "#008000".to_string(),
            date_color: "#333333".to_string(),
            separator_color: "#eeeeee".to_string(),
            slogan_color: "#ffffff".to_string(),
            slogan: String::new(),
            slogan_sub: String::new(),
            logo: PathBuf::from("assets/logo.png"),
            font: PathBuf::from("assets/brand.ttf"),
        }
    }
}

impl SiteConfig {
    /// Footer main line, falling back to the site URL phrasing.
    pub fn slogan_line(&self) -> String {
        if self.branding.slogan.is_empty() {
            format!("Read the full edition at {}", self.site.url)
        } else {
            self.branding.slogan.clone()
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branding.reference_width == 0 {
            return Err(ConfigError::Validation(
                "branding.reference_width must be non-zero".into(),
            ));
        }
        if self.branding.min_width == 0 {
            return Err(ConfigError::Validation(
                "branding.min_width must be non-zero".into(),
            ));
        }
        for (key, value) in [
            ("branding.background", &self.branding.background),
            ("branding.accent", &self.branding.accent),
            ("branding.date_color", &self.branding.date_color),
            ("branding.separator_color", &self.branding.separator_color),
            ("branding.slogan_color", &self.branding.slogan_color),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "{key} is not a #rrggbb color: '{value}'"
                )));
            }
        }
        match self.documents.source.as_str() {
            "local" => {}
            "remote" => {
                if self.documents.remote_base_url.is_empty() {
                    return Err(ConfigError::Validation(
                        "documents.remote_base_url is required when documents.source = \"remote\""
                            .into(),
                    ));
                }
            }
            other => {
                return Err(ConfigError::Validation(format!(
                    "documents.source must be \"local\" or \"remote\", got '{other}'"
                )));
            }
        }
        Ok(())
    }
}

/// Parse a `#rrggbb` color into RGB components.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml`, merge it over the stock defaults, and validate.
///
/// A missing file is not an error: the stock defaults apply unchanged.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match fs::read_to_string(path) {
        Ok(content) => {
            let overlay: toml::Value = toml::from_str(&content)?;
            merge_toml(stock_defaults_value(), overlay)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => stock_defaults_value(),
        Err(err) => return Err(ConfigError::Io(err)),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Render the stock config as a documented TOML string, for `gen-config`.
pub fn stock_toml() -> String {
    let body =
        toml::to_string_pretty(&SiteConfig::default()).expect("default config must serialize");
    format!(
        "# pressroom configuration. Every key is optional; defaults shown.\n\
         # Sparse overrides are merged over these values.\n\n{body}"
    )
}
