//! The edition catalog: the fixed set of known editions, keyed by date.
//!
//! Loaded once at startup from `editions.toml` and never mutated. Each
//! entry names its page count and, optionally, a downloadable document:
//!
//! ```toml
//! [editions."30-01-2026"]
//! pages = 4
//! pdf = "full.pdf"
//!
//! [editions."29-01-2026"]
//! pages = 6
//! ```
//!
//! ## Validation
//!
//! The loader enforces these rules:
//! - every key parses as a `DD-MM-YYYY` calendar date
//! - every edition has at least one page
//!
//! ## Resource locations
//!
//! Page images live at `{papers_root}/{date}/{page}.png`. Documents are
//! either local files next to the page images or remote URLs under a
//! configured base, depending on the deployment variant — see
//! [`DocumentSource`].

use crate::date::EditionDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid edition date key '{0}': expected DD-MM-YYYY")]
    InvalidDateKey(String),
    #[error("edition {0} has a zero page count")]
    ZeroPages(EditionDate),
}

/// One dated, paginated edition. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    /// Total page count, always >= 1.
    pub pages: u32,
    /// Filename of the downloadable document, if the edition has one.
    pub pdf: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    editions: BTreeMap<String, EditionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EditionRecord {
    pages: u32,
    pdf: Option<String>,
}

/// The fixed mapping from date to edition.
///
/// Backed by a `BTreeMap` so iteration order is calendar order for free;
/// [`dates_descending`](Catalog::dates_descending) just walks it backwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    editions: BTreeMap<EditionDate, Edition>,
}

impl Catalog {
    /// Load and validate `editions.toml`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content)?;

        let mut editions = BTreeMap::new();
        for (key, record) in file.editions {
            let date: EditionDate = key
                .parse()
                .map_err(|_| CatalogError::InvalidDateKey(key.clone()))?;
            if record.pages == 0 {
                return Err(CatalogError::ZeroPages(date));
            }
            editions.insert(
                date,
                Edition {
                    pages: record.pages,
                    pdf: record.pdf,
                },
            );
        }
        Ok(Catalog { editions })
    }

    /// Build a catalog directly from entries. Used by tests and callers
    /// that already hold validated data.
    pub fn from_entries(entries: impl IntoIterator<Item = (EditionDate, Edition)>) -> Self {
        Catalog {
            editions: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, date: EditionDate) -> Option<&Edition> {
        self.editions.get(&date)
    }

    pub fn contains(&self, date: EditionDate) -> bool {
        self.editions.contains_key(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.editions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EditionDate, &Edition)> {
        self.editions.iter()
    }

    /// All catalog dates, newest first by calendar value.
    ///
    /// Recomputed on every call so it always reflects the catalog it is
    /// asked about (the catalog is static per session, but the selector
    /// re-requests this on every open).
    pub fn dates_descending(&self) -> Vec<EditionDate> {
        self.editions.keys().rev().copied().collect()
    }

    /// The chronologically latest edition date, if any.
    pub fn latest(&self) -> Option<EditionDate> {
        self.editions.keys().next_back().copied()
    }
}

/// Deterministic location of one page image: `{papers_root}/{date}/{page}.png`.
pub fn page_image_path(papers_root: &Path, date: EditionDate, page: u32) -> PathBuf {
    papers_root.join(date.to_string()).join(format!("{page}.png"))
}

/// Where edition documents are served from. The two deployment variants
/// of the original site, unified behind configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Document sits next to the page images: `{papers_root}/{date}/{pdf}`.
    Local,
    /// Document is fetched from `{base_url}/uploads/{date}.pdf`.
    Remote { base_url: String },
}

/// A resolved download affordance for an edition's document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DocumentLink {
    /// Local path or remote URL, depending on the document source.
    pub href: String,
    /// Suggested filename for the saved download.
    pub download_name: String,
}

/// Resolve the download link for an edition, or `None` when the edition
/// carries no document (the affordance is hidden in that case).
pub fn document_link(
    date: EditionDate,
    edition: &Edition,
    source: &DocumentSource,
    papers_root: &Path,
    site_slug: &str,
) -> Option<DocumentLink> {
    let pdf = edition.pdf.as_deref()?;
    let href = match source {
        DocumentSource::Local => papers_root
            .join(date.to_string())
            .join(pdf)
            .to_string_lossy()
            .into_owned(),
        DocumentSource::Remote { base_url } => {
            format!("{}/uploads/{date}.pdf", base_url.trim_end_matches('/'))
        }
    };
    Some(DocumentLink {
        href,
        download_name: format!("{site_slug}-{date}.pdf"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> EditionDate {
        s.parse().unwrap()
    }

    fn edition(pages: u32, pdf: Option<&str>) -> Edition {
        Edition {
            pages,
            pdf: pdf.map(String::from),
        }
    }

    fn write_catalog(content: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("editions.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn loads_editions_with_and_without_documents() {
        let (_tmp, path) = write_catalog(
            r#"
            [editions."30-01-2026"]
            pages = 4
            pdf = "full.pdf"

            [editions."29-01-2026"]
            pages = 6
            "#,
        );
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(date("30-01-2026")).unwrap().pages, 4);
        assert_eq!(
            catalog.get(date("30-01-2026")).unwrap().pdf.as_deref(),
            Some("full.pdf")
        );
        assert_eq!(catalog.get(date("29-01-2026")).unwrap().pdf, None);
    }

    #[test]
    fn load_rejects_bad_date_key() {
        let (_tmp, path) = write_catalog(
            r#"
            [editions."2026-01-30"]
            pages = 4
            "#,
        );
        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::InvalidDateKey(key)) if key == "2026-01-30"
        ));
    }

    #[test]
    fn load_rejects_zero_page_count() {
        let (_tmp, path) = write_catalog(
            r#"
            [editions."30-01-2026"]
            pages = 0
            "#,
        );
        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::ZeroPages(_))
        ));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let (_tmp, path) = write_catalog(
            r#"
            [editions."30-01-2026"]
            pages = 4
            pdfs = "typo.pdf"
            "#,
        );
        assert!(matches!(Catalog::load(&path), Err(CatalogError::Toml(_))));
    }

    #[test]
    fn empty_file_is_an_empty_catalog() {
        let (_tmp, path) = write_catalog("");
        let catalog = Catalog::load(&path).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.latest(), None);
        assert!(catalog.dates_descending().is_empty());
    }

    #[test]
    fn dates_descending_is_calendar_order() {
        let catalog = Catalog::from_entries([
            (date("28-12-2025"), edition(4, None)),
            (date("05-01-2026"), edition(4, None)),
            (date("30-12-2025"), edition(4, None)),
        ]);
        let dates: Vec<String> = catalog
            .dates_descending()
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(dates, vec!["05-01-2026", "30-12-2025", "28-12-2025"]);
    }

    #[test]
    fn latest_picks_newest_calendar_date() {
        let catalog = Catalog::from_entries([
            (date("28-12-2025"), edition(4, None)),
            (date("05-01-2026"), edition(8, None)),
        ]);
        assert_eq!(catalog.latest(), Some(date("05-01-2026")));
    }

    #[test]
    fn page_image_path_is_deterministic() {
        let path = page_image_path(Path::new("papers"), date("30-01-2026"), 3);
        assert_eq!(path, Path::new("papers/30-01-2026/3.png"));
    }

    #[test]
    fn document_link_hidden_without_pdf() {
        let link = document_link(
            date("30-01-2026"),
            &edition(4, None),
            &DocumentSource::Local,
            Path::new("papers"),
            "daily",
        );
        assert_eq!(link, None);
    }

    #[test]
    fn document_link_local_variant() {
        let link = document_link(
            date("30-01-2026"),
            &edition(4, Some("full.pdf")),
            &DocumentSource::Local,
            Path::new("papers"),
            "daily",
        )
        .unwrap();
        assert_eq!(link.href, "papers/30-01-2026/full.pdf");
        assert_eq!(link.download_name, "daily-30-01-2026.pdf");
    }

    #[test]
    fn document_link_remote_variant() {
        let link = document_link(
            date("30-01-2026"),
            &edition(4, Some("full.pdf")),
            &DocumentSource::Remote {
                base_url: "https://epaper.example.org/".into(),
            },
            Path::new("papers"),
            "daily",
        )
        .unwrap();
        assert_eq!(link.href, "https://epaper.example.org/uploads/30-01-2026.pdf");
    }
}
