//! Catalog-versus-filesystem validation for the `check` command.
//!
//! The catalog promises `pages` images per edition under
//! `{papers_root}/{date}/`; this module walks the papers directory and
//! reports what is actually there. Nothing here mutates state — the report
//! is advisory and the viewer stays usable even with missing assets (a
//! missing page image only degrades to alt text at view time).

use crate::catalog::{Catalog, page_image_path};
use crate::date::EditionDate;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Findings for one cataloged edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionCheck {
    pub date: EditionDate,
    pub pages: u32,
    /// Page numbers whose image file is absent.
    pub missing_pages: Vec<u32>,
    /// Document filename named by the catalog but absent on disk.
    pub missing_document: Option<String>,
}

impl EditionCheck {
    pub fn is_clean(&self) -> bool {
        self.missing_pages.is_empty() && self.missing_document.is_none()
    }
}

/// Full report over the papers directory.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub editions: Vec<EditionCheck>,
    /// Directories under the papers root that no catalog entry references.
    pub orphan_dirs: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.editions.iter().all(EditionCheck::is_clean) && self.orphan_dirs.is_empty()
    }
}

/// Compare the catalog against the papers directory.
pub fn check_papers(catalog: &Catalog, papers_root: &Path) -> CheckReport {
    let mut report = CheckReport::default();

    for (&date, edition) in catalog.iter() {
        let mut missing_pages = Vec::new();
        for page in 1..=edition.pages {
            if !page_image_path(papers_root, date, page).is_file() {
                missing_pages.push(page);
            }
        }
        let missing_document = edition.pdf.as_ref().and_then(|pdf| {
            let path = papers_root.join(date.to_string()).join(pdf);
            (!path.is_file()).then(|| pdf.clone())
        });
        report.editions.push(EditionCheck {
            date,
            pages: edition.pages,
            missing_pages,
            missing_document,
        });
    }

    if papers_root.is_dir() {
        for entry in WalkDir::new(papers_root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
        {
            let referenced = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<EditionDate>().ok())
                .is_some_and(|date| catalog.contains(date));
            if !referenced {
                report.orphan_dirs.push(entry.path().to_path_buf());
            }
        }
        report.orphan_dirs.sort();
    }

    report
}
