//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (edition, page, check finding) is its semantic identity —
//! date and page position — with filesystem paths shown as secondary context
//! via indented lines. Formatting functions return lines rather than printing
//! so they stay unit testable; the binary joins and prints them.
//!
//! ```text
//! Edition 30-01-2026
//!     Page 2 / 4
//!     Image: papers/30-01-2026/2.png
//!     Document: papers/30-01-2026/full.pdf
//! ```

use crate::check::CheckReport;
use crate::date::EditionDate;
use crate::navigator::ViewModel;

const INDENT: &str = "    ";

/// Render the viewer status block.
pub fn status_lines(view: &ViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    match &view.image {
        None => {
            lines.push(view.date_label.clone());
            lines.push(format!("{INDENT}{}", view.page_indicator));
        }
        Some(image) => {
            lines.push(format!("Edition {}", view.date_label));
            lines.push(format!("{INDENT}{}", view.page_indicator));
            match &view.image_alt {
                Some(alt) => lines.push(format!("{INDENT}Image: {alt}")),
                None => lines.push(format!("{INDENT}Image: {}", image.display())),
            }
            if let Some(document) = &view.document {
                lines.push(format!("{INDENT}Document: {}", document.href));
            }
        }
    }
    lines
}

/// Render the edition selector listing, newest first.
pub fn edition_lines(dates: &[EditionDate], current: Option<EditionDate>) -> Vec<String> {
    if dates.is_empty() {
        return vec!["No editions".to_string()];
    }
    dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let marker = if Some(*date) == current {
                " (current)"
            } else {
                ""
            };
            format!("{:03} {date}{marker}", index + 1)
        })
        .collect()
}

/// Render the `check` report: one header per edition, findings indented.
pub fn check_lines(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    for edition in &report.editions {
        lines.push(format!("{} ({} pages)", edition.date, edition.pages));
        if edition.is_clean() {
            lines.push(format!("{INDENT}ok"));
            continue;
        }
        if !edition.missing_pages.is_empty() {
            let pages: Vec<String> = edition
                .missing_pages
                .iter()
                .map(u32::to_string)
                .collect();
            lines.push(format!("{INDENT}Missing pages: {}", pages.join(", ")));
        }
        if let Some(document) = &edition.missing_document {
            lines.push(format!("{INDENT}Missing document: {document}"));
        }
    }
    if !report.orphan_dirs.is_empty() {
        lines.push("Unreferenced directories".to_string());
        for dir in &report.orphan_dirs {
            lines.push(format!("{INDENT}{}", dir.display()));
        }
    }
    lines
}
