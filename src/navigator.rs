//! Edition/page navigation state machine.
//!
//! The navigator owns the single piece of mutable state in pressroom: which
//! edition is open and which page is showing. Everything a UI needs to render
//! is derived from it through [`Navigator::view`].
//!
//! ## Startup selection policy
//!
//! Evaluated once, with `today` injected so the policy stays a pure function
//! of its inputs:
//!
//! 1. today's edition, if the catalog has one;
//! 2. otherwise the chronologically latest edition;
//! 3. otherwise the no-edition state: navigation disabled, document
//!    affordance hidden, placeholder status text.
//!
//! ## Transitions
//!
//! - `load_edition(date)` — errors (no state change) when the date is not a
//!   catalog key; otherwise switches edition and resets to page 1.
//! - `change_page(delta)` — silent no-op when the target page leaves
//!   `[1, total_pages]`; out-of-range navigation is ignored, never an error.
//!   A committed change best-effort rings the page-turn chime first; chime
//!   failure is swallowed and never blocks navigation.
//!
//! Nothing leaves the no-edition state: the catalog is not refreshed at
//! runtime.
//!
//! ## Refresh tokens
//!
//! Every committed transition returns a [`PageRefresh`] carrying a token
//! from a monotonically increasing sequence. The image load completion
//! reports back through [`Navigator::complete_refresh`] with its token;
//! completions for superseded refreshes are recognized as stale and dropped,
//! so a late callback can never clear the loading flag of a newer page.

use crate::catalog::{self, Catalog, DocumentLink, DocumentSource};
use crate::config::SiteConfig;
use crate::date::EditionDate;
use log::debug;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NavError {
    #[error("edition not found: {0}")]
    EditionNotFound(EditionDate),
}

/// Best-effort page-turn notification sound.
///
/// Implementations report failure so callers can log it, but the navigator
/// swallows every error: the chime is cosmetic and never blocks navigation.
pub trait Chime {
    fn page_turn(&self) -> Result<(), ChimeError>;
}

#[derive(Error, Debug)]
#[error("chime failed: {0}")]
pub struct ChimeError(pub String);

/// No sound at all. The library default; binaries supply something audible.
pub struct SilentChime;

impl Chime for SilentChime {
    fn page_turn(&self) -> Result<(), ChimeError> {
        Ok(())
    }
}

/// One pending page-image load, issued by a committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRefresh {
    /// Monotonic token; stale completions are recognized by comparing it.
    pub token: u64,
    /// Where the page image for the new state lives.
    pub image: PathBuf,
}

/// How a page-image load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Navigator state. `Viewing` carries the edition's page count so the
/// page-range invariant `1 <= page <= total_pages` is checkable locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    NoEdition,
    Viewing {
        date: EditionDate,
        page: u32,
        total_pages: u32,
    },
}

/// Everything a front end needs to render the viewer.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// Current edition date label, or a placeholder when no edition exists.
    pub date_label: String,
    /// "Page N / M", or waiting text when no edition exists.
    pub page_indicator: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Download affordance; `None` means hide it.
    pub document: Option<DocumentLink>,
    /// Current page image location, when an edition is open.
    pub image: Option<PathBuf>,
    /// A refresh is in flight; the image is showing at reduced opacity.
    pub loading: bool,
    /// Substitute text after a failed image load.
    pub image_alt: Option<String>,
}

/// The component owning current edition/page state and transition logic.
pub struct Navigator {
    catalog: Catalog,
    papers_root: PathBuf,
    document_source: DocumentSource,
    site_slug: String,
    state: ViewState,
    refresh_seq: u64,
    loading: bool,
    image_alt: Option<String>,
}

impl Navigator {
    /// Apply the startup selection policy and return the navigator together
    /// with the initial page refresh, if an edition was selected.
    pub fn start(
        catalog: Catalog,
        config: &SiteConfig,
        today: EditionDate,
    ) -> (Self, Option<PageRefresh>) {
        let mut nav = Navigator {
            catalog,
            papers_root: config.paths.papers_root.clone(),
            document_source: config.documents.document_source(),
            site_slug: config.site.slug.clone(),
            state: ViewState::NoEdition,
            refresh_seq: 0,
            loading: false,
            image_alt: None,
        };

        let selected = if nav.catalog.contains(today) {
            Some(today)
        } else {
            nav.catalog.latest()
        };

        let refresh = selected.and_then(|date| nav.enter_edition(date));
        (nav, refresh)
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Current `(date, page)` when an edition is open.
    pub fn current(&self) -> Option<(EditionDate, u32)> {
        match self.state {
            ViewState::Viewing { date, page, .. } => Some((date, page)),
            ViewState::NoEdition => None,
        }
    }

    /// Switch to another edition, resetting to page 1.
    ///
    /// A date missing from the catalog is reported and leaves the state
    /// untouched; this is the only navigation failure a user ever sees.
    pub fn load_edition(&mut self, date: EditionDate) -> Result<PageRefresh, NavError> {
        self.enter_edition(date).ok_or(NavError::EditionNotFound(date))
    }

    fn enter_edition(&mut self, date: EditionDate) -> Option<PageRefresh> {
        let edition = self.catalog.get(date)?;
        self.state = ViewState::Viewing {
            date,
            page: 1,
            total_pages: edition.pages,
        };
        Some(self.begin_refresh(date, 1))
    }

    /// Move `delta` pages within the current edition.
    ///
    /// Out-of-range targets are silently ignored: no state change, no
    /// refresh, no chime. This is the boundary-clamping policy.
    pub fn change_page(&mut self, delta: i32, chime: &impl Chime) -> Option<PageRefresh> {
        let ViewState::Viewing {
            date,
            page,
            total_pages,
        } = self.state
        else {
            return None;
        };

        let target = i64::from(page) + i64::from(delta);
        if target < 1 || target > i64::from(total_pages) {
            return None;
        }

        if let Err(err) = chime.page_turn() {
            debug!("page-turn chime failed, continuing: {err}");
        }

        let page = target as u32;
        self.state = ViewState::Viewing {
            date,
            page,
            total_pages,
        };
        Some(self.begin_refresh(date, page))
    }

    /// Catalog dates newest first, re-derived on every call for the selector.
    pub fn editions_descending(&self) -> Vec<EditionDate> {
        self.catalog.dates_descending()
    }

    fn begin_refresh(&mut self, date: EditionDate, page: u32) -> PageRefresh {
        self.refresh_seq += 1;
        self.loading = true;
        self.image_alt = None;
        PageRefresh {
            token: self.refresh_seq,
            image: catalog::page_image_path(&self.papers_root, date, page),
        }
    }

    /// Report the completion of a page-image load.
    ///
    /// Stale tokens (a newer refresh has been issued since) are dropped.
    /// A failed load is not escalated: the loading indication stops and
    /// substitute text is recorded in the view model.
    pub fn complete_refresh(&mut self, token: u64, outcome: LoadOutcome) {
        if token != self.refresh_seq {
            debug!("ignoring stale refresh completion (token {token}, current {})", self.refresh_seq);
            return;
        }
        self.loading = false;
        if outcome == LoadOutcome::Failed {
            if let ViewState::Viewing { date, page, .. } = self.state {
                self.image_alt = Some(format!("Page {page} of {date} unavailable"));
            }
        }
    }

    /// Derive the renderable view of the current state.
    pub fn view(&self) -> ViewModel {
        match self.state {
            ViewState::NoEdition => ViewModel {
                date_label: "Coming Soon".to_string(),
                page_indicator: "Waiting for Update...".to_string(),
                prev_enabled: false,
                next_enabled: false,
                document: None,
                image: None,
                loading: false,
                image_alt: None,
            },
            ViewState::Viewing {
                date,
                page,
                total_pages,
            } => {
                let document = self.catalog.get(date).and_then(|edition| {
                    catalog::document_link(
                        date,
                        edition,
                        &self.document_source,
                        &self.papers_root,
                        &self.site_slug,
                    )
                });
                ViewModel {
                    date_label: date.to_string(),
                    page_indicator: format!("Page {page} / {total_pages}"),
                    prev_enabled: page > 1,
                    next_enabled: page < total_pages,
                    document,
                    image: Some(catalog::page_image_path(&self.papers_root, date, page)),
                    loading: self.loading,
                    image_alt: self.image_alt.clone(),
                }
            }
        }
    }
}
