//! # pressroom
//!
//! Edition browser and clip branding tool for paginated e-papers. A site
//! publishes one edition per calendar date as a set of page images
//! (`papers/{date}/{page}.png`) plus an optional document; pressroom holds
//! the catalog of those editions, navigates between them, and turns a
//! selected page region into a branded, shareable clip.
//!
//! # Architecture: Navigator + Compositor
//!
//! Two cooperating components, with data flowing one direction:
//!
//! ```text
//! Catalog ──▶ Navigator state (edition, page) ──▶ page image
//!                                                   │ user selects a region
//!                                                   ▼
//!                          Clip Compositor ──▶ branded PNG ──▶ share/download
//! ```
//!
//! The navigator is the only mutable state in the system. Everything a front
//! end renders is derived from it through [`navigator::Navigator::view`], and
//! every transition is an explicit operation — there are no ambient globals.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`date`] | `DD-MM-YYYY` edition dates: parsing, display, calendar ordering |
//! | [`catalog`] | The fixed date→edition mapping, loading, resource locations |
//! | [`navigator`] | Selection policy, page/edition transitions, refresh tokens |
//! | [`clip`] | Crop sessions, branded-canvas layout, compositing, export |
//! | [`config`] | `config.toml` loading, defaults merging, branding constants |
//! | [`check`] | Catalog-versus-filesystem validation for the `check` command |
//! | [`output`] | Information-first CLI display formatting |
//!
//! # Design Decisions
//!
//! ## Injected clock
//!
//! The startup selection policy (today's edition, else the latest) takes
//! `today` as a parameter. The policy is a pure function of the catalog and
//! the date, so every branch is unit testable without faking a clock.
//!
//! ## Refresh tokens over incidental harmlessness
//!
//! Page-image loads complete asynchronously from the navigator's point of
//! view. Each committed transition issues a token from a monotonic sequence
//! and completions carry their token back; a completion for a superseded
//! refresh is recognized as stale and dropped, so a late callback can never
//! clear the loading state of a newer page.
//!
//! ## Configuration over variants
//!
//! The branding layout (band heights, reference width, minimum width,
//! colors, slogans) and the document-serving strategy (local files vs a
//! remote upload URL) are named configuration in [`config::SiteConfig`],
//! not code paths. One compositor and one navigator serve every deployment.
//!
//! ## Graceful degradation
//!
//! Only two failures ever reach the user: a requested edition missing from
//! the catalog, and an unavailable share mechanism (which falls back to a
//! direct download with one advisory). Everything else — missing page
//! images, a missing brand mark or font, a failed page-turn chime — degrades
//! silently to keep browsing uninterrupted.

pub mod catalog;
pub mod check;
pub mod clip;
pub mod config;
pub mod date;
pub mod navigator;
pub mod output;
