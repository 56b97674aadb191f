//! End-to-end flow over a real (temporary) papers directory: load the
//! catalog, start the navigator, page around, crop the displayed page,
//! compose the branded clip, and export it.

use image::{Rgba, RgbaImage};
use pressroom::catalog::Catalog;
use pressroom::clip::{
    ClipTool, Compositor, CropRect, NoShareSheet, ShareOutcome, download_clip_at, share_clip,
};
use pressroom::config::load_config;
use pressroom::date::EditionDate;
use pressroom::navigator::{LoadOutcome, Navigator, SilentChime};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn date(s: &str) -> EditionDate {
    s.parse().unwrap()
}

/// Lay out a site directory: catalog, config, and synthetic page images.
fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();

    fs::write(
        tmp.path().join("editions.toml"),
        r#"
        [editions."27-01-2026"]
        pages = 2
        pdf = "full.pdf"

        [editions."20-01-2026"]
        pages = 1
        "#,
    )
    .unwrap();

    fs::write(
        tmp.path().join("config.toml"),
        format!(
            r#"
            [site]
            slug = "gazette"

            [paths]
            papers_root = "{root}/papers"
            editions = "{root}/editions.toml"
            "#,
            root = tmp.path().display()
        ),
    )
    .unwrap();

    // Distinct fill per page so the crop's origin is checkable.
    write_page(tmp.path(), "27-01-2026", 1, [200, 0, 0, 255]);
    write_page(tmp.path(), "27-01-2026", 2, [0, 0, 200, 255]);
    write_page(tmp.path(), "20-01-2026", 1, [0, 200, 0, 255]);
    fs::write(tmp.path().join("papers/27-01-2026/full.pdf"), b"%PDF-").unwrap();

    tmp
}

fn write_page(root: &Path, date: &str, page: u32, pixel: [u8; 4]) {
    let dir = root.join("papers").join(date);
    fs::create_dir_all(&dir).unwrap();
    let image = RgbaImage::from_pixel(900, 1200, Rgba(pixel));
    image.save(dir.join(format!("{page}.png"))).unwrap();
}

#[test]
fn browse_crop_brand_and_export() {
    let site_dir = setup_site();
    let config = load_config(&site_dir.path().join("config.toml")).unwrap();
    let catalog = Catalog::load(&config.paths.editions).unwrap();

    // Today is not cataloged, so startup picks the latest edition.
    let (mut nav, refresh) = Navigator::start(catalog, &config, date("30-01-2026"));
    assert_eq!(nav.current(), Some((date("27-01-2026"), 1)));

    let refresh = refresh.unwrap();
    assert!(refresh.image.is_file());
    nav.complete_refresh(refresh.token, LoadOutcome::Loaded);

    // Page forward; the refresh points at page 2's image.
    let refresh = nav.change_page(1, &SilentChime).unwrap();
    assert!(refresh.image.ends_with("27-01-2026/2.png"));
    nav.complete_refresh(refresh.token, LoadOutcome::Loaded);

    let view = nav.view();
    assert_eq!(view.page_indicator, "Page 2 / 2");
    assert!(!view.next_enabled);
    assert!(view.document.is_some());

    // Open the clipping tool over the displayed page and select a region.
    let page = image::open(view.image.unwrap()).unwrap().to_rgba8();
    let mut tool = ClipTool::new();
    tool.open(page, CropRect::new(100, 200, 400, 300));

    let compositor = Compositor::new(&config);
    let clip = compositor.compose(&tool, &view.date_label).unwrap();

    // Contract: width floored to 600, bands at scale 0.75.
    assert_eq!(clip.width(), 600);
    assert_eq!(clip.height(), 300 + 120 + 83);
    // The crop itself is page-2 blue, centered.
    assert_eq!(clip.get_pixel(300, 200), &Rgba([0, 0, 200, 255]));

    // Download path: timestamped, decodable.
    let out = download_clip_at(&clip, site_dir.path(), "gazette", 1769774400000).unwrap();
    assert_eq!(
        out.file_name().unwrap().to_string_lossy(),
        "gazette-clip-1769774400000.png"
    );
    let reloaded = image::open(&out).unwrap();
    assert_eq!(reloaded.width(), 600);

    // Share path: no share sheet here, so it falls back to a saved file.
    let outcome = share_clip(
        &NoShareSheet,
        &clip,
        "gazette",
        &config.site.name,
        &config.slogan_line(),
        site_dir.path(),
    )
    .unwrap();
    assert!(matches!(outcome, ShareOutcome::SavedTo(path) if path.is_file()));
}

#[test]
fn switching_editions_resets_to_first_page() {
    let site_dir = setup_site();
    let config = load_config(&site_dir.path().join("config.toml")).unwrap();
    let catalog = Catalog::load(&config.paths.editions).unwrap();

    let (mut nav, _) = Navigator::start(catalog, &config, date("27-01-2026"));
    nav.change_page(1, &SilentChime).unwrap();

    let refresh = nav.load_edition(date("20-01-2026")).unwrap();
    assert_eq!(nav.current(), Some((date("20-01-2026"), 1)));
    assert!(refresh.image.is_file());

    // This edition has no document, so the affordance hides.
    let view = nav.view();
    assert_eq!(view.document, None);
    assert_eq!(view.page_indicator, "Page 1 / 1");
    assert!(!view.prev_enabled);
    assert!(!view.next_enabled);
}

#[test]
fn missing_page_image_degrades_to_alt_text() {
    let site_dir = setup_site();
    let config = load_config(&site_dir.path().join("config.toml")).unwrap();
    let catalog = Catalog::load(&config.paths.editions).unwrap();

    let (mut nav, refresh) = Navigator::start(catalog, &config, date("27-01-2026"));
    let refresh = refresh.unwrap();

    // Simulate the image vanishing between catalog load and display.
    fs::remove_file(&refresh.image).unwrap();
    let outcome = if refresh.image.is_file() {
        LoadOutcome::Loaded
    } else {
        LoadOutcome::Failed
    };
    nav.complete_refresh(refresh.token, outcome);

    let view = nav.view();
    assert!(!view.loading);
    assert_eq!(
        view.image_alt.as_deref(),
        Some("Page 1 of 27-01-2026 unavailable")
    );
}
