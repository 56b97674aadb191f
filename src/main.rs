use clap::{Parser, Subcommand};
use pressroom::catalog::{Catalog, page_image_path};
use pressroom::check::check_papers;
use pressroom::clip::{
    ClipTool, Compositor, CropRect, NoShareSheet, ShareOutcome, download_clip, encode_png,
    share_clip,
};
use pressroom::config::{self, SiteConfig};
use pressroom::date::EditionDate;
use pressroom::navigator::{Chime, ChimeError, LoadOutcome, Navigator, PageRefresh};
use pressroom::output;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Terminal-bell page-turn chime. Failure is reported upward and swallowed
/// by the navigator; a silent terminal never blocks browsing.
struct TerminalBell;

impl Chime for TerminalBell {
    fn page_turn(&self) -> Result<(), ChimeError> {
        let mut out = io::stdout();
        out.write_all(b"\x07")
            .and_then(|()| out.flush())
            .map_err(|err| ChimeError(err.to_string()))
    }
}

/// Shared flags for commands that compose a clip.
#[derive(clap::Args)]
struct ClipArgs {
    /// Edition date (DD-MM-YYYY); defaults to the startup-selected edition
    #[arg(long)]
    date: Option<EditionDate>,

    /// Page number within the edition
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Crop region in page-image pixels: x,y,width,height
    #[arg(long)]
    crop: CropRect,
}

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(about = "Edition browser and clip branding tool for paginated e-papers")]
#[command(long_about = "\
Edition browser and clip branding tool for paginated e-papers

The catalog (editions.toml) maps calendar dates to editions; page images
live at papers/{date}/{page}.png. At startup pressroom opens today's
edition when it exists, otherwise the newest one.

Content structure:

  editions.toml                    # Catalog: one entry per edition date
  config.toml                      # Site config (optional, sparse overrides)
  assets/logo.png                  # Brand mark for clips (optional)
  assets/brand.ttf                 # Brand font for clips (optional)
  papers/
  └── 30-01-2026/
      ├── 1.png                    # Page images, 1-indexed
      ├── 2.png
      └── full.pdf                 # Edition document (when cataloged)

Run 'pressroom gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the startup-selected edition and viewer state
    Status {
        /// Emit the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// List catalog editions, newest first
    List,
    /// Browse interactively: n(ext), p(rev), g DATE, l(ist), q(uit)
    Browse,
    /// Validate the papers directory against the catalog
    Check,
    /// Compose a branded clip of a page region and save it
    Clip {
        #[command(flatten)]
        args: ClipArgs,

        /// Output file; defaults to a timestamped name in the current dir
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compose a branded clip and hand it to the share mechanism
    Share {
        #[command(flatten)]
        args: ClipArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Status { json } => {
            let site = config::load_config(&cli.config)?;
            let (mut nav, refresh) = start_navigator(&site)?;
            resolve_refresh(&mut nav, refresh);
            if json {
                println!("{}", serde_json::to_string_pretty(&nav.view())?);
            } else {
                print_lines(&output::status_lines(&nav.view()));
            }
        }
        Command::List => {
            let site = config::load_config(&cli.config)?;
            let (nav, _) = start_navigator(&site)?;
            let current = nav.current().map(|(date, _)| date);
            print_lines(&output::edition_lines(&nav.editions_descending(), current));
        }
        Command::Browse => {
            let site = config::load_config(&cli.config)?;
            let (mut nav, refresh) = start_navigator(&site)?;
            resolve_refresh(&mut nav, refresh);
            browse(&mut nav)?;
        }
        Command::Check => {
            let site = config::load_config(&cli.config)?;
            let catalog = Catalog::load(&site.paths.editions)?;
            let report = check_papers(&catalog, &site.paths.papers_root);
            print_lines(&output::check_lines(&report));
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Command::Clip { args, out } => {
            let site = config::load_config(&cli.config)?;
            let clip = compose_clip(&site, &args)?;
            let path = match out {
                Some(path) => {
                    std::fs::write(&path, encode_png(&clip)?)?;
                    path
                }
                None => download_clip(&clip, Path::new("."), &site.site.slug)?,
            };
            println!("Saved clip to {}", path.display());
        }
        Command::Share { args } => {
            let site = config::load_config(&cli.config)?;
            let clip = compose_clip(&site, &args)?;
            let outcome = share_clip(
                &NoShareSheet,
                &clip,
                &site.site.slug,
                &site.site.name,
                &site.slogan_line(),
                Path::new("."),
            )?;
            match outcome {
                ShareOutcome::Shared => println!("Clip shared"),
                ShareOutcome::Dismissed => println!("Share dismissed"),
                ShareOutcome::SavedTo(path) => {
                    // The one advisory this flow is allowed to show.
                    println!(
                        "Sharing is unavailable here; saved clip to {}",
                        path.display()
                    );
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_toml());
        }
    }

    Ok(())
}

fn start_navigator(
    site: &SiteConfig,
) -> Result<(Navigator, Option<PageRefresh>), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&site.paths.editions)?;
    Ok(Navigator::start(catalog, site, EditionDate::today()))
}

/// Complete a pending page refresh against the filesystem. The image either
/// exists or it does not; either way the loading indication stops.
fn resolve_refresh(nav: &mut Navigator, refresh: Option<PageRefresh>) {
    if let Some(refresh) = refresh {
        let outcome = if refresh.image.is_file() {
            LoadOutcome::Loaded
        } else {
            LoadOutcome::Failed
        };
        nav.complete_refresh(refresh.token, outcome);
    }
}

fn browse(nav: &mut Navigator) -> Result<(), Box<dyn std::error::Error>> {
    print_lines(&output::status_lines(&nav.view()));
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim();

        match command {
            "q" | "quit" => break,
            "n" | "next" => {
                let refresh = nav.change_page(1, &TerminalBell);
                resolve_refresh(nav, refresh);
                print_lines(&output::status_lines(&nav.view()));
            }
            "p" | "prev" => {
                let refresh = nav.change_page(-1, &TerminalBell);
                resolve_refresh(nav, refresh);
                print_lines(&output::status_lines(&nav.view()));
            }
            "l" | "list" => {
                let current = nav.current().map(|(date, _)| date);
                print_lines(&output::edition_lines(&nav.editions_descending(), current));
            }
            "" => {}
            _ => {
                if let Some(date_str) = command.strip_prefix("g ") {
                    match date_str.trim().parse::<EditionDate>() {
                        Ok(date) => match nav.load_edition(date) {
                            Ok(refresh) => {
                                resolve_refresh(nav, Some(refresh));
                                print_lines(&output::status_lines(&nav.view()));
                            }
                            // The one navigation failure a user ever sees.
                            Err(err) => println!("{err}"),
                        },
                        Err(err) => println!("{err}"),
                    }
                } else {
                    println!("commands: n, p, g DD-MM-YYYY, l, q");
                }
            }
        }
    }
    Ok(())
}

fn compose_clip(
    site: &SiteConfig,
    args: &ClipArgs,
) -> Result<image::RgbaImage, Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&site.paths.editions)?;

    let date = match args.date {
        Some(date) => date,
        None => {
            let (nav, _) = Navigator::start(catalog.clone(), site, EditionDate::today());
            match nav.current() {
                Some((date, _)) => date,
                None => return Err("no editions available to clip".into()),
            }
        }
    };

    let Some(edition) = catalog.get(date) else {
        return Err(format!("edition not found: {date}").into());
    };
    if args.page < 1 || args.page > edition.pages {
        return Err(format!(
            "page {} is out of range for {date} (1..={})",
            args.page, edition.pages
        )
        .into());
    }

    let image_path = page_image_path(&site.paths.papers_root, date, args.page);
    let page = image::open(&image_path)?.to_rgba8();

    let mut tool = ClipTool::new();
    tool.open(page, args.crop);

    let compositor = Compositor::new(site);
    Ok(compositor.compose(&tool, &date.to_string())?)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
