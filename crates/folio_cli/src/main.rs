//! Folio command-line entry point.
//!
//! # Responsibility
//! - `build`: run the full site pipeline for a project root.
//! - `filter`: apply one filter key to a rendered page and report items.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::{FilterController, FilterSurface, PageDom, SiteLayout};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Static site builder with group filtering")]
struct Cli {
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute or root-relative log directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate page data, render HTML and copy assets.
    Build {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Show which items of a rendered page a filter key keeps visible.
    Filter { page: PathBuf, key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build { root } => {
            let root = root
                .canonicalize()
                .with_context(|| format!("project root `{}` not found", root.display()))?;
            let layout = SiteLayout::load(&root)?;
            start_logging(&cli, &root, &layout)?;

            let summary = folio_core::build_site(&root, &layout)?;
            println!(
                "built pages={} rendered={} skipped={} asset_dirs={}",
                summary.data.pages,
                summary.render.rendered,
                summary.render.skipped,
                summary.asset_dirs_copied
            );
        }
        Command::Filter { page, key } => {
            if logs_to_file(&cli) {
                let cwd = std::env::current_dir().context("cannot read current directory")?;
                start_logging(&cli, &cwd, &SiteLayout::default())?;
            }

            let html = std::fs::read_to_string(page)
                .with_context(|| format!("cannot read page `{}`", page.display()))?;
            let mut controller = FilterController::attach(PageDom::parse(&html));
            controller.activate_key(key)?;

            let dom = controller.detach();
            for (index, item) in dom.items().iter().enumerate() {
                let state = if dom.is_item_visible(index) {
                    "visible"
                } else {
                    "hidden"
                };
                let title = item.title.as_deref().unwrap_or("(untitled)");
                println!("{state}\t{title}");
            }
        }
    }
    Ok(())
}

fn start_logging(cli: &Cli, root: &Path, layout: &SiteLayout) -> Result<()> {
    folio_core::init_logging(log_level(cli), &log_dir(cli, root, layout))
        .map_err(anyhow::Error::msg)
}

/// `build` always logs; the read-only `filter` only with `--log-dir`.
fn logs_to_file(cli: &Cli) -> bool {
    matches!(cli.command, Command::Build { .. }) || cli.log_dir.is_some()
}

fn log_level(cli: &Cli) -> &str {
    cli.log_level
        .as_deref()
        .unwrap_or(folio_core::default_log_level())
}

/// `--log-dir` resolved against `root`, else the layout's log directory.
fn log_dir(cli: &Cli, root: &Path, layout: &SiteLayout) -> PathBuf {
    match &cli.log_dir {
        Some(dir) => root.join(dir),
        None => root.join(&layout.log_dir),
    }
}
