//! Static site generation pipeline.
//!
//! # Responsibility
//! - Turn markdown pages with YAML front matter into per-page JSON data.
//! - Render page data through layout templates into HTML.
//! - Copy static asset directories next to the rendered pages.
//!
//! # Invariants
//! - Directory listings are processed in file-name order.
//! - Subdirectories mirror into the JSON and output trees; `ref_prefix`
//!   always points from a page back to the site root.
//! - Per-page problems are logged and skipped; directory-level problems
//!   abort the stage.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub mod assets;
pub mod containers;
pub mod data;
pub mod front_matter;
pub mod layout;
pub mod markdown;
pub mod navigation;
pub mod render;
pub mod template;

pub use assets::copy_static_assets;
pub use containers::{generate_containers_markup, ContainerMeta};
pub use data::{generate_data, DataSummary};
pub use front_matter::{parse_front_matter, FrontMatter};
pub use layout::{SiteLayout, CONFIG_FILE_NAME};
pub use navigation::{collect_navigation_links, render_navigation, NavLink};
pub use render::{render_site, RenderSummary};
pub use template::{Template, TemplateError};

/// `ref_prefix` of pages at the site root.
pub const ROOT_REF_PREFIX: &str = "./";

pub type SiteResult<T> = Result<T, SiteError>;

/// Site generation failure.
#[derive(Debug)]
pub enum SiteError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// `folio.toml` exists but cannot be decoded.
    Config { path: PathBuf, message: String },
    /// A directory the stage depends on does not exist.
    MissingDirectory { role: &'static str, path: PathBuf },
    /// Front matter lacks a field the page kind requires.
    MissingField { path: PathBuf, field: &'static str },
    /// Front matter field has the wrong shape.
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl Display for SiteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid page data at `{}`: {source}", path.display())
            }
            Self::Config { path, message } => {
                write!(f, "invalid site config `{}`: {message}", path.display())
            }
            Self::MissingDirectory { role, path } => {
                write!(f, "{role} directory `{}` not found", path.display())
            }
            Self::MissingField { path, field } => write!(
                f,
                "front matter of `{}` is missing `{field}`",
                path.display()
            ),
            Self::InvalidField {
                path,
                field,
                message,
            } => write!(
                f,
                "front matter field `{field}` of `{}` is invalid: {message}",
                path.display()
            ),
        }
    }
}

impl Error for SiteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Counts reported by `build_site`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub data: DataSummary,
    pub render: RenderSummary,
    pub asset_dirs_copied: usize,
}

/// Runs all stages for the project rooted at `root`.
///
/// # Side effects
/// - Writes page JSON, rendered HTML and copied assets under `root`.
/// - Emits `site_build` logging events with duration and counts.
pub fn build_site(root: &Path, layout: &SiteLayout) -> SiteResult<BuildSummary> {
    let started_at = Instant::now();
    info!(
        "event=site_build module=site status=start root={}",
        root.display()
    );

    let pages_dir = root.join(&layout.pages_dir);
    let json_dir = root.join(&layout.json_dir);
    let templates_dir = root.join(&layout.templates_dir);
    let output_dir = root.join(&layout.output_dir);
    let asset_dirs: Vec<PathBuf> = layout.asset_dirs.iter().map(|dir| root.join(dir)).collect();

    let data = generate_data(&pages_dir, &json_dir)?;
    let render = render_site(&json_dir, &templates_dir, &output_dir)?;
    let asset_dirs_copied = copy_static_assets(&asset_dirs, &output_dir)?;

    info!(
        "event=site_build module=site status=ok duration_ms={} pages={} rendered={} skipped={} asset_dirs={}",
        started_at.elapsed().as_millis(),
        data.pages,
        render.rendered,
        render.skipped,
        asset_dirs_copied
    );
    Ok(BuildSummary {
        data,
        render,
        asset_dirs_copied,
    })
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Directory entries sorted by file name.
pub(crate) fn sorted_entries(dir: &Path) -> SiteResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
        entries.push(entry.map_err(io_error(dir))?.path());
    }
    entries.sort();
    Ok(entries)
}

pub(crate) fn is_markdown(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("md" | "markdown")
        )
}

pub(crate) fn ensure_dir(path: &Path) -> SiteResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(io_error(path))?;
        info!(
            "event=dir_create module=site status=ok path={}",
            path.display()
        );
    }
    Ok(())
}
