//! Page data generation (markdown -> JSON).
//!
//! # Responsibility
//! - Convert each markdown page into a JSON object holding its front
//!   matter, rendered body and navigation block.
//! - Attach the container listing to `layout: containers` pages.
//!
//! # Invariants
//! - JSON files mirror the page tree: `<dir>/<stem>.md` -> `<dir>/<stem>.json`.
//! - A page sees the menu pages of its own directory and of every ancestor.
//!
//! # See also
//! - `crate::site::render` for the second stage.

use super::containers::generate_containers_markup;
use super::front_matter::FrontMatter;
use super::markdown::render_markdown;
use super::navigation::{collect_navigation_links, render_navigation, NavLink};
use super::{
    ensure_dir, io_error, is_markdown, sorted_entries, SiteError, SiteResult, ROOT_REF_PREFIX,
};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::Path;

/// Layout name that triggers container markup generation.
pub const CONTAINERS_LAYOUT: &str = "containers";

/// Counts reported by `generate_data`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataSummary {
    pub pages: usize,
    pub directories: usize,
}

/// Generates JSON page data for every markdown page under `input_dir`.
///
/// # Errors
/// - `SiteError::MissingDirectory` when `input_dir` does not exist.
/// - Any page-level read, front matter or container failure.
pub fn generate_data(input_dir: &Path, json_dir: &Path) -> SiteResult<DataSummary> {
    if !input_dir.is_dir() {
        return Err(SiteError::MissingDirectory {
            role: "input",
            path: input_dir.to_path_buf(),
        });
    }

    let mut summary = DataSummary::default();
    generate_dir(input_dir, json_dir, "", &[], ROOT_REF_PREFIX, &mut summary)?;
    info!(
        "event=data_generate module=site status=ok pages={} directories={}",
        summary.pages, summary.directories
    );
    Ok(summary)
}

fn generate_dir(
    input_dir: &Path,
    json_dir: &Path,
    rel_dir: &str,
    inherited_links: &[NavLink],
    ref_prefix: &str,
    summary: &mut DataSummary,
) -> SiteResult<()> {
    ensure_dir(json_dir)?;
    summary.directories += 1;

    let mut links = inherited_links.to_vec();
    collect_navigation_links(input_dir, rel_dir, &mut links)?;

    for path in sorted_entries(input_dir)? {
        if path.is_dir() {
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            debug!(
                "event=data_generate module=site status=descend dir={}",
                path.display()
            );
            generate_dir(
                &path,
                &json_dir.join(name),
                &format!("{rel_dir}{name}/"),
                &links,
                &format!("{ref_prefix}../"),
                summary,
            )?;
            continue;
        }
        if !is_markdown(&path) {
            continue;
        }

        write_page_data(&path, input_dir, json_dir, &links, ref_prefix)?;
        summary.pages += 1;
    }
    Ok(())
}

fn write_page_data(
    path: &Path,
    input_dir: &Path,
    json_dir: &Path,
    links: &[NavLink],
    ref_prefix: &str,
) -> SiteResult<()> {
    let page = FrontMatter::read(path)?;
    let data = build_page_data(path, input_dir, page, links, ref_prefix)?;

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let out_path = json_dir.join(format!("{stem}.json"));

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    Value::Object(data)
        .serialize(&mut serializer)
        .map_err(|source| SiteError::Json {
            path: out_path.clone(),
            source,
        })?;
    std::fs::write(&out_path, buf).map_err(io_error(&out_path))?;

    info!(
        "event=page_data module=site status=ok source={} out={}",
        path.display(),
        out_path.display()
    );
    Ok(())
}

/// Assembles the JSON object for one page.
///
/// A containers page whose card directory is missing gets empty container
/// markup and a warning; the build continues.
pub fn build_page_data(
    path: &Path,
    input_dir: &Path,
    page: FrontMatter,
    links: &[NavLink],
    ref_prefix: &str,
) -> SiteResult<Map<String, Value>> {
    let FrontMatter { mut metadata, body } = page;
    metadata.insert(
        "page_markdown".to_string(),
        Value::String(render_markdown(&body)),
    );

    let title = metadata
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string);
    metadata.insert(
        "navigation_links".to_string(),
        Value::String(render_navigation(links, title.as_deref(), ref_prefix)),
    );

    if metadata.get("layout").and_then(Value::as_str) == Some(CONTAINERS_LAYOUT) {
        let containers_path = metadata
            .get("containerspath")
            .and_then(Value::as_str)
            .ok_or_else(|| SiteError::MissingField {
                path: path.to_path_buf(),
                field: "containerspath",
            })?;
        let markup = match generate_containers_markup(&input_dir.join(containers_path)) {
            Ok(markup) => markup,
            Err(SiteError::MissingDirectory { path: missing, .. }) => {
                warn!(
                    "event=page_data module=site status=degraded reason=containers_missing page={} dir={}",
                    path.display(),
                    missing.display()
                );
                String::new()
            }
            Err(err) => return Err(err),
        };
        metadata.insert("containers_markdown".to_string(), Value::String(markup));
    }

    Ok(metadata)
}
