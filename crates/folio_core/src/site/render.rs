//! HTML rendering from page data.
//!
//! # Responsibility
//! - Apply `<layout>.html` templates to JSON page data.
//! - Mirror the JSON tree into the output tree.
//!
//! # Invariants
//! - `layout` defaults to `page`; `title` to `Untitled`; `page_markdown` to
//!   an empty string.
//! - Pages whose template is missing or whose data misses a placeholder are
//!   skipped, never half-written.

use super::template::Template;
use super::{ensure_dir, io_error, sorted_entries, SiteError, SiteResult, ROOT_REF_PREFIX};
use log::{info, warn};
use serde_json::{Map, Value};
use std::path::Path;

pub const DEFAULT_LAYOUT: &str = "page";
pub const DEFAULT_TITLE: &str = "Untitled";

/// Counts reported by `render_site`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped: usize,
}

/// Renders every `.json` file under `json_dir` into `output_dir`.
///
/// # Errors
/// - `SiteError::MissingDirectory` when the template or data directory is
///   absent.
/// - I/O failures and undecodable page data.
pub fn render_site(
    json_dir: &Path,
    template_dir: &Path,
    output_dir: &Path,
) -> SiteResult<RenderSummary> {
    if !template_dir.is_dir() {
        return Err(SiteError::MissingDirectory {
            role: "template",
            path: template_dir.to_path_buf(),
        });
    }
    if !json_dir.is_dir() {
        return Err(SiteError::MissingDirectory {
            role: "page data",
            path: json_dir.to_path_buf(),
        });
    }

    let mut summary = RenderSummary::default();
    render_dir(json_dir, template_dir, output_dir, ROOT_REF_PREFIX, &mut summary)?;
    info!(
        "event=site_render module=site status=ok rendered={} skipped={}",
        summary.rendered, summary.skipped
    );
    Ok(summary)
}

fn render_dir(
    json_dir: &Path,
    template_dir: &Path,
    output_dir: &Path,
    ref_prefix: &str,
    summary: &mut RenderSummary,
) -> SiteResult<()> {
    ensure_dir(output_dir)?;

    for path in sorted_entries(json_dir)? {
        if path.is_dir() {
            if let Some(name) = path.file_name() {
                render_dir(
                    &path,
                    template_dir,
                    &output_dir.join(name),
                    &format!("{ref_prefix}../"),
                    summary,
                )?;
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        if render_page(&path, template_dir, output_dir, ref_prefix)? {
            summary.rendered += 1;
        } else {
            summary.skipped += 1;
        }
    }
    Ok(())
}

/// Returns `false` when the page was skipped.
fn render_page(
    path: &Path,
    template_dir: &Path,
    output_dir: &Path,
    ref_prefix: &str,
) -> SiteResult<bool> {
    let raw = std::fs::read_to_string(path).map_err(io_error(path))?;
    let mut data: Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| SiteError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let layout = data
        .get("layout")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LAYOUT)
        .to_string();
    let template_path = template_dir.join(format!("{layout}.html"));
    if !template_path.is_file() {
        warn!(
            "event=page_render module=site status=skipped reason=template_missing page={} template={}",
            path.display(),
            template_path.display()
        );
        return Ok(false);
    }
    let template = Template::new(
        std::fs::read_to_string(&template_path).map_err(io_error(&template_path))?,
    );

    data.entry("title")
        .or_insert_with(|| Value::String(DEFAULT_TITLE.to_string()));
    data.entry("page_markdown")
        .or_insert_with(|| Value::String(String::new()));
    data.insert(
        "ref_prefix".to_string(),
        Value::String(ref_prefix.to_string()),
    );

    let html = match template.substitute(&data) {
        Ok(html) => html,
        Err(err) => {
            warn!(
                "event=page_render module=site status=skipped reason=template_error page={} error={}",
                path.display(),
                err
            );
            return Ok(false);
        }
    };

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let out_path = output_dir.join(format!("{stem}.html"));
    std::fs::write(&out_path, html).map_err(io_error(&out_path))?;
    info!(
        "event=page_render module=site status=ok page={} out={}",
        path.display(),
        out_path.display()
    );
    Ok(true)
}
