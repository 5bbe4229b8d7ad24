//! Navigation menu collection and rendering.
//!
//! # Responsibility
//! - Collect `navmenu: true` pages of one directory as `NavLink`s.
//! - Render the `<li>` block with the current page marked active.
//!
//! # Invariants
//! - Links are ordered by `navorder`, ties by insertion order.
//! - `html_file` is relative to the site root.

use super::containers::escape_html;
use super::front_matter::FrontMatter;
use super::{is_markdown, sorted_entries, SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// One entry of the site navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub html_file: String,
    pub page_name: String,
    pub page_order: i64,
}

/// Appends the menu pages of `input_dir` to `links` and re-sorts.
///
/// `rel_dir` is the directory's path relative to the site root (empty for
/// the root itself).
///
/// # Errors
/// - `SiteError::MissingField` when a menu page lacks `title` or `navorder`.
pub fn collect_navigation_links(
    input_dir: &Path,
    rel_dir: &str,
    links: &mut Vec<NavLink>,
) -> SiteResult<()> {
    for path in sorted_entries(input_dir)? {
        if !is_markdown(&path) {
            continue;
        }
        let page = FrontMatter::read(&path)?;
        if !page.flag("navmenu") {
            continue;
        }

        let page_name = page.str_field("title").ok_or_else(|| SiteError::MissingField {
            path: path.clone(),
            field: "title",
        })?;
        let page_order = page.int_field("navorder").ok_or_else(|| SiteError::MissingField {
            path: path.clone(),
            field: "navorder",
        })?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        links.push(NavLink {
            html_file: format!("{rel_dir}{stem}.html"),
            page_name: page_name.to_string(),
            page_order,
        });
    }
    links.sort_by_key(|link| link.page_order);
    Ok(())
}

/// Renders the menu for a page titled `current_title`.
pub fn render_navigation(links: &[NavLink], current_title: Option<&str>, ref_prefix: &str) -> String {
    let mut out = String::new();
    for link in links {
        let class = if Some(link.page_name.as_str()) == current_title {
            r#" class="active""#
        } else {
            ""
        };
        let _ = write!(
            out,
            "\n\t\t\t\t\t\t<li><a href=\"{}{}\"{class}>{}</a></li>",
            escape_html(ref_prefix),
            escape_html(&link.html_file),
            escape_html(&link.page_name)
        );
    }
    out
}
