//! Filterable container listing markup.
//!
//! # Responsibility
//! - Read container pages (cards) from a directory.
//! - Emit the filter button bar and the item grid consumed by
//!   `crate::filter`.
//!
//! # Invariants
//! - The `all` button comes first and starts active.
//! - Remaining buttons are the unique container groups, sorted.
//! - Every item carries its groups as a JSON array in `data-groups`.

use super::front_matter::FrontMatter;
use super::{is_markdown, sorted_entries, SiteError, SiteResult};
use crate::filter::dom::{ACTIVE_CLASS, CONTROL_CLASS, FILTER_ATTR, GROUPS_ATTR, ITEM_CLASS};
use crate::filter::{GroupList, ALL_FILTER_KEY};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

/// Card metadata read from a container page's front matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerMeta {
    #[serde(rename = "containergroups")]
    pub groups: Vec<String>,
    #[serde(rename = "containerimage")]
    pub image: String,
    #[serde(rename = "containeralttext")]
    pub alt_text: String,
    #[serde(rename = "containerlink")]
    pub link: String,
    #[serde(rename = "containertitle")]
    pub title: String,
}

impl ContainerMeta {
    fn from_page(path: &Path, page: &FrontMatter) -> SiteResult<Self> {
        serde_json::from_value(Value::Object(page.metadata.clone())).map_err(|err| {
            SiteError::InvalidField {
                path: path.to_path_buf(),
                field: "container",
                message: err.to_string(),
            }
        })
    }
}

/// Builds the button bar and item grid for all cards in `containers_dir`.
///
/// # Errors
/// - `SiteError::MissingDirectory` when `containers_dir` does not exist.
/// - `SiteError::InvalidField` when a card lacks container fields.
pub fn generate_containers_markup(containers_dir: &Path) -> SiteResult<String> {
    if !containers_dir.is_dir() {
        return Err(SiteError::MissingDirectory {
            role: "containers",
            path: containers_dir.to_path_buf(),
        });
    }

    let mut cards = Vec::new();
    for path in sorted_entries(containers_dir)? {
        if !is_markdown(&path) {
            continue;
        }
        let page = FrontMatter::read(&path)?;
        cards.push(ContainerMeta::from_page(&path, &page)?);
    }

    let mut filter_groups = BTreeSet::new();
    for card in &cards {
        for group in &card.groups {
            if group == ALL_FILTER_KEY {
                warn!(
                    "event=containers_generate module=site status=degraded reason=reserved_group card={}",
                    card.title
                );
                continue;
            }
            filter_groups.insert(group.as_str());
        }
    }

    let mut out = String::from("\n\t\t\t<div class=\"filter-buttons\">");
    let _ = write!(
        out,
        "\n\t\t\t\t<button class=\"{CONTROL_CLASS} {ACTIVE_CLASS}\" {FILTER_ATTR}=\"{ALL_FILTER_KEY}\">All</button>"
    );
    for group in &filter_groups {
        let _ = write!(
            out,
            "\n\t\t\t\t<button class=\"{CONTROL_CLASS}\" {FILTER_ATTR}=\"{}\">{}</button>",
            escape_html(group),
            escape_html(group)
        );
    }
    out.push_str("\n\t\t\t</div>");

    out.push_str("\n\t\t\t<div class=\"items-container\">");
    for card in &cards {
        write_card(&mut out, card);
    }
    out.push_str("\n\t\t\t</div>");

    info!(
        "event=containers_generate module=site status=ok dir={} cards={} groups={}",
        containers_dir.display(),
        cards.len(),
        filter_groups.len()
    );
    Ok(out)
}

fn write_card(out: &mut String, card: &ContainerMeta) {
    let groups = GroupList::new(card.groups.iter().cloned()).to_attribute();
    let title = escape_html(&card.title);
    let _ = write!(
        out,
        "\n\t\t\t\t<div class='{ITEM_CLASS}' {GROUPS_ATTR}='{}'>\
         \n\t\t\t\t\t<a href='{}'>\
         \n\t\t\t\t\t\t<img src='{}' alt='{}'  class='item_img'>\
         \n\t\t\t\t\t\t<div class='item_overlay'>\
         \n\t\t\t\t\t\t\t<div class='item_text'>\
         \n\t\t\t\t\t\t\t\t<h3>{title}</h3>\
         \n\t\t\t\t\t\t\t\t<p>{title}</p>\
         \n\t\t\t\t\t\t\t</div>\
         \n\t\t\t\t\t\t</div>\
         \n\t\t\t\t\t</a>\
         \n\t\t\t\t</div>",
        escape_html(&groups),
        escape_html(&card.link),
        escape_html(&card.image),
        escape_html(&card.alt_text),
    );
}

/// Escapes text for element content and quoted attribute values.
pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escape_html_covers_quotes() {
        assert_eq!(
            escape_html(r#"a<b>&"c"'d'"#),
            "a&lt;b&gt;&amp;&quot;c&quot;&#39;d&#39;"
        );
    }
}
