//! YAML front matter extraction for markdown pages.
//!
//! # Responsibility
//! - Split a page into its `---`-delimited YAML header and markdown body.
//! - Expose typed accessors over the JSON-compatible metadata map.
//!
//! # Invariants
//! - Unparsable or non-mapping headers yield empty metadata and the full,
//!   untouched page text as body.
//! - Pages without a header keep their full text as body.

use super::{io_error, SiteResult};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;

static FRONT_MATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)\A---\s*$(.*?)^\s*---\s*$(.*)").expect("valid front matter regex")
});

/// Parsed page: metadata plus markdown body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub metadata: Map<String, Value>,
    pub body: String,
}

impl FrontMatter {
    /// Reads and parses a page from disk.
    pub fn read(path: &Path) -> SiteResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(io_error(path))?;
        Ok(parse_front_matter(&raw))
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).and_then(Value::as_str)
    }

    /// Truthiness of a boolean flag; absent or non-boolean reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.metadata
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.metadata.get(name).and_then(Value::as_i64)
    }
}

/// Splits `text` into metadata and body.
pub fn parse_front_matter(text: &str) -> FrontMatter {
    let Some(captures) = FRONT_MATTER_RE.captures(text) else {
        return FrontMatter {
            metadata: Map::new(),
            body: text.to_string(),
        };
    };
    let header = captures.get(1).map_or("", |m| m.as_str());
    let content = captures.get(2).map_or("", |m| m.as_str());

    if header.trim().is_empty() {
        return FrontMatter {
            metadata: Map::new(),
            body: content.trim().to_string(),
        };
    }

    match serde_yaml::from_str::<Value>(header) {
        Ok(Value::Object(metadata)) => FrontMatter {
            metadata,
            body: content.trim().to_string(),
        },
        Ok(Value::Null) => FrontMatter {
            metadata: Map::new(),
            body: content.trim().to_string(),
        },
        Ok(_) => {
            warn!("event=front_matter_parse module=site status=degraded reason=not_a_mapping");
            FrontMatter {
                metadata: Map::new(),
                body: text.to_string(),
            }
        }
        Err(err) => {
            warn!(
                "event=front_matter_parse module=site status=degraded reason=invalid_yaml error={}",
                err
            );
            FrontMatter {
                metadata: Map::new(),
                body: text.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_front_matter;
    use serde_json::json;

    #[test]
    fn splits_header_and_trims_body() {
        let page = parse_front_matter("---\ntitle: Home\nnavmenu: true\nnavorder: 2\n---\n\n# Hi\n\n");
        assert_eq!(page.str_field("title"), Some("Home"));
        assert!(page.flag("navmenu"));
        assert_eq!(page.int_field("navorder"), Some(2));
        assert_eq!(page.body, "# Hi");
    }

    #[test]
    fn yaml_lists_become_json_arrays() {
        let page = parse_front_matter("---\ncontainergroups:\n  - books\n  - movies\n---\nbody");
        assert_eq!(page.metadata["containergroups"], json!(["books", "movies"]));
    }

    #[test]
    fn text_without_header_is_kept_verbatim() {
        let page = parse_front_matter("# Plain\n---\nnot a header\n---\n");
        assert!(page.metadata.is_empty());
        assert_eq!(page.body, "# Plain\n---\nnot a header\n---\n");
    }

    #[test]
    fn invalid_yaml_keeps_full_text() {
        let text = "---\ntitle: [unclosed\n---\nbody";
        let page = parse_front_matter(text);
        assert!(page.metadata.is_empty());
        assert_eq!(page.body, text);
    }

    #[test]
    fn empty_header_yields_empty_metadata() {
        let page = parse_front_matter("---\n---\nbody\n");
        assert!(page.metadata.is_empty());
        assert_eq!(page.body, "body");
    }

    #[test]
    fn missing_flag_reads_false() {
        let page = parse_front_matter("---\ntitle: x\n---\n");
        assert!(!page.flag("navmenu"));
    }
}
