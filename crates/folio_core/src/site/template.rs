//! `$placeholder` layout templates.
//!
//! # Responsibility
//! - Substitute `$name` and `${name}` placeholders from page data.
//!
//! # Invariants
//! - `$$` renders a literal `$`.
//! - Every placeholder must resolve; a missing key fails the whole render.
//! - A `$` that starts no valid placeholder is rejected with its offset.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_a-zA-Z][_a-zA-Z0-9]*)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9]*)\}|(?P<invalid>))",
    )
    .expect("valid placeholder regex")
});

/// Substitution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    MissingKey(String),
    /// Byte offset of a `$` that starts no valid placeholder.
    InvalidPlaceholder { offset: usize },
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "missing template key `{key}`"),
            Self::InvalidPlaceholder { offset } => {
                write!(f, "invalid placeholder at byte offset {offset}")
            }
        }
    }
}

impl Error for TemplateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Renders the template against `values`.
    ///
    /// Strings are inserted verbatim, `null` as empty text, and any other
    /// value as its compact JSON form (`true`, `["a"]`). This is not the
    /// Python `str()` rendering of the same values (`True`, `['a']`).
    pub fn substitute(&self, values: &Map<String, Value>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        let mut last = 0;

        for captures in PLACEHOLDER_RE.captures_iter(&self.source) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            out.push_str(&self.source[last..whole.start()]);
            last = whole.end();

            if captures.name("escaped").is_some() {
                out.push('$');
                continue;
            }
            let key = match captures.name("named").or_else(|| captures.name("braced")) {
                Some(key) => key.as_str(),
                None => {
                    return Err(TemplateError::InvalidPlaceholder {
                        offset: whole.start(),
                    })
                }
            };
            let value = values
                .get(key)
                .ok_or_else(|| TemplateError::MissingKey(key.to_string()))?;
            match value {
                Value::String(text) => out.push_str(text),
                Value::Null => {}
                other => out.push_str(&other.to_string()),
            }
        }

        out.push_str(&self.source[last..]);
        Ok(out)
    }
}
