//! Group membership decoding for filterable items.
//!
//! # Responsibility
//! - Decode the serialized `data-groups` attribute into ordered group keys.
//! - Decide item visibility for a selected filter key.
//!
//! # Invariants
//! - `ALL_FILTER_KEY` matches every item, including items without groups.
//! - Group order is preserved exactly as serialized.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reserved filter key that disables filtering.
pub const ALL_FILTER_KEY: &str = "all";

/// Ordered group keys one item belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupList(Vec<String>);

impl GroupList {
    /// Builds a group list from already-decoded keys.
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(groups.into_iter().map(Into::into).collect())
    }

    /// Decodes a JSON array of strings, e.g. `["books","movies"]`.
    ///
    /// # Errors
    /// - Returns `GroupParseError::Malformed` for anything other than a JSON
    ///   array whose elements are all strings.
    pub fn parse(raw: &str) -> Result<Self, GroupParseError> {
        serde_json::from_str::<Vec<String>>(raw)
            .map(Self)
            .map_err(|err| GroupParseError::Malformed {
                raw: raw.to_string(),
                message: err.to_string(),
            })
    }

    /// Decodes an optional attribute value; absence is an error.
    pub fn parse_attribute(raw: Option<&str>) -> Result<Self, GroupParseError> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Err(GroupParseError::Missing),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|group| group == key)
    }

    /// Returns whether an item with these groups is shown under `filter_key`.
    pub fn matches(&self, filter_key: &str) -> bool {
        filter_key == ALL_FILTER_KEY || self.contains(filter_key)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes back into the attribute form accepted by `parse`.
    pub fn to_attribute(&self) -> String {
        serde_json::Value::from(self.0.clone()).to_string()
    }
}

/// Group attribute decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupParseError {
    /// Item carries no group attribute at all.
    Missing,
    /// Attribute is present but is not a JSON list of strings.
    Malformed { raw: String, message: String },
}

impl Display for GroupParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "group attribute is missing"),
            Self::Malformed { raw, message } => {
                write!(f, "malformed group data `{raw}`: {message}")
            }
        }
    }
}

impl Error for GroupParseError {}

#[cfg(test)]
mod tests {
    use super::{GroupList, GroupParseError, ALL_FILTER_KEY};

    #[test]
    fn parse_keeps_serialized_order() {
        let groups = GroupList::parse(r#"["movies", "books"]"#).unwrap();
        assert_eq!(groups.as_slice(), ["movies", "books"]);
    }

    #[test]
    fn parse_rejects_non_string_elements() {
        let err = GroupList::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, GroupParseError::Malformed { .. }));
    }

    #[test]
    fn parse_rejects_bare_string() {
        assert!(GroupList::parse("books").is_err());
        assert!(GroupList::parse(r#""books""#).is_err());
    }

    #[test]
    fn missing_attribute_is_reported() {
        assert_eq!(
            GroupList::parse_attribute(None).unwrap_err(),
            GroupParseError::Missing
        );
    }

    #[test]
    fn empty_list_matches_only_all() {
        let groups = GroupList::parse("[]").unwrap();
        assert!(groups.is_empty());
        assert!(groups.matches(ALL_FILTER_KEY));
        assert!(!groups.matches("books"));
        assert!(!groups.matches(""));
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let groups = GroupList::new(["Books"]);
        assert!(groups.matches("Books"));
        assert!(!groups.matches("books"));
        assert!(!groups.matches("Book"));
    }

    #[test]
    fn attribute_form_parses_back() {
        let groups = GroupList::new(["a'b", "c\"d"]);
        assert_eq!(GroupList::parse(&groups.to_attribute()).unwrap(), groups);
    }
}
