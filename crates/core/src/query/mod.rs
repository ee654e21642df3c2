//! Search query composition.
//!
//! A [`SearchQuery`] pairs the user's text with the active category filter.
//! The remote source turns it into a single query string with
//! [`SearchQuery::to_query_string`], appending a `subject:` refinement clause
//! for category filters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::book::Category;

/// Term searched when the user leaves the input blank, so a first load
/// always shows something.
pub const DEFAULT_TERM: &str = "books";

/// Active category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter key. Unknown keys are treated as [`CategoryFilter::All`].
    pub fn parse(key: &str) -> Self {
        Category::parse(key)
            .map(CategoryFilter::Only)
            .unwrap_or(CategoryFilter::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    /// Whether a book of `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    /// Remote query fragment narrowing results to this filter's subject.
    pub fn refinement_clause(&self) -> Option<&'static str> {
        match self {
            CategoryFilter::Only(Category::Fiction) => Some("subject:fiction"),
            CategoryFilter::Only(Category::Science) => Some("subject:science"),
            CategoryFilter::Only(Category::History) => Some("subject:history"),
            CategoryFilter::Only(Category::Fantasy) => Some("subject:fantasy"),
            CategoryFilter::Only(Category::Others) | CategoryFilter::All => None,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(key: String) -> Self {
        CategoryFilter::parse(&key)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search request as handed to a [`crate::source::BookSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed user text; may be empty.
    pub text: String,
    /// `text`, or the default term when `text` is empty.
    pub term: String,
    pub filter: CategoryFilter,
}

impl SearchQuery {
    /// Build a query from raw user input, substituting [`DEFAULT_TERM`]
    /// for blank input.
    pub fn new(raw: &str, filter: CategoryFilter) -> Self {
        Self::with_default_term(raw, filter, DEFAULT_TERM)
    }

    /// Like [`SearchQuery::new`] with a caller-chosen fallback term.
    pub fn with_default_term(raw: &str, filter: CategoryFilter, default_term: &str) -> Self {
        let text = raw.trim().to_string();
        let term = if text.is_empty() {
            default_term.trim().to_string()
        } else {
            text.clone()
        };

        Self { text, term, filter }
    }

    /// Final query string: the term plus the filter's refinement clause.
    pub fn to_query_string(&self) -> String {
        match self.filter.refinement_clause() {
            Some(clause) => format!("{} {}", self.term, clause),
            None => self.term.clone(),
        }
    }
}

/// Compose raw input and a filter key into the remote query string.
pub fn build_query(raw: &str, filter_key: &str) -> String {
    SearchQuery::new(raw, CategoryFilter::parse(filter_key)).to_query_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_uses_default_term() {
        assert_eq!(build_query("", "all"), "books");
        assert_eq!(build_query("   \t ", "all"), "books");
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(build_query("  dune  ", "all"), "dune");
    }

    #[test]
    fn test_all_never_refines() {
        let query = build_query("tolkien", "all");
        assert!(!query.contains("subject:"));
    }

    #[test]
    fn test_category_appends_single_clause() {
        for (key, clause) in [
            ("fiction", "subject:fiction"),
            ("science", "subject:science"),
            ("history", "subject:history"),
            ("fantasy", "subject:fantasy"),
        ] {
            let query = build_query("dune", key);
            assert_eq!(query, format!("dune {}", clause));
            assert_eq!(query.matches("subject:").count(), 1);
        }
    }

    #[test]
    fn test_default_term_with_filter() {
        assert_eq!(build_query("", "history"), "books subject:history");
    }

    #[test]
    fn test_unknown_filter_is_all() {
        assert_eq!(CategoryFilter::parse("poetry"), CategoryFilter::All);
        assert_eq!(build_query("dune", "poetry"), "dune");
    }

    #[test]
    fn test_others_has_no_clause() {
        assert_eq!(build_query("dune", "others"), "dune");
    }

    #[test]
    fn test_custom_default_term() {
        let query = SearchQuery::with_default_term(" ", CategoryFilter::All, "novelas");
        assert_eq!(query.text, "");
        assert_eq!(query.term, "novelas");
    }

    #[test]
    fn test_filter_serde_roundtrip_and_unknown() {
        let filter: CategoryFilter = serde_json::from_str("\"fantasy\"").unwrap();
        assert_eq!(filter, CategoryFilter::Only(Category::Fantasy));
        let filter: CategoryFilter = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(filter, CategoryFilter::All);
        assert_eq!(serde_json::to_string(&filter).unwrap(), "\"all\"");
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Others));
        assert!(CategoryFilter::Only(Category::Science).matches(Category::Science));
        assert!(!CategoryFilter::Only(Category::Science).matches(Category::History));
    }
}
