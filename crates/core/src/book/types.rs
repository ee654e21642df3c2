//! Book value types shared by sources, the search orchestrator and the library.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder title for volumes that carry none.
pub const UNKNOWN_TITLE: &str = "Sin título";
/// Placeholder author for volumes without an author list.
pub const UNKNOWN_AUTHOR: &str = "Autor desconocido";
/// Placeholder year when no publication date is known.
pub const UNKNOWN_YEAR: &str = "—";
/// Placeholder description.
pub const NO_DESCRIPTION: &str = "Sin descripción disponible.";

/// Identifier of a book.
///
/// Remote volumes carry opaque string ids; when an item has none its position
/// in the result list is used instead, and the static dataset uses integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Index(u64),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Index(n) => write!(f, "{}", n),
            BookId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for BookId {
    type Err = std::convert::Infallible;

    /// All-digit strings become `Index`, anything else `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => BookId::Index(n),
            Err(_) => BookId::Text(s.to_string()),
        })
    }
}

impl From<u64> for BookId {
    fn from(n: u64) -> Self {
        BookId::Index(n)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        BookId::Text(s.to_string())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        BookId::Text(s)
    }
}

/// Fixed set of categories a book can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fiction,
    Science,
    History,
    Fantasy,
    Others,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Fiction,
        Category::Science,
        Category::History,
        Category::Fantasy,
        Category::Others,
    ];

    /// Wire key, as used in filters and snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "fiction",
            Category::Science => "science",
            Category::History => "history",
            Category::Fantasy => "fantasy",
            Category::Others => "others",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Fiction => "Ficción",
            Category::Science => "Ciencia",
            Category::History => "Historia",
            Category::Fantasy => "Fantasía",
            Category::Others => "Otros",
        }
    }

    /// Parse a wire key. Returns `None` for anything outside the fixed set.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "fiction" => Some(Category::Fiction),
            "science" => Some(Category::Science),
            "history" => Some(Category::History),
            "fantasy" => Some(Category::Fantasy),
            "others" => Some(Category::Others),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book as shown in search results and stored in the personal library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Authors joined with ", ".
    pub author: String,
    /// Four-digit year, or [`UNKNOWN_YEAR`].
    pub year: String,
    pub category: Category,
    pub description: String,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Book {
    /// Text searched by the static source: title, author and description.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.author, self.description).to_lowercase()
    }
}
