//! Parsers for the index, unique and foreign-key tag languages.
//!
//! Both languages are lists of `;`-separated entries whose positional
//! sub-fields are separated by `@`:
//!
//! ```text
//! index-tag   = [ index-entry ] { ";" [ index-entry ] } ;
//! index-entry = name [ "@" operator [ "@" arg-order ] ] ;
//! arg-order   = "true" | <anything else> ;      (* case-insensitive *)
//!
//! foreign-tag = [ fk-entry ] { ";" [ fk-entry ] } ;
//! fk-entry    = source-column "@" target-table [ "@" group ] ;
//! ```
//!
//! Whitespace inside an index entry is removed; foreign-key sub-fields are
//! trimmed. Empty entries (for example a trailing `;`) are separators and are
//! ignored. Entries that do not match the grammar are reported in
//! [`TagParse::rejected`] so the caller can decide between skipping them and
//! failing.

use serde::{Deserialize, Serialize};

use crate::error::TagError;
use crate::naming;

/// Comparison used when a field appears in a WHERE clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `name=?`
    #[default]
    Eq,
    /// `name LIKE ?`
    Like,
    /// Function-style predicate, e.g. `CONTAINS(name,?)`.
    Call(String),
}

impl Operator {
    /// Parses an operator token. Empty and `=` mean equality.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || token == "=" {
            Self::Eq
        } else if token.eq_ignore_ascii_case("like") {
            Self::Like
        } else {
            Self::Call(token.to_string())
        }
    }
}

/// One entry of an `index` or `unique` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Name of the index the field joins.
    pub name: String,
    pub operator: Operator,
    /// Pass the bound value as the first argument of a function operator.
    pub value_as_first_arg: bool,
}

/// One entry of a `foreign` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignEntry {
    /// Column name on the referenced table, as written in the tag.
    pub source_column: String,
    pub target_table: String,
    /// Explicit foreign-key group, if the entry names one.
    pub group: Option<String>,
}

impl ForeignEntry {
    /// Column on the referenced table, derived from the source column.
    #[must_use]
    pub fn target_column(&self) -> String {
        naming::target_column(&self.source_column)
    }
}

/// Outcome of parsing one tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParse<T> {
    /// Entries that matched the grammar, in tag order.
    pub entries: Vec<T>,
    /// Entries that did not.
    pub rejected: Vec<TagError>,
}

impl<T> TagParse<T> {
    /// Returns true when no usable entry was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the accepted entries, or `None` when there are none.
    #[must_use]
    pub fn into_entries(self) -> Option<Vec<T>> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries)
        }
    }
}

impl<T> Default for TagParse<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Parses an `index` or `unique` tag.
#[must_use]
pub fn parse_index_tag(tag: &str) -> TagParse<IndexEntry> {
    let mut parse = TagParse::default();

    for raw in tag.split(';') {
        let entry: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if entry.is_empty() {
            continue;
        }

        let segments: Vec<&str> = entry.split('@').collect();
        if segments.len() > 3 {
            parse.rejected.push(TagError::TooManySegments {
                found: segments.len(),
                max: 3,
                entry,
            });
            continue;
        }
        if segments[0].is_empty() {
            parse.rejected.push(TagError::EmptyName(entry));
            continue;
        }

        parse.entries.push(IndexEntry {
            name: segments[0].to_string(),
            operator: segments.get(1).map(|s| Operator::parse(s)).unwrap_or_default(),
            value_as_first_arg: segments
                .get(2)
                .is_some_and(|s| s.eq_ignore_ascii_case("true")),
        });
    }

    parse
}

/// Parses a `foreign` tag.
#[must_use]
pub fn parse_foreign_tag(tag: &str) -> TagParse<ForeignEntry> {
    let mut parse = TagParse::default();

    for raw in tag.split(';') {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }

        let segments: Vec<&str> = entry.split('@').map(str::trim).collect();
        if segments.len() > 3 {
            parse.rejected.push(TagError::TooManySegments {
                entry: entry.to_string(),
                found: segments.len(),
                max: 3,
            });
            continue;
        }
        let target_table = segments.get(1).copied().unwrap_or_default();
        if target_table.is_empty() {
            parse
                .rejected
                .push(TagError::MissingTargetTable(entry.to_string()));
            continue;
        }
        if segments[0].is_empty() {
            parse
                .rejected
                .push(TagError::EmptySourceColumn(entry.to_string()));
            continue;
        }

        parse.entries.push(ForeignEntry {
            source_column: segments[0].to_string(),
            target_table: target_table.to_string(),
            group: segments
                .get(2)
                .filter(|g| !g.is_empty())
                .map(|g| (*g).to_string()),
        });
    }

    parse
}
