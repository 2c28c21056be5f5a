use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A book record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    /// Total number of pages
    pub page_count: u32,
    /// Pages read so far, never above `page_count`
    pub read_page: u32,
    /// Derived from `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Request body for creating or replacing a book.
///
/// Everything except `name` falls back to its zero value when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookPayload {
    /// The book name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// The `{id, name, publisher}` view returned by listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Raw query string of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// Constraint on a boolean field decoded from the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flag {
    /// Parameter absent
    #[default]
    Any,
    Is(bool),
    /// Parameter present with a value that is neither a 0/1 nor a boolean
    Unmatched,
}

impl Flag {
    /// Present keys always constrain: `1`/`true` and `0`/`false`
    /// (case-insensitive, trimmed), an empty value counts as `0`, anything
    /// else matches no book.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Flag::Any;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Flag::Is(true),
            "" | "0" | "false" => Flag::Is(false),
            _ => Flag::Unmatched,
        }
    }

    pub fn accepts(self, value: bool) -> bool {
        match self {
            Flag::Any => true,
            Flag::Is(expected) => value == expected,
            Flag::Unmatched => false,
        }
    }
}

/// Decoded list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Lowercased name fragment, `None` means no constraint
    pub name: Option<String>,
    pub reading: Flag,
    pub finished: Flag,
}

impl BookFilter {
    /// Checks name, then reading, then finished.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(fragment) = &self.name {
            if !book.name.to_lowercase().contains(fragment.as_str()) {
                return false;
            }
        }
        self.reading.accepts(book.reading) && self.finished.accepts(book.finished)
    }
}

impl From<ListQuery> for BookFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            name: query
                .name
                .filter(|name| !name.is_empty())
                .map(|name| name.to_lowercase()),
            reading: Flag::parse(query.reading.as_deref()),
            finished: Flag::parse(query.finished.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book(name: &str, reading: bool, finished: bool) -> Book {
        let now = OffsetDateTime::UNIX_EPOCH;
        Book {
            id: name.to_lowercase(),
            name: name.to_string(),
            year: 2016,
            author: "Angela Duckworth".to_string(),
            summary: String::new(),
            publisher: "Scribner".to_string(),
            page_count: 100,
            read_page: if finished { 100 } else { 10 },
            finished,
            reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    fn query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> ListQuery {
        ListQuery {
            name: name.map(str::to_string),
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
        }
    }

    #[test]
    fn payload_uses_camel_case_and_defaults() {
        let payload: BookPayload = serde_json::from_value(json!({
            "name": "Grit",
            "pageCount": 100,
            "readPage": 25,
            "reading": true
        }))
        .unwrap();

        assert_eq!(payload.name(), Some("Grit"));
        assert_eq!(payload.page_count, 100);
        assert_eq!(payload.read_page, 25);
        assert_eq!(payload.year, 0);
        assert!(payload.author.is_empty());
        assert!(!payload.is_finished());
    }

    #[test]
    fn empty_name_counts_as_missing() {
        let payload = BookPayload {
            name: Some(String::new()),
            ..BookPayload::default()
        };
        assert_eq!(payload.name(), None);
        assert_eq!(BookPayload::default().name(), None);
    }

    #[test]
    fn negative_page_count_is_rejected() {
        let parsed = serde_json::from_value::<BookPayload>(json!({
            "name": "Grit",
            "pageCount": -1
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn book_serializes_timestamps_as_rfc3339() {
        let value = serde_json::to_value(book("Grit", false, true)).unwrap();
        assert_eq!(value["insertedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(value["pageCount"], 100);
        assert_eq!(value["finished"], true);
    }

    #[test]
    fn flags_decode_like_numeric_coercion() {
        let filter = BookFilter::from(query(None, Some("1"), Some("FALSE")));
        assert_eq!(filter.reading, Flag::Is(true));
        assert_eq!(filter.finished, Flag::Is(false));

        let filter = BookFilter::from(query(None, Some(""), None));
        assert_eq!(filter.reading, Flag::Is(false));
        assert_eq!(filter.finished, Flag::Any);
    }

    #[test]
    fn unknown_flag_value_matches_nothing() {
        let filter = BookFilter::from(query(None, None, Some("yes")));
        assert_eq!(filter.finished, Flag::Unmatched);
        assert!(!filter.matches(&book("Grit", false, true)));
        assert!(!filter.matches(&book("Grit", false, false)));
    }

    #[test]
    fn empty_flag_keeps_only_false_records() {
        let filter = BookFilter::from(query(None, Some(""), None));
        assert!(filter.matches(&book("Grit", false, false)));
        assert!(!filter.matches(&book("Grit", true, false)));
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let filter = BookFilter::from(query(Some("GRI"), None, None));
        assert!(filter.matches(&book("Grit", false, false)));
        assert!(!filter.matches(&book("Dune", false, false)));
    }

    #[test]
    fn filters_combine_as_conjunction() {
        let filter = BookFilter::from(query(Some("g"), Some("1"), Some("0")));
        assert!(filter.matches(&book("Grit", true, false)));
        assert!(!filter.matches(&book("Grit", true, true)));
        assert!(!filter.matches(&book("Grit", false, false)));
        assert!(BookFilter::default().matches(&book("Dune", false, true)));
    }
}
