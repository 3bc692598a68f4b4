//! Catalog sorting and pagination rules.

use serde::Deserialize;

/// Default page size for catalog listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for catalog listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of entries on the "popular" and "new releases" shelves.
pub const SHELF_SIZE: i64 = 10;

/// Sort keys accepted by the catalog endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSort {
    /// Most-reviewed first (`rating_count`).
    Popular,
    /// Highest average rating first.
    Rating,
    /// Most recent release date first.
    Newest,
    /// Alphabetical by title.
    Title,
    /// Longest series first.
    Chapters,
}

impl CatalogSort {
    /// Column the sort key orders by. Values are fixed identifiers, safe to
    /// splice into SQL.
    pub fn column(self) -> &'static str {
        match self {
            CatalogSort::Popular => "rating_count",
            CatalogSort::Rating => "rating",
            CatalogSort::Newest => "release_date",
            CatalogSort::Title => "title",
            CatalogSort::Chapters => "chapters",
        }
    }

    /// Whether this key sorts ascending when no explicit order is given.
    pub fn default_ascending(self) -> bool {
        matches!(self, CatalogSort::Title)
    }
}

impl Default for CatalogSort {
    fn default() -> Self {
        CatalogSort::Popular
    }
}

/// Manga columns the search endpoints match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
    Artist,
}

impl SearchField {
    /// Column the search matches. Values are fixed identifiers, safe to
    /// splice into SQL.
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Artist => "artist",
        }
    }

    /// Parse a URL path segment into a search field.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "title" => Some(SearchField::Title),
            "author" => Some(SearchField::Author),
            "artist" => Some(SearchField::Artist),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Resolve the effective SQL direction keyword for a sort key and an
/// optional explicit order.
pub fn direction(sort: CatalogSort, order: Option<SortOrder>) -> &'static str {
    let ascending = match order {
        Some(SortOrder::Asc) => true,
        Some(SortOrder::Desc) => false,
        None => sort.default_ascending(),
    };
    if ascending {
        "ASC"
    } else {
        "DESC"
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
