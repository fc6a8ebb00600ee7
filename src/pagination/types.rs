//! Pagination types and traits
//!
//! Defines the page request bounds, the parsed `Link` header model, the
//! page-fetch contract and the outcome of a predicate search.

use crate::error::Result;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

/// Smallest page size accepted by the API
pub const MIN_PER_PAGE: u32 = 1;

/// Largest page size accepted by the API
pub const MAX_PER_PAGE: u32 = 100;

/// Header carrying pagination relations
pub const LINK_HEADER: &str = "Link";

// ============================================================================
// Page Request
// ============================================================================

/// Page number and page size for the seed request, already clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page to start from (always >= 1)
    pub page: u32,
    /// Items per page (always within `[MIN_PER_PAGE, MAX_PER_PAGE]`)
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: MAX_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a request from caller-supplied values, clamping both
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: clamp_page(page),
            per_page: clamp_per_page(per_page),
        }
    }
}

/// Coerce a page number to `>= 1`
pub fn clamp_page(page: i64) -> u32 {
    page.clamp(1, i64::from(u32::MAX)) as u32
}

/// Coerce a page size into `[MIN_PER_PAGE, MAX_PER_PAGE]`
pub fn clamp_per_page(per_page: i64) -> u32 {
    per_page.clamp(i64::from(MIN_PER_PAGE), i64::from(MAX_PER_PAGE)) as u32
}

// ============================================================================
// Link Header
// ============================================================================

/// One comma-separated section of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinkEntry {
    /// URL with the surrounding angle brackets removed
    pub page_url: String,
    /// Raw attribute text, e.g. `rel="next"`
    pub metadata: String,
}

/// Something the parser had to skip or default while reading a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDiagnostic {
    /// Section had no `;`-delimited metadata half and was skipped
    MalformedSection { section: String },
    /// A `prev`/`next`/`last` section whose URL has no `page=<digits>`
    MissingPageNumber { rel: String, url: String },
}

/// Pagination metadata parsed from a `Link` header
///
/// Page numbers are 0 when the matching relation is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkHeaderInfo {
    pub prev_page: u32,
    pub next_page: u32,
    pub total_pages: u32,
    /// Every well-formed section, in header order
    pub page_data: Vec<PageLinkEntry>,
    /// Sections that were skipped or fields that fell back to 0
    pub diagnostics: Vec<LinkDiagnostic>,
}

impl LinkHeaderInfo {
    /// True when nothing was skipped or defaulted during parsing
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// True when a `next` relation was present
    pub fn has_next(&self) -> bool {
        self.next_page > 0
    }
}

/// Header lookup by name, for response-like objects
pub trait HeaderLookup {
    /// Value of the named header, if present and valid text
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        let value = self.get(name)?;
        match value.to_str() {
            Ok(text) => Some(text),
            Err(_) => {
                debug!("Ignoring {name} header that is not visible ASCII: {value:?}");
                None
            }
        }
    }
}

impl HeaderLookup for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// Page Fetch Contract
// ============================================================================

/// One page of items plus the response's raw `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetchResult<T> {
    /// Items in the order the API returned them
    pub items: Vec<T>,
    /// Raw `Link` header value, if the response carried one
    pub link: Option<String>,
}

impl<T> PageFetchResult<T> {
    /// Create a result from items and an optional raw header
    pub fn new(items: Vec<T>, link: Option<String>) -> Self {
        Self { items, link }
    }

    /// Create a result for an unpaginated response
    pub fn single_page(items: Vec<T>) -> Self {
        Self { items, link: None }
    }

    /// Create a result taking the `Link` header from a header lookup
    pub fn with_headers<H: HeaderLookup + ?Sized>(items: Vec<T>, headers: &H) -> Self {
        Self {
            items,
            link: headers.header(LINK_HEADER).map(str::to_string),
        }
    }

    /// Parse the captured `Link` header
    pub fn link_info(&self) -> Option<LinkHeaderInfo> {
        self.link.as_deref().and_then(super::parse_link_header)
    }
}

/// Retrieves a single page of `T`
///
/// Implemented for any `Fn(page, per_page) -> Future`, so closures bound to
/// an endpoint can be passed straight to the resolver. Implementations must
/// tolerate concurrent invocation.
pub trait PageFetcher<T> {
    /// Future resolving to one page
    type Future: Future<Output = Result<PageFetchResult<T>>>;

    /// Fetch `page` with `per_page` items per page
    fn fetch_page(&self, page: u32, per_page: u32) -> Self::Future;
}

impl<T, F, Fut> PageFetcher<T> for F
where
    F: Fn(u32, u32) -> Fut,
    Fut: Future<Output = Result<PageFetchResult<T>>>,
{
    type Future = Fut;

    fn fetch_page(&self, page: u32, per_page: u32) -> Fut {
        self(page, per_page)
    }
}

// ============================================================================
// Search Outcome
// ============================================================================

/// Result of a predicate search over pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    /// A page satisfied the predicate; `items` may be empty
    Found { page: u32, items: Vec<T> },
    /// Every page was inspected and none matched
    NotFound,
}

impl<T> SearchOutcome<T> {
    /// Check if a matching page was found
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Page number of the match
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Found { page, .. } => Some(*page),
            Self::NotFound => None,
        }
    }

    /// Items of the matching page, or an empty vec when nothing matched
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Found { items, .. } => items,
            Self::NotFound => Vec::new(),
        }
    }
}
