//! Pagination module
//!
//! Resolves page-numbered REST collections that describe their page range in
//! a `Link` header.
//!
//! # Overview
//!
//! - [`parse_link_header`] reads `prev`/`next`/`last` page numbers
//! - [`alternate_page_groups`] splits a page range for two-ended searches
//! - [`PageResolver`] drives a [`PageFetcher`] to fetch all pages, search for
//!   a matching page, or fetch all and filter

mod groups;
mod link_header;
mod resolver;
mod types;

pub use groups::{alternate_page_groups, PageGroups};
pub use link_header::{extract_page_number, link_info_from_headers, parse_link_header};
pub use resolver::{fetch_all, fetch_all_then_filter, fetch_until, PageResolver};
pub use types::{
    clamp_page, clamp_per_page, HeaderLookup, LinkDiagnostic, LinkHeaderInfo, PageFetchResult,
    PageFetcher, PageLinkEntry, PageRequest, SearchOutcome, LINK_HEADER, MAX_PER_PAGE,
    MIN_PER_PAGE,
};
