//! Link header parsing (RFC 5988, GitHub flavour)
//!
//! Format: `<https://api.github.com/...?page=2>; rel="next", <...?page=5>; rel="last"`
//!
//! Parsing is best-effort and never fails: a malformed section is skipped and
//! a relation without a page number leaves its field at 0. Both cases are
//! recorded on [`LinkHeaderInfo::diagnostics`].

use super::types::{HeaderLookup, LinkDiagnostic, LinkHeaderInfo, PageLinkEntry, LINK_HEADER};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `page=<digits>` as a query parameter, so `per_page=100` never matches
static PAGE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[?&;])page=(\d+)").expect("valid page regex"));

const REL_PREV: &str = r#"rel="prev""#;
const REL_NEXT: &str = r#"rel="next""#;
const REL_LAST: &str = r#"rel="last""#;

/// Parse a raw `Link` header value
///
/// Returns `None` for an empty header, meaning the data is a single page.
pub fn parse_link_header(header: &str) -> Option<LinkHeaderInfo> {
    if header.trim().is_empty() {
        return None;
    }

    let mut info = LinkHeaderInfo::default();

    for section in header.split(',') {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let Some((url_part, metadata)) = section.split_once(';') else {
            debug!("Skipping malformed Link header section: {section}");
            info.diagnostics.push(LinkDiagnostic::MalformedSection {
                section: section.to_string(),
            });
            continue;
        };

        let entry = PageLinkEntry {
            page_url: strip_brackets(url_part.trim()).to_string(),
            metadata: metadata.trim().to_string(),
        };

        let slot = if entry.metadata.contains(REL_PREV) {
            Some(("prev", &mut info.prev_page))
        } else if entry.metadata.contains(REL_NEXT) {
            Some(("next", &mut info.next_page))
        } else if entry.metadata.contains(REL_LAST) {
            Some(("last", &mut info.total_pages))
        } else {
            None
        };

        if let Some((rel, field)) = slot {
            match extract_page_number(&entry.page_url) {
                Some(page) => *field = page,
                None => {
                    debug!(
                        "No page number in Link header URL for rel={rel}: {}",
                        entry.page_url
                    );
                    *field = 0;
                    info.diagnostics.push(LinkDiagnostic::MissingPageNumber {
                        rel: rel.to_string(),
                        url: entry.page_url.clone(),
                    });
                }
            }
        }

        info.page_data.push(entry);
    }

    Some(info)
}

/// Parse the `Link` header out of a response-like header lookup
///
/// Returns `None` when the header is missing.
pub fn link_info_from_headers<H: HeaderLookup + ?Sized>(headers: &H) -> Option<LinkHeaderInfo> {
    headers.header(LINK_HEADER).and_then(parse_link_header)
}

/// Page number from the first `page=<digits>` match in a URL
pub fn extract_page_number(url: &str) -> Option<u32> {
    PAGE_PARAM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn strip_brackets(url: &str) -> &str {
    url.trim_start_matches(['<', '"'])
        .trim_end_matches(['>', '"'])
}
