//! Page resolution engine
//!
//! Turns a [`PageFetcher`] into complete or early-terminated result sets.
//! Every operation starts from the same seed step: fetch the start page and
//! read its `Link` header to learn how many pages exist.
//!
//! The resolver owns no state between calls. Concurrent calls are safe as
//! long as the fetcher is.

use super::groups::alternate_page_groups;
use super::types::{LinkHeaderInfo, PageFetcher, PageRequest, SearchOutcome};
use crate::error::{Error, Result};
use futures::future::{try_join, try_join_all};
use std::ops::RangeInclusive;
use tracing::debug;

/// Resolves paginated collections by page number
#[derive(Debug, Clone, Copy, Default)]
pub struct PageResolver {
    request: PageRequest,
}

impl PageResolver {
    /// Resolver starting at page 1 with 100 items per page
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for a specific start page and page size (both clamped)
    pub fn starting_at(page: i64, per_page: i64) -> Self {
        Self {
            request: PageRequest::new(page, per_page),
        }
    }

    /// Resolver for an already clamped request
    pub fn with_request(request: PageRequest) -> Self {
        Self { request }
    }

    /// The clamped seed request
    pub fn request(&self) -> PageRequest {
        self.request
    }

    /// Fetch every page and concatenate the items
    ///
    /// Pages after the seed are requested all at once. The result is laid out
    /// by ascending page number, whatever order the responses arrive in. Any
    /// failed page fails the whole call.
    pub async fn fetch_all<T, F>(&self, fetcher: F) -> Result<Vec<T>>
    where
        F: PageFetcher<T>,
    {
        let (mut items, info) = self.fetch_seed(&fetcher).await?;

        let Some(info) = info else {
            debug!(
                "No Link header on page {}, single page result",
                self.request.page
            );
            return Ok(items);
        };

        let remaining = self.remaining_pages(&info);
        if remaining.is_empty() {
            return Ok(items);
        }

        debug!(
            "Fetching pages {}..={} concurrently",
            remaining.start(),
            remaining.end()
        );

        let pages =
            try_join_all(remaining.into_iter().map(|page| self.fetch(&fetcher, page))).await?;

        for page_items in pages {
            items.extend(page_items);
        }

        debug!("Fetched {} items across {} pages", items.len(), info.total_pages);
        Ok(items)
    }

    /// Search pages until one satisfies `predicate`
    ///
    /// The seed page is checked first and costs nothing extra on a match.
    /// After that, each round probes the next page from the front half and
    /// the next page from the back half together. On a tie within a round the
    /// front page wins.
    pub async fn fetch_until<T, F, P>(&self, fetcher: F, predicate: P) -> Result<SearchOutcome<T>>
    where
        F: PageFetcher<T>,
        P: Fn(&[T]) -> bool,
    {
        let seed_page = self.request.page;
        let (items, info) = self.fetch_seed(&fetcher).await?;

        if predicate(&items) {
            debug!("Seed page {seed_page} matched");
            return Ok(SearchOutcome::Found {
                page: seed_page,
                items,
            });
        }

        let Some(info) = info else {
            return Ok(SearchOutcome::NotFound);
        };

        let groups = alternate_page_groups(info.total_pages).without_seed(seed_page);
        debug!(
            "Searching {} pages in {} rounds",
            groups.page_count(),
            groups.round_count()
        );

        for (round, (front, back)) in groups.rounds().enumerate() {
            debug!("Round {round}: probing front={front:?} back={back:?}");

            let (front_items, back_items) = try_join(
                self.fetch_optional(&fetcher, front),
                self.fetch_optional(&fetcher, back),
            )
            .await?;

            for (page, items) in [front_items, back_items].into_iter().flatten() {
                if predicate(&items) {
                    debug!("Page {page} matched in round {round}");
                    return Ok(SearchOutcome::Found { page, items });
                }
            }
        }

        Ok(SearchOutcome::NotFound)
    }

    /// Fetch every page, then keep the items matching `filter`
    ///
    /// Equivalent to filtering the output of [`fetch_all`](Self::fetch_all).
    pub async fn fetch_all_then_filter<T, F, P>(&self, fetcher: F, filter: P) -> Result<Vec<T>>
    where
        F: PageFetcher<T>,
        P: FnMut(&T) -> bool,
    {
        let mut items = self.fetch_all(fetcher).await?;
        items.retain(filter);
        Ok(items)
    }

    async fn fetch_seed<T, F>(&self, fetcher: &F) -> Result<(Vec<T>, Option<LinkHeaderInfo>)>
    where
        F: PageFetcher<T>,
    {
        let page = self.request.page;
        let result = fetcher
            .fetch_page(page, self.request.per_page)
            .await
            .map_err(|e| Error::page_fetch(page, e))?;

        let info = result.link_info();
        if let Some(info) = &info {
            if !info.is_clean() {
                debug!(
                    "Link header on page {page} parsed with diagnostics: {:?}",
                    info.diagnostics
                );
            }
        }

        Ok((result.items, info))
    }

    async fn fetch<T, F>(&self, fetcher: &F, page: u32) -> Result<Vec<T>>
    where
        F: PageFetcher<T>,
    {
        fetcher
            .fetch_page(page, self.request.per_page)
            .await
            .map(|result| result.items)
            .map_err(|e| Error::page_fetch(page, e))
    }

    async fn fetch_optional<T, F>(
        &self,
        fetcher: &F,
        page: Option<u32>,
    ) -> Result<Option<(u32, Vec<T>)>>
    where
        F: PageFetcher<T>,
    {
        match page {
            Some(page) => Ok(Some((page, self.fetch(fetcher, page).await?))),
            None => Ok(None),
        }
    }

    /// Pages after the seed, up to the header's last page
    fn remaining_pages(&self, info: &LinkHeaderInfo) -> RangeInclusive<u32> {
        match self.request.page.checked_add(1) {
            Some(first) => first..=info.total_pages,
            None => 1..=0,
        }
    }
}

/// Fetch every page starting at `start_page`
pub async fn fetch_all<T, F>(fetcher: F, start_page: i64, per_page: i64) -> Result<Vec<T>>
where
    F: PageFetcher<T>,
{
    PageResolver::starting_at(start_page, per_page)
        .fetch_all(fetcher)
        .await
}

/// Search pages starting at `start_page` until one satisfies `predicate`
pub async fn fetch_until<T, F, P>(
    fetcher: F,
    start_page: i64,
    per_page: i64,
    predicate: P,
) -> Result<SearchOutcome<T>>
where
    F: PageFetcher<T>,
    P: Fn(&[T]) -> bool,
{
    PageResolver::starting_at(start_page, per_page)
        .fetch_until(fetcher, predicate)
        .await
}

/// Fetch every page starting at `start_page` and keep items matching `filter`
pub async fn fetch_all_then_filter<T, F, P>(
    fetcher: F,
    start_page: i64,
    per_page: i64,
    filter: P,
) -> Result<Vec<T>>
where
    F: PageFetcher<T>,
    P: FnMut(&T) -> bool,
{
    PageResolver::starting_at(start_page, per_page)
        .fetch_all_then_filter(fetcher, filter)
        .await
}
