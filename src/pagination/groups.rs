//! Page group partitioning for two-ended page searches
//!
//! Splits `1..=total_pages` into a front half walked upward and a back half
//! walked downward. Advancing both sides one page per round finds a match
//! near either end in a single round while keeping at most two requests in
//! flight.
//!
//! Groups are stored as bounds, never as page lists, so a corrupt `last`
//! relation costs nothing until pages are actually probed.

use std::ops::RangeInclusive;

/// Two traversal orders over a page range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroups {
    front: RangeInclusive<u32>,
    back: RangeInclusive<u32>,
}

impl PageGroups {
    fn empty() -> Self {
        Self {
            front: 1..=0,
            back: 1..=0,
        }
    }

    /// Front half, ascending
    pub fn group_a(&self) -> impl DoubleEndedIterator<Item = u32> {
        self.front.clone()
    }

    /// Back half, descending
    pub fn group_b(&self) -> impl DoubleEndedIterator<Item = u32> {
        self.back.clone().rev()
    }

    /// Drop every page at or below `seed_page`, which has already been fetched
    #[must_use]
    pub fn without_seed(self, seed_page: u32) -> Self {
        let Some(first) = seed_page.checked_add(1) else {
            return Self::empty();
        };

        Self {
            front: (*self.front.start()).max(first)..=*self.front.end(),
            back: (*self.back.start()).max(first)..=*self.back.end(),
        }
    }

    /// Number of pages left to probe
    pub fn page_count(&self) -> u64 {
        u64::from(span(&self.front)) + u64::from(span(&self.back))
    }

    /// Number of search rounds needed to exhaust both groups
    pub fn round_count(&self) -> u32 {
        span(&self.front).max(span(&self.back))
    }

    /// Pages probed in each round, front side first
    pub fn rounds(&self) -> impl Iterator<Item = (Option<u32>, Option<u32>)> + '_ {
        let front_len = span(&self.front);
        let back_len = span(&self.back);

        (0..self.round_count()).map(move |i| {
            let front = (i < front_len).then(|| self.front.start() + i);
            let back = (i < back_len).then(|| self.back.end() - i);
            (front, back)
        })
    }

    /// Check if there is nothing left to probe
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }
}

fn span(range: &RangeInclusive<u32>) -> u32 {
    if range.is_empty() {
        0
    } else {
        range.end() - range.start() + 1
    }
}

/// Partition `1..=total_pages` into an ascending front half and a
/// descending back half
///
/// The front half ends at `total_pages / 2`.
pub fn alternate_page_groups(total_pages: u32) -> PageGroups {
    let front_half_end = total_pages / 2;

    PageGroups {
        front: 1..=front_half_end,
        back: front_half_end + 1..=total_pages,
    }
}
