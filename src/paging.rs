//! Paginated list accumulation.
//!
//! Folds successive fetch responses into a single deduplicated,
//! order-preserving aggregate, and tracks the cursor used to request the
//! next page. One accumulator per logical list; no cross-list sharing.
//!
//! # Example
//!
//! ```
//! use gridfold::{Page, PageAccumulator};
//!
//! let mut feed = PageAccumulator::new();
//! feed.fold(Page::new(1, vec!["a", "b", "c"], false), |id| *id)
//!     .unwrap();
//!
//! // The backend repeated "c" at the page boundary; the fold drops it.
//! let snapshot = feed
//!     .fold(Page::new(2, vec!["c", "d"], true), |id| *id)
//!     .unwrap();
//!
//! assert_eq!(snapshot.items, vec!["a", "b", "c", "d"]);
//! assert_eq!(feed.next_page(), None); // end of data
//! ```

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

/// One fetch response unit from a paginated backend.
///
/// Constructed once per response, folded into an aggregate, then discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// 1-based page index as requested from the backend.
    pub number: u32,
    /// True when no further pages exist after this one.
    pub at_end: bool,
    /// Payload in server order.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Create a page from a fetch response.
    pub const fn new(number: u32, items: Vec<T>, at_end: bool) -> Self {
        Self {
            number,
            at_end,
            items,
        }
    }
}

/// The cumulative list state built by folding pages.
///
/// Items are deduplicated by the caller-supplied identity key with
/// first-occurrence order preserved. A fold never edits an aggregate the
/// caller already holds — each successful fold hands out a fresh snapshot,
/// so a renderer can keep reading the previous one while the next fetch is
/// in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregate<T> {
    /// Deduplicated items in first-seen order.
    pub items: Vec<T>,
    /// Page number of the most recently folded page; `0` before any fold.
    pub current_page: u32,
    /// Whether the backend has more pages. `true` until a folded page
    /// carries the end flag.
    pub has_next_page: bool,
}

impl<T> Aggregate<T> {
    /// The state before any page has been folded.
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            has_next_page: true,
        }
    }

    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Aggregate<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Page accumulation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FoldError {
    /// The page number is neither `1` nor the next expected page.
    ///
    /// Raised when a slow earlier request's response arrives after a later
    /// one (or after a reset). The accumulator state is untouched; callers
    /// discard the stale response and move on.
    #[error("page {received} arrived out of order (expected page {expected} or a fresh page 1)")]
    OutOfOrder {
        /// The rejected page's number.
        received: u32,
        /// The page number the accumulator would have accepted next.
        expected: u32,
    },
}

/// Observable accumulator state.
///
/// The "loading next" phase lives with the screen's in-flight fetch, not
/// here: a failed fetch simply never calls [`PageAccumulator::fold`], which
/// is exactly the "revert to last good state" the state machine asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PagingState {
    /// No page folded yet.
    Empty,
    /// At least one page folded.
    Loaded {
        /// Most recently folded page number.
        page: u32,
        /// Whether further pages exist.
        has_next: bool,
    },
}

/// Folds fetched pages into a deduplicated, order-stable aggregate.
///
/// Single accumulation owner per list: fold is a read-modify-write, so a
/// screen must serialize its calls (one response applied at a time, in
/// receipt order). Snapshots returned by fold are safe to hand to readers
/// on other threads.
#[derive(Clone, Debug)]
pub struct PageAccumulator<T> {
    aggregate: Aggregate<T>,
}

impl<T: Clone> PageAccumulator<T> {
    /// An empty accumulator, ready for page 1.
    pub const fn new() -> Self {
        Self {
            aggregate: Aggregate::empty(),
        }
    }

    /// Clear all state: no items, `current_page` 0, next page assumed to
    /// exist. Used for pull-to-refresh, first load, or query changes.
    pub fn reset(&mut self) {
        self.aggregate = Aggregate::empty();
    }

    /// Fold one fetched page into the aggregate.
    ///
    /// A page numbered `1` replaces all prior state (refresh semantics —
    /// fresh data discards stale data). The next expected page appends,
    /// then duplicates are dropped keeping the first occurrence (backends
    /// may repeat items across adjacent pages when rows are inserted
    /// mid-pagination). Any other page number is stale and rejected with
    /// [`FoldError::OutOfOrder`], leaving the aggregate untouched.
    ///
    /// `identity` extracts the dedup key; different entity types use
    /// different natural keys, so it is per-call rather than baked in.
    ///
    /// Returns a snapshot of the new aggregate.
    pub fn fold<K, F>(&mut self, page: Page<T>, identity: F) -> Result<Aggregate<T>, FoldError>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let expected = self.aggregate.current_page + 1;
        if page.number != 1 && page.number != expected {
            return Err(FoldError::OutOfOrder {
                received: page.number,
                expected,
            });
        }

        let mut seen = BTreeSet::new();
        let mut items = Vec::with_capacity(if page.number == 1 {
            page.items.len()
        } else {
            self.aggregate.items.len() + page.items.len()
        });
        if page.number == 1 {
            for item in page.items {
                if seen.insert(identity(&item)) {
                    items.push(item);
                }
            }
        } else {
            let existing = self.aggregate.items.iter().cloned();
            for item in existing.chain(page.items) {
                if seen.insert(identity(&item)) {
                    items.push(item);
                }
            }
        }

        self.aggregate = Aggregate {
            items,
            current_page: page.number,
            has_next_page: !page.at_end,
        };
        Ok(self.aggregate.clone())
    }

    /// The current aggregate.
    pub fn aggregate(&self) -> &Aggregate<T> {
        &self.aggregate
    }

    /// The accumulated items in first-seen order.
    pub fn items(&self) -> &[T] {
        &self.aggregate.items
    }

    /// Page number of the most recently folded page; `0` before any fold.
    pub fn current_page(&self) -> u32 {
        self.aggregate.current_page
    }

    /// Whether the backend has more pages.
    pub fn has_next_page(&self) -> bool {
        self.aggregate.has_next_page
    }

    /// The page number to request next, or `None` once the end flag has
    /// been seen. UI stops triggering load-more on `None`.
    pub fn next_page(&self) -> Option<u32> {
        self.aggregate
            .has_next_page
            .then(|| self.aggregate.current_page + 1)
    }

    /// Current position in the paging state machine.
    pub fn state(&self) -> PagingState {
        if self.aggregate.current_page == 0 {
            PagingState::Empty
        } else {
            PagingState::Loaded {
                page: self.aggregate.current_page,
                has_next: self.aggregate.has_next_page,
            }
        }
    }
}

impl<T: Clone> Default for PageAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}
