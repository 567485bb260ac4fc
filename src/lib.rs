//! Masonry grid layout and paginated list accumulation for photo feeds.
//!
//! Pure computation — no I/O, no hidden state, `no_std` compatible (requires
//! `alloc`). The two components are independent but designed to be used
//! together by an infinite-scroll list screen: fold fetched pages into a
//! deduplicated aggregate, then lay the aggregate out into balanced columns.
//!
//! # Modules
//!
//! - [`masonry`] — greedy shortest-column grid placement for
//!   variable-aspect-ratio items
//! - [`paging`] — page folding, order-preserving dedup, and pagination
//!   cursor tracking
//!
//! # Example
//!
//! ```
//! use gridfold::{LayoutItem, Masonry, Page, PageAccumulator};
//!
//! // Fold the first fetched page into the aggregate.
//! let mut feed = PageAccumulator::new();
//! let snapshot = feed
//!     .fold(Page::new(1, vec![("a", 1.0f32), ("b", 0.75)], false), |p| p.0)
//!     .unwrap();
//!
//! // Lay the aggregate out into two columns.
//! let items: Vec<LayoutItem> = snapshot
//!     .items
//!     .iter()
//!     .map(|p| LayoutItem::new(p.1))
//!     .collect();
//! let result = Masonry::new(2, 210.0).spacing(10.0).layout(&items).unwrap();
//!
//! assert_eq!(result.frames.len(), 2);
//! assert_eq!(feed.next_page(), Some(2));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod masonry;
pub mod paging;

// Re-exports: core types from both modules
pub use masonry::{EdgeInsets, Frame, LayoutError, LayoutItem, LayoutResult, Masonry};
pub use paging::{Aggregate, FoldError, Page, PageAccumulator, PagingState};
