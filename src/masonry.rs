//! Masonry grid layout computation.
//!
//! Places an ordered sequence of variable-aspect-ratio items into fixed-width
//! columns, each item going to the currently shortest column. Pure geometry —
//! no I/O, no hidden state, deterministic.
//!
//! # Example
//!
//! ```
//! use gridfold::{LayoutItem, Masonry};
//!
//! let items = [
//!     LayoutItem::new(1.0),
//!     LayoutItem::new(2.0),
//!     LayoutItem::new(0.5),
//! ];
//! let result = Masonry::new(2, 210.0).spacing(10.0).layout(&items).unwrap();
//!
//! // Frames are parallel to the input: result.frames[i] is items[i].
//! assert_eq!(result.frames.len(), 3);
//! assert_eq!(result.content_height, 260.0);
//! ```
//!
//! The placement is greedy, not globally optimal: it trades perfect balance
//! for single-pass, append-stable behavior. Re-running `layout` on a grown
//! list reproduces identical frames for the unchanged prefix, so pagination
//! never reflows rows already on screen.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::{Ordering, Reverse};

/// Insets applied inside the container edges.
///
/// `left`/`right` shrink the usable width; `top`/`bottom` offset and extend
/// the content height.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    /// Inset from the container's top edge.
    pub top: f32,
    /// Inset from the container's left edge.
    pub left: f32,
    /// Inset below the last row.
    pub bottom: f32,
    /// Inset from the container's right edge.
    pub right: f32,
}

impl EdgeInsets {
    /// No insets on any edge.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// The same inset on all four edges.
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    /// `horizontal` on left/right, `vertical` on top/bottom.
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    /// Combined left + right inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top + bottom inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// One item to place: the aspect ratio (width / height) of its content.
///
/// Identity is positional — frame `i` of the output corresponds to item `i`
/// of the input. Deduplication is the accumulator's concern, not the
/// layout engine's.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutItem {
    /// Width divided by height of the source content. Must be positive
    /// and finite.
    pub aspect_ratio: f32,
}

impl LayoutItem {
    /// Create an item from its content aspect ratio.
    pub const fn new(aspect_ratio: f32) -> Self {
        Self { aspect_ratio }
    }
}

/// Output rectangle for one item, in container coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Frame width — the uniform column width.
    pub width: f32,
    /// Frame height, derived from the column width and the item's
    /// aspect ratio.
    pub height: f32,
}

/// Computed layout: one frame per input item, same order and count.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Frames parallel to the input sequence.
    pub frames: Vec<Frame>,
    /// Height of the tallest column including vertical insets, with the
    /// trailing spacing trimmed. Sizes the scrollable container.
    pub content_height: f32,
}

/// Layout computation error.
///
/// All variants indicate malformed caller input, raised before any frame
/// is emitted. Not retryable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Column count is zero.
    #[error("column count must be at least 1")]
    NoColumns,
    /// Container width (after insets and spacing) leaves no positive
    /// column width.
    #[error("container width leaves no room for columns")]
    ContainerTooNarrow,
    /// An item's aspect ratio is non-positive or non-finite.
    #[error("item {index} has a non-positive or non-finite aspect ratio")]
    BadAspectRatio {
        /// Position of the offending item in the input sequence.
        index: usize,
    },
}

/// Masonry layout configuration.
///
/// Built with chained setters, then applied to an item sequence with
/// [`layout`](Self::layout). The configuration is a plain value — reuse it
/// across recomputations to guarantee identical geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Masonry {
    columns: usize,
    container_width: f32,
    spacing: f32,
    insets: EdgeInsets,
    height_clamp: Option<(f32, f32)>,
}

impl Masonry {
    /// Configure a layout with the given column count and container width.
    ///
    /// Spacing defaults to `0.0`, insets to [`EdgeInsets::ZERO`], and item
    /// heights are unclamped.
    pub const fn new(columns: usize, container_width: f32) -> Self {
        Self {
            columns,
            container_width,
            spacing: 0.0,
            insets: EdgeInsets::ZERO,
            height_clamp: None,
        }
    }

    /// Set the gap between columns and between vertically adjacent items.
    pub const fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set insets applied inside the container edges.
    pub const fn insets(mut self, insets: EdgeInsets) -> Self {
        self.insets = insets;
        self
    }

    /// Clamp every item's display height to `min..=max`.
    ///
    /// Off by default: extreme aspect ratios produce extreme heights and the
    /// engine does not impose a bound. Screens that want to cap panoramas or
    /// tall scans opt in here.
    pub const fn height_clamp(mut self, min: f32, max: f32) -> Self {
        self.height_clamp = Some((min, max));
        self
    }

    /// Compute a frame for every item.
    ///
    /// Items are processed in input order and each goes to the currently
    /// shortest column, ties broken toward the lowest column index. The
    /// result is deterministic, and a prefix of the input always produces
    /// the same frames regardless of what follows it.
    ///
    /// An empty input produces an empty layout with zero content height,
    /// insets notwithstanding.
    pub fn layout(&self, items: &[LayoutItem]) -> Result<LayoutResult, LayoutError> {
        if self.columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        let usable = self.container_width
            - self.insets.horizontal()
            - self.spacing * (self.columns as f32 - 1.0);
        let item_width = usable / self.columns as f32;
        if !item_width.is_finite() || item_width <= 0.0 {
            return Err(LayoutError::ContainerTooNarrow);
        }

        // Validate every ratio before emitting any frame — no partial output.
        for (index, item) in items.iter().enumerate() {
            if !item.aspect_ratio.is_finite() || item.aspect_ratio <= 0.0 {
                return Err(LayoutError::BadAspectRatio { index });
            }
        }

        if items.is_empty() {
            return Ok(LayoutResult {
                frames: Vec::new(),
                content_height: 0.0,
            });
        }

        // Min-heap of column slots: pop = shortest column, lowest index on
        // ties. One sift per placement keeps the whole pass O(n log k).
        let mut slots: BinaryHeap<Reverse<Slot>> = (0..self.columns)
            .map(|column| Reverse(Slot { height: 0.0, column }))
            .collect();

        let mut frames = Vec::with_capacity(items.len());
        for item in items {
            let mut height = item_width / item.aspect_ratio;
            if let Some((min, max)) = self.height_clamp {
                height = height.max(min).min(max);
            }
            // The heap holds one slot per column and columns >= 1, so the
            // else branch cannot be taken.
            let Some(mut slot) = slots.peek_mut() else {
                return Err(LayoutError::NoColumns);
            };
            frames.push(Frame {
                x: self.insets.left + slot.0.column as f32 * (item_width + self.spacing),
                y: self.insets.top + slot.0.height,
                width: item_width,
                height,
            });
            // Re-sifts on drop of the PeekMut guard.
            slot.0.height += height + self.spacing;
        }

        let tallest = slots
            .iter()
            .map(|slot| slot.0.height)
            .fold(0.0f32, f32::max);
        let content_height = self.insets.vertical() + (tallest - self.spacing).max(0.0);

        Ok(LayoutResult {
            frames,
            content_height,
        })
    }
}

/// Column slot in the shortest-column heap.
///
/// Heights are finite by construction (inputs validated up front), so
/// `total_cmp` is a plain total order here.
#[derive(Copy, Clone, Debug)]
struct Slot {
    height: f32,
    column: usize,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.height
            .total_cmp(&other.height)
            .then(self.column.cmp(&other.column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── basic placement ─────────────────────────────────────────────────

    #[test]
    fn two_columns_shortest_wins() {
        // 210pt container, 2 columns, 10pt spacing → 100pt columns.
        // ratio 1.0 → h=100 → col0 (heights 110, 0)
        // ratio 2.0 → h=50  → col1 (heights 110, 60)
        // ratio 0.5 → h=200 → col1 is shorter → y=60
        let items = [
            LayoutItem::new(1.0),
            LayoutItem::new(2.0),
            LayoutItem::new(0.5),
        ];
        let r = Masonry::new(2, 210.0).spacing(10.0).layout(&items).unwrap();
        assert_eq!(
            r.frames,
            alloc::vec![
                Frame {
                    x: 0.0,
                    y: 0.0,
                    width: 100.0,
                    height: 100.0
                },
                Frame {
                    x: 110.0,
                    y: 0.0,
                    width: 100.0,
                    height: 50.0
                },
                Frame {
                    x: 110.0,
                    y: 60.0,
                    width: 100.0,
                    height: 200.0
                },
            ]
        );
        assert_eq!(r.content_height, 260.0);
    }

    #[test]
    fn frames_parallel_to_input() {
        let items: Vec<LayoutItem> = (1..=7).map(|i| LayoutItem::new(i as f32 * 0.4)).collect();
        let r = Masonry::new(3, 330.0).spacing(15.0).layout(&items).unwrap();
        assert_eq!(r.frames.len(), items.len());
        // Frame i must have the height derived from item i's ratio, proving
        // the output was never reordered.
        for (frame, item) in r.frames.iter().zip(&items) {
            assert_eq!(frame.height, frame.width / item.aspect_ratio);
        }
    }

    #[test]
    fn tie_breaks_toward_lowest_column() {
        // Equal heights everywhere: items must fill columns left to right.
        let items = [LayoutItem::new(1.0); 3];
        let r = Masonry::new(3, 300.0).layout(&items).unwrap();
        assert_eq!(r.frames[0].x, 0.0);
        assert_eq!(r.frames[1].x, 100.0);
        assert_eq!(r.frames[2].x, 200.0);
        assert!(r.frames.iter().all(|f| f.y == 0.0));
    }

    #[test]
    fn single_column_stacks_vertically() {
        let items = [LayoutItem::new(2.0), LayoutItem::new(1.0)];
        let r = Masonry::new(1, 100.0).spacing(8.0).layout(&items).unwrap();
        assert_eq!(r.frames[0].y, 0.0);
        assert_eq!(r.frames[0].height, 50.0);
        assert_eq!(r.frames[1].y, 58.0);
        assert_eq!(r.frames[1].height, 100.0);
        assert_eq!(r.content_height, 158.0);
    }

    #[test]
    fn empty_input_is_empty_layout() {
        let r = Masonry::new(4, 400.0)
            .insets(EdgeInsets::uniform(12.0))
            .layout(&[])
            .unwrap();
        assert!(r.frames.is_empty());
        assert_eq!(r.content_height, 0.0);
    }

    // ── insets ──────────────────────────────────────────────────────────

    #[test]
    fn insets_offset_frames_and_extend_height() {
        let insets = EdgeInsets {
            top: 20.0,
            left: 10.0,
            bottom: 30.0,
            right: 10.0,
        };
        // 220 - 20 horizontal = 200 usable → 100pt columns.
        let r = Masonry::new(2, 220.0)
            .insets(insets)
            .layout(&[LayoutItem::new(1.0)])
            .unwrap();
        assert_eq!(r.frames[0].x, 10.0);
        assert_eq!(r.frames[0].y, 20.0);
        assert_eq!(r.frames[0].width, 100.0);
        // 20 top + 100 item + 30 bottom.
        assert_eq!(r.content_height, 150.0);
    }

    #[test]
    fn symmetric_and_uniform_constructors() {
        assert_eq!(EdgeInsets::uniform(4.0).horizontal(), 8.0);
        assert_eq!(EdgeInsets::symmetric(6.0, 2.0).horizontal(), 12.0);
        assert_eq!(EdgeInsets::symmetric(6.0, 2.0).vertical(), 4.0);
        assert_eq!(EdgeInsets::ZERO, EdgeInsets::default());
    }

    // ── height clamp ────────────────────────────────────────────────────

    #[test]
    fn height_clamp_caps_extremes() {
        // Panorama (ratio 20 → h=5) and tall scan (ratio 0.05 → h=2000).
        let items = [LayoutItem::new(20.0), LayoutItem::new(0.05)];
        let r = Masonry::new(2, 200.0)
            .height_clamp(40.0, 300.0)
            .layout(&items)
            .unwrap();
        assert_eq!(r.frames[0].height, 40.0);
        assert_eq!(r.frames[1].height, 300.0);
    }

    #[test]
    fn no_clamp_by_default() {
        let r = Masonry::new(1, 100.0)
            .layout(&[LayoutItem::new(0.01)])
            .unwrap();
        assert_eq!(r.frames[0].height, 10_000.0);
    }

    // ── errors ──────────────────────────────────────────────────────────

    #[test]
    fn zero_columns_rejected() {
        let err = Masonry::new(0, 200.0).layout(&[]).unwrap_err();
        assert_eq!(err, LayoutError::NoColumns);
    }

    #[test]
    fn too_narrow_container_rejected() {
        // 3 columns with 20pt spacing need more than 40pt of width.
        let err = Masonry::new(3, 40.0).spacing(20.0).layout(&[]).unwrap_err();
        assert_eq!(err, LayoutError::ContainerTooNarrow);

        let err = Masonry::new(2, f32::NAN).layout(&[]).unwrap_err();
        assert_eq!(err, LayoutError::ContainerTooNarrow);
    }

    #[test]
    fn bad_aspect_ratio_rejected_with_index() {
        for bad in [0.0, -1.5, f32::NAN, f32::INFINITY] {
            let items = [LayoutItem::new(1.0), LayoutItem::new(bad)];
            let err = Masonry::new(2, 210.0).layout(&items).unwrap_err();
            assert_eq!(err, LayoutError::BadAspectRatio { index: 1 });
        }
    }

    // ── determinism and append stability ────────────────────────────────

    #[test]
    fn recompute_is_identical() {
        let items: Vec<LayoutItem> = (0..40)
            .map(|i| LayoutItem::new(0.3 + (i % 7) as f32 * 0.45))
            .collect();
        let config = Masonry::new(3, 390.0).spacing(6.0);
        assert_eq!(config.layout(&items).unwrap(), config.layout(&items).unwrap());
    }

    #[test]
    fn appending_never_moves_existing_frames() {
        let first: Vec<LayoutItem> = (0..25)
            .map(|i| LayoutItem::new(0.5 + (i % 5) as f32 * 0.3))
            .collect();
        let mut grown = first.clone();
        grown.extend((0..25).map(|i| LayoutItem::new(1.6 - (i % 4) as f32 * 0.2)));

        let config = Masonry::new(4, 420.0).spacing(8.0);
        let before = config.layout(&first).unwrap();
        let after = config.layout(&grown).unwrap();

        assert_eq!(&after.frames[..first.len()], &before.frames[..]);
        assert!(after.content_height >= before.content_height);
    }
}
