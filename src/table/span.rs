//! Grid-index ranges: [`Span`] along one axis, [`GridRect`] across both.
//!
//! Track indices are signed and sparse; spans are half-open `[begin, end)`.
//! Pixel-space geometry lives in [`crate::geometry`]; nothing here knows
//! about pixels.

use crate::geometry::Axis;

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// A half-open range of track indices along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: i32,
    pub end: i32,
}

impl Span {
    /// Create a span from explicit bounds. Not normalized; `end <= begin`
    /// yields an empty span.
    #[inline]
    pub const fn new(begin: i32, end: i32) -> Self {
        Self { begin, end }
    }

    /// The single-track span at `index`.
    #[inline]
    pub const fn at(index: i32) -> Self {
        Self { begin: index, end: index + 1 }
    }

    /// Span starting at `begin` covering `len` tracks, with `len` coerced to
    /// at least 1 (attachment never produces an empty span).
    #[inline]
    pub fn with_len(begin: i32, len: i32) -> Self {
        let len = len.max(1);
        Self { begin, end: begin.saturating_add(len) }
    }

    /// Number of tracks covered; non-positive for degenerate spans.
    #[inline]
    pub const fn len(self) -> i32 {
        self.end - self.begin
    }

    /// Whether the span covers no tracks.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.begin
    }

    /// Whether `index` falls inside the span.
    #[inline]
    pub const fn contains(self, index: i32) -> bool {
        index >= self.begin && index < self.end
    }

    /// The overlapping range of two spans (possibly empty).
    #[inline]
    pub const fn intersection(self, other: Span) -> Span {
        let begin = if self.begin > other.begin { self.begin } else { other.begin };
        let end = if self.end < other.end { self.end } else { other.end };
        Span { begin, end }
    }

    /// Whether the spans share at least one track.
    #[inline]
    pub const fn intersects(self, other: Span) -> bool {
        !self.intersection(other).is_empty()
    }

    /// The span moved by `delta` tracks.
    #[inline]
    pub const fn shifted(self, delta: i32) -> Span {
        Span { begin: self.begin + delta, end: self.end + delta }
    }

    /// Remap the span after tracks `[k, k+n)` are removed from the grid.
    ///
    /// Each edge maps with `i < k -> i`, otherwise `max(k, i - n)`: indices
    /// before the cut keep their position, indices inside collapse onto `k`,
    /// indices beyond shift down. The result is empty when the span lay
    /// entirely inside the removed range.
    #[inline]
    pub fn remap_removed(self, k: i32, n: i32) -> Span {
        let remap = |i: i32| if i < k { i } else { (i - n).max(k) };
        Span { begin: remap(self.begin), end: remap(self.end) }
    }

    /// Iterate the covered track indices in ascending order.
    pub fn tracks(self) -> impl Iterator<Item = i32> {
        self.begin..self.end
    }
}

// ---------------------------------------------------------------------------
// GridRect
// ---------------------------------------------------------------------------

/// A rectangular region of grid cells: a column span times a row span.
///
/// Used for holder placement, the live selection, and marks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub cols: Span,
    pub rows: Span,
}

impl GridRect {
    /// Create a rect from its two spans.
    #[inline]
    pub const fn new(cols: Span, rows: Span) -> Self {
        Self { cols, rows }
    }

    /// The single cell at `(x, y)`.
    #[inline]
    pub const fn cell(x: i32, y: i32) -> Self {
        Self { cols: Span::at(x), rows: Span::at(y) }
    }

    /// Rect at `(x, y)` covering `xspan` columns and `yspan` rows, each span
    /// coerced to at least 1.
    #[inline]
    pub fn with_spans(x: i32, y: i32, xspan: i32, yspan: i32) -> Self {
        Self { cols: Span::with_len(x, xspan), rows: Span::with_len(y, yspan) }
    }

    /// The span along `axis`.
    #[inline]
    pub const fn along(self, axis: Axis) -> Span {
        match axis {
            Axis::X => self.cols,
            Axis::Y => self.rows,
        }
    }

    /// Copy of the rect with the span along `axis` replaced.
    #[inline]
    pub const fn with_span(self, axis: Axis, span: Span) -> GridRect {
        match axis {
            Axis::X => GridRect { cols: span, rows: self.rows },
            Axis::Y => GridRect { cols: self.cols, rows: span },
        }
    }

    /// Whether either span is degenerate.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.cols.is_empty() || self.rows.is_empty()
    }

    /// The overlapping cell rect (possibly empty).
    #[inline]
    pub const fn intersection(self, other: GridRect) -> GridRect {
        GridRect {
            cols: self.cols.intersection(other.cols),
            rows: self.rows.intersection(other.rows),
        }
    }

    /// Whether the rects share at least one cell.
    #[inline]
    pub const fn intersects(self, other: GridRect) -> bool {
        self.cols.intersects(other.cols) && self.rows.intersects(other.rows)
    }

    /// Whether the cell `(x, y)` lies inside the rect.
    #[inline]
    pub const fn contains_cell(self, x: i32, y: i32) -> bool {
        self.cols.contains(x) && self.rows.contains(y)
    }
}
