//! Read-only occupancy and geometry queries.
//!
//! Pixel queries answer from the most recent arrange pass; run
//! [`Table::arrange`] first if mutations are outstanding.

use crate::geometry::Region;
use crate::widget::Widget;

use super::span::GridRect;
use super::Table;

impl<W: Widget> Table<W> {
    /// The occupied index range on both axes, from the lowest existing
    /// track to the highest. `None` while the grid has no tracks at all.
    pub fn span(&self) -> Option<GridRect> {
        let cols = self.cols.occupied()?;
        let rows = self.rows.occupied()?;
        Some(GridRect::new(cols, rows))
    }

    /// The span a child occupies. Stale handles return `None`.
    pub fn child_span(&self, id: super::ChildId) -> Option<GridRect> {
        self.children.get(id).map(|h| h.grid_rect())
    }

    /// The bounds a child was last placed at. Stale handles return `None`.
    pub fn child_bounds(&self, id: super::ChildId) -> Option<Region> {
        self.children.get(id).map(|h| h.bounds)
    }

    /// The pixel region covered by a block of cells, spacing and interior
    /// margins included. Empty when no covered track is visible.
    pub fn bounds(&self, x: i32, y: i32, xspan: i32, yspan: i32) -> Region {
        self.rect_bounds(GridRect::with_spans(x, y, xspan, yspan))
    }

    pub(crate) fn rect_bounds(&self, rect: GridRect) -> Region {
        match (self.cols.window(rect.cols), self.rows.window(rect.rows)) {
            (Some((x, w)), Some((y, h))) => Region::new(x, y, w, h),
            _ => Region::EMPTY,
        }
    }

    /// Pixel range `(start, end)` of a visible column.
    pub fn column_bounds(&self, x: i32) -> Option<(i32, i32)> {
        self.cols.track_bounds(x)
    }

    /// Pixel range `(start, end)` of a visible row.
    pub fn row_bounds(&self, y: i32) -> Option<(i32, i32)> {
        self.rows.track_bounds(y)
    }

    /// The visible column containing the pixel offset `px`, if any.
    pub fn column_at_x(&self, px: i32) -> Option<i32> {
        self.cols.index_at(px)
    }

    /// The visible row containing the pixel offset `py`, if any.
    pub fn row_at_y(&self, py: i32) -> Option<i32> {
        self.rows.index_at(py)
    }
}
