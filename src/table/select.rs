//! Cell selection and marking.
//!
//! The table keeps at most one live selection rectangle plus any number of
//! marked rectangles. Both are stored in grid coordinates, clipped to the
//! occupied range at the time they are made, and survive later grid edits
//! only through the remapping done by the structural operations. Covered
//! widgets hear about state changes through their `on_select`,
//! `on_unselect` and `set_background` hooks.

use crate::color::Color;
use crate::geometry::Region;
use crate::widget::Widget;

use super::span::GridRect;
use super::Table;

/// Fraction by which mark backgrounds are darkened relative to the
/// selection background.
const MARK_DARKEN: f32 = 0.25;

/// Receiver for the background fills of marked and selected cells.
pub trait BackgroundPainter {
    fn fill_rect(&mut self, region: Region, color: Color);
}

impl<W: Widget> Table<W> {
    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select a block of cells, replacing any previous selection.
    ///
    /// The request is clipped to the occupied range; a request entirely
    /// outside it is ignored and the previous selection stays in place.
    pub fn select(&mut self, x: i32, y: i32, xspan: i32, yspan: i32) {
        let Some(rect) = self.clip_request(x, y, xspan, yspan) else {
            return;
        };
        self.apply_selection(Some(rect));
    }

    /// Select one column across every occupied row.
    pub fn select_column(&mut self, x: i32) {
        let Some(occupied) = self.span() else {
            return;
        };
        self.select(x, occupied.rows.begin, 1, occupied.rows.len());
    }

    /// Select one row across every occupied column.
    pub fn select_row(&mut self, y: i32) {
        let Some(occupied) = self.span() else {
            return;
        };
        self.select(occupied.cols.begin, y, occupied.cols.len(), 1);
    }

    /// Drop the selection, if any.
    pub fn unselect(&mut self) {
        if self.selection.is_some() {
            self.apply_selection(None);
        }
    }

    /// The current selection in grid coordinates.
    pub fn selection(&self) -> Option<GridRect> {
        self.selection
    }

    pub(crate) fn apply_selection(&mut self, new: Option<GridRect>) {
        if self.selection == new {
            return;
        }
        if let Some(old) = self.selection.take() {
            self.notify_covered(old, false);
            let region = self.rect_bounds(old);
            self.add_damage(region);
        }
        if let Some(rect) = new {
            self.selection = Some(rect);
            self.notify_covered(rect, true);
            let region = self.rect_bounds(rect);
            self.add_damage(region);
        }
        self.emit_selection_changed();
        self.flush_damage();
        tracing::debug!(selection = ?self.selection, "selection changed");
    }

    // -----------------------------------------------------------------------
    // Marks
    // -----------------------------------------------------------------------

    /// Mark a block of cells. Marking an already marked rectangle is a
    /// no-op.
    pub fn mark(&mut self, x: i32, y: i32, xspan: i32, yspan: i32) {
        let Some(rect) = self.clip_request(x, y, xspan, yspan) else {
            return;
        };
        if self.marks.contains(&rect) {
            return;
        }
        self.marks.push(rect);
        self.notify_covered(rect, true);
        let region = self.rect_bounds(rect);
        self.add_damage(region);
        self.emit_selection_changed();
        self.flush_damage();
    }

    pub fn mark_column(&mut self, x: i32) {
        let Some(occupied) = self.span() else {
            return;
        };
        self.mark(x, occupied.rows.begin, 1, occupied.rows.len());
    }

    pub fn mark_row(&mut self, y: i32) {
        let Some(occupied) = self.span() else {
            return;
        };
        self.mark(occupied.cols.begin, y, occupied.cols.len(), 1);
    }

    /// Remove the mark exactly matching the clipped request, if present.
    pub fn unmark(&mut self, x: i32, y: i32, xspan: i32, yspan: i32) {
        let Some(rect) = self.clip_request(x, y, xspan, yspan) else {
            return;
        };
        self.remove_mark(rect);
    }

    pub fn unmark_column(&mut self, x: i32) {
        let Some(occupied) = self.span() else {
            return;
        };
        self.unmark(x, occupied.rows.begin, 1, occupied.rows.len());
    }

    pub fn unmark_row(&mut self, y: i32) {
        let Some(occupied) = self.span() else {
            return;
        };
        self.unmark(occupied.cols.begin, y, occupied.cols.len(), 1);
    }

    /// Remove every mark.
    pub fn unmark_all(&mut self) {
        if self.marks.is_empty() {
            return;
        }
        for rect in std::mem::take(&mut self.marks) {
            self.notify_covered(rect, false);
            let region = self.rect_bounds(rect);
            self.add_damage(region);
        }
        self.emit_selection_changed();
        self.flush_damage();
    }

    /// All marked rectangles, in the order they were made.
    pub fn marks(&self) -> &[GridRect] {
        &self.marks
    }

    pub(crate) fn remove_mark(&mut self, rect: GridRect) {
        let Some(at) = self.marks.iter().position(|m| *m == rect) else {
            return;
        };
        self.marks.remove(at);
        self.notify_covered(rect, false);
        let region = self.rect_bounds(rect);
        self.add_damage(region);
        self.emit_selection_changed();
        self.flush_damage();
    }

    // -----------------------------------------------------------------------
    // Background
    // -----------------------------------------------------------------------

    /// Change the background color used for selected cells. Marked cells
    /// use the same color darkened.
    pub fn set_selection_background(&mut self, color: Color) {
        if self.selection_bg == color {
            return;
        }
        self.selection_bg = color;
        let mut touched: Vec<GridRect> = self.marks.clone();
        if let Some(rect) = self.selection {
            touched.push(rect);
        }
        for rect in touched {
            self.restain_covered(rect);
            let region = self.rect_bounds(rect);
            self.add_damage(region);
        }
        self.flush_damage();
    }

    pub fn selection_background(&self) -> Color {
        self.selection_bg
    }

    /// Paint the backgrounds of marked and selected cells: marks first,
    /// darkened, then the selection in the plain background color.
    pub fn paint_background(&self, painter: &mut dyn BackgroundPainter) {
        for &mark in &self.marks {
            let region = self.rect_bounds(mark);
            if !region.is_empty() {
                painter.fill_rect(region, self.selection_bg.darken(MARK_DARKEN));
            }
        }
        if let Some(selection) = self.selection {
            let region = self.rect_bounds(selection);
            if !region.is_empty() {
                painter.fill_rect(region, self.selection_bg);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn clip_request(&self, x: i32, y: i32, xspan: i32, yspan: i32) -> Option<GridRect> {
        let request = GridRect::with_spans(x, y, xspan, yspan);
        let occupied = self.span()?;
        let clipped = request.intersection(occupied);
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Deliver select/unselect hooks and background updates to every child
    /// whose span touches `rect`.
    pub(crate) fn notify_covered(&self, rect: GridRect, selected: bool) {
        if !self.is_active() {
            return;
        }
        let background = selected.then_some(self.selection_bg);
        for holder in self.children.values() {
            if !holder.grid_rect().intersects(rect) {
                continue;
            }
            if selected {
                holder.widget.on_select();
            } else {
                holder.widget.on_unselect();
            }
            holder.widget.set_background(background);
        }
    }

    /// Refresh covered widgets' backgrounds without re-firing the
    /// selection hooks.
    fn restain_covered(&self, rect: GridRect) {
        if !self.is_active() {
            return;
        }
        for holder in self.children.values() {
            if holder.grid_rect().intersects(rect) {
                holder.widget.set_background(Some(self.selection_bg));
            }
        }
    }

    pub(crate) fn emit_selection_changed(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Some(signal) = self.selection_signal.as_mut() {
            signal.emit(());
        }
    }
}
