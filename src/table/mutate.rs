//! Structural edits: inserting and removing whole columns and rows.
//!
//! Both operations keep every surviving child attached to the same tracks
//! it covered before, because track counters travel with the tracks as
//! they shift. Only spans cut by the edit need explicit fixups: insertion
//! truncates a straddling span at the insertion point and releases the
//! cut-off tail, removal remaps both span edges around the erased range
//! and detaches children left with nothing.

use crate::geometry::Axis;
use crate::widget::Widget;

use super::span::{GridRect, Span};
use super::{ChildId, Table};

impl<W: Widget> Table<W> {
    /// Open `count` new columns at index `at`. Everything at or beyond
    /// `at` shifts right; spans straddling the seam are truncated to end
    /// there. A table with no columns at all is left untouched.
    pub fn insert_columns(&mut self, at: i32, count: i32) {
        self.insert_tracks(Axis::X, at, count);
    }

    /// Open `count` new rows at index `at`; the row analogue of
    /// [`Table::insert_columns`].
    pub fn insert_rows(&mut self, at: i32, count: i32) {
        self.insert_tracks(Axis::Y, at, count);
    }

    /// Erase columns `[at, at+count)` with their overrides. Children
    /// living entirely inside are detached and dropped; everything beyond
    /// shifts left.
    pub fn remove_columns(&mut self, at: i32, count: i32) {
        self.remove_tracks(Axis::X, at, count);
    }

    /// Erase rows `[at, at+count)`; the row analogue of
    /// [`Table::remove_columns`].
    pub fn remove_rows(&mut self, at: i32, count: i32) {
        self.remove_tracks(Axis::Y, at, count);
    }

    fn insert_tracks(&mut self, axis: Axis, at: i32, count: i32) {
        let count = count.max(0);
        if count == 0 || self.axis(axis).tracks.is_empty() {
            return;
        }

        // Marks straddling the seam disappear with notification; marks
        // fully beyond it shift silently.
        let straddlers: Vec<GridRect> = self
            .marks
            .iter()
            .copied()
            .filter(|mark| {
                let s = mark.along(axis);
                s.begin < at && s.end > at
            })
            .collect();
        for rect in straddlers {
            self.remove_mark(rect);
        }
        for mark in self.marks.iter_mut() {
            let s = mark.along(axis);
            if s.begin >= at {
                *mark = mark.with_span(axis, s.shifted(count));
            }
        }

        // Selection: shift or discard by the same rule.
        if let Some(sel) = self.selection {
            let s = sel.along(axis);
            if s.begin >= at {
                self.selection = Some(sel.with_span(axis, s.shifted(count)));
            } else if s.end > at {
                self.apply_selection(None);
            }
        }

        // Holder spans: shift the ones beyond the seam, truncate the ones
        // across it and release their references on the cut-off tail.
        let edits: Vec<(ChildId, Span, Option<Span>)> = self
            .children
            .iter()
            .filter_map(|(id, holder)| {
                let s = holder.span(axis);
                if s.begin >= at {
                    Some((id, s.shifted(count), None))
                } else if s.end > at {
                    Some((id, Span::new(s.begin, at), Some(Span::new(at, s.end))))
                } else {
                    None
                }
            })
            .collect();
        for (id, span, tail) in edits {
            let Some(holder) = self.children.get_mut(id) else {
                continue;
            };
            holder.set_span(axis, span);
            let visible = holder.visible;
            let fill = holder.fills(axis);
            if let Some(tail) = tail {
                // Truncated spans were wider than one track, so no shrink
                // count can be riding on the tail.
                if visible {
                    self.axis_mut(axis).remove_visible(tail, false, fill);
                }
                self.axis_mut(axis).unreference(tail);
            }
        }

        self.axis_mut(axis).shift_up(at, count);
        self.schedule_recalc();
        self.flush_damage();
        tracing::debug!(axis = axis.name(), at, count, "tracks inserted");
    }

    fn remove_tracks(&mut self, axis: Axis, at: i32, count: i32) {
        let count = count.max(0);
        if count == 0 || self.axis(axis).tracks.is_empty() {
            return;
        }

        // Children living entirely inside the cut are detached outright.
        let doomed: Vec<ChildId> = self
            .children
            .iter()
            .filter(|(_, holder)| {
                let s = holder.span(axis);
                s.begin >= at && s.end <= at + count
            })
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            let _ = self.remove(id);
        }

        // Marks: the ones collapsing to nothing go away with notification;
        // the rest remap, collapsing any duplicates the remap produces.
        let mut survivors: Vec<GridRect> = Vec::new();
        let mut dropped: Vec<GridRect> = Vec::new();
        for &mark in &self.marks {
            let s = mark.along(axis);
            let r = s.remap_removed(at, count);
            if r.is_empty() {
                dropped.push(mark);
            } else {
                let remapped = mark.with_span(axis, r);
                if !survivors.contains(&remapped) {
                    survivors.push(remapped);
                }
            }
        }
        self.marks = survivors;
        let had_drops = !dropped.is_empty();
        for rect in dropped {
            self.notify_covered(rect, false);
            let region = self.rect_bounds(rect);
            self.add_damage(region);
        }
        if had_drops {
            self.emit_selection_changed();
        }

        // Selection: same remap; degenerate means gone.
        if let Some(sel) = self.selection {
            let s = sel.along(axis);
            let r = s.remap_removed(at, count);
            if r.is_empty() {
                self.apply_selection(None);
            } else if r != s {
                self.selection = Some(sel.with_span(axis, r));
            }
        }

        // Surviving holder spans remap; their counters ride along with the
        // shifted tracks.
        let edits: Vec<(ChildId, Span)> = self
            .children
            .iter()
            .filter_map(|(id, holder)| {
                let s = holder.span(axis);
                let r = s.remap_removed(at, count);
                (r != s).then_some((id, r))
            })
            .collect();
        for (id, span) in edits {
            if let Some(holder) = self.children.get_mut(id) {
                holder.set_span(axis, span);
            }
        }

        self.axis_mut(axis).erase_range(at, count);
        self.schedule_recalc();
        self.flush_damage();
        tracing::debug!(axis = axis.name(), at, count, "tracks removed");
    }
}
