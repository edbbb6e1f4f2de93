//! Placement: turning allocated track geometry into widget bounds.

use crate::align::Align;
use crate::geometry::{Axis, Region};
use crate::widget::Widget;

use super::Table;

/// Position a widget inside its cell window along one axis.
///
/// `cap` is the widget's margin-inclusive natural maximum; `0` means
/// unconstrained. A shrinkable widget whose cell outgrows the cap is held
/// at the cap and slid according to `align`; `Fill` keeps the whole cell.
fn place_axis(pos: i32, extent: i32, cap: i32, shrink: bool, align: Align) -> (i32, i32) {
    if !shrink || cap <= 0 || extent <= cap {
        return (pos, extent);
    }
    match align {
        Align::Start => (pos, cap),
        Align::Center => (pos + (extent - cap) / 2, cap),
        Align::End => (pos + extent - cap, cap),
        Align::Fill => (pos, extent),
    }
}

impl<W: Widget> Table<W> {
    /// Hand every visible child its final bounds: the union of its spanned
    /// tracks, shrunk and aligned where asked, with the widget's margin
    /// carved off. Damage covers old and new bounds of every widget that
    /// reported a change.
    pub(crate) fn place_children(&mut self) {
        let mut damage = Region::EMPTY;
        for holder in self.children.values_mut() {
            if !holder.visible {
                continue;
            }
            let Some((cell_x, cell_w)) = self.cols.window(holder.cols) else {
                continue;
            };
            let Some((cell_y, cell_h)) = self.rows.window(holder.rows) else {
                continue;
            };

            let align_x = holder
                .align(Axis::X)
                .or_else(|| self.cols.span_align(holder.cols))
                .unwrap_or(self.cols.align);
            let align_y = holder
                .align(Axis::Y)
                .or_else(|| self.rows.span_align(holder.rows))
                .unwrap_or(self.rows.align);

            let (x, w) = place_axis(
                cell_x,
                cell_w,
                holder.req_max.width,
                holder.shrink(Axis::X),
                align_x,
            );
            let (y, h) = place_axis(
                cell_y,
                cell_h,
                holder.req_max.height,
                holder.shrink(Axis::Y),
                align_y,
            );

            let origin = holder.widget.margin_origin();
            let margin = holder.widget.margin_hint();
            let bounds = Region::new(
                x + origin.x,
                y + origin.y,
                (w - margin.width).max(0),
                (h - margin.height).max(0),
            );

            let old = holder.bounds;
            holder.bounds = bounds;
            if holder.widget.set_bounds(bounds) {
                damage = damage.merge(old).merge(bounds);
            }
        }
        self.add_damage(damage);
    }
}
