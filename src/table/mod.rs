//! The table container: a sparse two-dimensional grid of widgets.
//!
//! Widgets attach to rectangular spans of columns and rows. Tracks come
//! into existence when something references or configures them and vanish
//! again when the last reason goes away; indices are signed, so a grid can
//! grow in any direction. Layout runs in explicit passes driven by
//! [`Table::arrange`]: fold widget requirements into the tracks, compute
//! each axis requisition, allocate extents and positions, then hand every
//! visible widget its final bounds.
//!
//! The table never polls its children. Visibility and requirement changes
//! are reported through [`Table::child_shown`], [`Table::child_hidden`] and
//! [`Table::child_requisition_changed`], and the table answers with
//! scheduling flags, bounds-changed signals and merged invalidation
//! regions.

mod alloc;
mod holder;
mod mutate;
mod place;
mod query;
mod select;
mod span;
mod track;

pub use self::select::BackgroundPainter;
pub use self::span::{GridRect, Span};

use slotmap::{new_key_type, SlotMap};

use crate::align::Align;
use crate::color::Color;
use crate::geometry::{Axis, Region, Size};
use crate::signal::Signal;

use self::holder::{Attachment, Holder};
use self::track::AxisTracks;

new_key_type! {
    /// Stable handle for a widget attached to a [`Table`].
    pub struct ChildId;
}

/// Default background for selected cells.
const SELECTION_BACKGROUND: Color = Color::new(0x34, 0x65, 0xa4);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Lifecycle {
    Active,
    TearingDown,
}

/// Work owed to the next [`Table::arrange`] call.
#[derive(Copy, Clone, Debug, Default)]
struct Pending {
    /// Track naturals must be refolded from widget requirements.
    recalc: bool,
    /// Extents, positions and placement must be redone.
    arrange: bool,
}

/// A grid container laying widgets out over sparse columns and rows.
///
/// `W` is anything implementing [`crate::widget::Widget`]; shared handles
/// such as `Rc<W>` qualify through the blanket impl, letting callers keep
/// a handle to a widget they have put into the table.
pub struct Table<W: crate::widget::Widget> {
    children: SlotMap<ChildId, Holder<W>>,
    cols: AxisTracks,
    rows: AxisTracks,
    size: Size,
    /// Requisition from the most recent measure or arrange.
    requisition: Size,
    selection: Option<GridRect>,
    marks: Vec<GridRect>,
    selection_bg: Color,
    col_signal: Option<Signal<i32>>,
    row_signal: Option<Signal<i32>>,
    selection_signal: Option<Signal<()>>,
    invalidate: Option<Box<dyn FnMut(Region)>>,
    damage: Region,
    state: Lifecycle,
    pending: Pending,
}

impl<W: crate::widget::Widget> Table<W> {
    pub fn new() -> Self {
        Self {
            children: SlotMap::with_key(),
            cols: AxisTracks::new(Axis::X),
            rows: AxisTracks::new(Axis::Y),
            size: Size::ZERO,
            requisition: Size::ZERO,
            selection: None,
            marks: Vec::new(),
            selection_bg: SELECTION_BACKGROUND,
            col_signal: None,
            row_signal: None,
            selection_signal: None,
            invalidate: None,
            damage: Region::EMPTY,
            state: Lifecycle::Active,
            pending: Pending::default(),
        }
    }

    pub fn with_column_spacing(mut self, px: i32) -> Self {
        self.set_column_spacing(px);
        self
    }

    pub fn with_row_spacing(mut self, px: i32) -> Self {
        self.set_row_spacing(px);
        self
    }

    pub fn with_selection_background(mut self, color: Color) -> Self {
        self.selection_bg = color;
        self
    }

    // -----------------------------------------------------------------------
    // Children
    // -----------------------------------------------------------------------

    /// Attach `widget` at cell `(x, y)`, covering `xspan` columns and
    /// `yspan` rows (each coerced to at least 1).
    ///
    /// `shrink_x`/`shrink_y` ask for shrink-to-fit on that axis; the flag
    /// only takes effect for single-track spans. Returns the handle used
    /// for every later operation on this child.
    pub fn put(
        &mut self,
        widget: W,
        x: i32,
        y: i32,
        xspan: i32,
        yspan: i32,
        shrink_x: bool,
        shrink_y: bool,
    ) -> ChildId {
        let holder = Holder::new(widget, x, y, xspan, yspan, shrink_x, shrink_y);
        let attachment = holder.attachment();
        let visible = holder.visible;
        self.reference_spans(attachment);
        if visible {
            self.attach_visible(attachment);
        }
        let id = self.children.insert(holder);
        self.schedule_recalc();
        tracing::debug!(?id, x, y, xspan, yspan, "child attached");
        id
    }

    /// Detach a child and hand its widget back. Stale handles return
    /// `None`.
    pub fn remove(&mut self, id: ChildId) -> Option<W> {
        let holder = self.children.remove(id)?;
        if holder.visible {
            self.detach_visible(holder.attachment());
        }
        self.unreference_spans(holder.attachment());
        self.add_damage(holder.bounds);
        self.schedule_recalc();
        self.flush_damage();
        tracing::debug!(?id, "child detached");
        Some(holder.widget)
    }

    /// Move a child to a new span, keeping its shrink flags.
    pub fn respan(&mut self, id: ChildId, x: i32, y: i32, xspan: i32, yspan: i32) {
        let Some(holder) = self.children.get(id) else {
            return;
        };
        let (shrink_x, shrink_y) = (holder.shrink_x, holder.shrink_y);
        self.respan_with_shrink(id, x, y, xspan, yspan, shrink_x, shrink_y);
    }

    /// Move a child to a new span with fresh shrink flags. Identical
    /// parameters are a no-op.
    pub fn respan_with_shrink(
        &mut self,
        id: ChildId,
        x: i32,
        y: i32,
        xspan: i32,
        yspan: i32,
        shrink_x: bool,
        shrink_y: bool,
    ) {
        let cols = Span::with_len(x, xspan);
        let rows = Span::with_len(y, yspan);
        let shrink_x = shrink_x && cols.len() == 1;
        let shrink_y = shrink_y && rows.len() == 1;

        let Some(holder) = self.children.get(id) else {
            return;
        };
        if holder.cols == cols
            && holder.rows == rows
            && holder.shrink_x == shrink_x
            && holder.shrink_y == shrink_y
        {
            return;
        }
        let old = holder.attachment();
        let visible = holder.visible;
        if visible {
            self.detach_visible(old);
        }
        self.unreference_spans(old);

        let Some(holder) = self.children.get_mut(id) else {
            return;
        };
        holder.reattach(x, y, xspan, yspan, shrink_x, shrink_y);
        let new = holder.attachment();
        self.reference_spans(new);
        if visible {
            self.attach_visible(new);
        }
        self.schedule_recalc();
        tracing::debug!(?id, x, y, xspan, yspan, "child respanned");
    }

    /// Detach every child, drop every track with its overrides, and clear
    /// the selection and all marks.
    pub fn clear(&mut self) {
        self.unselect();
        self.unmark_all();
        let regions: Vec<Region> = self.children.values().map(|h| h.bounds).collect();
        for region in regions {
            self.add_damage(region);
        }
        self.children.clear();
        self.cols.tracks.clear();
        self.rows.tracks.clear();
        self.requisition = Size::ZERO;
        self.schedule_recalc();
        self.flush_damage();
        tracing::debug!("table cleared");
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, id: ChildId) -> bool {
        self.children.contains_key(id)
    }

    pub fn widget(&self, id: ChildId) -> Option<&W> {
        self.children.get(id).map(|h| &h.widget)
    }

    pub fn widget_mut(&mut self, id: ChildId) -> Option<&mut W> {
        self.children.get_mut(id).map(|h| &mut h.widget)
    }

    /// Iterate all children with their handles, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = (ChildId, &W)> {
        self.children.iter().map(|(id, h)| (id, &h.widget))
    }

    // -----------------------------------------------------------------------
    // Child notifications
    // -----------------------------------------------------------------------

    /// Report that a child's widget became visible.
    pub fn child_shown(&mut self, id: ChildId) {
        let Some(holder) = self.children.get_mut(id) else {
            return;
        };
        if holder.visible {
            return;
        }
        holder.visible = true;
        let attachment = holder.attachment();
        self.attach_visible(attachment);
        self.schedule_recalc();
    }

    /// Report that a child's widget was hidden. The vacated area is
    /// invalidated.
    pub fn child_hidden(&mut self, id: ChildId) {
        let Some(holder) = self.children.get_mut(id) else {
            return;
        };
        if !holder.visible {
            return;
        }
        holder.visible = false;
        let attachment = holder.attachment();
        let bounds = holder.bounds;
        self.detach_visible(attachment);
        self.add_damage(bounds);
        self.schedule_recalc();
        self.flush_damage();
    }

    /// Report that a child's size hints changed.
    pub fn child_requisition_changed(&mut self, id: ChildId) {
        if self.children.contains_key(id) {
            self.schedule_recalc();
        }
    }

    // -----------------------------------------------------------------------
    // Sizing and arrangement
    // -----------------------------------------------------------------------

    /// Set the pixel size the table has to work with.
    pub fn set_size(&mut self, size: Size) {
        if self.size == size {
            return;
        }
        self.size = size;
        self.schedule_arrange();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Recompute and return the size the table wants, without arranging.
    pub fn measure(&mut self) -> Size {
        self.recalc();
        self.update_requisition();
        self.requisition
    }

    /// The requisition from the most recent measure or arrange pass.
    pub fn required_size(&self) -> Size {
        self.requisition
    }

    /// Whether a mutation since the last arrange pass left layout work
    /// outstanding.
    pub fn needs_arrange(&self) -> bool {
        self.pending.arrange
    }

    /// Run the full layout pipeline: recalc (if owed), requisition,
    /// allocation on both axes, placement, then signal and invalidation
    /// delivery. Arranging twice without an intervening mutation changes
    /// nothing and notifies nobody.
    pub fn arrange(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.pending.recalc {
            self.recalc();
        }
        self.update_requisition();
        let moved_cols = self.cols.allocate();
        let moved_rows = self.rows.allocate();
        self.place_children();
        self.emit_track_changes(Axis::X, &moved_cols);
        self.emit_track_changes(Axis::Y, &moved_rows);
        self.flush_damage();
        self.pending = Pending::default();
        tracing::debug!(
            moved_cols = moved_cols.len(),
            moved_rows = moved_rows.len(),
            "arranged"
        );
    }

    /// Fold every visible widget's requirement into the track naturals.
    fn recalc(&mut self) {
        self.cols.reset_naturals();
        self.rows.reset_naturals();
        for holder in self.children.values_mut() {
            if !holder.visible {
                continue;
            }
            holder.refresh_requirement();
            self.cols
                .fold(holder.cols, holder.req_min.width, holder.req_max.width);
            self.rows
                .fold(holder.rows, holder.req_min.height, holder.req_max.height);
        }
        self.pending.recalc = false;
    }

    fn update_requisition(&mut self) {
        self.cols.update_requisition(self.size.width);
        self.rows.update_requisition(self.size.height);
        self.requisition = Size::new(self.cols.req.total, self.rows.req.total);
    }

    // -----------------------------------------------------------------------
    // Spacing and margins
    // -----------------------------------------------------------------------

    pub fn set_column_spacing(&mut self, px: i32) {
        let px = px.max(0);
        if self.cols.spacing != px {
            self.cols.spacing = px;
            self.schedule_recalc();
        }
    }

    pub fn column_spacing(&self) -> i32 {
        self.cols.spacing
    }

    pub fn set_row_spacing(&mut self, px: i32) {
        let px = px.max(0);
        if self.rows.spacing != px {
            self.rows.spacing = px;
            self.schedule_recalc();
        }
    }

    pub fn row_spacing(&self) -> i32 {
        self.rows.spacing
    }

    /// Set the margin pair stamped onto every column, existing and future.
    pub fn set_columns_margin(&mut self, before: i32, after: i32) {
        self.cols.set_default_margin(before, after);
        self.schedule_recalc();
    }

    pub fn columns_margin(&self) -> (i32, i32) {
        self.cols.default_margin
    }

    /// Set the margin pair stamped onto every row, existing and future.
    pub fn set_rows_margin(&mut self, before: i32, after: i32) {
        self.rows.set_default_margin(before, after);
        self.schedule_recalc();
    }

    pub fn rows_margin(&self) -> (i32, i32) {
        self.rows.default_margin
    }

    pub fn set_column_margin(&mut self, x: i32, before: i32, after: i32) {
        self.cols.set_margin(x, before, after);
        self.schedule_recalc();
    }

    pub fn column_margin(&self, x: i32) -> (i32, i32) {
        self.cols.margin(x)
    }

    pub fn set_row_margin(&mut self, y: i32, before: i32, after: i32) {
        self.rows.set_margin(y, before, after);
        self.schedule_recalc();
    }

    pub fn row_margin(&self, y: i32) -> (i32, i32) {
        self.rows.margin(y)
    }

    // -----------------------------------------------------------------------
    // User track sizing
    // -----------------------------------------------------------------------

    /// Pin column `x` to `width` pixels; `0` releases the pin.
    pub fn set_column_width(&mut self, x: i32, width: i32) {
        self.cols.set_fixed(x, width);
        self.schedule_arrange();
    }

    pub fn column_width(&self, x: i32) -> i32 {
        self.cols.fixed(x)
    }

    /// Pin row `y` to `height` pixels; `0` releases the pin.
    pub fn set_row_height(&mut self, y: i32, height: i32) {
        self.rows.set_fixed(y, height);
        self.schedule_arrange();
    }

    pub fn row_height(&self, y: i32) -> i32 {
        self.rows.fixed(y)
    }

    pub fn set_min_column_width(&mut self, x: i32, width: i32) {
        self.cols.set_min_clamp(x, width);
        self.schedule_arrange();
    }

    pub fn min_column_width(&self, x: i32) -> i32 {
        self.cols.min_clamp(x)
    }

    pub fn set_max_column_width(&mut self, x: i32, width: i32) {
        self.cols.set_max_clamp(x, width);
        self.schedule_arrange();
    }

    pub fn max_column_width(&self, x: i32) -> i32 {
        self.cols.max_clamp(x)
    }

    pub fn set_min_row_height(&mut self, y: i32, height: i32) {
        self.rows.set_min_clamp(y, height);
        self.schedule_arrange();
    }

    pub fn min_row_height(&self, y: i32) -> i32 {
        self.rows.min_clamp(y)
    }

    pub fn set_max_row_height(&mut self, y: i32, height: i32) {
        self.rows.set_max_clamp(y, height);
        self.schedule_arrange();
    }

    pub fn max_row_height(&self, y: i32) -> i32 {
        self.rows.max_clamp(y)
    }

    // -----------------------------------------------------------------------
    // Alignment
    // -----------------------------------------------------------------------

    /// Override both alignment axes for one child.
    pub fn align(&mut self, id: ChildId, x: Align, y: Align) {
        self.set_child_align(id, Some(x), Some(y));
    }

    /// Drop a child's alignment overrides, falling back to track and table
    /// defaults.
    pub fn unalign(&mut self, id: ChildId) {
        self.set_child_align(id, None, None);
    }

    /// A child's alignment override pair, if one is set.
    pub fn child_align(&self, id: ChildId) -> Option<(Align, Align)> {
        let holder = self.children.get(id)?;
        match (holder.align_x, holder.align_y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    fn set_child_align(&mut self, id: ChildId, x: Option<Align>, y: Option<Align>) {
        let Some(holder) = self.children.get_mut(id) else {
            return;
        };
        if holder.align_x == x && holder.align_y == y {
            return;
        }
        let was_x = holder.fills(Axis::X);
        let was_y = holder.fills(Axis::Y);
        let visible = holder.visible;
        let (cols, rows) = (holder.cols, holder.rows);
        holder.align_x = x;
        holder.align_y = y;
        let now_x = holder.fills(Axis::X);
        let now_y = holder.fills(Axis::Y);
        if visible {
            if was_x != now_x {
                self.cols.adjust_fill(cols, if now_x { 1 } else { -1 });
            }
            if was_y != now_y {
                self.rows.adjust_fill(rows, if now_y { 1 } else { -1 });
            }
        }
        self.schedule_arrange();
    }

    pub fn align_column(&mut self, x: i32, align: Align) {
        self.cols.set_align(x, Some(align));
        self.schedule_arrange();
    }

    pub fn unalign_column(&mut self, x: i32) {
        self.cols.set_align(x, None);
        self.schedule_arrange();
    }

    pub fn column_align(&self, x: i32) -> Option<Align> {
        self.cols.align_of(x)
    }

    pub fn align_row(&mut self, y: i32, align: Align) {
        self.rows.set_align(y, Some(align));
        self.schedule_arrange();
    }

    pub fn unalign_row(&mut self, y: i32) {
        self.rows.set_align(y, None);
        self.schedule_arrange();
    }

    pub fn row_align(&self, y: i32) -> Option<Align> {
        self.rows.align_of(y)
    }

    /// Set the axis-wide fallback alignment for columns.
    pub fn align_columns(&mut self, align: Align) {
        if self.cols.align != align {
            self.cols.align = align;
            self.schedule_arrange();
        }
    }

    pub fn columns_align(&self) -> Align {
        self.cols.align
    }

    /// Set the axis-wide fallback alignment for rows.
    pub fn align_rows(&mut self, align: Align) {
        if self.rows.align != align {
            self.rows.align = align;
            self.schedule_arrange();
        }
    }

    pub fn rows_align(&self) -> Align {
        self.rows.align
    }

    // -----------------------------------------------------------------------
    // Signals and callbacks
    // -----------------------------------------------------------------------

    /// Signal fired with a column index whenever that column's allocated
    /// geometry changes. Created on first access.
    pub fn signal_column_bounds_changed(&mut self) -> &mut Signal<i32> {
        self.col_signal.get_or_insert_with(Signal::new)
    }

    /// Signal fired with a row index whenever that row's allocated geometry
    /// changes. Created on first access.
    pub fn signal_row_bounds_changed(&mut self) -> &mut Signal<i32> {
        self.row_signal.get_or_insert_with(Signal::new)
    }

    /// Signal fired after any change to the selection or the mark list.
    /// Created on first access.
    pub fn signal_selection_changed(&mut self) -> &mut Signal<()> {
        self.selection_signal.get_or_insert_with(Signal::new)
    }

    /// Install the callback receiving merged invalidation regions.
    pub fn set_invalidate_handler<F>(&mut self, handler: F)
    where
        F: FnMut(Region) + 'static,
    {
        self.invalidate = Some(Box::new(handler));
    }

    /// Enter teardown: from here on the table neither arranges nor
    /// notifies, while detach operations keep working.
    pub fn shutdown(&mut self) {
        if self.state == Lifecycle::TearingDown {
            return;
        }
        self.state = Lifecycle::TearingDown;
        tracing::debug!("table tearing down");
    }

    // -----------------------------------------------------------------------
    // Internals shared across the table impl
    // -----------------------------------------------------------------------

    fn is_active(&self) -> bool {
        self.state == Lifecycle::Active
    }

    fn schedule_recalc(&mut self) {
        self.pending.recalc = true;
        self.pending.arrange = true;
    }

    fn schedule_arrange(&mut self) {
        self.pending.arrange = true;
    }

    fn reference_spans(&mut self, a: Attachment) {
        self.cols.reference(a.cols);
        self.rows.reference(a.rows);
    }

    fn unreference_spans(&mut self, a: Attachment) {
        self.cols.unreference(a.cols);
        self.rows.unreference(a.rows);
    }

    fn attach_visible(&mut self, a: Attachment) {
        self.cols.add_visible(a.cols, a.shrink_x, a.fill_x);
        self.rows.add_visible(a.rows, a.shrink_y, a.fill_y);
    }

    fn detach_visible(&mut self, a: Attachment) {
        self.cols.remove_visible(a.cols, a.shrink_x, a.fill_x);
        self.rows.remove_visible(a.rows, a.shrink_y, a.fill_y);
    }

    fn axis(&self, axis: Axis) -> &AxisTracks {
        match axis {
            Axis::X => &self.cols,
            Axis::Y => &self.rows,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisTracks {
        match axis {
            Axis::X => &mut self.cols,
            Axis::Y => &mut self.rows,
        }
    }

    fn add_damage(&mut self, region: Region) {
        self.damage = self.damage.merge(region);
    }

    /// Hand accumulated damage to the invalidate callback, if the table is
    /// still live.
    fn flush_damage(&mut self) {
        if self.damage.is_empty() {
            return;
        }
        let region = std::mem::replace(&mut self.damage, Region::EMPTY);
        if !self.is_active() {
            return;
        }
        if let Some(handler) = self.invalidate.as_mut() {
            handler(region);
        }
    }

    fn emit_track_changes(&mut self, axis: Axis, indices: &[i32]) {
        if indices.is_empty() || !self.is_active() {
            return;
        }
        let signal = match axis {
            Axis::X => self.col_signal.as_mut(),
            Axis::Y => self.row_signal.as_mut(),
        };
        if let Some(signal) = signal {
            for &index in indices {
                signal.emit(index);
            }
        }
    }
}

impl<W: crate::widget::Widget> Default for Table<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: crate::widget::Widget> std::fmt::Debug for Table<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("children", &self.children.len())
            .field("size", &self.size)
            .field("selection", &self.selection)
            .field("marks", &self.marks.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
