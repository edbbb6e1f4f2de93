//! The per-child record tying a widget to its place in the grid.

use crate::align::Align;
use crate::geometry::{Axis, Region, Size};
use crate::table::span::{GridRect, Span};
use crate::widget::Widget;

/// A widget plus everything the table tracks about it: spans, shrink flags,
/// alignment overrides, and the cached results of the last recalc and
/// placement passes.
#[derive(Debug)]
pub(crate) struct Holder<W> {
    pub widget: W,
    pub cols: Span,
    pub rows: Span,
    /// Shrink-to-fit along X; forced off for spans wider than one track.
    pub shrink_x: bool,
    /// Shrink-to-fit along Y; forced off for spans wider than one track.
    pub shrink_y: bool,
    pub align_x: Option<Align>,
    pub align_y: Option<Align>,
    /// Mirrors the widget's visibility as last reported to the table.
    pub visible: bool,
    /// Margin-inclusive minimum requirement per axis.
    pub req_min: Size,
    /// Margin-inclusive maximum per axis; `0` means unconstrained.
    pub req_max: Size,
    /// Bounds handed to the widget by the last placement pass.
    pub bounds: Region,
}

/// A copyable snapshot of everything the track counters need to know about
/// a holder. Taken before and after a holder is edited so the counter
/// updates can run without borrowing the child map.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Attachment {
    pub cols: Span,
    pub rows: Span,
    pub shrink_x: bool,
    pub shrink_y: bool,
    pub fill_x: bool,
    pub fill_y: bool,
}

impl<W: Widget> Holder<W> {
    pub fn new(
        widget: W,
        x: i32,
        y: i32,
        xspan: i32,
        yspan: i32,
        shrink_x: bool,
        shrink_y: bool,
    ) -> Self {
        let cols = Span::with_len(x, xspan);
        let rows = Span::with_len(y, yspan);
        let visible = !widget.hidden();
        Self {
            widget,
            cols,
            rows,
            shrink_x: shrink_x && cols.len() == 1,
            shrink_y: shrink_y && rows.len() == 1,
            align_x: None,
            align_y: None,
            visible,
            req_min: Size::ZERO,
            req_max: Size::ZERO,
            bounds: Region::EMPTY,
        }
    }

    #[inline]
    pub fn span(&self, axis: Axis) -> Span {
        match axis {
            Axis::X => self.cols,
            Axis::Y => self.rows,
        }
    }

    #[inline]
    pub fn set_span(&mut self, axis: Axis, span: Span) {
        match axis {
            Axis::X => self.cols = span,
            Axis::Y => self.rows = span,
        }
    }

    #[inline]
    pub fn grid_rect(&self) -> GridRect {
        GridRect::new(self.cols, self.rows)
    }

    #[inline]
    pub fn shrink(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.shrink_x,
            Axis::Y => self.shrink_y,
        }
    }

    #[inline]
    pub fn align(&self, axis: Axis) -> Option<Align> {
        match axis {
            Axis::X => self.align_x,
            Axis::Y => self.align_y,
        }
    }

    /// Whether this holder carries an explicit `Fill` override on `axis`.
    #[inline]
    pub fn fills(&self, axis: Axis) -> bool {
        matches!(self.align(axis), Some(Align::Fill))
    }

    pub fn attachment(&self) -> Attachment {
        Attachment {
            cols: self.cols,
            rows: self.rows,
            shrink_x: self.shrink_x,
            shrink_y: self.shrink_y,
            fill_x: self.fills(Axis::X),
            fill_y: self.fills(Axis::Y),
        }
    }

    /// Replace the spans and shrink flags, keeping the wide-span rule.
    pub fn reattach(
        &mut self,
        x: i32,
        y: i32,
        xspan: i32,
        yspan: i32,
        shrink_x: bool,
        shrink_y: bool,
    ) {
        self.cols = Span::with_len(x, xspan);
        self.rows = Span::with_len(y, yspan);
        self.shrink_x = shrink_x && self.cols.len() == 1;
        self.shrink_y = shrink_y && self.rows.len() == 1;
    }

    /// Refresh the cached per-axis requirements from the widget's current
    /// hints.
    ///
    /// The minimum is the larger of the size hint and the required size,
    /// pushed inside the widget's own min/max hints, plus its margin. The
    /// maximum is the max hint plus margin, or `0` when the widget leaves
    /// that axis unconstrained.
    pub fn refresh_requirement(&mut self) {
        let hint = self.widget.size_hint().max(self.widget.required_size());
        let min_hint = self.widget.min_size_hint();
        let max_hint = self.widget.max_size_hint();
        let margin = self.widget.margin_hint();

        let clamp = |mut v: i32, lo: i32, hi: i32| {
            if lo > 0 {
                v = v.max(lo);
            }
            if hi > 0 {
                v = v.min(hi);
            }
            v
        };
        self.req_min = Size::new(
            clamp(hint.width, min_hint.width, max_hint.width) + margin.width,
            clamp(hint.height, min_hint.height, max_hint.height) + margin.height,
        );
        self.req_max = Size::new(
            if max_hint.width > 0 { max_hint.width + margin.width } else { 0 },
            if max_hint.height > 0 { max_hint.height + margin.height } else { 0 },
        );
    }
}
