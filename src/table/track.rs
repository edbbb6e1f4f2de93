//! Per-axis track bookkeeping.
//!
//! Each axis of the grid owns a sparse, ordered map from track index to
//! [`Track`]. A track exists while at least one holder references it or a
//! per-track override (size, clamp, margin, alignment) is set; everything
//! else is garbage collected on detach. [`AxisTracks`] also carries the
//! axis-wide defaults: spacing, default margins, and the fallback alignment.
//!
//! The sizing passes over this data live in `alloc.rs`.

use std::collections::BTreeMap;

use crate::align::Align;
use crate::geometry::Axis;
use crate::table::span::Span;

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// One column or row of the grid.
///
/// `fixed`, `min_clamp` and `max_clamp` use `0` for "unset"; sizes are never
/// negative, so zero is unambiguous.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Track {
    /// Holders whose span covers this track, visible or not.
    pub refs: u32,
    /// Visible holders whose span covers this track, any span width.
    pub visible: u32,
    /// Visible single-span holders flagged shrinkable on this axis.
    pub shrink: u32,
    /// Visible holders with an explicit `Fill` alignment on this axis.
    pub fill: u32,

    /// Largest folded minimum requirement of covering widgets.
    pub natural_min: i32,
    /// Largest folded maximum requirement; `0` means unconstrained.
    pub natural_max: i32,

    /// User-pinned size; wins over naturals when non-zero.
    pub fixed: i32,
    /// Lower clamp applied to the final extent; `0` unset.
    pub min_clamp: i32,
    /// Upper clamp applied to the final extent; `0` unset.
    pub max_clamp: i32,

    /// Pixels reserved before the track content.
    pub margin_before: i32,
    /// Pixels reserved after the track content.
    pub margin_after: i32,

    /// Per-track alignment override for widgets shrunk inside their cell.
    pub align: Option<Align>,

    /// Pixel offset assigned by the last allocation pass.
    pub position: i32,
    /// Pixel extent assigned by the last allocation pass.
    pub extent: i32,
    /// Last `(position, extent)` announced through the bounds-changed
    /// signal; gates re-emission.
    pub emitted: Option<(i32, i32)>,
}

impl Track {
    fn with_margin(margin: (i32, i32)) -> Self {
        Self {
            margin_before: margin.0,
            margin_after: margin.1,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible > 0
    }

    /// Whether any user-set property keeps this track alive.
    pub fn has_overrides(&self) -> bool {
        self.fixed != 0
            || self.min_clamp != 0
            || self.max_clamp != 0
            || self.margin_before != 0
            || self.margin_after != 0
            || self.align.is_some()
    }

    /// A track disappears once nothing references it and no override
    /// remains.
    pub fn erasable(&self) -> bool {
        self.refs == 0 && !self.has_overrides()
    }

    /// Effective natural size: the folded minima, widened by folded maxima.
    #[inline]
    pub fn natural(&self) -> i32 {
        self.natural_min.max(self.natural_max)
    }

    /// Apply the user clamps to a candidate extent.
    pub fn clamp(&self, value: i32) -> i32 {
        let mut v = value;
        if self.min_clamp > 0 {
            v = v.max(self.min_clamp);
        }
        if self.max_clamp > 0 {
            v = v.min(self.max_clamp);
        }
        v
    }

    #[inline]
    pub fn margins(&self) -> i32 {
        self.margin_before + self.margin_after
    }
}

// ---------------------------------------------------------------------------
// Requisition
// ---------------------------------------------------------------------------

/// Aggregate sizing state for one axis, refreshed by
/// [`AxisTracks::update_requisition`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Requisition {
    /// Required pixel size of the whole axis.
    pub total: i32,
    /// Per-track share of the distributable slack.
    pub extra: i32,
    /// Leftover slack pixels, handed out one per track in ascending order.
    pub remainder: i32,
    /// Visible tracks sized neither by the user nor shrink-to-fit.
    pub free: u32,
    /// Visible tracks with a fixed user size.
    pub user: u32,
    /// Visible tracks containing only shrinkable holders.
    pub shrink: u32,
    /// All visible tracks.
    pub visible: u32,
}

// ---------------------------------------------------------------------------
// AxisTracks
// ---------------------------------------------------------------------------

/// The ordered track store plus axis-wide defaults for one axis.
#[derive(Debug)]
pub(crate) struct AxisTracks {
    pub axis: Axis,
    pub tracks: BTreeMap<i32, Track>,
    /// Pixels inserted between consecutive visible tracks.
    pub spacing: i32,
    /// Margin pair applied to newly created tracks.
    pub default_margin: (i32, i32),
    /// Fallback alignment when neither holder nor track overrides it.
    pub align: Align,
    /// Aggregates from the most recent requisition pass.
    pub req: Requisition,
}

impl AxisTracks {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            tracks: BTreeMap::new(),
            spacing: 0,
            default_margin: (0, 0),
            align: Align::Fill,
            req: Requisition::default(),
        }
    }

    // -- storage ------------------------------------------------------------

    #[inline]
    pub fn get(&self, index: i32) -> Option<&Track> {
        self.tracks.get(&index)
    }

    /// Fetch the track at `index`, creating it with the default margins if
    /// absent.
    pub fn ensure(&mut self, index: i32) -> &mut Track {
        let margin = self.default_margin;
        self.tracks
            .entry(index)
            .or_insert_with(|| Track::with_margin(margin))
    }

    /// Drop the track at `index` if nothing keeps it alive.
    pub fn collect(&mut self, index: i32) {
        if self.tracks.get(&index).is_some_and(Track::erasable) {
            self.tracks.remove(&index);
        }
    }

    /// The contiguous index range from the lowest to the highest existing
    /// track, or `None` when the axis is empty.
    pub fn occupied(&self) -> Option<Span> {
        let first = *self.tracks.keys().next()?;
        let last = *self.tracks.keys().next_back()?;
        Some(Span::new(first, last + 1))
    }

    // -- holder attachment --------------------------------------------------

    /// Record a holder covering `span`, creating missing tracks.
    pub fn reference(&mut self, span: Span) {
        for index in span.tracks() {
            self.ensure(index).refs += 1;
        }
    }

    /// Release a holder's coverage of `span`, erasing tracks left without a
    /// reason to exist.
    pub fn unreference(&mut self, span: Span) {
        for index in span.tracks() {
            if let Some(track) = self.tracks.get_mut(&index) {
                track.refs = track.refs.saturating_sub(1);
            }
            self.collect(index);
        }
    }

    /// Account for a covering holder becoming visible.
    ///
    /// `shrink` is only ever set for single-track spans; the caller
    /// normalizes wide spans before attaching.
    pub fn add_visible(&mut self, span: Span, shrink: bool, fill: bool) {
        for index in span.tracks() {
            let track = self.ensure(index);
            track.visible += 1;
            if shrink {
                track.shrink += 1;
            }
            if fill {
                track.fill += 1;
            }
        }
    }

    /// Account for a covering holder becoming invisible.
    pub fn remove_visible(&mut self, span: Span, shrink: bool, fill: bool) {
        for index in span.tracks() {
            if let Some(track) = self.tracks.get_mut(&index) {
                track.visible = track.visible.saturating_sub(1);
                if shrink {
                    track.shrink = track.shrink.saturating_sub(1);
                }
                if fill {
                    track.fill = track.fill.saturating_sub(1);
                }
            }
        }
    }

    /// Adjust the explicit-fill counter over `span` when a visible holder's
    /// alignment override changes.
    pub fn adjust_fill(&mut self, span: Span, delta: i32) {
        for index in span.tracks() {
            if let Some(track) = self.tracks.get_mut(&index) {
                track.fill = if delta >= 0 {
                    track.fill + delta as u32
                } else {
                    track.fill.saturating_sub((-delta) as u32)
                };
            }
        }
    }

    // -- per-track user properties -------------------------------------------

    pub fn set_fixed(&mut self, index: i32, size: i32) {
        self.ensure(index).fixed = size.max(0);
        self.collect(index);
    }

    pub fn fixed(&self, index: i32) -> i32 {
        self.get(index).map_or(0, |t| t.fixed)
    }

    pub fn set_min_clamp(&mut self, index: i32, size: i32) {
        self.ensure(index).min_clamp = size.max(0);
        self.collect(index);
    }

    pub fn min_clamp(&self, index: i32) -> i32 {
        self.get(index).map_or(0, |t| t.min_clamp)
    }

    pub fn set_max_clamp(&mut self, index: i32, size: i32) {
        self.ensure(index).max_clamp = size.max(0);
        self.collect(index);
    }

    pub fn max_clamp(&self, index: i32) -> i32 {
        self.get(index).map_or(0, |t| t.max_clamp)
    }

    pub fn set_margin(&mut self, index: i32, before: i32, after: i32) {
        let track = self.ensure(index);
        track.margin_before = before.max(0);
        track.margin_after = after.max(0);
        self.collect(index);
    }

    pub fn margin(&self, index: i32) -> (i32, i32) {
        self.get(index)
            .map_or((0, 0), |t| (t.margin_before, t.margin_after))
    }

    /// Change the default margin pair and restamp every existing track.
    pub fn set_default_margin(&mut self, before: i32, after: i32) {
        let before = before.max(0);
        let after = after.max(0);
        self.default_margin = (before, after);
        let mut gone = Vec::new();
        for (&index, track) in self.tracks.iter_mut() {
            track.margin_before = before;
            track.margin_after = after;
            if track.erasable() {
                gone.push(index);
            }
        }
        for index in gone {
            self.tracks.remove(&index);
        }
    }

    pub fn set_align(&mut self, index: i32, align: Option<Align>) {
        self.ensure(index).align = align;
        self.collect(index);
    }

    pub fn align_of(&self, index: i32) -> Option<Align> {
        self.get(index).and_then(|t| t.align)
    }

    // -- geometry queries ----------------------------------------------------

    /// Pixel window `(position, extent)` covered by the visible tracks in
    /// `span`, from the leading edge of the first to the trailing edge of
    /// the last. `None` when no covered track is visible.
    pub fn window(&self, span: Span) -> Option<(i32, i32)> {
        let mut visible = self
            .tracks
            .range(span.begin..span.end)
            .filter(|(_, t)| t.is_visible());
        let (_, first) = visible.next()?;
        let last = visible.last().map_or(first, |(_, t)| t);
        Some((first.position, last.position + last.extent - first.position))
    }

    /// Pixel bounds `(start, end)` of a single visible track.
    pub fn track_bounds(&self, index: i32) -> Option<(i32, i32)> {
        let track = self.get(index)?;
        if !track.is_visible() {
            return None;
        }
        Some((track.position, track.position + track.extent))
    }

    /// The visible track whose pixel range contains `at`.
    pub fn index_at(&self, at: i32) -> Option<i32> {
        self.tracks
            .iter()
            .filter(|(_, t)| t.is_visible())
            .find(|(_, t)| at >= t.position && at < t.position + t.extent)
            .map(|(&index, _)| index)
    }

    /// Spacing and margin pixels interior to `span`: everything the position
    /// cursor inserts between the first and last visible covered track.
    pub fn interior(&self, span: Span) -> i32 {
        let mut total = 0;
        let mut count = 0;
        let mut first_before = 0;
        let mut last_after = 0;
        for (_, track) in self.tracks.range(span.begin..span.end) {
            if !track.is_visible() {
                continue;
            }
            if count == 0 {
                first_before = track.margin_before;
            }
            last_after = track.margin_after;
            total += track.margins();
            count += 1;
        }
        if count < 2 {
            return 0;
        }
        total - first_before - last_after + self.spacing * (count - 1)
    }

    /// Last alignment override among the visible tracks of `span`, if any.
    pub fn span_align(&self, span: Span) -> Option<Align> {
        self.tracks
            .range(span.begin..span.end)
            .rev()
            .filter(|(_, t)| t.is_visible())
            .find_map(|(_, t)| t.align)
    }

    // -- structural shifts ---------------------------------------------------

    /// Move every track at index `>= from` up by `by` places.
    pub fn shift_up(&mut self, from: i32, by: i32) {
        debug_assert!(by > 0, "shift must widen the grid");
        let tail = self.tracks.split_off(&from);
        for (index, track) in tail {
            self.tracks.insert(index + by, track);
        }
    }

    /// Erase tracks `[from, from+count)` and close the gap above.
    pub fn erase_range(&mut self, from: i32, count: i32) {
        debug_assert!(count > 0, "erase range must be non-empty");
        let tail = self.tracks.split_off(&from);
        for (index, track) in tail {
            if index >= from + count {
                self.tracks.insert(index - count, track);
            }
        }
    }
}
