//! Sizing passes over one axis: folding widget requirements into track
//! naturals, computing the axis requisition, and allocating pixel extents
//! and positions.
//!
//! Extent precedence per track: a fixed user size wins outright, then
//! shrink-to-fit tracks take their natural size (absorbing slack only when
//! the axis has no free tracks and something asks for `Fill`), and free
//! tracks share the slack with their natural minimum as a floor. User
//! min/max clamps apply last in every case.

use crate::table::span::Span;
use crate::table::track::{AxisTracks, Requisition};

impl AxisTracks {
    // -- recalc -------------------------------------------------------------

    /// Clear the folded naturals ahead of a recalc pass.
    pub fn reset_naturals(&mut self) {
        for track in self.tracks.values_mut() {
            track.natural_min = 0;
            track.natural_max = 0;
        }
    }

    /// Fold one visible holder's margin-inclusive requirement into the
    /// tracks it covers.
    ///
    /// Single-track spans fold by max. Wider spans first deduct the
    /// spacing and margins interior to the span, then spread what remains
    /// over the covered tracks.
    pub fn fold(&mut self, span: Span, min: i32, max: i32) {
        if span.len() == 1 {
            if let Some(track) = self.tracks.get_mut(&span.begin) {
                track.natural_min = track.natural_min.max(min);
                track.natural_max = track.natural_max.max(max);
            }
            return;
        }
        let interior = self.interior(span);
        self.fold_spread(span, (min - interior).max(0), false);
        if max > 0 {
            self.fold_spread(span, (max - interior).max(0), true);
        }
    }

    /// Spread `amount` over the span's tracks, preferring tracks that are
    /// not shrink-to-fit, and fold each share by max. The division
    /// remainder goes out one pixel per track left to right.
    fn fold_spread(&mut self, span: Span, amount: i32, into_max: bool) {
        if amount <= 0 {
            return;
        }
        let mut targets: Vec<i32> = self
            .tracks
            .range(span.begin..span.end)
            .filter(|(_, t)| t.is_visible() && t.shrink == 0)
            .map(|(&i, _)| i)
            .collect();
        if targets.is_empty() {
            targets = self
                .tracks
                .range(span.begin..span.end)
                .filter(|(_, t)| t.is_visible())
                .map(|(&i, _)| i)
                .collect();
        }
        if targets.is_empty() {
            return;
        }
        let n = targets.len() as i32;
        let share = amount / n;
        let rem = amount % n;
        for (i, index) in targets.into_iter().enumerate() {
            let v = share + i32::from((i as i32) < rem);
            if let Some(track) = self.tracks.get_mut(&index) {
                if into_max {
                    track.natural_max = track.natural_max.max(v);
                } else {
                    track.natural_min = track.natural_min.max(v);
                }
            }
        }
    }

    // -- requisition ---------------------------------------------------------

    /// Recompute the axis aggregates against `size` pixels of room.
    ///
    /// The requisition total sums spacing, margins, and every visible
    /// track's clamped contribution. Slack excludes only what user-sized
    /// and shrink tracks consume; free tracks compete for all of it, with
    /// their naturals acting as floors during allocation.
    pub fn update_requisition(&mut self, size: i32) {
        let mut total = 0;
        let mut consumed = 0;
        let mut visible = 0u32;
        let mut user = 0u32;
        let mut shrink = 0u32;
        for track in self.tracks.values() {
            if !track.is_visible() {
                continue;
            }
            visible += 1;
            let margins = track.margins();
            total += margins;
            consumed += margins;
            if track.fixed > 0 {
                let v = track.clamp(track.fixed);
                total += v;
                consumed += v;
                user += 1;
            } else if track.shrink > 0 {
                let v = track.clamp(track.natural());
                total += v;
                consumed += v;
                shrink += 1;
            } else {
                total += track.clamp(track.natural());
            }
        }
        if visible > 1 {
            let gaps = self.spacing * (visible as i32 - 1);
            total += gaps;
            consumed += gaps;
        }

        let free = visible - user - shrink;
        let receivers = if free > 0 { free } else { shrink };
        let slack = (size - consumed).max(0);
        let (extra, remainder) = if receivers > 0 {
            (slack / receivers as i32, slack % receivers as i32)
        } else {
            (0, 0)
        };
        self.req = Requisition {
            total,
            extra,
            remainder,
            free,
            user,
            shrink,
            visible,
        };
        tracing::trace!(
            axis = self.axis.name(),
            total,
            extra,
            remainder,
            visible,
            user,
            shrink,
            "requisition updated"
        );
    }

    // -- allocation ----------------------------------------------------------

    /// Assign every visible track its extent and position, walking
    /// ascending indices. Returns the tracks whose announced geometry
    /// changed since the last pass, in ascending order.
    pub fn allocate(&mut self) -> Vec<i32> {
        let req = self.req;
        let spacing = self.spacing;
        let axis_align = self.align;
        let mut remainder = req.remainder;
        let mut cursor = 0;
        let mut first = true;
        let mut changed = Vec::new();

        for (&index, track) in self.tracks.iter_mut() {
            if !track.is_visible() {
                continue;
            }
            let extent = if track.fixed > 0 {
                track.clamp(track.fixed)
            } else if track.shrink > 0 {
                let mut v = track.natural();
                let wants_fill = track.fill > 0
                    || track.align.is_some_and(|a| a.is_fill())
                    || axis_align.is_fill();
                if req.free == 0 && wants_fill {
                    v += req.extra;
                    if remainder > 0 {
                        v += 1;
                        remainder -= 1;
                    }
                }
                track.clamp(v)
            } else {
                let mut v = req.extra.max(track.natural_min);
                if remainder > 0 {
                    v += 1;
                    remainder -= 1;
                }
                if v == 0 {
                    v = track.natural();
                }
                track.clamp(v)
            };

            if first {
                first = false;
            } else {
                cursor += spacing;
            }
            cursor += track.margin_before;
            track.position = cursor;
            track.extent = extent;
            cursor += extent + track.margin_after;

            if track.emitted != Some((track.position, extent)) {
                track.emitted = Some((track.position, extent));
                changed.push(index);
            }
        }
        changed
    }
}
