//! Alignment of widgets and tracks within allocated space.

/// How content is positioned along one axis when the allocated space
/// exceeds its natural size.
///
/// Alignment applies at three levels, in precedence order: a per-widget
/// override, a per-track override (the last overridden track in a span
/// wins), and the table-wide axis default. The table default is
/// [`Align::Fill`] so that idle space is absorbed rather than left blank.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Pin to the leading edge (left / top).
    Start,
    /// Center within the available space.
    Center,
    /// Pin to the trailing edge (right / bottom).
    End,
    /// Stretch to cover the available space.
    #[default]
    Fill,
}

impl Align {
    /// Whether this alignment stretches content instead of positioning it.
    #[inline]
    pub const fn is_fill(self) -> bool {
        matches!(self, Align::Fill)
    }
}
