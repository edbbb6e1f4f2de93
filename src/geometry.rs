//! Core geometry types: Axis, Offset, Size, Region.
//!
//! These are the foundational coordinate types used throughout lattice for
//! positioning and sizing widgets in pixel space. Track indices (grid
//! coordinates) live in [`crate::table::Span`]; everything here is pixels.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two layout axes.
///
/// Columns are laid out along [`Axis::X`], rows along [`Axis::Y`]. The
/// allocator is written once and instantiated per axis, so most internal
/// code is parameterized over this enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Lowercase name, used in diagnostics.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The component along `axis`.
    #[inline]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
///
/// Widget size hints use the convention that `0` means "unconstrained" on
/// that axis; the layout code interprets the zero, this type does not.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The extent along `axis`.
    #[inline]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Component-wise maximum with `other`.
    #[inline]
    pub const fn max(self, other: Size) -> Size {
        Size {
            width: if self.width > other.width { self.width } else { other.width },
            height: if self.height > other.height { self.height } else { other.height },
        }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular pixel region defined by position and size.
///
/// Used for widget bounds, track cell rectangles, and invalidation damage.
/// A region with non-positive width or height is considered empty;
/// [`Region::EMPTY`] is the canonical empty value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether this region covers no pixels.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` overlaps this region (non-zero intersection area).
    #[inline]
    pub const fn overlaps(self, other: Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Compute the smallest region containing both `self` and `other`.
    ///
    /// A plain bounding box: an empty region still contributes its position.
    /// Use [`Region::merge`] when accumulating damage, where empty must act
    /// as the identity.
    #[inline]
    pub const fn union(self, other: Region) -> Region {
        let x1 = if self.x < other.x { self.x } else { other.x };
        let y1 = if self.y < other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr > or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb > ob { sb } else { ob };

        Region { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
    }

    /// Union with empty as the identity element.
    ///
    /// Invalidation accumulates damage by folding `merge` over changed
    /// bounds; starting from [`Region::EMPTY`] and merging nothing yields
    /// empty rather than a rectangle pinned to the origin.
    #[inline]
    pub const fn merge(self, other: Region) -> Region {
        if self.is_empty() {
            other
        } else if other.is_empty() {
            self
        } else {
            self.union(other)
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Axis
    // -----------------------------------------------------------------------

    #[test]
    fn axis_cross() {
        assert_eq!(Axis::X.cross(), Axis::Y);
        assert_eq!(Axis::Y.cross(), Axis::X);
    }

    #[test]
    fn axis_name() {
        assert_eq!(Axis::X.name(), "x");
        assert_eq!(Axis::Y.name(), "y");
    }

    // -----------------------------------------------------------------------
    // Offset
    // -----------------------------------------------------------------------

    #[test]
    fn offset_new_and_default() {
        assert_eq!(Offset::new(3, -7), Offset { x: 3, y: -7 });
        assert_eq!(Offset::default(), Offset::ZERO);
    }

    #[test]
    fn offset_add_sub() {
        let a = Offset::new(1, 2);
        let b = Offset::new(3, 4);
        assert_eq!(a + b, Offset::new(4, 6));
        assert_eq!(b - a, Offset::new(2, 2));
    }

    #[test]
    fn offset_neg() {
        assert_eq!(-Offset::new(5, -3), Offset::new(-5, 3));
    }

    #[test]
    fn offset_along() {
        let o = Offset::new(7, 9);
        assert_eq!(o.along(Axis::X), 7);
        assert_eq!(o.along(Axis::Y), 9);
    }

    // -----------------------------------------------------------------------
    // Size
    // -----------------------------------------------------------------------

    #[test]
    fn size_new_and_constants() {
        assert_eq!(Size::new(800, 600), Size { width: 800, height: 600 });
        assert_eq!(Size::ZERO, Size { width: 0, height: 0 });
        assert_eq!(Size::default(), Size::ZERO);
    }

    #[test]
    fn size_along() {
        let s = Size::new(30, 40);
        assert_eq!(s.along(Axis::X), 30);
        assert_eq!(s.along(Axis::Y), 40);
    }

    #[test]
    fn size_max() {
        let a = Size::new(10, 40);
        let b = Size::new(30, 20);
        assert_eq!(a.max(b), Size::new(30, 40));
        assert_eq!(a.max(a), a);
    }

    #[test]
    fn size_to_region() {
        assert_eq!(Size::new(80, 24).to_region(), Region::new(0, 0, 80, 24));
    }

    #[test]
    fn size_add_sub() {
        let a = Size::new(10, 5);
        let b = Size::new(3, 2);
        assert_eq!(a + b, Size::new(13, 7));
        assert_eq!(a - b, Size::new(7, 3));
    }

    // -----------------------------------------------------------------------
    // Region — basic properties
    // -----------------------------------------------------------------------

    #[test]
    fn region_new_and_empty() {
        let r = Region::new(1, 2, 3, 4);
        assert_eq!(r.x, 1);
        assert_eq!(r.y, 2);
        assert_eq!(r.width, 3);
        assert_eq!(r.height, 4);
        assert_eq!(Region::EMPTY, Region::new(0, 0, 0, 0));
        assert_eq!(Region::default(), Region::EMPTY);
    }

    #[test]
    fn region_right_bottom() {
        let r = Region::new(5, 10, 20, 30);
        assert_eq!(r.right(), 25);
        assert_eq!(r.bottom(), 40);
    }

    #[test]
    fn region_offset_size() {
        let r = Region::new(5, 10, 20, 30);
        assert_eq!(r.offset(), Offset::new(5, 10));
        assert_eq!(r.size(), Size::new(20, 30));
    }

    #[test]
    fn region_is_empty() {
        assert!(Region::EMPTY.is_empty());
        assert!(Region::new(5, 5, 0, 10).is_empty());
        assert!(Region::new(5, 5, 10, -1).is_empty());
        assert!(!Region::new(5, 5, 1, 1).is_empty());
    }

    // -----------------------------------------------------------------------
    // Region — containment & overlap
    // -----------------------------------------------------------------------

    #[test]
    fn region_contains_point() {
        let r = Region::new(5, 5, 10, 10);
        assert!(r.contains(5, 5));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 5));
        assert!(!r.contains(5, 15));
        assert!(!r.contains(4, 5));
    }

    #[test]
    fn region_overlaps() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));

        // Adjacent but not overlapping.
        let c = Region::new(10, 0, 10, 10);
        assert!(!a.overlaps(c));
    }

    #[test]
    fn region_overlaps_zero_size() {
        let a = Region::new(0, 0, 10, 10);
        assert!(!a.overlaps(Region::EMPTY));
    }

    // -----------------------------------------------------------------------
    // Region — intersection
    // -----------------------------------------------------------------------

    #[test]
    fn region_intersection_basic() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Region::new(5, 5, 5, 5));
    }

    #[test]
    fn region_intersection_no_overlap() {
        let a = Region::new(0, 0, 5, 5);
        let b = Region::new(10, 10, 5, 5);
        assert_eq!(a.intersection(b), Region::EMPTY);
    }

    #[test]
    fn region_intersection_adjacent() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(10, 0, 10, 10);
        assert_eq!(a.intersection(b), Region::EMPTY);
    }

    #[test]
    fn region_intersection_self() {
        let r = Region::new(3, 4, 20, 15);
        assert_eq!(r.intersection(r), r);
    }

    // -----------------------------------------------------------------------
    // Region — union & merge
    // -----------------------------------------------------------------------

    #[test]
    fn region_union_basic() {
        let a = Region::new(0, 0, 5, 5);
        let b = Region::new(10, 10, 5, 5);
        assert_eq!(a.union(b), Region::new(0, 0, 15, 15));
    }

    #[test]
    fn region_union_self() {
        let r = Region::new(3, 4, 10, 10);
        assert_eq!(r.union(r), r);
    }

    #[test]
    fn region_merge_empty_identity() {
        let r = Region::new(40, 40, 10, 10);
        assert_eq!(Region::EMPTY.merge(r), r);
        assert_eq!(r.merge(Region::EMPTY), r);
        assert_eq!(Region::EMPTY.merge(Region::EMPTY), Region::EMPTY);
    }

    #[test]
    fn region_merge_non_empty_is_union() {
        let a = Region::new(0, 0, 5, 5);
        let b = Region::new(10, 0, 5, 5);
        assert_eq!(a.merge(b), a.union(b));
    }

    #[test]
    fn region_merge_ignores_empty_position() {
        // A plain union with an empty region at the origin would stretch the
        // result to include (0, 0); merge must not.
        let r = Region::new(100, 100, 10, 10);
        assert_eq!(r.merge(Region::EMPTY), r);
    }

    // -----------------------------------------------------------------------
    // Region — translate
    // -----------------------------------------------------------------------

    #[test]
    fn region_translate() {
        let r = Region::new(5, 10, 20, 30);
        let moved = r.translate(Offset::new(-5, 3));
        assert_eq!(moved, Region::new(0, 13, 20, 30));
    }

    #[test]
    fn region_translate_zero() {
        let r = Region::new(1, 2, 3, 4);
        assert_eq!(r.translate(Offset::ZERO), r);
    }

    // -----------------------------------------------------------------------
    // Trait derivation smoke tests
    // -----------------------------------------------------------------------

    #[test]
    fn types_are_copy() {
        let o = Offset::new(1, 2);
        let o2 = o; // Copy
        assert_eq!(o, o2);

        let s = Size::new(3, 4);
        let s2 = s;
        assert_eq!(s, s2);

        let r = Region::new(1, 2, 3, 4);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn types_implement_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Region::new(0, 0, 10, 10));
        set.insert(Region::new(0, 0, 10, 10));
        assert_eq!(set.len(), 1);
    }
}
