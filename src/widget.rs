//! Widget contract: the collaborator interface the table lays out.
//!
//! The engine does not own widgets and knows nothing about how they draw.
//! It consumes geometry hints, pushes computed bounds back through
//! [`Widget::set_bounds`], and notifies widgets when selection state touches
//! them. Implementors use interior mutability; every method takes `&self` so
//! the table can hold cheap cloneable handles (`Rc<MyWidget>` works through
//! the blanket impl below).

use std::rc::Rc;

use crate::color::Color;
use crate::geometry::{Offset, Region, Size};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Geometry and notification contract for one table child.
///
/// Object-safe: the core methods use `&self` and return owned values. All
/// size hints follow the "0 means unconstrained" convention on each axis;
/// the table clamps and combines them, implementors just report.
pub trait Widget {
    /// Hard size requirement, e.g. a user-set fixed size. Zero = none.
    fn required_size(&self) -> Size {
        Size::ZERO
    }

    /// Preferred natural size. Zero = no preference.
    fn size_hint(&self) -> Size {
        Size::ZERO
    }

    /// Lower clamp applied to the combined requirement. Zero = none.
    fn min_size_hint(&self) -> Size {
        Size::ZERO
    }

    /// Upper clamp applied to the combined requirement. Zero = none.
    fn max_size_hint(&self) -> Size {
        Size::ZERO
    }

    /// Total margin the widget wants around itself, per axis.
    fn margin_hint(&self) -> Size {
        Size::ZERO
    }

    /// Leading part of the margin (left / top), as a position offset.
    fn margin_origin(&self) -> Offset {
        Offset::ZERO
    }

    /// Whether the widget is currently hidden.
    ///
    /// Sampled once at attach time; later visibility flips are delivered by
    /// the integrating toolkit through `Table::child_shown` /
    /// `Table::child_hidden`.
    fn hidden(&self) -> bool {
        false
    }

    /// Accept newly computed bounds; return whether anything changed.
    ///
    /// The return value drives invalidation: `true` adds the union of the
    /// old and new bounds to the damage handed to the invalidate handler.
    fn set_bounds(&self, bounds: Region) -> bool;

    /// The selection (or a mark) now covers this widget.
    fn on_select(&self) {}

    /// The selection (or a mark) no longer covers this widget.
    fn on_unselect(&self) {}

    /// Set or clear the background style slot driven by selection state.
    fn set_background(&self, color: Option<Color>) {
        let _ = color;
    }
}

// Shared handles satisfy the contract by delegation, so callers can keep
// ownership of their widgets while the table holds a clone.
impl<T: Widget + ?Sized> Widget for Rc<T> {
    fn required_size(&self) -> Size {
        (**self).required_size()
    }

    fn size_hint(&self) -> Size {
        (**self).size_hint()
    }

    fn min_size_hint(&self) -> Size {
        (**self).min_size_hint()
    }

    fn max_size_hint(&self) -> Size {
        (**self).max_size_hint()
    }

    fn margin_hint(&self) -> Size {
        (**self).margin_hint()
    }

    fn margin_origin(&self) -> Offset {
        (**self).margin_origin()
    }

    fn hidden(&self) -> bool {
        (**self).hidden()
    }

    fn set_bounds(&self, bounds: Region) -> bool {
        (**self).set_bounds(bounds)
    }

    fn on_select(&self) {
        (**self).on_select()
    }

    fn on_unselect(&self) {
        (**self).on_unselect()
    }

    fn set_background(&self, color: Option<Color>) {
        (**self).set_background(color)
    }
}
