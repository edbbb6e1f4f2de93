//! A programmable widget for driving the table headlessly.

use std::cell::Cell;
use std::rc::Rc;

use crate::color::Color;
use crate::geometry::{Offset, Region, Size};
use crate::widget::Widget;

#[derive(Debug)]
struct StubState {
    size_hint: Cell<Size>,
    required_size: Cell<Size>,
    min_size_hint: Cell<Size>,
    max_size_hint: Cell<Size>,
    margin_hint: Cell<Size>,
    margin_origin: Cell<Offset>,
    hidden: Cell<bool>,
    bounds: Cell<Region>,
    set_bounds_calls: Cell<u32>,
    bounds_changes: Cell<u32>,
    selects: Cell<u32>,
    unselects: Cell<u32>,
    background: Cell<Option<Color>>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            size_hint: Cell::new(Size::ZERO),
            required_size: Cell::new(Size::ZERO),
            min_size_hint: Cell::new(Size::ZERO),
            max_size_hint: Cell::new(Size::ZERO),
            margin_hint: Cell::new(Size::ZERO),
            margin_origin: Cell::new(Offset::ZERO),
            hidden: Cell::new(false),
            bounds: Cell::new(Region::EMPTY),
            set_bounds_calls: Cell::new(0),
            bounds_changes: Cell::new(0),
            selects: Cell::new(0),
            unselects: Cell::new(0),
            background: Cell::new(None),
        }
    }
}

/// A widget whose hints are set from the test and which records everything
/// the table does to it.
///
/// Clones share state, so a test can keep a handle while the table owns
/// another:
///
/// ```
/// use lattice::geometry::Size;
/// use lattice::table::Table;
/// use lattice::testing::StubWidget;
///
/// let mut table = Table::new();
/// let stub = StubWidget::with_size_hint(10, 10);
/// table.put(stub.clone(), 0, 0, 1, 1, false, false);
/// table.set_size(Size::new(40, 40));
/// table.arrange();
/// assert_eq!(stub.bounds().width, 40);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StubWidget {
    state: Rc<StubState>,
}

impl StubWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub whose size hint is already set.
    pub fn with_size_hint(width: i32, height: i32) -> Self {
        let stub = Self::new();
        stub.set_size_hint(Size::new(width, height));
        stub
    }

    // -- hint configuration --------------------------------------------------

    pub fn set_size_hint(&self, size: Size) {
        self.state.size_hint.set(size);
    }

    pub fn set_required_size(&self, size: Size) {
        self.state.required_size.set(size);
    }

    pub fn set_min_size_hint(&self, size: Size) {
        self.state.min_size_hint.set(size);
    }

    pub fn set_max_size_hint(&self, size: Size) {
        self.state.max_size_hint.set(size);
    }

    pub fn set_margin_hint(&self, size: Size) {
        self.state.margin_hint.set(size);
    }

    pub fn set_margin_origin(&self, offset: Offset) {
        self.state.margin_origin.set(offset);
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.state.hidden.set(hidden);
    }

    // -- recorded observations -----------------------------------------------

    /// The bounds from the most recent `set_bounds` call.
    pub fn bounds(&self) -> Region {
        self.state.bounds.get()
    }

    /// How many times `set_bounds` was called, changed or not.
    pub fn set_bounds_calls(&self) -> u32 {
        self.state.set_bounds_calls.get()
    }

    /// How many `set_bounds` calls actually moved the widget.
    pub fn bounds_changes(&self) -> u32 {
        self.state.bounds_changes.get()
    }

    pub fn selects(&self) -> u32 {
        self.state.selects.get()
    }

    pub fn unselects(&self) -> u32 {
        self.state.unselects.get()
    }

    /// The background most recently pushed by the table, if any.
    pub fn background(&self) -> Option<Color> {
        self.state.background.get()
    }
}

impl Widget for StubWidget {
    fn size_hint(&self) -> Size {
        self.state.size_hint.get()
    }

    fn required_size(&self) -> Size {
        self.state.required_size.get()
    }

    fn min_size_hint(&self) -> Size {
        self.state.min_size_hint.get()
    }

    fn max_size_hint(&self) -> Size {
        self.state.max_size_hint.get()
    }

    fn margin_hint(&self) -> Size {
        self.state.margin_hint.get()
    }

    fn margin_origin(&self) -> Offset {
        self.state.margin_origin.get()
    }

    fn hidden(&self) -> bool {
        self.state.hidden.get()
    }

    fn set_bounds(&self, bounds: Region) -> bool {
        let changed = self.state.bounds.get() != bounds;
        self.state.bounds.set(bounds);
        self.state.set_bounds_calls.set(self.state.set_bounds_calls.get() + 1);
        if changed {
            self.state.bounds_changes.set(self.state.bounds_changes.get() + 1);
        }
        changed
    }

    fn on_select(&self) {
        self.state.selects.set(self.state.selects.get() + 1);
    }

    fn on_unselect(&self) {
        self.state.unselects.set(self.state.unselects.get() + 1);
    }

    fn set_background(&self, color: Option<Color>) {
        self.state.background.set(color);
    }
}
