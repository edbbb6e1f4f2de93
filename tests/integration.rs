//! Integration tests for lattice.
//!
//! These tests exercise the public API from outside the crate: attach stub
//! widgets, drive arrange passes, and check the resulting geometry, signals
//! and invalidation against hand-computed expectations.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use lattice::align::Align;
use lattice::geometry::{Region, Size};
use lattice::table::{GridRect, Table};
use lattice::testing::{layout_to_string, StubWidget};

// ---------------------------------------------------------------------------
// Requisition
// ---------------------------------------------------------------------------

#[test]
fn test_requisition_sums_naturals_and_spacing() {
    init_tracing();
    let mut table = Table::new().with_column_spacing(5).with_row_spacing(3);
    table.put(sized(30, 10), 0, 0, 1, 1, false, false);
    table.put(sized(50, 20), 1, 0, 1, 1, false, false);

    // Columns: 30 + 5 + 50. Rows: one track holding both widgets.
    assert_eq!(table.measure(), Size::new(85, 20));
    assert_eq!(table.required_size(), Size::new(85, 20));
}

#[test]
fn test_spacing_and_margins_compose() {
    init_tracing();
    let mut table = Table::new().with_column_spacing(4);
    table.set_columns_margin(2, 3);
    let a = table.put(sized(30, 10), 0, 0, 1, 1, false, false);
    table.put(sized(30, 10), 1, 0, 1, 1, false, false);

    // 2+30+3 per column plus a 4px gap.
    let req = table.measure();
    assert_eq!(req.width, 74);

    table.set_size(req);
    table.arrange();
    assert_eq!(table.column_bounds(0), Some((2, 32)));
    assert_eq!(table.column_bounds(1), Some((41, 71)));
    assert_eq!(table.child_bounds(a), Some(Region::new(2, 0, 30, 10)));
}

#[test]
fn test_hidden_widget_leaves_the_layout() {
    init_tracing();
    let mut table = Table::new();
    let a = table.put(sized(30, 10), 0, 0, 1, 1, false, false);
    table.put(sized(50, 10), 1, 0, 1, 1, false, false);
    assert_eq!(table.measure().width, 80);

    table.widget(a).unwrap().set_hidden(true);
    table.child_hidden(a);
    assert_eq!(table.measure().width, 50);

    table.widget(a).unwrap().set_hidden(false);
    table.child_shown(a);
    assert_eq!(table.measure().width, 80);
}

// ---------------------------------------------------------------------------
// Attachment and overrides
// ---------------------------------------------------------------------------

#[test]
fn test_zero_span_is_coerced_to_one() {
    init_tracing();
    let mut table = Table::new();
    let id = table.put(sized(10, 10), 2, 3, 0, -2, false, false);
    assert_eq!(table.child_span(id), Some(GridRect::with_spans(2, 3, 1, 1)));
    assert_eq!(table.measure(), Size::new(10, 10));
}

#[test]
fn test_margin_overrides_round_trip() {
    init_tracing();
    let mut table: Table<StubWidget> = Table::new();
    table.set_column_margin(2, 4, 6);
    table.set_row_margin(1, 2, 5);
    assert_eq!(table.column_margin(2), (4, 6));
    assert_eq!(table.row_margin(1), (2, 5));
    assert_eq!(table.column_margin(9), (0, 0));
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

#[test]
fn test_free_tracks_share_the_size_exactly() {
    init_tracing();
    let mut table = Table::new();
    for y in 0..2 {
        for x in 0..2 {
            table.put(sized(10, 10), x, y, 1, 1, false, false);
        }
    }
    table.set_size(Size::new(100, 100));
    table.arrange();

    assert_eq!(table.column_bounds(0), Some((0, 50)));
    assert_eq!(table.column_bounds(1), Some((50, 100)));
    assert_eq!(table.row_bounds(0), Some((0, 50)));
    assert_eq!(table.row_bounds(1), Some((50, 100)));

    // An odd pixel goes to the lowest track; nothing is lost or invented.
    table.set_size(Size::new(101, 100));
    table.arrange();
    assert_eq!(table.column_bounds(0), Some((0, 51)));
    assert_eq!(table.column_bounds(1), Some((51, 101)));
}

#[test]
fn test_shrink_columns_consume_the_axis_exactly() {
    init_tracing();
    let mut table = Table::new();
    for x in 0..3 {
        table.put(sized(10, 10), x, 0, 1, 1, true, false);
    }
    table.set_size(Size::new(100, 10));
    table.arrange();

    // 70px of slack over three absorbing columns: 24 + 23 + 23.
    assert_eq!(table.column_bounds(0), Some((0, 34)));
    assert_eq!(table.column_bounds(1), Some((34, 67)));
    assert_eq!(table.column_bounds(2), Some((67, 100)));
}

#[test]
fn test_shrink_track_absorbs_slack_next_to_a_fixed_column() {
    init_tracing();
    let mut table = Table::new();
    table.set_column_width(0, 50);
    table.put(sized(20, 20), 0, 0, 1, 1, false, false);
    let b = table.put(sized(60, 20), 1, 0, 1, 1, true, false);
    table.set_size(Size::new(200, 20));
    table.arrange();

    assert_eq!(table.column_bounds(0), Some((0, 50)));
    assert_eq!(table.column_bounds(1), Some((50, 200)));
    // Under the Fill default the widget still takes its whole absorbed cell.
    assert_eq!(table.child_bounds(b), Some(Region::new(50, 0, 150, 20)));
}

#[test]
fn test_start_aligned_column_absorbs_under_the_fill_default() {
    init_tracing();
    let mut table = Table::new();
    table.set_column_width(0, 50);
    table.put(sized(20, 20), 0, 0, 1, 1, false, false);
    let b = table.put(sized(60, 20), 1, 0, 1, 1, true, false);
    table.align_column(1, Align::Start);
    table.set_size(Size::new(200, 20));
    table.arrange();

    // Absorption keys off the table-wide Fill default even though the
    // column itself is aligned Start; the uncapped widget fills the cell.
    assert_eq!(table.column_bounds(1), Some((50, 200)));
    assert_eq!(table.child_bounds(b), Some(Region::new(50, 0, 150, 20)));
}

#[test]
fn test_shrink_cap_and_alignment_inside_an_absorbed_cell() {
    init_tracing();
    let mut table = Table::new();
    table.set_column_width(0, 50);
    table.put(sized(20, 20), 0, 0, 1, 1, false, false);
    let w = sized(60, 20);
    w.set_max_size_hint(Size::new(60, 0));
    let b = table.put(w, 1, 0, 1, 1, true, false);
    table.align(b, Align::End, Align::Fill);
    table.set_size(Size::new(200, 20));
    table.arrange();

    // The track absorbs the slack; the widget stays capped at its max hint
    // and slides to the trailing edge of the cell.
    assert_eq!(table.column_bounds(1), Some((50, 200)));
    assert_eq!(table.child_bounds(b), Some(Region::new(140, 0, 60, 20)));
}

#[test]
fn test_fixed_tracks_carve_both_axes_of_a_shrink_cell() {
    init_tracing();
    let mut table = Table::new();
    table.set_column_width(0, 50);
    table.set_row_height(1, 30);
    table.put(sized(10, 10), 0, 0, 1, 1, false, false);
    let b = table.put(sized(10, 10), 1, 0, 1, 1, true, true);
    table.put(sized(10, 10), 0, 1, 1, 1, false, false);
    table.put(sized(10, 10), 1, 1, 1, 1, false, false);
    table.set_size(Size::new(200, 200));
    table.arrange();

    // The absorbed cell is whatever the pinned tracks leave behind.
    assert_eq!(table.column_bounds(0), Some((0, 50)));
    assert_eq!(table.row_bounds(1), Some((170, 200)));
    assert_eq!(table.child_bounds(b), Some(Region::new(50, 0, 150, 170)));
}

// ---------------------------------------------------------------------------
// Arrange passes, signals and damage
// ---------------------------------------------------------------------------

#[test]
fn test_second_arrange_is_silent() {
    init_tracing();
    let mut table = Table::new();
    table.put(sized(10, 10), 0, 0, 1, 1, false, false);
    table.put(sized(10, 10), 1, 1, 1, 1, false, false);

    let fired = Rc::new(Cell::new(0u32));
    let seen = fired.clone();
    table
        .signal_column_bounds_changed()
        .connect(move |_| seen.set(seen.get() + 1));
    let flushes = Rc::new(Cell::new(0u32));
    let sink = flushes.clone();
    table.set_invalidate_handler(move |_| sink.set(sink.get() + 1));

    table.set_size(Size::new(100, 100));
    table.arrange();
    assert_eq!(fired.get(), 2);
    assert_eq!(flushes.get(), 1);
    assert!(!table.needs_arrange());

    table.arrange();
    assert_eq!(fired.get(), 2);
    assert_eq!(flushes.get(), 1);
}

#[test]
fn test_removal_invalidates_the_vacated_region() {
    init_tracing();
    let mut table = Table::new();
    let a = table.put(sized(20, 20), 0, 0, 1, 1, false, false);
    let seen = Rc::new(Cell::new(Region::EMPTY));
    let sink = seen.clone();
    table.set_invalidate_handler(move |region| sink.set(region));
    table.set_size(Size::new(20, 20));
    table.arrange();

    let placed = table.child_bounds(a).unwrap();
    assert_eq!(placed, Region::new(0, 0, 20, 20));

    seen.set(Region::EMPTY);
    table.remove(a);
    assert_eq!(seen.get(), placed);
}

// ---------------------------------------------------------------------------
// Track lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_tracks_vanish_with_their_last_user() {
    init_tracing();
    let mut table = Table::new();
    let a = table.put(sized(20, 20), 0, 0, 1, 1, false, false);
    let b = table.put(sized(20, 20), 5, 5, 1, 1, false, false);
    assert_eq!(table.span(), Some(GridRect::with_spans(0, 0, 6, 6)));

    table.remove(b);
    assert_eq!(table.span(), Some(GridRect::with_spans(0, 0, 1, 1)));

    table.remove(a);
    assert!(table.span().is_none());
}

#[test]
fn test_shared_track_outlives_one_of_its_users() {
    init_tracing();
    let mut table = Table::new();
    let a = table.put(sized(10, 10), 0, 0, 1, 1, false, false);
    let b = table.put(sized(10, 10), 0, 1, 1, 1, false, false);
    table.set_size(Size::new(40, 40));
    table.arrange();
    assert_eq!(table.column_at_x(5), Some(0));

    table.remove(a);
    table.arrange();
    assert_eq!(table.column_at_x(5), Some(0));

    table.remove(b);
    table.arrange();
    assert_eq!(table.column_at_x(5), None);
}

#[test]
fn test_pinned_tracks_survive_their_last_widget() {
    init_tracing();
    let mut table = Table::new();
    let id = table.put(sized(20, 20), 3, 0, 1, 1, false, false);
    table.set_column_width(3, 40);
    table.set_row_height(0, 10);

    table.remove(id);
    assert_eq!(table.span(), Some(GridRect::with_spans(3, 0, 1, 1)));

    table.set_column_width(3, 0);
    table.set_row_height(0, 0);
    assert!(table.span().is_none());
}

// ---------------------------------------------------------------------------
// Structural edits
// ---------------------------------------------------------------------------

#[test]
fn test_structural_edits_remap_spans_selection_and_marks() {
    init_tracing();
    let mut table = Table::new();
    let a = table.put(sized(10, 10), 0, 0, 1, 1, false, false);
    let b = table.put(sized(10, 10), 1, 0, 1, 1, false, false);
    let fired = Rc::new(Cell::new(0u32));
    let seen = fired.clone();
    table
        .signal_selection_changed()
        .connect(move |()| seen.set(seen.get() + 1));

    table.select(1, 0, 1, 1);
    table.mark(0, 0, 2, 1);

    table.insert_columns(1, 2);
    assert_eq!(table.child_span(a), Some(GridRect::with_spans(0, 0, 1, 1)));
    assert_eq!(table.child_span(b), Some(GridRect::with_spans(3, 0, 1, 1)));
    assert_eq!(table.selection(), Some(GridRect::with_spans(3, 0, 1, 1)));
    // The mark straddled the insertion point and is discarded.
    assert!(table.marks().is_empty());

    table.remove_columns(1, 2);
    assert_eq!(table.child_span(b), Some(GridRect::with_spans(1, 0, 1, 1)));
    assert_eq!(table.selection(), Some(GridRect::with_spans(1, 0, 1, 1)));

    // select + mark + discarded mark; remapping itself is silent.
    assert_eq!(fired.get(), 3);
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

#[test]
fn test_marking_twice_fires_once() {
    init_tracing();
    let mut table = Table::new();
    table.put(sized(10, 10), 0, 0, 1, 1, false, false);
    let fired = Rc::new(Cell::new(0u32));
    let seen = fired.clone();
    table
        .signal_selection_changed()
        .connect(move |()| seen.set(seen.get() + 1));

    table.mark(0, 0, 1, 1);
    table.mark(0, 0, 1, 1);
    assert_eq!(table.marks().len(), 1);
    assert_eq!(fired.get(), 1);
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn test_layout_snapshot() {
    init_tracing();
    let mut table = Table::new().with_column_spacing(2);
    table.set_column_width(0, 30);
    table.put(sized(20, 10), 0, 0, 1, 1, false, false);
    table.put(sized(40, 10), 1, 0, 1, 1, false, false);
    table.put(sized(10, 12), 0, 1, 2, 1, false, false);
    table.set_size(Size::new(100, 30));
    table.arrange();
    table.select_row(1);
    table.mark_column(0);

    insta::assert_snapshot!(layout_to_string(&table), @r"
    col 0: [0, 30)
    col 1: [32, 100)
    row 0: [0, 15)
    row 1: [15, 30)
    child cols 0..1 rows 0..1: (0, 0) 30x15
    child cols 1..2 rows 0..1: (32, 0) 68x15
    child cols 0..2 rows 1..2: (0, 15) 100x15
    selection: cols 0..2 rows 1..2
    mark: cols 0..1 rows 0..2
    ");
}

// ---------------------------------------------------------------------------
// Full flow
// ---------------------------------------------------------------------------

#[test]
fn test_full_lifecycle() {
    init_tracing();
    let mut table = Table::new();
    let a = table.put(sized(30, 10), 0, 0, 1, 1, false, false);
    let b = table.put(sized(50, 10), 1, 0, 1, 1, false, false);
    table.set_size(Size::new(80, 10));
    table.arrange();
    assert!(!table.needs_arrange());
    assert_eq!(table.required_size(), Size::new(80, 10));

    // Open a gap, widen a child across it.
    table.insert_columns(1, 1);
    assert!(table.needs_arrange());
    assert_eq!(table.child_span(b), Some(GridRect::with_spans(2, 0, 1, 1)));
    table.respan(a, 0, 0, 3, 1);
    assert_eq!(table.child_span(a), Some(GridRect::with_spans(0, 0, 3, 1)));

    let widget = table.remove(b);
    assert!(widget.is_some());
    assert_eq!(table.len(), 1);

    table.clear();
    assert!(table.is_empty());
    assert!(table.span().is_none());
    assert_eq!(table.measure(), Size::ZERO);

    // Teardown keeps mutations working but arranges become inert.
    table.shutdown();
    table.put(sized(10, 10), 0, 0, 1, 1, false, false);
    table.arrange();
    assert_eq!(table.span(), Some(GridRect::with_spans(0, 0, 1, 1)));
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A stub widget with the given size hint.
fn sized(width: i32, height: i32) -> StubWidget {
    StubWidget::with_size_hint(width, height)
}

/// Install a tracing subscriber reading `RUST_LOG`, once per process.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
