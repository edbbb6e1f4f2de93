//! Snapshot rendering helpers.
//!
//! Convert an arranged [`Table`] into a plain-text description of its
//! geometry, suitable for snapshot-style assertions: one line per visible
//! track, one per child, then selection state.

use crate::table::Table;
use crate::widget::Widget;

/// Describe a table's arranged layout as text.
///
/// Lines come out in a fixed order: columns ascending, rows ascending,
/// children sorted by span (top to bottom, left to right), then the
/// selection and any marks. Tracks without visible geometry are skipped.
/// Arrange the table first; an unarranged table prints zero geometry.
pub fn layout_to_string<W: Widget>(table: &Table<W>) -> String {
    let Some(span) = table.span() else {
        return "(empty)".to_owned();
    };

    let mut lines = Vec::new();
    for x in span.cols.tracks() {
        if let Some((start, end)) = table.column_bounds(x) {
            lines.push(format!("col {x}: [{start}, {end})"));
        }
    }
    for y in span.rows.tracks() {
        if let Some((start, end)) = table.row_bounds(y) {
            lines.push(format!("row {y}: [{start}, {end})"));
        }
    }

    let mut children: Vec<_> = table
        .children()
        .filter_map(|(id, _)| Some((table.child_span(id)?, table.child_bounds(id)?)))
        .collect();
    children.sort_by_key(|(rect, _)| {
        (rect.rows.begin, rect.cols.begin, rect.rows.end, rect.cols.end)
    });
    for (rect, bounds) in children {
        lines.push(format!(
            "child cols {}..{} rows {}..{}: ({}, {}) {}x{}",
            rect.cols.begin,
            rect.cols.end,
            rect.rows.begin,
            rect.rows.end,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
        ));
    }

    if let Some(rect) = table.selection() {
        lines.push(format!(
            "selection: cols {}..{} rows {}..{}",
            rect.cols.begin, rect.cols.end, rect.rows.begin, rect.rows.end,
        ));
    }
    for rect in table.marks() {
        lines.push(format!(
            "mark: cols {}..{} rows {}..{}",
            rect.cols.begin, rect.cols.end, rect.rows.begin, rect.rows.end,
        ));
    }

    lines.join("\n")
}
