//! Headless testing support: a programmable stub widget and snapshot
//! helpers.
//!
//! Use [`StubWidget`] to drive a [`Table`](crate::table::Table) without a
//! real widget toolkit behind it, and [`layout_to_string`] to capture the
//! arranged geometry as plain text for snapshot-style assertions.

pub mod snapshot;
pub mod stub;

pub use snapshot::layout_to_string;
pub use stub::StubWidget;
