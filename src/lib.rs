//! # lattice
//!
//! A retained-mode table layout engine for pixel-space widget toolkits.
//!
//! lattice arranges widgets on a sparse two-dimensional grid of columns and
//! rows. Tracks materialize on demand at any `i32` index, widgets may span
//! several of them, and each arrange pass distributes surplus space among
//! free tracks while honoring fixed sizes, clamps, margins, and alignment.
//! Changed geometry is reported through signals and merged damage regions,
//! so a host toolkit only repaints what actually moved.
//!
//! ## Core Systems
//!
//! - **[`table`]** — The [`Table`](table::Table) container: track sizing and
//!   allocation, child placement, structural edits, selection and marks
//! - **[`widget`]** — The [`Widget`](widget::Widget) trait lattice lays out
//! - **[`signal`]** — Multi-handler callback registry for geometry changes
//! - **[`testing`]** — [`StubWidget`](testing::StubWidget) and layout
//!   snapshots for headless tests
//! - **[`geometry`]** — Axis, Offset, Size, Region primitives
//! - **[`align`]** — Cell alignment for widgets smaller than their cell
//! - **[`color`]** — RGB colors for selection and mark backgrounds

// Foundation
pub mod align;
pub mod color;
pub mod geometry;
pub mod signal;

// Widget contract
pub mod widget;

// Layout
pub mod table;

// Test support
pub mod testing;
