#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core types shared by the validation, annotation, and frontend crates.

/// Screen-space rectangles, points, and scroll offsets.
pub mod geometry;
/// Validation issues, severities, and score bands.
pub mod issue;
/// Rendered document surface abstraction.
pub mod surface;

pub use geometry::{Point, Rect, ScrollOffset};
pub use issue::{DEFAULT_ISSUE_KIND, Issue, ScoreBand, Severity};
pub use surface::{DocumentSurface, TextSegment};
