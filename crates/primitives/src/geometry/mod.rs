//! Abstract geometry types for overlay placement.
//!
//! Coordinates are floating point screen units with a top-left origin. They
//! carry no dependency on a particular rendering backend; frontends convert
//! at their own boundary.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
	pub top: f64,
	pub left: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	/// Creates a new rectangle from its top-left corner and size.
	pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self { top, left, width, height }
	}

	/// Returns true if the rectangle covers no visible area.
	///
	/// Negative and NaN extents count as empty.
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	/// Returns the right edge x coordinate (exclusive).
	pub fn right(&self) -> f64 {
		self.left + self.width
	}

	/// Returns the bottom edge y coordinate (exclusive).
	pub fn bottom(&self) -> f64 {
		self.top + self.height
	}

	/// Returns the top-left corner.
	pub const fn origin(&self) -> Point {
		Point::new(self.left, self.top)
	}

	/// Returns the horizontal center.
	pub fn center_x(&self) -> f64 {
		self.left + self.width / 2.0
	}

	/// Returns this rectangle expressed relative to `origin`.
	pub fn relative_to(&self, origin: Point) -> Self {
		Self::new(self.left - origin.x, self.top - origin.y, self.width, self.height)
	}

	/// Returns this rectangle moved by `origin`, undoing [`Self::relative_to`].
	pub fn offset(&self, origin: Point) -> Self {
		Self::new(self.left + origin.x, self.top + origin.y, self.width, self.height)
	}

	/// Returns the smallest rectangle containing both rectangles.
	///
	/// Empty rectangles do not contribute.
	pub fn union(&self, other: Self) -> Self {
		if other.is_empty() {
			return *self;
		}
		if self.is_empty() {
			return other;
		}
		let left = self.left.min(other.left);
		let top = self.top.min(other.top);
		let right = self.right().max(other.right());
		let bottom = self.bottom().max(other.bottom());
		Self::new(left, top, right - left, bottom - top)
	}

	/// Returns true if `point` lies inside, with inclusive origin and exclusive max edges.
	pub fn contains(&self, point: Point) -> bool {
		point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
	}
}

/// A position (x, y coordinate).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	/// Creates a new point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Page scroll offset used to convert viewport coordinates into document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
	pub x: f64,
	pub y: f64,
}

impl ScrollOffset {
	/// Creates a new scroll offset.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}
