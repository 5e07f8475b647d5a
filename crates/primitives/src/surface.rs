//! Read-only view of the rendered document.
//!
//! The editing surface owns the document and its layout. Annotation code
//! only reads it through these traits: an ordered list of text segments that
//! partition the document, on-demand geometry for any sub-range of a segment,
//! and the bounding box of the container the overlay is positioned in.

use std::ops::Range;

use crate::geometry::Rect;

/// A run of rendered text with addressable geometry.
pub trait TextSegment {
	/// Text content of this segment.
	fn content(&self) -> &str;

	/// Viewport bounding box of the byte range `range` within [`Self::content`].
	///
	/// `range` always falls on char boundaries. Returns `None` when the range
	/// has no renderable geometry.
	fn range_bounds(&self, range: Range<usize>) -> Option<Rect>;
}

/// The rendered document as seen by the annotation layer.
pub trait DocumentSurface {
	type Segment: TextSegment;

	/// Segments in document order. Concatenating their content yields the full text.
	fn segments(&self) -> &[Self::Segment];

	/// Viewport bounding box of the container overlays are positioned within.
	fn container_bounds(&self) -> Rect;

	/// Full document text.
	fn text(&self) -> String {
		self.segments().iter().map(TextSegment::content).collect()
	}
}
