//! Monospace grid rendering of a plain-text document.
//!
//! [`GridLayout`] is a [`DocumentSurface`] for frontends without a layout
//! engine of their own. Every source line becomes one segment, including its
//! trailing newline, and wraps hard at [`CellMetrics::columns`] display
//! cells. Characters take their `unicode-width` cell count; control
//! characters take none. A wide character that does not fit at the end of a
//! row moves to the next row.

use std::ops::Range;

use praxify_primitives::{DocumentSurface, Point, Rect, TextSegment};
use unicode_width::UnicodeWidthChar;

/// Cell grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
	/// Cells per row before wrapping. Zero is treated as one.
	pub columns: usize,
	pub cell_width: f64,
	pub line_height: f64,
}

impl Default for CellMetrics {
	fn default() -> Self {
		Self {
			columns: 80,
			cell_width: 8.0,
			line_height: 16.0,
		}
	}
}

impl CellMetrics {
	fn columns(&self) -> usize {
		self.columns.max(1)
	}
}

#[derive(Debug, Clone, Copy)]
struct Cell {
	byte: usize,
	row: usize,
	col: usize,
	width: usize,
}

/// One laid-out source line.
#[derive(Debug, Clone)]
pub struct GridSegment {
	content: String,
	cells: Vec<Cell>,
	rows: usize,
	first_row: usize,
	origin: Point,
	metrics: CellMetrics,
	hidden: bool,
}

impl GridSegment {
	fn new(content: &str, first_row: usize, origin: Point, metrics: CellMetrics) -> Self {
		let columns = metrics.columns();
		let mut cells = Vec::with_capacity(content.len());
		let (mut row, mut col) = (0, 0);
		for (byte, ch) in content.char_indices() {
			let width = if ch.is_control() { 0 } else { ch.width().unwrap_or(0) };
			if width > 0 && col > 0 && col + width > columns {
				row += 1;
				col = 0;
			}
			cells.push(Cell { byte, row, col, width });
			col += width;
		}
		Self {
			content: content.to_string(),
			cells,
			rows: row + 1,
			first_row,
			origin,
			metrics,
			hidden: false,
		}
	}

	/// Number of grid rows this segment occupies.
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Index of the first grid row of this segment.
	pub fn first_row(&self) -> usize {
		self.first_row
	}

	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	fn cell_rect(&self, row: usize, col: usize, width: usize) -> Rect {
		let m = &self.metrics;
		Rect::new(
			self.origin.x + col as f64 * m.cell_width,
			self.origin.y + (self.first_row + row) as f64 * m.line_height,
			width as f64 * m.cell_width,
			m.line_height,
		)
	}
}

impl TextSegment for GridSegment {
	fn content(&self) -> &str {
		&self.content
	}

	fn range_bounds(&self, range: Range<usize>) -> Option<Rect> {
		if range.start > range.end || range.end > self.content.len() {
			return None;
		}
		let in_range = |c: &&Cell| c.byte >= range.start && c.byte < range.end;
		let first = self.cells.iter().find(in_range)?;
		let collapsed = Rect {
			width: 0.0,
			height: 0.0,
			..self.cell_rect(first.row, first.col, 0)
		};
		if self.hidden {
			return Some(collapsed);
		}
		Some(
			self.cells
				.iter()
				.filter(in_range)
				.filter(|c| c.width > 0)
				.fold(collapsed, |acc, c| acc.union(self.cell_rect(c.row, c.col, c.width))),
		)
	}
}

/// A plain-text document laid out on a fixed cell grid.
#[derive(Debug, Clone)]
pub struct GridLayout {
	segments: Vec<GridSegment>,
	metrics: CellMetrics,
	origin: Point,
	rows: usize,
}

impl GridLayout {
	pub fn new(text: &str, metrics: CellMetrics) -> Self {
		let mut layout = Self {
			segments: Vec::new(),
			metrics,
			origin: Point::default(),
			rows: 0,
		};
		layout.set_text(text);
		layout
	}

	/// Moves the container to `origin`, keeping the text.
	pub fn with_origin(mut self, origin: Point) -> Self {
		self.set_origin(origin);
		self
	}

	pub fn set_origin(&mut self, origin: Point) {
		self.origin = origin;
		for segment in &mut self.segments {
			segment.origin = origin;
		}
	}

	/// Replaces the document and lays it out again.
	///
	/// Hidden flags are reset.
	pub fn set_text(&mut self, text: &str) {
		self.segments.clear();
		let mut row = 0;
		for line in text.split_inclusive('\n') {
			let segment = GridSegment::new(line, row, self.origin, self.metrics);
			row += segment.rows();
			self.segments.push(segment);
		}
		self.rows = row;
	}

	/// Collapses a segment so its ranges report zero-area boxes.
	///
	/// Returns false if `index` is out of range.
	pub fn hide_segment(&mut self, index: usize) -> bool {
		match self.segments.get_mut(index) {
			Some(segment) => {
				segment.hidden = true;
				true
			}
			None => false,
		}
	}

	pub fn metrics(&self) -> CellMetrics {
		self.metrics
	}

	/// Total number of grid rows.
	pub fn rows(&self) -> usize {
		self.rows
	}
}

impl DocumentSurface for GridLayout {
	type Segment = GridSegment;

	fn segments(&self) -> &[GridSegment] {
		&self.segments
	}

	fn container_bounds(&self) -> Rect {
		Rect::new(
			self.origin.x,
			self.origin.y,
			self.metrics.columns() as f64 * self.metrics.cell_width,
			self.rows as f64 * self.metrics.line_height,
		)
	}
}
