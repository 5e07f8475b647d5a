//! Turning located occurrences into container-relative highlight boxes.

use praxify_primitives::{DocumentSurface, Issue, Point, Rect, TextSegment};
use serde::Serialize;
use tracing::{debug, trace};

use crate::locate::{Occurrence, locate};

/// A positioned, renderable region derived from one occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
	/// Render key, unique within one composition pass only.
	pub id: String,
	pub phrase: String,
	/// Bounding box relative to the document container.
	pub bounds: Rect,
	pub suggestion: String,
	pub kind: String,
}

impl Highlight {
	fn duplicates(&self, bounds: &Rect, issue: &Issue) -> bool {
		self.bounds == *bounds && self.suggestion == issue.suggestion && self.kind == issue.kind
	}
}

/// Builds highlights for `occurrences`.
///
/// Viewport boxes are translated by subtracting `container`. Occurrences
/// without geometry or with a zero-area box are skipped, as are exact
/// duplicates of an earlier highlight. Ids are `"{phrase}-{ordinal}"`, where
/// the ordinal counts highlights kept so far in this pass.
pub fn compose<S: TextSegment>(occurrences: &[Occurrence<'_, S>], container: Point) -> Vec<Highlight> {
	let mut highlights: Vec<Highlight> = Vec::with_capacity(occurrences.len());
	for occurrence in occurrences {
		let Some(viewport) = occurrence.segment.range_bounds(occurrence.range()) else {
			trace!(phrase = %occurrence.issue.phrase, segment = occurrence.segment_index, "occurrence has no geometry");
			continue;
		};
		if viewport.is_empty() {
			trace!(phrase = %occurrence.issue.phrase, segment = occurrence.segment_index, "occurrence is not visible");
			continue;
		}

		let bounds = viewport.relative_to(container);
		let issue = occurrence.issue;
		if highlights.iter().any(|h| h.duplicates(&bounds, issue)) {
			continue;
		}

		highlights.push(Highlight {
			id: format!("{}-{}", issue.phrase, highlights.len()),
			phrase: issue.phrase.clone(),
			bounds,
			suggestion: issue.suggestion.clone(),
			kind: issue.kind.clone(),
		});
	}
	highlights
}

/// Holds the current highlight set and rebuilds it when its inputs change.
#[derive(Debug, Default)]
pub struct OverlayCompositor {
	highlights: Vec<Highlight>,
	inputs: Option<(String, Vec<Issue>)>,
}

impl OverlayCompositor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Recomposes if the document text or the issue list differ from the last pass.
	///
	/// Returns true when a pass ran.
	pub fn update<D: DocumentSurface>(&mut self, surface: &D, issues: &[Issue]) -> bool {
		let text = surface.text();
		if self
			.inputs
			.as_ref()
			.is_some_and(|(last_text, last_issues)| *last_text == text && last_issues.as_slice() == issues)
		{
			return false;
		}
		self.inputs = Some((text, issues.to_vec()));
		self.rebuild(surface, issues);
		true
	}

	/// Recomposes unconditionally, for layout changes that leave the text untouched.
	pub fn recompose<D: DocumentSurface>(&mut self, surface: &D, issues: &[Issue]) {
		self.inputs = Some((surface.text(), issues.to_vec()));
		self.rebuild(surface, issues);
	}

	pub fn highlights(&self) -> &[Highlight] {
		&self.highlights
	}

	pub fn highlight(&self, id: &str) -> Option<&Highlight> {
		self.highlights.iter().find(|h| h.id == id)
	}

	fn rebuild<D: DocumentSurface>(&mut self, surface: &D, issues: &[Issue]) {
		let occurrences = locate(surface.segments(), issues);
		self.highlights = compose(&occurrences, surface.container_bounds().origin());
		debug!(
			issues = issues.len(),
			occurrences = occurrences.len(),
			highlights = self.highlights.len(),
			"overlay recomposed"
		);
	}
}
