//! Locating issue phrases in rendered text.
//!
//! [`locate`] is a pure function over the document's text segments. Each
//! issue phrase is searched case-insensitively in every segment, and a match
//! is kept only when it is bounded by non-alphanumeric characters (or the
//! segment edges) on both sides. Punctuation counts as a boundary, so
//! `fast,` matches `fast` and so does the `don` in `don't`.
//!
//! After each candidate, whether accepted or not, the search resumes one
//! character later, so overlapping occurrences are all found.
//!
//! Offsets are byte offsets into the segment content and always fall on char
//! boundaries. Only ASCII letters and digits are treated as word characters.

use std::ops::Range;

use praxify_primitives::{Issue, TextSegment};

/// One whole-word match of an issue phrase inside a segment.
#[derive(Debug)]
pub struct Occurrence<'a, S> {
	pub issue: &'a Issue,
	pub segment: &'a S,
	/// Position of `segment` in the document.
	pub segment_index: usize,
	/// Byte offset of the match start.
	pub start: usize,
	/// Byte offset one past the match end.
	pub end: usize,
}

impl<S> Clone for Occurrence<'_, S> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<S> Copy for Occurrence<'_, S> {}

impl<S> Occurrence<'_, S> {
	pub fn range(&self) -> Range<usize> {
		self.start..self.end
	}
}

/// Finds every whole-word occurrence of every issue phrase.
///
/// Results are ordered by segment, then issue, then offset. Issues with an
/// empty phrase are skipped.
pub fn locate<'a, S: TextSegment>(segments: &'a [S], issues: &'a [Issue]) -> Vec<Occurrence<'a, S>> {
	let mut occurrences = Vec::new();
	for (segment_index, segment) in segments.iter().enumerate() {
		let content = segment.content();
		for issue in issues {
			occurrences.extend(whole_word_matches(content, &issue.phrase).map(|range| Occurrence {
				issue,
				segment,
				segment_index,
				start: range.start,
				end: range.end,
			}));
		}
	}
	occurrences
}

/// Iterates over whole-word, case-insensitive matches of `phrase` in `haystack`.
pub fn whole_word_matches<'h, 'p>(haystack: &'h str, phrase: &'p str) -> WholeWordMatches<'h, 'p> {
	WholeWordMatches {
		haystack,
		phrase,
		pos: if phrase.is_empty() { haystack.len() + 1 } else { 0 },
	}
}

/// Iterator returned by [`whole_word_matches`].
#[derive(Debug, Clone)]
pub struct WholeWordMatches<'h, 'p> {
	haystack: &'h str,
	phrase: &'p str,
	pos: usize,
}

impl Iterator for WholeWordMatches<'_, '_> {
	type Item = Range<usize>;

	fn next(&mut self) -> Option<Self::Item> {
		while self.pos < self.haystack.len() {
			let start = self.pos;
			let rest = &self.haystack[start..];
			self.pos += rest.chars().next().map_or(1, char::len_utf8);

			let Some(len) = prefix_match_len(rest, self.phrase) else {
				continue;
			};
			let end = start + len;
			if is_boundary(self.haystack[..start].chars().next_back()) && is_boundary(self.haystack[end..].chars().next()) {
				return Some(start..end);
			}
		}
		None
	}
}

/// Byte length of the prefix of `text` that equals `phrase` ignoring case.
fn prefix_match_len(text: &str, phrase: &str) -> Option<usize> {
	let mut chars = text.char_indices();
	for expected in phrase.chars() {
		let (_, actual) = chars.next()?;
		if !eq_ignore_case(actual, expected) {
			return None;
		}
	}
	Some(chars.next().map_or(text.len(), |(idx, _)| idx))
}

fn eq_ignore_case(a: char, b: char) -> bool {
	a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn is_boundary(neighbor: Option<char>) -> bool {
	neighbor.is_none_or(|c| !c.is_ascii_alphanumeric())
}
