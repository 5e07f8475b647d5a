//! JSON contract of `POST /api/validate`.
//!
//! Responses are decoded leniently. Missing arrays and scores default to
//! empty/absent, and each issue accepts three spellings for its phrase
//! (`word_or_phrase`, `word`, `phrase`) and two for its explanation
//! (`suggestion`, `description`). The first non-empty spelling wins.

use praxify_primitives::{DEFAULT_ISSUE_KIND, Issue, Severity};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Result;

/// Focus areas requested by the annotation layer.
pub const DEFAULT_FOCUS_AREAS: [&str; 2] = ["ambiguity", "completeness"];

/// Request body for the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRequest {
	/// Document text to validate.
	pub document: String,
	/// Validation aspects the endpoint should focus on.
	pub focus_areas: Vec<String>,
}

impl ValidationRequest {
	/// Creates a request with [`DEFAULT_FOCUS_AREAS`].
	pub fn new(document: impl Into<String>) -> Self {
		Self::with_focus_areas(document, DEFAULT_FOCUS_AREAS.iter().map(|s| (*s).to_string()).collect())
	}

	pub fn with_focus_areas(document: impl Into<String>, focus_areas: Vec<String>) -> Self {
		Self {
			document: document.into(),
			focus_areas,
		}
	}
}

/// Outcome of one successful validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationResult {
	/// Issues in response order.
	pub issues: Vec<Issue>,
	/// Overall quality score (0-100), when reported.
	pub score: Option<f64>,
	/// Brief summary, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	/// General improvement suggestions.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub suggestions: Vec<String>,
	/// Word count reported by the endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub word_count: Option<u64>,
}

impl ValidationResult {
	/// Decodes a response body.
	pub fn from_json(body: &[u8]) -> Result<Self> {
		let wire: WireResponse = serde_json::from_slice(body)?;
		Ok(wire.into())
	}

	/// Number of issues, as shown by issue-count displays.
	pub fn issue_count(&self) -> usize {
		self.issues.len()
	}

	/// Returns true when there are no issues and no score.
	pub fn is_empty(&self) -> bool {
		self.issues.is_empty() && self.score.is_none()
	}
}

#[derive(Debug, Deserialize)]
struct WireResponse {
	#[serde(default)]
	issues: Option<Vec<WireIssue>>,
	#[serde(default)]
	score: Option<f64>,
	#[serde(default)]
	summary: Option<String>,
	#[serde(default)]
	suggestions: Option<Vec<String>>,
	#[serde(default)]
	word_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct WireIssue {
	#[serde(default)]
	word_or_phrase: Option<String>,
	#[serde(default)]
	word: Option<String>,
	#[serde(default)]
	phrase: Option<String>,
	#[serde(default)]
	suggestion: Option<String>,
	#[serde(default)]
	description: Option<String>,
	#[serde(default, rename = "type")]
	kind: Option<String>,
	#[serde(default)]
	severity: Option<String>,
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
	candidates.into_iter().flatten().find(|s| !s.is_empty())
}

impl WireIssue {
	fn into_issue(self) -> Option<Issue> {
		let Some(phrase) = first_non_empty([self.word_or_phrase, self.word, self.phrase]) else {
			trace!("dropping issue without phrase");
			return None;
		};
		let suggestion = first_non_empty([self.suggestion, self.description]).unwrap_or_default();
		let kind = self
			.kind
			.filter(|k| !k.is_empty())
			.unwrap_or_else(|| DEFAULT_ISSUE_KIND.to_string());
		Some(Issue {
			phrase,
			suggestion,
			kind,
			severity: self.severity.as_deref().and_then(Severity::parse),
		})
	}
}

impl From<WireResponse> for ValidationResult {
	fn from(wire: WireResponse) -> Self {
		Self {
			issues: wire
				.issues
				.unwrap_or_default()
				.into_iter()
				.filter_map(WireIssue::into_issue)
				.collect(),
			score: wire.score,
			summary: wire.summary,
			suggestions: wire.suggestions.unwrap_or_default(),
			word_count: wire.word_count,
		}
	}
}
