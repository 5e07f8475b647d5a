use serde::{Deserialize, Serialize};

/// Category label used when a validator reports an issue without one.
pub const DEFAULT_ISSUE_KIND: &str = "Issue";

/// A quality issue reported by the validator against a phrase in the document.
///
/// Issues are immutable once received. `phrase` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
	/// The word or phrase the issue refers to.
	pub phrase: String,
	/// Suggested improvement or explanation shown on hover.
	pub suggestion: String,
	/// Category label (e.g. "ambiguity").
	pub kind: String,
	/// Severity, when the validator provides one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub severity: Option<Severity>,
}

impl Issue {
	/// Creates an issue without severity.
	pub fn new(phrase: impl Into<String>, suggestion: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			phrase: phrase.into(),
			suggestion: suggestion.into(),
			kind: kind.into(),
			severity: None,
		}
	}

	/// Attaches a severity.
	pub fn with_severity(mut self, severity: Severity) -> Self {
		self.severity = Some(severity);
		self
	}
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Low,
	Medium,
	High,
	Critical,
}

impl Severity {
	/// Parses a severity label case-insensitively, returning `None` for unknown labels.
	pub fn parse(label: &str) -> Option<Self> {
		match label.trim().to_ascii_lowercase().as_str() {
			"low" => Some(Self::Low),
			"medium" => Some(Self::Medium),
			"high" => Some(Self::High),
			"critical" => Some(Self::Critical),
			_ => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
			Self::Critical => "critical",
		}
	}
}

/// Coarse quality band for a 0-100 validation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
	/// Score of 80 or above.
	Good,
	/// Score of 60 up to 80.
	Fair,
	/// Anything below 60.
	Poor,
}

impl ScoreBand {
	pub fn from_score(score: f64) -> Self {
		if score >= 80.0 {
			Self::Good
		} else if score >= 60.0 {
			Self::Fair
		} else {
			Self::Poor
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Good => "good",
			Self::Fair => "fair",
			Self::Poor => "poor",
		}
	}
}
