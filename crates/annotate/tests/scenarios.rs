#![allow(unused_crate_dependencies)]
//! End-to-end annotation scenarios on a monospace grid.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use praxify_annotate::{
	AnnotationSession, CellMetrics, GridLayout, OverlayFrame, SessionConfig, ValidationStatus, locate,
};
use praxify_primitives::{DocumentSurface, Issue, Point, ScrollOffset};
use praxify_validate::{ValidateError, ValidationRequest, ValidationResult, Validator};
use pretty_assertions::assert_eq;

/// Answers every request with the issues registered for the submitted text.
#[derive(Default)]
struct StubValidator {
	answers: Mutex<Vec<(String, Option<ValidationResult>)>>,
	seen: Mutex<Vec<String>>,
}

impl StubValidator {
	fn answer(self, text: &str, issues: Vec<Issue>, score: f64) -> Self {
		let result = ValidationResult {
			issues,
			score: Some(score),
			..Default::default()
		};
		self.answers.lock().push((text.to_string(), Some(result)));
		self
	}

	fn fail(self, text: &str) -> Self {
		self.answers.lock().push((text.to_string(), None));
		self
	}
}

#[async_trait]
impl Validator for StubValidator {
	async fn validate(&self, request: ValidationRequest) -> praxify_validate::Result<ValidationResult> {
		self.seen.lock().push(request.document.clone());
		tokio::time::sleep(Duration::from_millis(50)).await;
		let answer = self
			.answers
			.lock()
			.iter()
			.find(|(text, _)| *text == request.document)
			.map(|(_, result)| result.clone());
		match answer {
			Some(Some(result)) => Ok(result),
			_ => Err(ValidateError::Status { status: 500 }),
		}
	}
}

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn grid(text: &str) -> GridLayout {
	GridLayout::new(text, CellMetrics::default()).with_origin(Point::new(40.0, 200.0))
}

fn new_session(validator: StubValidator) -> (AnnotationSession, Arc<StubValidator>) {
	let validator = Arc::new(validator);
	let dyn_validator: Arc<dyn Validator> = validator.clone();
	(AnnotationSession::new(dyn_validator, SessionConfig::default()), validator)
}

async fn run_to_idle(session: &mut AnnotationSession, doc: &GridLayout) -> OverlayFrame {
	session.on_document_changed(doc);
	while matches!(
		session.frame().status,
		ValidationStatus::Pending | ValidationStatus::Validating { .. }
	) {
		assert!(session.changed().await);
		session.sync(doc);
	}
	session.frame()
}

fn perf_issue() -> Issue {
	Issue::new("fast", "Specify a measurable performance target", "ambiguity")
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn ambiguous_phrase_is_highlighted_and_explained_on_hover() {
	init_tracing();
	let text = "The app must be fast.";
	let (mut session, validator) = new_session(StubValidator::default().answer(text, vec![perf_issue()], 64.0));
	let doc = grid(text);

	let issues = [perf_issue()];
	let occurrences = locate(doc.segments(), &issues);
	assert_eq!(occurrences.len(), 1);
	assert_eq!(occurrences[0].range(), 16..20);

	let frame = run_to_idle(&mut session, &doc).await;
	assert_eq!(*validator.seen.lock(), vec![text.to_string()]);
	assert_eq!(frame.highlights.len(), 1);
	assert!(!frame.highlights[0].bounds.is_empty());
	assert_eq!(frame.score, Some(64.0));

	let id = frame.highlights[0].id.clone();
	let tooltip = session.pointer_enter(&id, ScrollOffset::default()).cloned();
	assert_eq!(
		tooltip.map(|t| t.text),
		Some("Specify a measurable performance target".to_string())
	);
	assert!(session.frame().tooltip.is_some());

	session.pointer_leave(&id);
	assert!(session.frame().tooltip.is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn phrase_inside_longer_word_is_not_highlighted() {
	init_tracing();
	let text = "category theory basics";
	let cat = Issue::new("cat", "Avoid informal shorthand", "clarity");
	let (mut session, _) = new_session(StubValidator::default().answer(text, vec![cat.clone()], 90.0));
	let doc = grid(text);

	assert!(locate(doc.segments(), &[cat]).is_empty());

	let frame = run_to_idle(&mut session, &doc).await;
	assert_eq!(frame.issue_count, 1);
	assert!(frame.highlights.is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn repeated_phrase_gets_one_highlight_per_occurrence() {
	init_tracing();
	let text = "Login must be fast.\nSearch must be fast, too.\n";
	let (mut session, _) = new_session(StubValidator::default().answer(text, vec![perf_issue()], 55.0));
	let doc = grid(text);

	let frame = run_to_idle(&mut session, &doc).await;
	assert_eq!(frame.highlights.len(), 2);
	assert_ne!(frame.highlights[0].bounds, frame.highlights[1].bounds);
	assert_ne!(frame.highlights[0].id, frame.highlights[1].id);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn burst_of_edits_validates_only_the_final_text() {
	init_tracing();
	let final_text = "The system should be reliable.";
	let reliable = Issue::new("reliable", "State an availability target", "ambiguity");
	let (mut session, validator) = new_session(StubValidator::default().answer(final_text, vec![reliable], 70.0));

	let mut doc = grid("");
	for end in (12..=final_text.len()).step_by(3).chain([final_text.len()]) {
		doc.set_text(&final_text[..end]);
		session.on_document_changed(&doc);
		tokio::time::sleep(Duration::from_millis(200)).await;
	}

	let frame = run_to_idle(&mut session, &doc).await;
	assert_eq!(*validator.seen.lock(), vec![final_text.to_string()]);
	assert_eq!(frame.highlights.len(), 1);
	assert_eq!(frame.highlights[0].phrase, "reliable");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_validation_degrades_to_no_highlights() {
	init_tracing();
	let good = "The app must be fast.";
	let bad = "The app must be fast and cheap.";
	let (mut session, _) = new_session(
		StubValidator::default()
			.answer(good, vec![perf_issue()], 64.0)
			.fail(bad),
	);

	let mut doc = grid(good);
	assert_eq!(run_to_idle(&mut session, &doc).await.highlights.len(), 1);

	doc.set_text(bad);
	let frame = run_to_idle(&mut session, &doc).await;
	assert_eq!(frame.status, ValidationStatus::Unavailable);
	assert!(frame.highlights.is_empty());
	assert_eq!(frame.score, None);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn frame_serializes_for_renderers() {
	init_tracing();
	let text = "The app must be fast.";
	let (mut session, _) = new_session(StubValidator::default().answer(text, vec![perf_issue()], 64.0));
	let doc = grid(text);
	run_to_idle(&mut session, &doc).await;

	let json = serde_json::to_value(session.frame()).expect("frame serializes");
	assert_eq!(json["status"]["state"], "idle");
	assert_eq!(json["score"], 64.0);
	assert_eq!(json["highlights"][0]["id"], "fast-0");
	assert_eq!(json["highlights"][0]["bounds"]["left"], 128.0);
	assert_eq!(json["tooltip"], serde_json::Value::Null);
}
