use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use praxify_validate::ValidateError;

use super::*;

/// Scripted validator: pops one `(delay, outcome)` per call and records every request.
#[derive(Default)]
struct ScriptedValidator {
	script: Mutex<VecDeque<(Duration, Option<ValidationResult>)>>,
	requests: Mutex<Vec<ValidationRequest>>,
}

impl ScriptedValidator {
	fn then_ok(self, delay: Duration, result: ValidationResult) -> Self {
		self.script.lock().push_back((delay, Some(result)));
		self
	}

	fn then_err(self, delay: Duration) -> Self {
		self.script.lock().push_back((delay, None));
		self
	}

	fn requests(&self) -> Vec<ValidationRequest> {
		self.requests.lock().clone()
	}
}

#[async_trait]
impl Validator for ScriptedValidator {
	async fn validate(&self, request: ValidationRequest) -> praxify_validate::Result<ValidationResult> {
		self.requests.lock().push(request);
		let (delay, outcome) = self.script.lock().pop_front().unwrap_or_default();
		if !delay.is_zero() {
			tokio::time::sleep(delay).await;
		}
		outcome.ok_or(ValidateError::Status { status: 503 })
	}
}

fn result_with(phrase: &str, score: f64) -> ValidationResult {
	ValidationResult {
		issues: vec![Issue::new(phrase, format!("clarify {phrase}"), "ambiguity")],
		score: Some(score),
		..Default::default()
	}
}

fn scheduler(validator: &Arc<ScriptedValidator>) -> ValidationScheduler {
	let validator: Arc<dyn Validator> = validator.clone();
	ValidationScheduler::new(validator, SchedulerConfig::default())
}

/// Lets spawned timer and request tasks run to their next suspension point.
async fn settle() {
	for _ in 0..16 {
		tokio::task::yield_now().await;
	}
}

async fn advance(ms: u64) {
	tokio::time::advance(Duration::from_millis(ms)).await;
	settle().await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn rapid_edits_coalesce_into_one_request_with_last_text() {
	let validator = Arc::new(ScriptedValidator::default().then_ok(Duration::ZERO, result_with("fast", 90.0)));
	let mut scheduler = scheduler(&validator);

	for text in ["The app must", "The app must be", "The app must be fast."] {
		scheduler.on_text_changed(text);
		advance(300).await;
	}
	assert!(validator.requests().is_empty());
	assert_eq!(scheduler.snapshot().status, ValidationStatus::Pending);

	advance(800).await;

	let requests = validator.requests();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].document, "The app must be fast.");
	assert_eq!(requests[0].focus_areas, vec!["ambiguity".to_string(), "completeness".to_string()]);

	let snapshot = scheduler.snapshot();
	assert_eq!(snapshot.issues().len(), 1);
	assert_eq!(snapshot.score(), Some(90.0));
	assert_eq!(snapshot.status, ValidationStatus::Idle);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiet_period_must_fully_elapse() {
	let validator = Arc::new(ScriptedValidator::default().then_ok(Duration::ZERO, result_with("fast", 90.0)));
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	assert!(scheduler.timer_armed());
	advance(900).await;
	assert!(validator.requests().is_empty());

	advance(200).await;
	assert_eq!(validator.requests().len(), 1);
	assert!(!scheduler.timer_armed());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiet_period_starts_at_the_edit_not_the_first_poll() {
	let validator = Arc::new(ScriptedValidator::default().then_ok(Duration::ZERO, result_with("fast", 90.0)));
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	// The timer task has not been polled yet when the clock moves.
	tokio::time::advance(DEFAULT_DEBOUNCE).await;
	settle().await;

	assert_eq!(validator.requests().len(), 1);
	assert_eq!(scheduler.snapshot().issues().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn short_text_clears_immediately_without_request() {
	let validator = Arc::new(ScriptedValidator::default().then_ok(Duration::ZERO, result_with("fast", 90.0)));
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	advance(1100).await;
	assert_eq!(scheduler.snapshot().issues().len(), 1);

	let mut rx = scheduler.subscribe();
	scheduler.on_text_changed("too short");
	assert!(rx.has_changed().unwrap());
	let snapshot = rx.borrow_and_update().clone();
	assert!(snapshot.result.is_empty());
	assert_eq!(snapshot.status, ValidationStatus::Idle);

	scheduler.on_text_changed("");
	advance(5000).await;
	assert_eq!(validator.requests().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn short_text_cancels_pending_timer() {
	let validator = Arc::new(ScriptedValidator::default());
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	advance(500).await;
	scheduler.on_text_changed("The app");
	advance(5000).await;

	assert!(validator.requests().is_empty());
	assert_eq!(scheduler.snapshot().status, ValidationStatus::Idle);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn result_is_last_known_good_while_validating() {
	let validator = Arc::new(
		ScriptedValidator::default()
			.then_ok(Duration::ZERO, result_with("fast", 70.0))
			.then_ok(Duration::from_secs(2), result_with("robust", 85.0)),
	);
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	advance(1100).await;

	scheduler.on_text_changed("The app must be fast and robust.");
	advance(1100).await;

	let snapshot = scheduler.snapshot();
	assert!(snapshot.is_validating());
	assert_eq!(snapshot.issues()[0].phrase, "fast");

	advance(2100).await;
	let snapshot = scheduler.snapshot();
	assert!(!snapshot.is_validating());
	assert_eq!(snapshot.issues()[0].phrase, "robust");
	assert_eq!(snapshot.score(), Some(85.0));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_superseded_response_never_overwrites_newer_result() {
	let validator = Arc::new(
		ScriptedValidator::default()
			.then_ok(Duration::from_secs(10), result_with("old", 10.0))
			.then_ok(Duration::from_millis(100), result_with("new", 95.0)),
	);
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("first version of the text");
	advance(1100).await;
	scheduler.on_text_changed("second version of the text");
	advance(1100).await;
	advance(200).await;

	assert_eq!(validator.requests().len(), 2);
	assert_eq!(scheduler.snapshot().issues()[0].phrase, "new");

	advance(20_000).await;
	let snapshot = scheduler.snapshot();
	assert_eq!(snapshot.issues()[0].phrase, "new");
	assert_eq!(snapshot.score(), Some(95.0));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn response_with_outdated_id_is_discarded() {
	let validator = Arc::new(ScriptedValidator::default());
	let scheduler = scheduler(&validator);
	let shared = &scheduler.shared;

	shared.state.send_modify(|s| s.latest_request = RequestId(7));
	shared.complete(RequestId(6), &CancellationToken::new(), Ok(result_with("stale", 1.0)));
	assert!(scheduler.snapshot().result.is_empty());

	shared.complete(RequestId(7), &CancellationToken::new(), Ok(result_with("current", 99.0)));
	assert_eq!(scheduler.snapshot().issues()[0].phrase, "current");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failure_clears_result_and_marks_unavailable() {
	let validator = Arc::new(
		ScriptedValidator::default()
			.then_ok(Duration::ZERO, result_with("fast", 90.0))
			.then_err(Duration::ZERO),
	);
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	advance(1100).await;
	assert_eq!(scheduler.snapshot().issues().len(), 1);

	scheduler.on_text_changed("The app must be quick.");
	advance(1100).await;

	let snapshot = scheduler.snapshot();
	assert!(snapshot.issues().is_empty());
	assert_eq!(snapshot.score(), None);
	assert_eq!(snapshot.status, ValidationStatus::Unavailable);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn short_text_invalidates_in_flight_response() {
	let validator = Arc::new(ScriptedValidator::default().then_ok(Duration::from_secs(3), result_with("fast", 90.0)));
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	advance(1100).await;
	assert!(scheduler.snapshot().is_validating());

	scheduler.on_text_changed("The");
	advance(5000).await;

	let snapshot = scheduler.snapshot();
	assert!(snapshot.result.is_empty());
	assert_eq!(snapshot.status, ValidationStatus::Idle);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_stops_timer_and_keeps_result() {
	let validator = Arc::new(ScriptedValidator::default().then_ok(Duration::ZERO, result_with("fast", 90.0)));
	let mut scheduler = scheduler(&validator);

	scheduler.on_text_changed("The app must be fast.");
	advance(1100).await;
	scheduler.on_text_changed("The app must be faster.");
	scheduler.cancel();
	advance(5000).await;

	assert_eq!(validator.requests().len(), 1);
	let snapshot = scheduler.snapshot();
	assert_eq!(snapshot.status, ValidationStatus::Idle);
	assert_eq!(snapshot.issues()[0].phrase, "fast");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn request_ids_are_monotonic() {
	let validator = Arc::new(ScriptedValidator::default());
	let scheduler = scheduler(&validator);
	let shared = &scheduler.shared;
	assert_eq!(shared.issue_request(), RequestId(1));
	assert_eq!(shared.issue_request(), RequestId(2));
	assert!(shared.issue_request() > RequestId(2));
}
