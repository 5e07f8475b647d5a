//! Debounced scheduling of validation requests.
//!
//! [`ValidationScheduler`] turns a stream of text-change events into at most
//! one validation request per quiet period and publishes the outcome as a
//! [`ValidationSnapshot`] over a [`watch`] channel.
//!
//! # Debounce
//!
//! Every call to [`ValidationScheduler::on_text_changed`] resets a
//! trailing-edge timer owned by the scheduler instance. Only the text of the
//! call that survives the full quiet period is sent.
//!
//! # Short input
//!
//! Text shorter than [`SchedulerConfig::min_chars`] clears the published
//! result immediately and never reaches the validator.
//!
//! # Stale responses
//!
//! Each dispatched request gets a fresh [`RequestId`]. A response is applied
//! only if its id is still the most recently issued one; anything older is
//! dropped. Dispatching a newer request also cancels the previous one through
//! its [`CancellationToken`], so a superseded request publishes nothing.
//!
//! # Failures
//!
//! Validator errors never escape the scheduler. They are logged, the result
//! is cleared, and the status becomes [`ValidationStatus::Unavailable`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use praxify_primitives::Issue;
use praxify_validate::{DEFAULT_FOCUS_AREAS, ValidationRequest, ValidationResult, Validator};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Quiet period before a validation request is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Texts shorter than this many characters are never validated.
pub const MIN_VALIDATION_CHARS: usize = 10;

/// Scheduler tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
	/// Trailing-edge quiet period.
	pub debounce: Duration,
	/// Minimum text length, in characters, worth validating.
	pub min_chars: usize,
	/// Focus areas sent with every request.
	pub focus_areas: Vec<String>,
}

impl Default for SchedulerConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			min_chars: MIN_VALIDATION_CHARS,
			focus_areas: DEFAULT_FOCUS_AREAS.iter().map(|s| (*s).to_string()).collect(),
		}
	}
}

/// Identifier of one dispatched validation request.
///
/// Ids start at 1 and increase per scheduler; 0 means nothing was issued yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct RequestId(pub u64);

/// What the scheduler is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ValidationStatus {
	/// Nothing scheduled or in flight.
	#[default]
	Idle,
	/// A debounce timer is armed.
	Pending,
	/// A request is in flight.
	Validating { request: RequestId },
	/// The last request failed; the result was cleared.
	Unavailable,
}

/// Published scheduler state.
///
/// `result` is last-known-good: it only changes when a response for the
/// latest request arrives, when that request fails, or when the text becomes
/// too short to validate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationSnapshot {
	pub result: ValidationResult,
	pub status: ValidationStatus,
	/// Most recently issued request id. Responses for any other id are discarded.
	pub latest_request: RequestId,
}

impl ValidationSnapshot {
	pub fn issues(&self) -> &[Issue] {
		&self.result.issues
	}

	pub fn score(&self) -> Option<f64> {
		self.result.score
	}

	pub fn is_validating(&self) -> bool {
		matches!(self.status, ValidationStatus::Validating { .. })
	}
}

struct Shared {
	validator: Arc<dyn Validator>,
	config: SchedulerConfig,
	issued: AtomicU64,
	state: watch::Sender<ValidationSnapshot>,
	/// Request awaiting a response, with the token that abandons it.
	in_flight: Mutex<Option<(RequestId, CancellationToken)>>,
	root: CancellationToken,
}

/// Debounces text changes into validation requests.
///
/// Must be used from within a tokio runtime.
pub struct ValidationScheduler {
	shared: Arc<Shared>,
	timer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ValidationScheduler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ValidationScheduler")
			.field("config", &self.shared.config)
			.field("state", &*self.shared.state.borrow())
			.field("timer_armed", &self.timer_armed())
			.finish()
	}
}

impl ValidationScheduler {
	pub fn new(validator: Arc<dyn Validator>, config: SchedulerConfig) -> Self {
		let (state, _) = watch::channel(ValidationSnapshot::default());
		Self {
			shared: Arc::new(Shared {
				validator,
				config,
				issued: AtomicU64::new(0),
				state,
				in_flight: Mutex::new(None),
				root: CancellationToken::new(),
			}),
			timer: None,
		}
	}

	pub fn config(&self) -> &SchedulerConfig {
		&self.shared.config
	}

	/// Subscribes to published snapshots.
	pub fn subscribe(&self) -> watch::Receiver<ValidationSnapshot> {
		self.shared.state.subscribe()
	}

	/// Returns a copy of the current snapshot.
	pub fn snapshot(&self) -> ValidationSnapshot {
		self.shared.state.borrow().clone()
	}

	/// Returns true while a debounce timer is armed and has not fired.
	pub fn timer_armed(&self) -> bool {
		self.timer.as_ref().is_some_and(|t| !t.is_finished())
	}

	/// Reports an edit. An empty string stands for absent text.
	pub fn on_text_changed(&mut self, text: &str) {
		self.disarm();

		let chars = text.chars().count();
		if chars < self.shared.config.min_chars {
			trace!(chars, min = self.shared.config.min_chars, "text below validation threshold");
			self.shared.clear();
			return;
		}

		self.shared.state.send_if_modified(|s| {
			if s.status == ValidationStatus::Pending {
				return false;
			}
			s.status = ValidationStatus::Pending;
			true
		});

		let shared = Arc::clone(&self.shared);
		let text = text.to_string();
		let debounce = shared.config.debounce;
		// Measured from the edit, not from when the runtime first polls the timer.
		let deadline = Instant::now() + debounce;
		trace!(chars, debounce_ms = debounce.as_millis() as u64, "validation timer armed");
		self.timer = Some(tokio::spawn(async move {
			tokio::time::sleep_until(deadline).await;
			shared.dispatch(text);
		}));
	}

	/// Cancels the armed timer and any in-flight request.
	///
	/// The published result is left as is.
	pub fn cancel(&mut self) {
		self.disarm();
		self.shared.cancel_in_flight();
		self.shared.state.send_if_modified(|s| {
			if s.status == ValidationStatus::Idle || s.status == ValidationStatus::Unavailable {
				return false;
			}
			s.status = ValidationStatus::Idle;
			true
		});
	}

	fn disarm(&mut self) {
		if let Some(timer) = self.timer.take() {
			timer.abort();
		}
	}
}

impl Drop for ValidationScheduler {
	fn drop(&mut self) {
		self.disarm();
		self.shared.root.cancel();
	}
}

impl Shared {
	/// Clears the result and invalidates any in-flight response.
	fn clear(&self) {
		self.cancel_in_flight();
		self.state.send_if_modified(|s| {
			s.latest_request = self.issue_request();
			let changed = !s.result.is_empty() || s.status != ValidationStatus::Idle;
			s.result = ValidationResult::default();
			s.status = ValidationStatus::Idle;
			changed
		});
	}

	fn issue_request(&self) -> RequestId {
		RequestId(self.issued.fetch_add(1, Ordering::AcqRel) + 1)
	}

	fn cancel_in_flight(&self) {
		if let Some((request, cancel)) = self.in_flight.lock().take() {
			trace!(request = request.0, "cancelling in-flight validation");
			cancel.cancel();
		}
	}

	fn dispatch(self: Arc<Self>, text: String) {
		let mut request = RequestId::default();
		self.state.send_modify(|s| {
			request = self.issue_request();
			s.latest_request = request;
			s.status = ValidationStatus::Validating { request };
		});

		let cancel = self.root.child_token();
		if let Some((previous, superseded)) = self.in_flight.lock().replace((request, cancel.clone())) {
			trace!(request = previous.0, "superseded by newer validation");
			superseded.cancel();
		}

		debug!(request = request.0, chars = text.chars().count(), "dispatching validation");
		let body = ValidationRequest::with_focus_areas(text, self.config.focus_areas.clone());
		tokio::spawn(async move {
			let outcome = tokio::select! {
				_ = cancel.cancelled() => {
					trace!(request = request.0, "validation cancelled");
					return;
				}
				outcome = self.validator.validate(body) => outcome,
			};
			self.complete(request, &cancel, outcome);
		});
	}

	fn complete(&self, request: RequestId, cancel: &CancellationToken, outcome: praxify_validate::Result<ValidationResult>) {
		{
			let mut slot = self.in_flight.lock();
			if slot.as_ref().is_some_and(|(current, _)| *current == request) {
				*slot = None;
			}
		}

		if cancel.is_cancelled() {
			trace!(request = request.0, "dropping response of cancelled validation");
			return;
		}

		if let Err(err) = &outcome {
			warn!(request = request.0, error = %err, "validation failed");
		}

		let applied = self.state.send_if_modified(|s| {
			if s.latest_request != request {
				return false;
			}
			let settled = if s.status == ValidationStatus::Pending {
				ValidationStatus::Pending
			} else {
				ValidationStatus::Idle
			};
			match outcome {
				Ok(result) => {
					s.result = result;
					s.status = settled;
				}
				Err(_) => {
					s.result = ValidationResult::default();
					s.status = if settled == ValidationStatus::Pending {
						settled
					} else {
						ValidationStatus::Unavailable
					};
				}
			}
			true
		});

		if applied {
			debug!(request = request.0, "validation result published");
		} else {
			debug!(request = request.0, "discarding stale validation response");
		}
	}
}

#[cfg(test)]
mod tests;
