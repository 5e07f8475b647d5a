//! The annotation pipeline for one document.
//!
//! [`AnnotationSession`] wires a [`ValidationScheduler`], an
//! [`OverlayCompositor`] and a [`TooltipController`] together and publishes
//! the combined state as an [`OverlayFrame`]. The owner forwards edits with
//! [`AnnotationSession::on_document_changed`] and, whenever
//! [`AnnotationSession::changed`] resolves, calls
//! [`AnnotationSession::sync`] so new validation results reach the overlay.

use std::sync::Arc;

use praxify_primitives::{DocumentSurface, Point, ScrollOffset};
use praxify_validate::Validator;
use serde::Serialize;
use tokio::sync::watch;
use tracing::trace;

use crate::compose::{Highlight, OverlayCompositor};
use crate::scheduler::{SchedulerConfig, ValidationScheduler, ValidationSnapshot, ValidationStatus};
use crate::tooltip::{TOOLTIP_GAP, Tooltip, TooltipController};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
	pub scheduler: SchedulerConfig,
	/// Gap between a tooltip and the top of its highlight.
	pub tooltip_gap: f64,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			scheduler: SchedulerConfig::default(),
			tooltip_gap: TOOLTIP_GAP,
		}
	}
}

/// Everything a renderer needs to draw the overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OverlayFrame {
	pub highlights: Vec<Highlight>,
	pub tooltip: Option<Tooltip>,
	pub status: ValidationStatus,
	pub score: Option<f64>,
	pub issue_count: usize,
}

pub struct AnnotationSession {
	scheduler: ValidationScheduler,
	results: watch::Receiver<ValidationSnapshot>,
	snapshot: ValidationSnapshot,
	compositor: OverlayCompositor,
	tooltip: TooltipController,
	container: Point,
	frame: watch::Sender<OverlayFrame>,
}

impl std::fmt::Debug for AnnotationSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnnotationSession")
			.field("scheduler", &self.scheduler)
			.field("frame", &*self.frame.borrow())
			.finish_non_exhaustive()
	}
}

impl AnnotationSession {
	/// Creates a session. Must be called within a tokio runtime.
	pub fn new(validator: Arc<dyn Validator>, config: SessionConfig) -> Self {
		let scheduler = ValidationScheduler::new(validator, config.scheduler);
		let results = scheduler.subscribe();
		let (frame, _) = watch::channel(OverlayFrame::default());
		Self {
			scheduler,
			results,
			snapshot: ValidationSnapshot::default(),
			compositor: OverlayCompositor::new(),
			tooltip: TooltipController::new(config.tooltip_gap),
			container: Point::default(),
			frame,
		}
	}

	pub fn scheduler(&self) -> &ValidationScheduler {
		&self.scheduler
	}

	/// Reports an edit of `surface` and recomposes the overlay against it.
	///
	/// Always a full pass: an edit may move segments without touching the
	/// plain text.
	pub fn on_document_changed<D: DocumentSurface>(&mut self, surface: &D) {
		self.scheduler.on_text_changed(&surface.text());
		self.snapshot = self.results.borrow_and_update().clone();
		self.recompose(surface);
	}

	/// Applies the latest published validation state to the overlay.
	///
	/// Skips the pass when neither the text nor the issues changed, so it
	/// must not stand in for [`Self::on_document_changed`] after an edit.
	/// Returns true if the highlights were recomposed.
	pub fn sync<D: DocumentSurface>(&mut self, surface: &D) -> bool {
		self.snapshot = self.results.borrow_and_update().clone();
		self.container = surface.container_bounds().origin();
		let recomposed = self.compositor.update(surface, self.snapshot.issues());
		if recomposed {
			self.drop_orphaned_tooltip();
		}
		self.publish();
		recomposed
	}

	/// Recomposes unconditionally, for layout changes such as a resize.
	pub fn recompose<D: DocumentSurface>(&mut self, surface: &D) {
		self.container = surface.container_bounds().origin();
		self.compositor.recompose(surface, self.snapshot.issues());
		self.drop_orphaned_tooltip();
		self.publish();
	}

	/// Waits until the scheduler publishes a new snapshot.
	///
	/// Returns false once the scheduler is gone.
	pub async fn changed(&mut self) -> bool {
		self.results.changed().await.is_ok()
	}

	/// Cancels pending and in-flight validation.
	pub fn cancel(&mut self) {
		self.scheduler.cancel();
	}

	/// Handles the pointer entering the highlight `id`.
	///
	/// Returns `None` when no such highlight exists in the current pass.
	pub fn pointer_enter(&mut self, id: &str, scroll: ScrollOffset) -> Option<&Tooltip> {
		let highlight = self.compositor.highlight(id)?;
		let region = highlight.bounds.offset(self.container);
		self.tooltip.pointer_enter(highlight, region, scroll);
		self.publish();
		self.tooltip.active()
	}

	/// Handles the pointer leaving the highlight `id`.
	pub fn pointer_leave(&mut self, id: &str) -> bool {
		let left = self.tooltip.pointer_leave(id);
		if left {
			self.publish();
		}
		left
	}

	pub fn highlights(&self) -> &[Highlight] {
		self.compositor.highlights()
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.tooltip.active()
	}

	/// Validation state last applied by [`Self::sync`].
	pub fn snapshot(&self) -> &ValidationSnapshot {
		&self.snapshot
	}

	pub fn frame(&self) -> OverlayFrame {
		self.frame.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<OverlayFrame> {
		self.frame.subscribe()
	}

	fn drop_orphaned_tooltip(&mut self) {
		let orphaned = self
			.tooltip
			.active()
			.is_some_and(|t| self.compositor.highlight(&t.highlight_id).is_none_or(|h| h.suggestion != t.text));
		if orphaned {
			trace!("tooltip highlight gone after recomposition");
			self.tooltip.clear();
		}
	}

	fn publish(&self) {
		let next = OverlayFrame {
			highlights: self.compositor.highlights().to_vec(),
			tooltip: self.tooltip.active().cloned(),
			status: self.snapshot.status,
			score: self.snapshot.score(),
			issue_count: self.snapshot.result.issue_count(),
		};
		self.frame.send_if_modified(|frame| {
			if *frame == next {
				return false;
			}
			*frame = next;
			true
		});
	}
}
