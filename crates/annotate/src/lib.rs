#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Real-time validation annotations for a live-edited document.
//!
//! Edits flow through a debounced [`ValidationScheduler`] to a
//! [`Validator`](praxify_validate::Validator). The returned issues are
//! located in the document's text segments as whole-word matches
//! ([`locate`]), turned into container-relative highlight boxes
//! ([`compose`]), and explained on hover by a [`TooltipController`].
//!
//! [`AnnotationSession`] wires the pieces together for one document and
//! publishes an [`OverlayFrame`] after every change. [`GridLayout`] is a
//! ready-made monospace [`DocumentSurface`](praxify_primitives::DocumentSurface).

pub mod compose;
pub mod grid;
pub mod locate;
pub mod scheduler;
pub mod session;
pub mod tooltip;

pub use compose::{Highlight, OverlayCompositor, compose};
pub use grid::{CellMetrics, GridLayout, GridSegment};
pub use locate::{Occurrence, WholeWordMatches, locate, whole_word_matches};
pub use scheduler::{
	DEFAULT_DEBOUNCE, MIN_VALIDATION_CHARS, RequestId, SchedulerConfig, ValidationScheduler, ValidationSnapshot,
	ValidationStatus,
};
pub use session::{AnnotationSession, OverlayFrame, SessionConfig};
pub use tooltip::{TOOLTIP_GAP, Tooltip, TooltipController};
