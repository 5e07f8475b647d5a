//! Single-tooltip hover state.
//!
//! The controller is either idle or bound to exactly one highlight. Entering
//! another highlight rebinds in one step, so no idle state is observable in
//! between. The anchor is never clamped to the viewport and may lie partly
//! off-screen near document edges.

use praxify_primitives::{Rect, ScrollOffset};
use serde::Serialize;
use tracing::trace;

use crate::compose::Highlight;

/// Vertical gap between a tooltip anchor and the top of its region.
pub const TOOLTIP_GAP: f64 = 8.0;

/// The visible tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
	/// Id of the highlight this tooltip is bound to.
	pub highlight_id: String,
	pub text: String,
	pub kind: String,
	/// Document-space y of the tooltip's bottom edge.
	pub anchor_top: f64,
	/// Document-space x of the tooltip's horizontal center.
	pub anchor_left: f64,
}

#[derive(Debug, Clone)]
pub struct TooltipController {
	active: Option<Tooltip>,
	gap: f64,
}

impl Default for TooltipController {
	fn default() -> Self {
		Self::new(TOOLTIP_GAP)
	}
}

impl TooltipController {
	pub fn new(gap: f64) -> Self {
		Self { active: None, gap }
	}

	/// Activates the tooltip for `highlight`, replacing any active one.
	///
	/// `region` is the viewport bounding box of the highlight's rendered region.
	pub fn pointer_enter(&mut self, highlight: &Highlight, region: Rect, scroll: ScrollOffset) -> &Tooltip {
		trace!(highlight = %highlight.id, "tooltip activated");
		self.active.insert(Tooltip {
			highlight_id: highlight.id.clone(),
			text: highlight.suggestion.clone(),
			kind: highlight.kind.clone(),
			anchor_top: region.top + scroll.y - self.gap,
			anchor_left: region.center_x(),
		})
	}

	/// Deactivates the tooltip if it is bound to `highlight_id`.
	///
	/// Returns true if a tooltip was dismissed. Leaving a region whose tooltip
	/// was already replaced is a no-op.
	pub fn pointer_leave(&mut self, highlight_id: &str) -> bool {
		if self.active.as_ref().is_some_and(|t| t.highlight_id == highlight_id) {
			trace!(highlight = highlight_id, "tooltip dismissed");
			self.active = None;
			return true;
		}
		false
	}

	pub fn active(&self) -> Option<&Tooltip> {
		self.active.as_ref()
	}

	/// Drops the active tooltip unconditionally.
	pub fn clear(&mut self) -> bool {
		self.active.take().is_some()
	}
}
