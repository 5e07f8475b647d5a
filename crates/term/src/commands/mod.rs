//! Subcommand implementations.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use praxify_annotate::{AnnotationSession, GridLayout, ValidationStatus};
use praxify_config::Config;
use praxify_validate::HttpValidator;
use tracing::{debug, warn};

use crate::report;

/// How a command ended, mapped to the process exit status by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Success,
	/// The validation service could not be reached or refused the request.
	Unavailable,
	/// The service answered the health probe but is not healthy.
	Unhealthy,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
	pub json: bool,
	pub columns: Option<usize>,
}

/// Validates `document` once and writes its overlay to `out`.
///
/// The debounce quiet period is skipped since the document never changes.
pub async fn check(config: &Config, document: &str, options: CheckOptions, out: &mut impl Write) -> anyhow::Result<Outcome> {
	let mut metrics = config.cell_metrics();
	if let Some(columns) = options.columns {
		metrics.columns = columns;
	}
	let layout = GridLayout::new(document, metrics);

	let validator = HttpValidator::new(config.validation.api_url.as_str()).context("building HTTP client")?;
	let mut session_config = config.session_config();
	session_config.scheduler.debounce = Duration::ZERO;

	let min_chars = session_config.scheduler.min_chars;
	let chars = document.chars().count();
	if chars < min_chars {
		warn!(chars, min_chars, "document too short to validate");
	}

	let mut session = AnnotationSession::new(Arc::new(validator), session_config);
	session.on_document_changed(&layout);
	while matches!(
		session.snapshot().status,
		ValidationStatus::Pending | ValidationStatus::Validating { .. }
	) {
		if !session.changed().await {
			break;
		}
		session.sync(&layout);
	}

	let frame = session.frame();
	debug!(highlights = frame.highlights.len(), issues = frame.issue_count, "check finished");
	if options.json {
		serde_json::to_writer_pretty(&mut *out, &frame).context("encoding frame")?;
		writeln!(out)?;
	} else {
		report::write_frame(out, &frame)?;
	}

	Ok(match frame.status {
		ValidationStatus::Unavailable => Outcome::Unavailable,
		_ => Outcome::Success,
	})
}

/// Probes the validation service and writes its health report to `out`.
pub async fn health(config: &Config, json: bool, out: &mut impl Write) -> anyhow::Result<Outcome> {
	let url = config.validation.api_url.as_str();
	let validator = HttpValidator::new(url).context("building HTTP client")?;
	let probe = match validator.health().await {
		Ok(probe) => probe,
		Err(err) => {
			warn!(url, error = %err, "health probe failed");
			writeln!(out, "validation service at {url} is unavailable: {err}")?;
			return Ok(Outcome::Unavailable);
		}
	};

	if json {
		serde_json::to_writer_pretty(&mut *out, &probe).context("encoding health report")?;
		writeln!(out)?;
	} else {
		report::write_health(out, url, &probe)?;
	}

	Ok(if probe.is_healthy() { Outcome::Success } else { Outcome::Unhealthy })
}
