//! Human-readable output.

use std::io::{self, Write};

use praxify_annotate::{OverlayFrame, ValidationStatus};
use praxify_primitives::ScoreBand;
use praxify_validate::HealthReport;

/// Writes the highlights of `frame`, one block per highlight, followed by a summary line.
pub fn write_frame(out: &mut impl Write, frame: &OverlayFrame) -> io::Result<()> {
	if frame.status == ValidationStatus::Unavailable {
		return writeln!(out, "validation unavailable");
	}

	for highlight in &frame.highlights {
		let b = &highlight.bounds;
		writeln!(
			out,
			"{:?} [{}] at {},{} ({}x{})",
			highlight.phrase, highlight.kind, b.left, b.top, b.width, b.height
		)?;
		writeln!(out, "    {}", highlight.suggestion)?;
	}

	write!(
		out,
		"{} {}, {} {}",
		frame.issue_count,
		plural(frame.issue_count, "issue", "issues"),
		frame.highlights.len(),
		plural(frame.highlights.len(), "highlight", "highlights"),
	)?;
	match frame.score {
		Some(score) => writeln!(out, "; score {score} ({})", ScoreBand::from_score(score).as_str()),
		None => writeln!(out, "; no score"),
	}
}

pub fn write_health(out: &mut impl Write, url: &str, report: &HealthReport) -> io::Result<()> {
	let service = if report.service.is_empty() { "validation service" } else { &report.service };
	writeln!(out, "{service} at {url}: {}", report.status)?;
	if let Some(self_contained) = report.self_contained {
		writeln!(out, "    self-contained: {self_contained}")?;
	}
	if !report.features.is_empty() {
		writeln!(out, "    features: {}", report.features.join(", "))?;
	}
	Ok(())
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
	if n == 1 { one } else { many }
}
