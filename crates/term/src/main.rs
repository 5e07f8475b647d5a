#![cfg_attr(test, allow(unused_crate_dependencies))]
//! praxify command-line frontend.
//!
//! Lays a plain-text requirements document out on a cell grid, runs it
//! through the annotation pipeline against the configured validation
//! service, and prints the resulting highlights.

mod cli;
mod commands;
mod report;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use commands::{CheckOptions, Outcome};
use praxify_config::Config;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let mut config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
	if let Some(url) = cli.api_url {
		config.validation.api_url = url;
	}
	debug!(api_url = %config.validation.api_url, "configuration resolved");

	let mut stdout = std::io::stdout().lock();
	let outcome = match cli.command {
		Command::Check { file, json, columns } => {
			let document = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
			let options = CheckOptions {
				json,
				columns: columns.map(usize::from),
			};
			commands::check(&config, &document, options, &mut stdout).await?
		}
		Command::Health { json } => commands::health(&config, json, &mut stdout).await?,
	};
	stdout.flush()?;

	Ok(match outcome {
		Outcome::Success => ExitCode::SUCCESS,
		Outcome::Unavailable => ExitCode::from(2),
		Outcome::Unhealthy => ExitCode::FAILURE,
	})
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("praxify=debug,praxify_annotate=debug,praxify_validate=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
