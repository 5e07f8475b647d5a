//! CLI schema for the praxify binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "praxify")]
#[command(about = "Highlight ambiguous and incomplete phrasing in requirements documents")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to praxify/config.toml in the platform config directory)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Base URL of the validation service, overriding config and environment
	#[arg(long, global = true, value_name = "URL")]
	pub api_url: Option<String>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Validate a document and print its highlights
	Check {
		/// Plain-text document to check
		file: PathBuf,

		/// Print the overlay frame as JSON
		#[arg(long)]
		json: bool,

		/// Wrap width of the layout grid, in cells
		#[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
		columns: Option<u16>,
	},
	/// Probe the validation service
	Health {
		/// Print the health report as JSON
		#[arg(long)]
		json: bool,
	},
}
