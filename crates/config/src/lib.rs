#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Configuration for praxify.
//!
//! Configuration is written in TOML. Every key is optional and falls back to
//! the built-in default:
//!
//! ```toml
//! [validation]
//! api_url = "http://localhost:8000"
//! debounce_ms = 1000
//! min_length = 10
//! focus_areas = ["ambiguity", "completeness"]
//!
//! [overlay]
//! tooltip_gap = 8.0
//!
//! [layout]
//! columns = 80
//! cell_width = 8.0
//! line_height = 16.0
//! ```
//!
//! # Configuration Files
//!
//! [`Config::discover`] resolves settings in this order, later steps
//! overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An explicit file, or `praxify/config.toml` in the platform config
//!    directory (`~/.config` on Linux) when it exists
//! 3. The `PRAXIFY_API_URL` environment variable

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use praxify_annotate::{
	CellMetrics, DEFAULT_DEBOUNCE, MIN_VALIDATION_CHARS, SchedulerConfig, SessionConfig, TOOLTIP_GAP,
};
use praxify_validate::{DEFAULT_API_URL, DEFAULT_FOCUS_AREAS};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{ConfigError, Result};

/// Environment variable overriding [`ValidationConfig::api_url`].
pub const API_URL_ENV: &str = "PRAXIFY_API_URL";

/// Parsed configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub validation: ValidationConfig,
	pub overlay: OverlayConfig,
	pub layout: LayoutConfig,
}

/// `[validation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
	/// Base URL of the validation service.
	pub api_url: String,
	/// Quiet period in milliseconds. Zero validates on every edit.
	pub debounce_ms: u64,
	/// Minimum document length, in characters, worth validating.
	pub min_length: usize,
	pub focus_areas: Vec<String>,
}

impl Default for ValidationConfig {
	fn default() -> Self {
		Self {
			api_url: DEFAULT_API_URL.to_string(),
			debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
			min_length: MIN_VALIDATION_CHARS,
			focus_areas: DEFAULT_FOCUS_AREAS.iter().map(|s| (*s).to_string()).collect(),
		}
	}
}

/// `[overlay]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
	pub tooltip_gap: f64,
}

impl Default for OverlayConfig {
	fn default() -> Self {
		Self { tooltip_gap: TOOLTIP_GAP }
	}
}

/// `[layout]` section, used by the grid renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
	pub columns: usize,
	pub cell_width: f64,
	pub line_height: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let metrics = CellMetrics::default();
		Self {
			columns: metrics.columns,
			cell_width: metrics.cell_width,
			line_height: metrics.line_height,
		}
	}
}

impl Config {
	/// Parse a TOML string into a validated [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		debug!(path = %path.display(), "loaded config file");
		Self::parse(&content)
	}

	/// Default config file location, if the platform has a config directory.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("praxify").join("config.toml"))
	}

	/// Resolves the effective configuration.
	///
	/// An explicit `path` must exist. Without one, the default location is
	/// used only if present. Environment overrides are applied last.
	pub fn discover(path: Option<&Path>) -> Result<Self> {
		let mut config = match path {
			Some(path) => Self::load(path)?,
			None => match Self::default_path().filter(|p| p.is_file()) {
				Some(path) => Self::load(path)?,
				None => {
					debug!("no config file, using defaults");
					Self::default()
				}
			},
		};
		config.apply_env_with(|key| std::env::var(key).ok());
		Ok(config)
	}

	/// Applies environment overrides read through `lookup`.
	///
	/// Empty values are ignored.
	pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
			debug!(api_url = %url, "api url overridden from environment");
			self.validation.api_url = url;
		}
	}

	/// Checks value ranges that the schema alone cannot express.
	pub fn validate(&self) -> Result<()> {
		if self.validation.api_url.trim().is_empty() {
			return Err(invalid("validation.api_url", "must not be empty"));
		}
		if self.layout.columns == 0 {
			return Err(invalid("layout.columns", "must be greater than zero"));
		}
		positive("layout.cell_width", self.layout.cell_width)?;
		positive("layout.line_height", self.layout.line_height)?;
		if !self.overlay.tooltip_gap.is_finite() {
			return Err(invalid("overlay.tooltip_gap", "must be finite"));
		}
		Ok(())
	}

	pub fn scheduler_config(&self) -> SchedulerConfig {
		SchedulerConfig {
			debounce: Duration::from_millis(self.validation.debounce_ms),
			min_chars: self.validation.min_length,
			focus_areas: self.validation.focus_areas.clone(),
		}
	}

	pub fn session_config(&self) -> SessionConfig {
		SessionConfig {
			scheduler: self.scheduler_config(),
			tooltip_gap: self.overlay.tooltip_gap,
		}
	}

	pub fn cell_metrics(&self) -> CellMetrics {
		CellMetrics {
			columns: self.layout.columns,
			cell_width: self.layout.cell_width,
			line_height: self.layout.line_height,
		}
	}
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
	ConfigError::Invalid {
		field,
		reason: reason.into(),
	}
}

fn positive(field: &'static str, value: f64) -> Result<()> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(invalid(field, format!("must be positive and finite, got {value}")))
	}
}
