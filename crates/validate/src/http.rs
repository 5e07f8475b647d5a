use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, ValidateError, ValidationRequest, ValidationResult, Validator};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const VALIDATE_PATH: &str = "/api/validate";
const HEALTH_PATH: &str = "/api/validate/health";

/// [`Validator`] backed by the HTTP validation endpoint.
///
/// Timeouts are left to the underlying client; pass a preconfigured
/// [`reqwest::Client`] through [`HttpValidator::with_client`] to set them.
#[derive(Debug, Clone)]
pub struct HttpValidator {
	client: reqwest::Client,
	base_url: String,
}

/// Health report from `GET /api/validate/health`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthReport {
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub service: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub self_contained: Option<bool>,
	#[serde(default)]
	pub features: Vec<String>,
}

impl HealthReport {
	pub fn is_healthy(&self) -> bool {
		self.status == "healthy"
	}
}

impl HttpValidator {
	/// Creates a validator for the endpoint rooted at `base_url`.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let client = reqwest::Client::builder().build()?;
		Ok(Self::with_client(client, base_url))
	}

	/// Creates a validator that sends requests through `client`.
	pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self { client, base_url }
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Probes the endpoint's health route.
	pub async fn health(&self) -> Result<HealthReport> {
		let response = self.client.get(self.endpoint(HEALTH_PATH)).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(ValidateError::Status { status: status.as_u16() });
		}
		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}
}

#[async_trait]
impl Validator for HttpValidator {
	async fn validate(&self, request: ValidationRequest) -> Result<ValidationResult> {
		let url = self.endpoint(VALIDATE_PATH);
		debug!(url = %url, chars = request.document.chars().count(), "validation request");

		let response = self.client.post(&url).json(&request).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(ValidateError::Status { status: status.as_u16() });
		}

		let body = response.bytes().await?;
		let result = ValidationResult::from_json(&body)?;
		debug!(issues = result.issue_count(), score = ?result.score, "validation response");
		Ok(result)
	}
}
