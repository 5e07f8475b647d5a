#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Client side of the requirements validation endpoint.
//!
//! The endpoint analyses a requirements document and answers with a list of
//! issues, each naming the offending phrase, plus an overall quality score.
//! [`Validator`] is the seam the annotation scheduler talks to;
//! [`HttpValidator`] is the production implementation.

pub mod error;
mod http;
mod wire;

use async_trait::async_trait;

pub use error::{Result, ValidateError};
pub use http::{DEFAULT_API_URL, HealthReport, HttpValidator};
pub use wire::{DEFAULT_FOCUS_AREAS, ValidationRequest, ValidationResult};

/// Something that can validate a document.
///
/// Implementations must not retry on their own; the scheduler decides what
/// a failure means for the published state.
#[async_trait]
pub trait Validator: Send + Sync {
	async fn validate(&self, request: ValidationRequest) -> Result<ValidationResult>;
}
