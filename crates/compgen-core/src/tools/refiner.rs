//! Refiner trait and service errors.
//!
//! This module defines the `Refiner` trait, the seam between the deterministic
//! generator and the remote text-generation service, so that tests can swap
//! in a mock.

use async_trait::async_trait;
use compgen_pm::PromptError;

/// Failures of the refinement service call.
///
/// None of these are retried; they are handed to the caller as-is.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// The API key environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    /// The prompt for the service could not be rendered.
    #[error("failed to build refinement prompt: {0}")]
    Prompt(#[from] PromptError),

    /// Connection, timeout or decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response could not be decoded.
    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    /// The response carried no completion.
    #[error("service returned no choices")]
    EmptyResponse,
}

/// Refiner trait.
///
/// Takes generated component source and returns a corrected version of the
/// same artifact. Implementations may call a remote service or return canned
/// text for testing.
#[async_trait]
pub trait Refiner: Send + Sync {
    /// Returns the refined text, trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceError` if the service cannot be reached or answers
    /// with an error.
    async fn refine(&self, code: &str) -> Result<String, ServiceError>;
}
