//! Error types for compgen operations.
//!
//! This module defines the error variants that can occur while loading
//! configuration, validating a submission, rendering a component and calling
//! the refinement service. All errors use `thiserror`.

use crate::tools::refiner::ServiceError;
use crate::workflows::validate::ValidationErrors;
use compgen_pm::PromptError;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for compgen operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CompgenError {
    // Submission errors
    /// The submitted batch of descriptors broke one or more naming rules.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A request file could not be parsed into descriptors.
    #[error("invalid request file {path}: {reason}")]
    InvalidRequestFile {
        /// Path of the request file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    // Template errors
    /// Template loading or rendering failed.
    #[error(transparent)]
    Template(#[from] PromptError),

    // Refinement errors
    /// Refinement service call failed.
    #[error("refinement service error: {0}")]
    Service(#[from] ServiceError),

    // Config errors
    /// Invalid configuration detected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Error parsing configuration file.
    #[error("config parse error: {0}")]
    ConfigParseError(String),

    // IO and system errors
    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context from anyhow.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<ValidationErrors> for CompgenError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl CompgenError {
    /// Returns the validation issues if this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias for compgen operations.
pub type Result<T> = std::result::Result<T, CompgenError>;
