//! compgen core - pipeline for generating custom Langflow components.
//!
//! This crate turns a list of input descriptors into the source of a custom
//! component class and optionally has a text-generation service polish it.
//!
//! # Architecture
//!
//! - [`descriptor`]: input descriptors and the per-submission request
//! - [`workflows`]: validation and rendering
//! - [`tools`]: the refinement service adapter (real and mock)
//! - [`runtime`]: the pipeline tying the pieces together
//! - [`state`]: per-session results kept by the front ends
//! - [`config`]: TOML configuration
//! - [`error`]: error types and result alias
//!
//! # Example
//!
//! ```
//! use compgen_core::{ComponentRequest, InputDescriptor};
//! use compgen_core::workflows::generate_component;
//! use compgen_pm::TemplateManager;
//!
//! let request = ComponentRequest::new(vec![
//!     InputDescriptor::new("query", "Query", "Text to search for"),
//! ]);
//! let code = generate_component(&TemplateManager::bundled(), &request, 10)?;
//! assert!(code.contains("info=\"Text to search for\""));
//! # Ok::<(), compgen_core::CompgenError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod runtime;
pub mod state;
pub mod tools;
pub mod workflows;

pub use config::{CompgenConfig, FormConfig, RefineConfig, ServerConfig};
pub use descriptor::{ComponentRequest, InputDescriptor};
pub use error::{CompgenError, Result};
pub use runtime::ComponentRuntime;
pub use state::{GeneratedComponent, SessionState};
pub use tools::{Refiner, ServiceError};
pub use workflows::{ValidationErrors, ValidationIssue};
