//! Workflow modules for compgen.
//!
//! - `validate`: naming rules checked before generation
//! - `generate`: rendering of the component source

pub mod generate;
pub mod validate;

pub use generate::{generate_component, render_component};
pub use validate::{ValidationErrors, ValidationIssue, validate_request};
