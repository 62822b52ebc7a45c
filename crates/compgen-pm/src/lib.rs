//! Template manager crate for compgen.
//!
//! This crate provides template loading and rendering using minijinja. It
//! owns the component skeleton, the per-input block, and the prompts sent to
//! the refinement service.
//!
//! # Examples
//!
//! ```
//! use compgen_pm::{ComponentContext, PromptEngine, TemplateManager};
//!
//! let manager = TemplateManager::bundled();
//! let code = manager.render("component", &ComponentContext::empty())?;
//! assert!(code.contains("inputs = ["));
//! # Ok::<(), compgen_pm::PromptError>(())
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod manager;

pub use context::{ComponentContext, RefineContext};
pub use engine::PromptEngine;
pub use error::{PromptError, Result};
pub use manager::TemplateManager;
