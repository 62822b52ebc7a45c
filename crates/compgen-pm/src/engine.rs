//! Core template engine trait definition.

use crate::error::Result;
use serde::Serialize;

/// Trait for rendering named templates with dynamic context.
///
/// Implementations handle loading and rendering of templates using a template
/// engine like minijinja.
///
/// # Examples
///
/// ```
/// use compgen_pm::{PromptEngine, RefineContext, TemplateManager};
///
/// fn render_example(engine: &TemplateManager) -> Result<(), Box<dyn std::error::Error>> {
///     let rendered = engine.render("refine_user", &RefineContext::new("x = 1"))?;
///     assert!(rendered.contains("x = 1"));
///     Ok(())
/// }
/// # render_example(&TemplateManager::bundled()).unwrap();
/// ```
pub trait PromptEngine {
    /// Renders a template with the provided context.
    ///
    /// # Arguments
    ///
    /// * `template` - Name of the template to render (without extension)
    /// * `ctx` - Context data to use for rendering
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The template does not exist
    /// - The template contains syntax errors
    /// - Template rendering fails
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String>;

    /// Gets the system prompt for a specific role.
    ///
    /// Renders `<role>_system` with an empty context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template for the role does not exist or rendering fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compgen_pm::{PromptEngine, TemplateManager};
    /// let engine = TemplateManager::bundled();
    /// let system_prompt = engine.get_system_prompt("refine")?;
    /// assert!(system_prompt.contains("Langflow"));
    /// # Ok::<(), compgen_pm::PromptError>(())
    /// ```
    fn get_system_prompt(&self, role: &str) -> Result<String>;

    /// Lists all available templates.
    ///
    /// Returns template names (without extensions), sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the override directory cannot be read.
    fn list_templates(&self) -> Result<Vec<String>>;
}
