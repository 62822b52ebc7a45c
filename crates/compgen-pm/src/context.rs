//! Context structures for template rendering.

use serde::Serialize;

/// Context for the component skeleton template.
///
/// `inputs` is substituted verbatim into the `inputs = [...]` region of the
/// skeleton. An empty string leaves the skeleton otherwise intact.
///
/// # Examples
///
/// ```
/// use compgen_pm::ComponentContext;
///
/// let context = ComponentContext::new("MessageTextInput(name=\"a\")");
/// assert!(context.inputs.starts_with("MessageTextInput"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentContext {
    /// Pre-joined input blocks.
    pub inputs: String,
}

impl ComponentContext {
    /// Creates a context with the given joined input blocks.
    #[must_use]
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
        }
    }

    /// Creates a context for a component with no inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use compgen_pm::ComponentContext;
    ///
    /// assert!(ComponentContext::empty().inputs.is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Context for the refinement user prompt.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefineContext {
    /// Generated code to be reviewed.
    pub code: String,
}

impl RefineContext {
    /// Creates a refinement context around a piece of generated code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
