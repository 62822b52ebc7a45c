//! Runtime for the component generation pipeline.
//!
//! `ComponentRuntime` owns the configuration, the template manager and the
//! optional refiner, and runs one submission at a time:
//! validate, render, refine.

use crate::config::CompgenConfig;
use crate::descriptor::ComponentRequest;
use crate::error::Result;
use crate::state::GeneratedComponent;
use crate::tools::refiner::Refiner;
use crate::tools::refiner_impl::ChatRefiner;
use crate::workflows;
use compgen_pm::TemplateManager;
use std::sync::Arc;

/// Component generation runtime.
///
/// # Examples
///
/// ```
/// use compgen_core::{ComponentRequest, ComponentRuntime, CompgenConfig, InputDescriptor};
/// use compgen_pm::TemplateManager;
/// use std::sync::Arc;
///
/// let runtime = ComponentRuntime::with_refiner(
///     CompgenConfig::default(),
///     Arc::new(TemplateManager::bundled()),
///     None,
/// );
///
/// let request = ComponentRequest::new(vec![InputDescriptor::new("foo", "Foo", "d1")]);
/// let code = runtime.generate(&request)?;
/// assert!(code.contains("display_name=\"Foo\""));
/// # Ok::<(), compgen_core::CompgenError>(())
/// ```
pub struct ComponentRuntime {
    /// Runtime configuration.
    pub config: CompgenConfig,

    /// Template manager shared with the refiner.
    pub pm: Arc<TemplateManager>,

    /// Refinement service; `None` returns drafts unchanged.
    refiner: Option<Box<dyn Refiner>>,
}

impl ComponentRuntime {
    /// Creates a runtime from configuration.
    ///
    /// When refinement is enabled the API key is read here, once, so a
    /// missing credential fails at startup rather than on the first submission.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `CompgenError::Template` if `templates_dir` is set but missing
    /// - `CompgenError::Service` if refinement is enabled and the API key is unset
    pub fn new(config: CompgenConfig) -> Result<Self> {
        let pm = Self::init_template_manager(&config)?;

        let refiner: Option<Box<dyn Refiner>> = if config.refine.enabled {
            let refiner = ChatRefiner::from_env(&config.refine, Arc::clone(&pm))?;
            tracing::info!(
                endpoint = %refiner.endpoint(),
                model = refiner.model(),
                "refinement enabled"
            );
            Some(Box::new(refiner))
        } else {
            tracing::info!("refinement disabled, drafts are returned as generated");
            None
        };

        Ok(Self {
            config,
            pm,
            refiner,
        })
    }

    /// Creates a runtime with an explicit refiner.
    pub fn with_refiner(
        config: CompgenConfig,
        pm: Arc<TemplateManager>,
        refiner: Option<Box<dyn Refiner>>,
    ) -> Self {
        Self {
            config,
            pm,
            refiner,
        }
    }

    fn init_template_manager(config: &CompgenConfig) -> Result<Arc<TemplateManager>> {
        let pm = match &config.templates_dir {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "using template overrides");
                TemplateManager::new(dir.clone())?
            }
            None => TemplateManager::bundled(),
        };
        Ok(Arc::new(pm))
    }

    /// Whether submissions are sent to the refinement service.
    pub fn refinement_enabled(&self) -> bool {
        self.refiner.is_some()
    }

    /// Maximum number of inputs per submission.
    pub fn max_inputs(&self) -> usize {
        self.config.form.max_inputs
    }

    /// Validates and renders a request without refinement.
    ///
    /// # Errors
    ///
    /// Returns validation or template errors (see `workflows::generate_component`).
    pub fn generate(&self, request: &ComponentRequest) -> Result<String> {
        workflows::generate_component(&*self.pm, request, self.max_inputs())
    }

    /// Runs a full submission: validate, render, refine.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `CompgenError::Validation` if the request breaks a naming rule; nothing
    ///   is rendered or sent
    /// - `CompgenError::Template` if rendering fails
    /// - `CompgenError::Service` if the refinement call fails; no partial result
    #[tracing::instrument(skip(self, request), fields(inputs = request.len()))]
    pub async fn submit(&self, request: ComponentRequest) -> Result<GeneratedComponent> {
        let draft = self.generate(&request)?;

        let component = match &self.refiner {
            Some(refiner) => {
                let code = refiner.refine(&draft).await?;
                GeneratedComponent::refined(draft, code, request.len())
            }
            None => GeneratedComponent::unrefined(draft, request.len()),
        };

        tracing::info!(
            inputs = component.input_count,
            refined = component.refined,
            "component generated"
        );
        Ok(component)
    }
}

impl std::fmt::Debug for ComponentRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRuntime")
            .field("config", &self.config)
            .field("pm", &self.pm)
            .field(
                "refiner",
                &self.refiner.as_ref().map(|_| "Box<dyn Refiner>"),
            )
            .finish()
    }
}
