//! Template manager implementation using minijinja.

use crate::{
    error::{PromptError, Result},
    engine::PromptEngine,
};
use minijinja::{AutoEscape, ErrorKind};
use serde::Serialize;
use std::path::PathBuf;

/// Templates compiled into the binary, keyed by file name.
const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    ("component.j2", include_str!("../templates/component.j2")),
    ("input_block.j2", include_str!("../templates/input_block.j2")),
    ("refine_system.j2", include_str!("../templates/refine_system.j2")),
    ("refine_user.j2", include_str!("../templates/refine_user.j2")),
];

fn bundled_source(file_name: &str) -> Option<&'static str> {
    BUNDLED_TEMPLATES
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, source)| *source)
}

/// Manager for loading and rendering component and prompt templates.
///
/// `TemplateManager` wraps the minijinja environment. Templates are looked up
/// as `<name>.j2`, first in the optional override directory, then in the
/// bundled set.
///
/// # Examples
///
/// ```
/// use compgen_pm::{ComponentContext, PromptEngine, TemplateManager};
///
/// let manager = TemplateManager::bundled();
/// let skeleton = manager.render("component", &ComponentContext::empty())?;
/// assert!(skeleton.contains("class CustomComponent(Component):"));
/// # Ok::<(), compgen_pm::PromptError>(())
/// ```
#[derive(Debug)]
pub struct TemplateManager {
    /// Directory whose `.j2` files override the bundled templates.
    pub templates_dir: Option<PathBuf>,
    /// Minijinja environment for template rendering.
    env: minijinja::Environment<'static>,
}

impl TemplateManager {
    /// Creates a manager that only knows the bundled templates.
    pub fn bundled() -> Self {
        let mut env = Self::base_env();
        env.set_loader(|name| Ok(bundled_source(name).map(str::to_owned)));

        Self {
            templates_dir: None,
            env,
        }
    }

    /// Creates a manager that reads templates from `templates_dir`, falling
    /// back to the bundled set for names the directory does not provide.
    ///
    /// # Errors
    ///
    /// Returns an error if the template directory does not exist or is not a directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use compgen_pm::TemplateManager;
    /// use std::path::PathBuf;
    ///
    /// let manager = TemplateManager::new(PathBuf::from("./templates"))?;
    /// # Ok::<(), compgen_pm::PromptError>(())
    /// ```
    pub fn new(templates_dir: PathBuf) -> Result<Self> {
        if !templates_dir.is_dir() {
            return Err(PromptError::TemplateDirectoryNotFound(templates_dir));
        }

        let dir_loader = minijinja::path_loader(&templates_dir);
        let mut env = Self::base_env();
        env.set_loader(move |name| match dir_loader(name)? {
            Some(source) => Ok(Some(source)),
            None => Ok(bundled_source(name).map(str::to_owned)),
        });

        Ok(Self {
            templates_dir: Some(templates_dir),
            env,
        })
    }

    fn base_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        // Generated code must come out byte-for-byte, including the final newline.
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env
    }

    /// Loads a template by name (without the `.j2` extension).
    fn load_template(&self, name: &str) -> Result<minijinja::Template<'_, '_>> {
        let template_name = format!("{name}.j2");
        self.env.get_template(&template_name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                PromptError::TemplateNotFound(name.to_string())
            } else {
                PromptError::TemplateRenderError(format!("{name}: {e}"))
            }
        })
    }
}

impl PromptEngine for TemplateManager {
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String> {
        let tmpl = self.load_template(template)?;
        tmpl.render(ctx)
            .map_err(|e| PromptError::TemplateRenderError(format!("{template}: {e}")))
    }

    fn get_system_prompt(&self, role: &str) -> Result<String> {
        self.render(&format!("{role}_system"), &())
    }

    fn list_templates(&self) -> Result<Vec<String>> {
        let mut templates: Vec<String> = BUNDLED_TEMPLATES
            .iter()
            .filter_map(|(name, _)| name.strip_suffix(".j2"))
            .map(str::to_string)
            .collect();

        if let Some(dir) = &self.templates_dir {
            let entries = std::fs::read_dir(dir).map_err(|source| {
                PromptError::TemplateListError {
                    path: dir.clone(),
                    source,
                }
            })?;

            for entry in entries {
                let entry = entry.map_err(|source| PromptError::TemplateListError {
                    path: dir.clone(),
                    source,
                })?;

                let path = entry.path();

                if path.is_file()
                    && let Some(ext) = path.extension()
                    && ext == "j2"
                    && let Some(name) = path.file_stem()
                    && let Some(name_str) = name.to_str()
                {
                    templates.push(name_str.to_string());
                }
            }
        }

        templates.sort();
        templates.dedup();
        Ok(templates)
    }
}
