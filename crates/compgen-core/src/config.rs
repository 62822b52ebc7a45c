//! Configuration types for compgen.
//!
//! Configuration is read from a TOML file (`compgen.toml` by default). Every
//! section and key is optional; anything missing keeps its default.

use crate::error::{CompgenError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "compgen.toml";

/// Upper bound on inputs per component, matching the form's row limit.
pub const MAX_INPUTS_LIMIT: usize = 10;

/// Main compgen configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompgenConfig {
    /// Directory whose `.j2` files override the bundled templates.
    pub templates_dir: Option<PathBuf>,

    /// Form settings.
    pub form: FormConfig,

    /// Refinement service settings.
    pub refine: RefineConfig,

    /// Web server settings.
    pub server: ServerConfig,
}

impl CompgenConfig {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `CompgenError::ConfigParseError` if the file is not valid TOML
    /// - `CompgenError::InvalidConfig` if a value is out of range
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| CompgenError::ConfigParseError(format!("{}: {e}", path.display())))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `CompgenError::InvalidConfig` naming the first bad key.
    pub fn validate(&self) -> Result<()> {
        if self.form.max_inputs == 0 || self.form.max_inputs > MAX_INPUTS_LIMIT {
            return Err(CompgenError::InvalidConfig(format!(
                "form.max_inputs must be between 1 and {MAX_INPUTS_LIMIT}, got {}",
                self.form.max_inputs
            )));
        }

        if !(0.0..=2.0).contains(&self.refine.temperature) {
            return Err(CompgenError::InvalidConfig(format!(
                "refine.temperature must be between 0.0 and 2.0, got {}",
                self.refine.temperature
            )));
        }

        if self.refine.timeout_secs == 0 {
            return Err(CompgenError::InvalidConfig(
                "refine.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.refine.model.trim().is_empty() {
            return Err(CompgenError::InvalidConfig(
                "refine.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Form settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Maximum number of input rows a submission may carry.
    pub max_inputs: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_inputs: MAX_INPUTS_LIMIT,
        }
    }
}

/// Settings for the OpenAI-compatible refinement call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Whether generated code is sent for refinement at all.
    pub enabled: bool,

    /// Model identifier.
    pub model: String,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: f32,

    /// Service base URL, without the `/v1/...` path.
    pub base_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8501").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8501".to_string(),
        }
    }
}
