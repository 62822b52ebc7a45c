//! Input descriptors and the request object that carries them.
//!
//! A [`ComponentRequest`] is built once per form submission and passed by
//! value into the generation pipeline. Nothing here is validated on
//! construction; see [`crate::workflows::validate`].

use crate::error::{CompgenError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One user-specified input field of the generated component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Attribute name. Must be non-empty, whitespace-free and unique.
    pub name: String,

    /// Label shown in the component UI.
    #[serde(default)]
    pub display_name: String,

    /// Help text, emitted as the `info` attribute.
    #[serde(default)]
    pub description: String,
}

impl InputDescriptor {
    /// Creates a descriptor from its three fields.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// Ordered batch of descriptors submitted together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRequest {
    /// Descriptors in submission order.
    #[serde(default)]
    pub inputs: Vec<InputDescriptor>,
}

impl ComponentRequest {
    /// Creates a request from a list of descriptors.
    pub fn new(inputs: Vec<InputDescriptor>) -> Self {
        Self { inputs }
    }

    /// Number of descriptors in the request.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the request carries no descriptors.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Parses a request from TOML made of `[[inputs]]` tables.
    ///
    /// # Errors
    ///
    /// Returns `CompgenError::InvalidRequestFile` if the text is not valid TOML
    /// or a table lacks a `name` key.
    ///
    /// # Examples
    ///
    /// ```
    /// use compgen_core::ComponentRequest;
    /// use std::path::Path;
    ///
    /// let request = ComponentRequest::from_toml_str(
    ///     "[[inputs]]\nname = \"foo\"\ndisplay_name = \"Foo\"\n",
    ///     Path::new("inline.toml"),
    /// )?;
    /// assert_eq!(request.inputs[0].name, "foo");
    /// assert!(request.inputs[0].description.is_empty());
    /// # Ok::<(), compgen_core::CompgenError>(())
    /// ```
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CompgenError::InvalidRequestFile {
            path: origin.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Reads and parses a request file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?;
        Self::from_toml_str(&content, path)
    }
}

impl From<Vec<InputDescriptor>> for ComponentRequest {
    fn from(inputs: Vec<InputDescriptor>) -> Self {
        Self::new(inputs)
    }
}
