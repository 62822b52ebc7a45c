//! Pre-generation validation of a submitted batch.
//!
//! Every rule is checked for every input so the user sees all problems of a
//! submission at once. Any issue means the batch is not generated.

use crate::descriptor::ComponentRequest;
use std::collections::HashSet;
use std::fmt;

/// A single rule violation in a submitted batch.
///
/// Input positions are zero-based; the rendered message is one-based to
/// match the form labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The name field was left empty.
    EmptyName {
        /// Position of the offending input.
        index: usize,
    },

    /// The name contains at least one whitespace character.
    NameContainsWhitespace {
        /// Position of the offending input.
        index: usize,
        /// The rejected name.
        name: String,
    },

    /// The name was already used by an earlier input.
    DuplicateName {
        /// Position of the later, offending input.
        index: usize,
        /// The repeated name.
        name: String,
    },

    /// The batch has more inputs than the form allows.
    TooManyInputs {
        /// Number of submitted inputs.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl ValidationIssue {
    /// Position of the input this issue refers to, if it refers to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::EmptyName { index }
            | Self::NameContainsWhitespace { index, .. }
            | Self::DuplicateName { index, .. } => Some(*index),
            Self::TooManyInputs { .. } => None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { index } => {
                write!(f, "Name of Input {} cannot be empty.", index + 1)
            }
            Self::NameContainsWhitespace { index, name } => write!(
                f,
                "Name of Input {} ('{}') contains spaces. Spaces are not allowed.",
                index + 1,
                name
            ),
            Self::DuplicateName { index, name } => write!(
                f,
                "Name of Input {} ('{}') is a duplicate. Each name must be unique.",
                index + 1,
                name
            ),
            Self::TooManyInputs { count, max } => {
                write!(f, "Too many inputs: {count} submitted, at most {max} allowed.")
            }
        }
    }
}

/// All issues found in one submission, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    /// Collected issues.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Number of collected issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether no issue was collected.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues attached to the input at `index`.
    pub fn for_input(&self, index: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.index() == Some(index))
    }

    /// Rendered messages, one per issue.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s): {}", self.len(), self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks the naming rules of a request.
///
/// Rules, per input:
/// - the name is non-empty
/// - the name contains no whitespace
/// - the name was not used by an earlier input (empty names included)
///
/// plus a batch-level cap of `max_inputs`. Checks never short-circuit.
///
/// # Errors
///
/// Returns every issue found if at least one rule is broken.
///
/// # Examples
///
/// ```
/// use compgen_core::{ComponentRequest, InputDescriptor};
/// use compgen_core::workflows::validate_request;
///
/// let request = ComponentRequest::new(vec![
///     InputDescriptor::new("", "", ""),
///     InputDescriptor::new("a b", "", ""),
///     InputDescriptor::new("x", "", ""),
///     InputDescriptor::new("x", "", ""),
/// ]);
/// let errors = validate_request(&request, 10).unwrap_err();
/// assert_eq!(errors.len(), 3);
/// ```
pub fn validate_request(
    request: &ComponentRequest,
    max_inputs: usize,
) -> Result<(), ValidationErrors> {
    let mut issues = Vec::new();

    if request.len() > max_inputs {
        issues.push(ValidationIssue::TooManyInputs {
            count: request.len(),
            max: max_inputs,
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (index, input) in request.inputs.iter().enumerate() {
        let name = input.name.as_str();

        if name.is_empty() {
            issues.push(ValidationIssue::EmptyName { index });
        }

        if name.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue::NameContainsWhitespace {
                index,
                name: name.to_string(),
            });
        }

        if !seen.insert(name) {
            issues.push(ValidationIssue::DuplicateName {
                index,
                name: name.to_string(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        tracing::warn!(issues = issues.len(), "submission rejected");
        Err(ValidationErrors { issues })
    }
}
