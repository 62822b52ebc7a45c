//! Session state for the generator front ends.
//!
//! Holds what one session remembers between submissions: the last generated
//! component and a few counters. Nothing here is persisted.

use chrono::{DateTime, Utc};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedComponent {
    /// Component source as rendered from the templates.
    pub draft: String,

    /// Final source shown to the user (refined, or the draft when refinement is off).
    pub code: String,

    /// Whether `code` came back from the refinement service.
    pub refined: bool,

    /// Number of inputs the component declares.
    pub input_count: usize,

    /// When the component was generated.
    pub generated_at: DateTime<Utc>,
}

impl GeneratedComponent {
    /// Wraps a draft that was not sent for refinement.
    pub fn unrefined(draft: String, input_count: usize) -> Self {
        Self {
            code: draft.clone(),
            draft,
            refined: false,
            input_count,
            generated_at: Utc::now(),
        }
    }

    /// Wraps a draft together with its refined version.
    pub fn refined(draft: String, code: String, input_count: usize) -> Self {
        Self {
            draft,
            code,
            refined: true,
            input_count,
            generated_at: Utc::now(),
        }
    }

    /// Whether refinement changed the draft.
    pub fn changed_by_refinement(&self) -> bool {
        self.refined && self.code.trim() != self.draft.trim()
    }
}

/// Per-session store owned by a front end.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Last successfully generated component.
    latest: Option<GeneratedComponent>,

    /// Submissions that produced a component.
    pub generated: u32,

    /// Submissions rejected by validation.
    pub rejected: u32,

    /// Submissions that failed at the refinement service.
    pub failed: u32,
}

impl SessionState {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new component, replacing the previous one.
    pub fn record_success(&mut self, component: GeneratedComponent) {
        self.generated += 1;
        self.latest = Some(component);
    }

    /// Counts a submission rejected by validation. The last component is kept.
    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    /// Counts a submission that failed after validation.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Last generated component, if any.
    pub fn latest(&self) -> Option<&GeneratedComponent> {
        self.latest.as_ref()
    }
}
