//! Chat-completions refiner implementation.
//!
//! Sends the generated component to an OpenAI-compatible
//! `/v1/chat/completions` endpoint together with the `refine` system prompt
//! and the `refine_user` instruction, and returns the first completion.

use crate::config::RefineConfig;
use crate::tools::refiner::{Refiner, ServiceError};
use async_trait::async_trait;
use compgen_pm::{PromptEngine, RefineContext, TemplateManager};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Role whose system prompt frames the refinement request.
const REFINE_ROLE: &str = "refine";

/// Template wrapping the generated code in the user instruction.
const REFINE_USER_TEMPLATE: &str = "refine_user";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Refiner backed by an OpenAI-compatible chat-completions API.
///
/// # Examples
///
/// ```no_run
/// use compgen_core::config::RefineConfig;
/// use compgen_core::tools::refiner_impl::ChatRefiner;
/// use compgen_pm::TemplateManager;
/// use std::sync::Arc;
///
/// let refiner = ChatRefiner::from_env(&RefineConfig::default(), Arc::new(TemplateManager::bundled()))?;
/// # Ok::<(), compgen_core::tools::refiner::ServiceError>(())
/// ```
pub struct ChatRefiner {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    pm: Arc<TemplateManager>,
}

impl ChatRefiner {
    /// Creates a refiner with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transport` if the HTTP client cannot be built.
    pub fn new(
        settings: &RefineConfig,
        api_key: impl Into<String>,
        pm: Arc<TemplateManager>,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            pm,
        })
    }

    /// Creates a refiner reading the API key from `settings.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MissingApiKey` if the variable is unset or empty.
    pub fn from_env(settings: &RefineConfig, pm: Arc<TemplateManager>) -> Result<Self, ServiceError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ServiceError::MissingApiKey(settings.api_key_env.clone()))?;
        Self::new(settings, api_key, pm)
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Model the refiner sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, code: &str) -> Result<ChatRequest<'_>, ServiceError> {
        let system = self.pm.get_system_prompt(REFINE_ROLE)?;
        let user = self
            .pm
            .render(REFINE_USER_TEMPLATE, &RefineContext::new(code))?;

        Ok(ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(system),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(user),
                },
            ],
            temperature: self.temperature,
        })
    }
}

impl std::fmt::Debug for ChatRefiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRefiner")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Refiner for ChatRefiner {
    #[tracing::instrument(skip(self, code), fields(model = %self.model, bytes = code.len()))]
    async fn refine(&self, code: &str) -> Result<String, ServiceError> {
        let request = self.build_request(code)?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(error = %e, "failed to read error response body");
                    String::new()
                }
            };
            tracing::error!(status = status.as_u16(), "refinement request failed");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(1000).collect();
            tracing::debug!(raw = %preview, "unparseable refinement response");
            ServiceError::MalformedResponse(e.to_string())
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ServiceError::EmptyResponse)?;

        tracing::info!(bytes = content.len(), "refinement received");
        Ok(content.trim().to_string())
    }
}
