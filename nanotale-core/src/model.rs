//! The language model seam.
//!
//! Generation never talks to an API directly. It goes through [`StoryModel`],
//! so tests and alternative backends can stand in for Claude.

use async_trait::async_trait;
use claude::{Claude, Message, Request, Tool};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;

/// A text generation capability that answers through a declared shape.
#[async_trait]
pub trait StoryModel: Send + Sync {
    /// Send `prompt` and ask for an answer matching `shape`.
    ///
    /// `Ok(None)` means the model replied without producing the shape.
    async fn produce(&self, prompt: &str, shape: &Tool) -> Result<Option<Value>, claude::Error>;
}

/// [`StoryModel`] backed by the Claude Messages API.
///
/// The shape is declared as the only tool and the request forces its use, so
/// a well-behaved answer is always a single tool call.
#[derive(Clone)]
pub struct ClaudeModel {
    client: Claude,
    config: GeneratorConfig,
}

impl ClaudeModel {
    pub fn new(client: Claude, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create from environment (ANTHROPIC_API_KEY).
    pub fn from_env(config: GeneratorConfig) -> Result<Self, claude::Error> {
        Ok(Self::new(Claude::from_env()?, config))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str, shape: &Tool) -> Request {
        let mut request = Request::new(vec![Message::user(prompt)])
            .with_max_tokens(self.config.max_tokens)
            .with_forced_tool(shape.clone());

        if let Some(model) = &self.config.model {
            request = request.with_model(model);
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(system) = &self.config.system_prompt {
            request = request.with_system(system);
        }
        request
    }
}

#[async_trait]
impl StoryModel for ClaudeModel {
    async fn produce(&self, prompt: &str, shape: &Tool) -> Result<Option<Value>, claude::Error> {
        let request = self.build_request(prompt, shape);
        let response = self.client.complete(request).await?;

        match response.tool_input(&shape.name) {
            Some(input) => {
                debug!(
                    shape = %shape.name,
                    output_tokens = response.usage.output_tokens,
                    "model answered through shape"
                );
                Ok(Some(input.clone()))
            }
            None => {
                warn!(
                    shape = %shape.name,
                    stop_reason = ?response.stop_reason,
                    "model reply carried no structured output"
                );
                Ok(None)
            }
        }
    }
}
