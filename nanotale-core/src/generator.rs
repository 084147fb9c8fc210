//! Story generation pipeline: prompt in, structured story out.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::config::GeneratorConfig;
use crate::model::{ClaudeModel, StoryModel};
use crate::prompt::render_prompt;
use crate::story::StoryResult;
use crate::validate::StoryRequest;

/// Errors from a generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Model error: {0}")]
    Model(#[from] claude::Error),

    #[error("Model returned no usable story")]
    NoOutput,
}

/// Turns validated requests into stories.
///
/// Holds no per-request state; one generator can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct StoryGenerator {
    model: Arc<dyn StoryModel>,
}

impl StoryGenerator {
    pub fn new(model: impl StoryModel + 'static) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn from_shared(model: Arc<dyn StoryModel>) -> Self {
        Self { model }
    }

    /// A generator backed by Claude, configured from ANTHROPIC_API_KEY.
    pub fn from_env(config: GeneratorConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(ClaudeModel::from_env(config)?))
    }

    /// Generate one story for `request`.
    ///
    /// Exactly one model call is made. An answer that doesn't fit the story
    /// shape, or has an empty title, is [`GenerationError::NoOutput`].
    #[instrument(skip_all, fields(theme = %request.theme(), length = request.length()))]
    pub async fn generate(&self, request: &StoryRequest) -> Result<StoryResult, GenerationError> {
        let prompt = render_prompt(request);
        let shape = StoryResult::as_tool();

        let output = self.model.produce(&prompt, &shape).await?;
        let result = output
            .and_then(StoryResult::from_output)
            .ok_or(GenerationError::NoOutput)?;

        info!(title = %result.title, chars = result.story.len(), "story generated");
        Ok(result)
    }
}
