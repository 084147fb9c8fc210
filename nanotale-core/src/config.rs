//! Generation settings.

pub const DEFAULT_MAX_TOKENS: usize = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Settings applied to every model call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Model to use. `None` keeps the client's default.
    pub model: Option<String>,

    /// Maximum tokens for the answer.
    pub max_tokens: usize,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// System prompt sent ahead of the story instructions.
    pub system_prompt: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: Some(DEFAULT_TEMPERATURE),
            system_prompt: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Let the API pick its own temperature.
    pub fn without_temperature(mut self) -> Self {
        self.temperature = None;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::new();
        assert_eq!(config.model, None);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, Some(0.9));
        assert!(config.system_prompt.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_model("claude-3-5-haiku-20241022")
            .with_max_tokens(1024)
            .without_temperature()
            .with_system_prompt("Write in the second person.");
        assert_eq!(config.model.as_deref(), Some("claude-3-5-haiku-20241022"));
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.temperature, None);
        assert_eq!(
            config.system_prompt.as_deref(),
            Some("Write in the second person.")
        );
    }
}
