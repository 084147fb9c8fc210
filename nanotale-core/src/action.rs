//! The request-handling entry point: validate, generate, report.
//!
//! [`generate_story`] never fails. Every path ends in a [`GenerateOutcome`]
//! the caller can show as-is; internal error detail goes to the log only.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::generator::StoryGenerator;
use crate::story::StoryResult;
use crate::validate::{validate, StoryForm};

/// Shown for any failure after validation passed.
pub const MSG_GENERATION_FAILED: &str =
    "An unexpected error occurred while generating the story. Please try again later.";

/// What a submission produced: a story or one user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateOutcome {
    Story(StoryResult),
    Error(String),
}

impl GenerateOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        GenerateOutcome::Error(message.into())
    }

    pub fn story(&self) -> Option<&StoryResult> {
        match self {
            GenerateOutcome::Story(story) => Some(story),
            GenerateOutcome::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerateOutcome::Story(_) => None,
            GenerateOutcome::Error(message) => Some(message),
        }
    }

    pub fn is_story(&self) -> bool {
        matches!(self, GenerateOutcome::Story(_))
    }

    /// JSON form: `{"story": {...}}` or `{"error": "..."}`.
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize outcome");
                format!(r#"{{"error":"{MSG_GENERATION_FAILED}"}}"#)
            }
        }
    }
}

/// Handle one submitted form.
///
/// Invalid forms make no model call and yield the validation message.
/// Model failures yield [`MSG_GENERATION_FAILED`].
pub async fn generate_story(generator: &StoryGenerator, form: StoryForm) -> GenerateOutcome {
    let request = match validate(&form) {
        Ok(request) => request,
        Err(e) => {
            warn!(field = ?e.field(), reason = e.message(), "story form rejected");
            return GenerateOutcome::error(e.message());
        }
    };

    match generator.generate(&request).await {
        Ok(story) => GenerateOutcome::Story(story),
        Err(e) => {
            error!(error = %e, theme = %request.theme(), "story generation failed");
            GenerateOutcome::error(MSG_GENERATION_FAILED)
        }
    }
}

/// Handle one submission given as a JSON record.
///
/// A record that can't be read at all yields the generic "Invalid data."
pub async fn generate_story_json(generator: &StoryGenerator, raw: &str) -> GenerateOutcome {
    match StoryForm::from_json(raw) {
        Ok(form) => generate_story(generator, form).await,
        Err(e) => {
            warn!("unreadable story record");
            GenerateOutcome::error(e.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockModel, MockReply};
    use crate::validate::{MSG_INVALID_DATA, MSG_NO_THEME, MSG_NO_WORDS};

    #[tokio::test]
    async fn test_success() {
        let mock = MockModel::new(vec![MockReply::story("Echoes", "The canyon answered.")]);
        let generator = StoryGenerator::new(mock);

        let outcome = generate_story(&generator, StoryForm::new("mystery", ["echo"], 50)).await;
        assert_eq!(
            outcome,
            GenerateOutcome::Story(StoryResult::new("Echoes", "The canyon answered."))
        );
        assert!(outcome.is_story());
        assert_eq!(outcome.error_message(), None);
    }

    #[tokio::test]
    async fn test_invalid_form_skips_model() {
        let mock = MockModel::default();
        let generator = StoryGenerator::new(mock.clone());

        let empty: [&str; 0] = [];
        let outcome = generate_story(&generator, StoryForm::new("comedy", empty, 50)).await;
        assert_eq!(outcome.error_message(), Some(MSG_NO_WORDS));

        let outcome = generate_story(&generator, StoryForm::new("", ["echo"], 50)).await;
        assert_eq!(outcome.error_message(), Some(MSG_NO_THEME));

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_failures_become_generic_message() {
        let mock = MockModel::new(vec![
            MockReply::failure("status 529: overloaded"),
            MockReply::Empty,
        ]);
        let generator = StoryGenerator::new(mock);

        for _ in 0..2 {
            let form = StoryForm::new("horror", ["crypt"], 100);
            let outcome = generate_story(&generator, form).await;
            assert_eq!(outcome.error_message(), Some(MSG_GENERATION_FAILED));
        }
    }

    #[tokio::test]
    async fn test_json_entry() {
        let mock = MockModel::new(vec![MockReply::story("Map", "X marks it.")]);
        let generator = StoryGenerator::new(mock.clone());

        let outcome = generate_story_json(&generator, "{not json").await;
        assert_eq!(outcome.error_message(), Some(MSG_INVALID_DATA));

        let outcome = generate_story_json(
            &generator,
            r#"{"theme": "adventure", "words": ["map"], "length": "800"}"#,
        )
        .await;
        assert_eq!(outcome.story().map(|s| s.title.as_str()), Some("Map"));
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_outcome_json() {
        let story = GenerateOutcome::Story(StoryResult::new("T", "S"));
        assert_eq!(story.to_json(), r#"{"story":{"title":"T","story":"S"}}"#);

        let error = GenerateOutcome::error("Please select a theme.");
        assert_eq!(error.to_json(), r#"{"error":"Please select a theme."}"#);
    }
}
