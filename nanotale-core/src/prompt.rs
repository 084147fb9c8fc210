//! Prompt construction.

use crate::validate::StoryRequest;

const PERSONA: &str = "You are a master storyteller with a gift for creating evocative and \
emotionally resonant narratives. Write a story with the following properties, and give it an \
appropriate, human-like title.";

const GUIDANCE: &str = "Your story should feel like it was written by a human, with a natural \
flow and a strong emotional core. Use literary techniques like metaphor, sensory details, and a \
distinct narrative voice. Avoid clichés and formulaic structures.";

/// Render the instruction text sent to the model for a validated request.
///
/// The theme, the comma-joined words and the target length all appear
/// verbatim.
pub fn render_prompt(request: &StoryRequest) -> String {
    format!(
        "{PERSONA}\n\n\
         *   **Theme:** {theme}\n\
         *   **Must-Include Words:** {words}\n\
         *   **Approximate Length:** {length} words.\n\n\
         {GUIDANCE}",
        theme = request.theme(),
        words = request.words().join(", "),
        length = request.length(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate, StoryForm};

    fn request(theme: &str, words: &[&str], length: u32) -> StoryRequest {
        validate(&StoryForm::new(theme, words.iter().copied(), length)).unwrap()
    }

    #[test]
    fn test_prompt_contains_request_fields() {
        let prompt = render_prompt(&request("horror", &["crypt", "wraith"], 100));
        assert!(prompt.contains("*   **Theme:** horror\n"));
        assert!(prompt.contains("*   **Must-Include Words:** crypt, wraith\n"));
        assert!(prompt.contains("*   **Approximate Length:** 100 words."));
    }

    #[test]
    fn test_prompt_frame() {
        let prompt = render_prompt(&request("comedy", &["echo"], 50));
        assert!(prompt.starts_with("You are a master storyteller"));
        assert!(prompt.ends_with("Avoid clichés and formulaic structures."));
        assert!(prompt.contains("human-like title.\n\n*   **Theme:**"));
        assert!(prompt.contains("50 words.\n\nYour story should feel"));
    }

    #[test]
    fn test_single_word_has_no_separator() {
        let prompt = render_prompt(&request("romance", &["rose"], 300));
        assert!(prompt.contains("**Must-Include Words:** rose\n"));
    }
}
