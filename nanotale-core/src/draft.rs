//! The editable form behind both front ends.
//!
//! A [`StoryDraft`] is what the user is putting together before submitting:
//! a theme, the chosen words and a length. Editing never fails; whether the
//! result is acceptable is decided by validation at submit time.

use rand::Rng;
use serde::Serialize;

use crate::catalog::{Catalog, DEFAULT_LENGTH, DEFAULT_THEME, STARTING_WORD_COUNT};
use crate::validate::{RawLength, StoryForm};

/// A form being edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryDraft {
    theme: String,
    words: Vec<String>,
    length: RawLength,
}

impl Default for StoryDraft {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            words: Vec::new(),
            length: RawLength::from(DEFAULT_LENGTH),
        }
    }
}

impl StoryDraft {
    /// Default theme and length with a few random words already chosen.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draft = Self::default();
        draft.randomize_words(rng);
        draft
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn length(&self) -> &RawLength {
        &self.length
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    pub fn set_length(&mut self, length: impl Into<RawLength>) {
        self.length = length.into();
    }

    /// The length as a listed word count, if it is one.
    pub fn listed_length(&self) -> Option<u32> {
        let value = self.length.coerce()?;
        Catalog::global()
            .lengths()
            .iter()
            .copied()
            .find(|l| f64::from(*l) == value)
    }

    pub fn set_words<W, S>(&mut self, words: W)
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
    }

    pub fn is_selected(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Select `word` if it isn't selected, deselect it otherwise.
    ///
    /// Returns whether the word is selected afterwards.
    pub fn toggle_word(&mut self, word: &str) -> bool {
        if self.is_selected(word) {
            self.words.retain(|w| w != word);
            false
        } else {
            self.words.push(word.to_string());
            true
        }
    }

    /// Add a typed word, trimmed and lowercased.
    ///
    /// Blank input and words already selected are ignored. Returns the word
    /// as stored when it was added.
    pub fn add_custom_word(&mut self, raw: &str) -> Option<String> {
        let word = raw.trim().to_lowercase();
        if word.is_empty() || self.is_selected(&word) {
            return None;
        }
        self.words.push(word.clone());
        Some(word)
    }

    /// Remove the most recently selected word.
    pub fn pop_word(&mut self) -> Option<String> {
        self.words.pop()
    }

    /// Replace the selection with fresh random words from the dictionary.
    pub fn randomize_words<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.set_words(Catalog::global().sample_words(rng, STARTING_WORD_COUNT));
    }

    /// Snapshot the draft as a submittable form.
    pub fn to_form(&self) -> StoryForm {
        StoryForm {
            theme: Some(self.theme.clone()),
            words: Some(self.words.clone()),
            length: Some(self.length.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DICTIONARY;
    use crate::validate::validate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_draft() {
        let mut rng = StdRng::seed_from_u64(3);
        let draft = StoryDraft::new(&mut rng);
        assert_eq!(draft.theme(), "sci-fi");
        assert_eq!(draft.listed_length(), Some(200));
        assert_eq!(draft.words().len(), 3);
        assert!(draft.words().iter().all(|w| DICTIONARY.contains(&w.as_str())));
    }

    #[test]
    fn test_toggle() {
        let mut draft = StoryDraft::default();
        assert!(draft.toggle_word("comet"));
        assert!(draft.toggle_word("ember"));
        assert!(!draft.toggle_word("comet"));
        assert_eq!(draft.words(), ["ember"]);
    }

    #[test]
    fn test_custom_word_normalized() {
        let mut draft = StoryDraft::default();
        assert_eq!(draft.add_custom_word("  Lantern "), Some("lantern".to_string()));
        assert_eq!(draft.add_custom_word("LANTERN"), None);
        assert_eq!(draft.add_custom_word("   "), None);
        assert_eq!(draft.words(), ["lantern"]);
    }

    #[test]
    fn test_custom_words_past_limit_are_kept_for_validation() {
        let mut draft = StoryDraft::default();
        for word in ["a", "b", "c", "d", "e", "f"] {
            draft.add_custom_word(word);
        }
        assert_eq!(draft.words().len(), 6);
        assert!(validate(&draft.to_form()).is_err());
    }

    #[test]
    fn test_randomize_replaces_selection() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut draft = StoryDraft::default();
        draft.set_words(["one", "two", "three", "four"]);
        draft.randomize_words(&mut rng);
        assert_eq!(draft.words().len(), 3);
        assert!(!draft.is_selected("four"));
    }

    #[test]
    fn test_to_form_validates() {
        let mut draft = StoryDraft::default();
        draft.set_theme("horror");
        draft.set_words(["crypt"]);
        draft.set_length(800u32);
        let request = validate(&draft.to_form()).unwrap();
        assert_eq!(request.theme(), "horror");
        assert_eq!(request.length(), 800);

        draft.set_length("many");
        assert_eq!(draft.listed_length(), None);
        assert!(validate(&draft.to_form()).is_err());
    }
}
