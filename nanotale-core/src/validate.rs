//! Input validation for story requests.
//!
//! A [`StoryForm`] is whatever the user submitted: any field may be missing
//! and the length may arrive as text. [`validate`] turns it into a
//! [`StoryRequest`] or a [`ValidationError`] carrying one message per failing
//! field. Only one of those messages is ever shown, picked by the fixed
//! precedence words, then theme, then length.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::MAX_WORDS;

pub const MSG_NO_WORDS: &str = "Please select or enter at least one word.";
pub const MSG_TOO_MANY_WORDS: &str = "Please use a maximum of 5 words.";
pub const MSG_NO_THEME: &str = "Please select a theme.";
pub const MSG_NO_LENGTH: &str = "Please select a word count.";
pub const MSG_LENGTH_NOT_NUMBER: &str = "The word count must be a number.";
pub const MSG_LENGTH_NOT_POSITIVE: &str = "The word count must be a positive whole number.";
pub const MSG_INVALID_DATA: &str = "Invalid data.";

/// A story length as submitted: either a number or text that should hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLength {
    Number(f64),
    Text(String),
}

impl RawLength {
    /// Coerce to a finite number, if the value holds one.
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            RawLength::Number(n) => *n,
            RawLength::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<u32> for RawLength {
    fn from(value: u32) -> Self {
        RawLength::Number(f64::from(value))
    }
}

impl From<&str> for RawLength {
    fn from(value: &str) -> Self {
        RawLength::Text(value.to_string())
    }
}

impl From<String> for RawLength {
    fn from(value: String) -> Self {
        RawLength::Text(value)
    }
}

/// An unvalidated submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryForm {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub words: Option<Vec<String>>,
    #[serde(default)]
    pub length: Option<RawLength>,
}

impl StoryForm {
    /// A form with every field filled in.
    pub fn new<W, S>(theme: impl Into<String>, words: W, length: u32) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            theme: Some(theme.into()),
            words: Some(words.into_iter().map(Into::into).collect()),
            length: Some(length.into()),
        }
    }

    /// Replace the length with a raw value, e.g. text typed by the user.
    pub fn with_length(mut self, length: impl Into<RawLength>) -> Self {
        self.length = Some(length.into());
        self
    }

    /// Parse a JSON record such as `{"theme": "horror", "words": ["crypt"], "length": 100}`.
    ///
    /// A record that isn't a JSON object of the expected field types is
    /// rejected as a whole, with the generic message.
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(raw).map_err(|_| ValidationError::malformed())
    }
}

/// A validated story request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryRequest {
    theme: String,
    words: Vec<String>,
    length: u32,
}

impl StoryRequest {
    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Target length in words.
    pub fn length(&self) -> u32 {
        self.length
    }
}

impl TryFrom<StoryForm> for StoryRequest {
    type Error = ValidationError;

    fn try_from(form: StoryForm) -> Result<Self, Self::Error> {
        validate(&form)
    }
}

/// Form fields that can fail validation, in message precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Words,
    Theme,
    Length,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Words => "words",
            Field::Theme => "theme",
            Field::Length => "length",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures.
///
/// An empty set of field errors means the record was unreadable as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    fields: BTreeMap<Field, &'static str>,
}

impl ValidationError {
    fn malformed() -> Self {
        Self::default()
    }

    fn add(&mut self, field: Field, message: &'static str) {
        self.fields.entry(field).or_insert(message);
    }

    /// The single message shown to the user.
    pub fn message(&self) -> &'static str {
        self.fields
            .values()
            .next()
            .copied()
            .unwrap_or(MSG_INVALID_DATA)
    }

    /// The field whose message is shown, if the failure is field-specific.
    pub fn field(&self) -> Option<Field> {
        self.fields.keys().next().copied()
    }

    /// Message for a specific field, if that field failed.
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.fields.get(&field).copied()
    }

    /// Every failing field with its message, in precedence order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.fields.iter().map(|(f, m)| (*f, *m))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a submitted form.
///
/// Words are passed through as given: no trimming, case folding or
/// deduplication happens here.
pub fn validate(form: &StoryForm) -> Result<StoryRequest, ValidationError> {
    let mut errors = ValidationError::default();

    let words = form.words.as_deref().unwrap_or_default();
    if words.is_empty() {
        errors.add(Field::Words, MSG_NO_WORDS);
    } else if words.len() > MAX_WORDS {
        errors.add(Field::Words, MSG_TOO_MANY_WORDS);
    }

    let theme = form.theme.as_deref().map(str::trim).unwrap_or_default();
    if theme.is_empty() {
        errors.add(Field::Theme, MSG_NO_THEME);
    }

    let length = match &form.length {
        None => {
            errors.add(Field::Length, MSG_NO_LENGTH);
            None
        }
        Some(raw) => match raw.coerce() {
            None => {
                errors.add(Field::Length, MSG_LENGTH_NOT_NUMBER);
                None
            }
            Some(n) if n < 1.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) => {
                errors.add(Field::Length, MSG_LENGTH_NOT_POSITIVE);
                None
            }
            Some(n) => Some(n as u32),
        },
    };

    match length {
        Some(length) if errors.fields.is_empty() => Ok(StoryRequest {
            theme: theme.to_string(),
            words: words.to_vec(),
            length,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(theme: &str, words: &[&str], length: u32) -> StoryForm {
        StoryForm::new(theme, words.iter().copied(), length)
    }

    fn form_text(theme: &str, words: &[&str], length: &str) -> StoryForm {
        form(theme, words, 0).with_length(length)
    }

    #[test]
    fn test_valid_request() {
        let request = validate(&form("horror", &["crypt", "wraith"], 100)).unwrap();
        assert_eq!(request.theme(), "horror");
        assert_eq!(request.words(), ["crypt", "wraith"]);
        assert_eq!(request.length(), 100);
    }

    #[test]
    fn test_no_words() {
        let err = validate(&form("comedy", &[], 50)).unwrap_err();
        assert_eq!(err.field(), Some(Field::Words));
        assert!(err.message().contains("at least one word"));
    }

    #[test]
    fn test_too_many_words() {
        let err = validate(&form("comedy", &["a", "b", "c", "d", "e", "f"], 50)).unwrap_err();
        assert_eq!(err.field(), Some(Field::Words));
        assert!(err.message().contains("maximum of 5"));
    }

    #[test]
    fn test_five_words_is_fine() {
        let request = validate(&form("comedy", &["a", "b", "c", "d", "e"], 50)).unwrap();
        assert_eq!(request.words().len(), 5);
    }

    #[test]
    fn test_words_win_over_other_fields() {
        let err = validate(&form_text("", &[], "lots")).unwrap_err();
        assert_eq!(err.message(), MSG_NO_WORDS);
        assert_eq!(err.message_for(Field::Theme), Some(MSG_NO_THEME));
        assert_eq!(err.message_for(Field::Length), Some(MSG_LENGTH_NOT_NUMBER));
        assert_eq!(err.fields().count(), 3);
    }

    #[test]
    fn test_missing_theme() {
        let err = validate(&form("", &["echo"], 200)).unwrap_err();
        assert_eq!(err.field(), Some(Field::Theme));
        assert!(err.message().contains("theme"));

        let err = validate(&form("   ", &["echo"], 200)).unwrap_err();
        assert_eq!(err.field(), Some(Field::Theme));
    }

    #[test]
    fn test_theme_wins_over_length() {
        let err = validate(&form_text("", &["echo"], "abc")).unwrap_err();
        assert_eq!(err.message(), MSG_NO_THEME);
    }

    #[test]
    fn test_non_numeric_length() {
        let err = validate(&form_text("mystery", &["cipher"], "twelve")).unwrap_err();
        assert_eq!(err.field(), Some(Field::Length));
        assert_eq!(err.message(), MSG_LENGTH_NOT_NUMBER);

        let err = validate(&form_text("mystery", &["cipher"], "")).unwrap_err();
        assert_eq!(err.message(), MSG_LENGTH_NOT_NUMBER);
    }

    #[test]
    fn test_numeric_text_length_is_coerced() {
        let request = validate(&form_text("mystery", &["cipher"], " 300 ")).unwrap();
        assert_eq!(request.length(), 300);
    }

    #[test]
    fn test_length_must_be_positive_whole() {
        for bad in ["0", "-100", "12.5"] {
            let err = validate(&form_text("mystery", &["cipher"], bad)).unwrap_err();
            assert_eq!(err.message(), MSG_LENGTH_NOT_POSITIVE, "length {bad}");
        }
        let nan = form("mystery", &["cipher"], 100).with_length(RawLength::Number(f64::NAN));
        let err = validate(&nan).unwrap_err();
        assert_eq!(err.message(), MSG_LENGTH_NOT_NUMBER);
    }

    #[test]
    fn test_missing_fields() {
        let err = validate(&StoryForm {
            theme: Some("romance".into()),
            words: Some(vec!["rose".into()]),
            length: None,
        })
        .unwrap_err();
        assert_eq!(err.message(), MSG_NO_LENGTH);

        let err = validate(&StoryForm::default()).unwrap_err();
        assert_eq!(err.message(), MSG_NO_WORDS);
    }

    #[test]
    fn test_duplicates_are_not_removed() {
        let request = validate(&form("fantasy", &["rune", "rune"], 50)).unwrap();
        assert_eq!(request.words(), ["rune", "rune"]);
    }

    #[test]
    fn test_from_json() {
        let parsed = StoryForm::from_json(
            r#"{"theme": "horror", "words": ["crypt", "wraith"], "length": "100"}"#,
        )
        .unwrap();
        assert_eq!(parsed.length, Some(RawLength::Text("100".into())));
        assert_eq!(validate(&parsed).unwrap().length(), 100);

        let parsed = StoryForm::from_json(r#"{"words": ["crypt"], "length": 100}"#).unwrap();
        assert_eq!(validate(&parsed).unwrap_err().field(), Some(Field::Theme));
    }

    #[test]
    fn test_malformed_json_is_generic() {
        for raw in ["not json", r#"{"words": "crypt"}"#, "[1, 2]"] {
            let err = StoryForm::from_json(raw).unwrap_err();
            assert_eq!(err.field(), None);
            assert_eq!(err.message(), MSG_INVALID_DATA);
        }
    }

    #[test]
    fn test_try_from() {
        let request = StoryRequest::try_from(form("adventure", &["map"], 800)).unwrap();
        assert_eq!(request.length(), 800);
    }
}
