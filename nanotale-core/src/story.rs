//! The structured result of a generation.

use nanotale_macros::OutputShape;
use serde::{Deserialize, Serialize};

/// Record the finished story together with its title.
#[derive(OutputShape, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[shape(name = "record_story")]
pub struct StoryResult {
    /// An appropriate, human-like title for the generated story.
    pub title: String,
    /// The generated story.
    pub story: String,
}

impl StoryResult {
    pub fn new(title: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            story: story.into(),
        }
    }

    /// Read a result out of the model's structured answer.
    ///
    /// Returns `None` when the value doesn't match the shape or the title is
    /// blank.
    pub fn from_output(value: serde_json::Value) -> Option<Self> {
        let result: StoryResult = serde_json::from_value(value).ok()?;
        (!result.title.trim().is_empty()).then_some(result)
    }
}
