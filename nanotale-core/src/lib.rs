//! Story generation for Nanotale.
//!
//! This crate provides:
//! - The word, theme and length catalog
//! - Form validation with one user-facing message per failure
//! - A generation pipeline that asks a language model for a titled story
//!   through a declared output shape
//! - A headless session for scripted use, and a mock model for tests
//!
//! # Quick Start
//!
//! ```ignore
//! use nanotale_core::{generate_story, GeneratorConfig, StoryForm, StoryGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = StoryGenerator::from_env(GeneratorConfig::new())?;
//!
//!     let form = StoryForm::new("horror", ["crypt", "wraith"], 100);
//!     let outcome = generate_story(&generator, form).await;
//!     println!("{}", outcome.to_json());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod catalog;
pub mod config;
pub mod draft;
pub mod generator;
pub mod headless;
pub mod markup;
pub mod model;
pub mod prompt;
pub mod share;
pub mod story;
pub mod testing;
pub mod validate;

// Re-export for convenience
pub use nanotale_macros::OutputShape;

// Primary public API
pub use action::{generate_story, generate_story_json, GenerateOutcome, MSG_GENERATION_FAILED};
pub use catalog::Catalog;
pub use config::GeneratorConfig;
pub use draft::StoryDraft;
pub use generator::{GenerationError, StoryGenerator};
pub use headless::{HeadlessCommand, HeadlessError, HeadlessReply, HeadlessSession};
pub use model::{ClaudeModel, StoryModel};
pub use story::StoryResult;
pub use testing::{MockModel, MockReply};
pub use validate::{validate, RawLength, StoryForm, StoryRequest, ValidationError};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    /// Suggest a follow-up story
    #[derive(OutputShape, Deserialize)]
    #[shape(name = "suggest_sequel")]
    #[allow(dead_code)]
    struct Sequel {
        /// Working title for the sequel
        title: String,
        /// Optional logline
        logline: Option<String>,
        #[shape(rename = "word_count")]
        length: u32,
        #[shape(optional)]
        tags: Vec<String>,
    }

    #[test]
    fn test_package_metadata_from_workspace() {
        assert_eq!(env!("CARGO_PKG_LICENSE"), "MIT");
        assert_eq!(env!("CARGO_PKG_AUTHORS"), "Nanotale contributors");
    }

    #[test]
    fn test_shape_derive() {
        assert_eq!(Sequel::shape_name(), "suggest_sequel");
        assert_eq!(Sequel::shape_description(), "Suggest a follow-up story");
    }

    #[test]
    fn test_shape_schema() {
        let schema = Sequel::json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["title"]["type"], "string");
        assert_eq!(schema["properties"]["logline"]["type"], "string");
        assert_eq!(schema["properties"]["word_count"]["type"], "integer");
        assert_eq!(schema["properties"]["tags"]["type"], "array");
        assert_eq!(schema["properties"]["tags"]["items"]["type"], "string");

        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "title"));
        assert!(required.iter().any(|v| v == "word_count"));
        assert!(!required.iter().any(|v| v == "logline"));
        assert!(!required.iter().any(|v| v == "tags"));
    }

    #[test]
    fn test_shape_default_name() {
        /// No name given
        #[derive(OutputShape)]
        #[allow(dead_code)]
        struct PlotTwist {
            reveal: String,
        }
        assert_eq!(PlotTwist::shape_name(), "plot_twist");
        assert_eq!(PlotTwist::as_tool().description, "No name given");
    }
}
