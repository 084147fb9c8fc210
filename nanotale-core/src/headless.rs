//! Headless story session for programmatic use.
//!
//! This module drives the same draft-and-submit flow as the terminal UI
//! without any rendering. It's designed for:
//! - Automated testing with real or mocked model responses
//! - Scripts and agents talking to Nanotale over a line protocol
//!
//! # Example
//!
//! ```ignore
//! use nanotale_core::headless::HeadlessSession;
//! use nanotale_core::{GeneratorConfig, StoryGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = StoryGenerator::from_env(GeneratorConfig::new())?;
//!     let mut session = HeadlessSession::new(generator);
//!
//!     session.draft_mut().set_theme("horror");
//!     session.draft_mut().set_words(["crypt", "wraith"]);
//!
//!     let outcome = session.submit().await;
//!     println!("{}", outcome.to_json());
//!
//!     session.save_story("crypt.txt").await?;
//!     Ok(())
//! }
//! ```

use std::path::Path;

use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::action::{generate_story, generate_story_json, GenerateOutcome};
use crate::draft::StoryDraft;
use crate::generator::StoryGenerator;
use crate::share::story_text;
use crate::story::StoryResult;

pub const HELP: &str = "\
Commands:
  #theme <name>        set the theme
  #words <w1 w2 ...>   replace the selected words (spaces or commas)
  #add <word>          add one custom word
  #length <n>          set the target length in words
  #random              pick three random words
  #go                  generate a story from the current draft
  #status              show the current draft as JSON
  #save <path>         write the last story to a text file
  #help                show this help
  #quit                leave
Any other line is read as a JSON record: {\"theme\": ..., \"words\": [...], \"length\": ...}";

/// Errors from headless commands.
#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("Unknown command: #{0} (try #help)")]
    UnknownCommand(String),

    #[error("#{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("No story to save yet")]
    NoStory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    Theme(String),
    Words(Vec<String>),
    Add(String),
    Length(String),
    Random,
    Go,
    Status,
    Save(String),
    Help,
    Quit,
    /// A raw JSON form record.
    Record(String),
}

impl HeadlessCommand {
    /// Parse a line of input. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, HeadlessError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('#') else {
            return Ok(Some(HeadlessCommand::Record(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "theme" => HeadlessCommand::Theme(required(arg, "theme")?.to_string()),
            "words" => HeadlessCommand::Words(
                arg.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "add" => HeadlessCommand::Add(required(arg, "add")?.to_string()),
            "length" => HeadlessCommand::Length(required(arg, "length")?.to_string()),
            "save" => HeadlessCommand::Save(required(arg, "save")?.to_string()),
            "random" => HeadlessCommand::Random,
            "go" => HeadlessCommand::Go,
            "status" => HeadlessCommand::Status,
            "help" => HeadlessCommand::Help,
            "quit" | "exit" => HeadlessCommand::Quit,
            other => return Err(HeadlessError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(arg: &'a str, command: &'static str) -> Result<&'a str, HeadlessError> {
    if arg.is_empty() {
        Err(HeadlessError::MissingArgument(command))
    } else {
        Ok(arg)
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessReply {
    /// Result of a submission.
    Outcome(GenerateOutcome),
    /// The draft after a change, or on request.
    Draft(StoryDraft),
    /// A plain informational message.
    Info(String),
    Quit,
}

impl HeadlessReply {
    /// Text written back to the caller, one or more lines.
    pub fn render(&self) -> String {
        match self {
            HeadlessReply::Outcome(outcome) => outcome.to_json(),
            HeadlessReply::Draft(draft) => serde_json::to_string(draft)
                .unwrap_or_else(|e| format!("could not show draft: {e}")),
            HeadlessReply::Info(text) => text.clone(),
            HeadlessReply::Quit => "bye".to_string(),
        }
    }
}

/// A draft plus a generator, driven by commands instead of keys.
pub struct HeadlessSession {
    generator: StoryGenerator,
    draft: StoryDraft,
    last_story: Option<StoryResult>,
}

impl HeadlessSession {
    /// A session with a freshly randomized draft.
    pub fn new(generator: StoryGenerator) -> Self {
        Self::with_draft(generator, StoryDraft::new(&mut rand::thread_rng()))
    }

    pub fn with_draft(generator: StoryGenerator, draft: StoryDraft) -> Self {
        Self {
            generator,
            draft,
            last_story: None,
        }
    }

    pub fn draft(&self) -> &StoryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut StoryDraft {
        &mut self.draft
    }

    /// The most recent successfully generated story.
    pub fn last_story(&self) -> Option<&StoryResult> {
        self.last_story.as_ref()
    }

    /// Submit the current draft.
    pub async fn submit(&mut self) -> GenerateOutcome {
        let outcome = generate_story(&self.generator, self.draft.to_form()).await;
        self.record(outcome)
    }

    /// Submit a raw JSON record, leaving the draft untouched.
    pub async fn submit_json(&mut self, raw: &str) -> GenerateOutcome {
        let outcome = generate_story_json(&self.generator, raw).await;
        self.record(outcome)
    }

    /// Keep the story from a successful outcome; failures leave the last one.
    fn record(&mut self, outcome: GenerateOutcome) -> GenerateOutcome {
        if let Some(story) = outcome.story() {
            self.last_story = Some(story.clone());
        }
        outcome
    }

    /// Write the last story as plain text.
    pub async fn save_story(&self, path: impl AsRef<Path>) -> Result<(), HeadlessError> {
        let story = self.last_story.as_ref().ok_or(HeadlessError::NoStory)?;
        fs::write(path.as_ref(), story_text(story)).await?;
        info!(path = %path.as_ref().display(), "story saved");
        Ok(())
    }

    /// Run one command.
    pub async fn execute(&mut self, command: HeadlessCommand) -> Result<HeadlessReply, HeadlessError> {
        let reply = match command {
            HeadlessCommand::Theme(theme) => {
                self.draft.set_theme(theme);
                HeadlessReply::Draft(self.draft.clone())
            }
            HeadlessCommand::Words(words) => {
                self.draft.set_words(words);
                HeadlessReply::Draft(self.draft.clone())
            }
            HeadlessCommand::Add(word) => {
                self.draft.add_custom_word(&word);
                HeadlessReply::Draft(self.draft.clone())
            }
            HeadlessCommand::Length(length) => {
                self.draft.set_length(length);
                HeadlessReply::Draft(self.draft.clone())
            }
            HeadlessCommand::Random => {
                self.draft.randomize_words(&mut rand::thread_rng());
                HeadlessReply::Draft(self.draft.clone())
            }
            HeadlessCommand::Status => HeadlessReply::Draft(self.draft.clone()),
            HeadlessCommand::Go => HeadlessReply::Outcome(self.submit().await),
            HeadlessCommand::Record(raw) => HeadlessReply::Outcome(self.submit_json(&raw).await),
            HeadlessCommand::Save(path) => {
                self.save_story(&path).await?;
                HeadlessReply::Info(format!("saved to {path}"))
            }
            HeadlessCommand::Help => HeadlessReply::Info(HELP.to_string()),
            HeadlessCommand::Quit => HeadlessReply::Quit,
        };
        Ok(reply)
    }
}
