//! Testing utilities for story generation.
//!
//! `MockModel` stands in for Claude so the pipeline, the headless session
//! and the binary can be exercised without API calls.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use claude::Tool;
use serde_json::Value;

use crate::model::StoryModel;
use crate::story::StoryResult;

/// A scripted answer from the mock model.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer through the shape with this story.
    Story(StoryResult),
    /// Answer through the shape with arbitrary JSON.
    Raw(Value),
    /// Reply without structured output.
    Empty,
    /// Fail the call as a network error with this detail.
    Failure(String),
}

impl MockReply {
    pub fn story(title: impl Into<String>, story: impl Into<String>) -> Self {
        MockReply::Story(StoryResult::new(title, story))
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        MockReply::Failure(detail.into())
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    prompts: Vec<String>,
    shapes: Vec<String>,
}

/// A model that returns scripted replies in order and records what it was asked.
///
/// Clones share state, so a test can keep one handle and give another to
/// the generator.
#[derive(Debug, Clone, Default)]
pub struct MockModel {
    state: Arc<Mutex<MockState>>,
}

impl MockModel {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                replies: replies.into(),
                ..MockState::default()
            })),
        }
    }

    /// Add a reply to the end of the script.
    pub fn queue(&self, reply: MockReply) {
        self.lock().replies.push_back(reply);
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Names of the shapes requested so far.
    pub fn shapes(&self) -> Vec<String> {
        self.lock().shapes.clone()
    }

    pub fn calls(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Replies still waiting to be used.
    pub fn remaining(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StoryModel for MockModel {
    async fn produce(&self, prompt: &str, shape: &Tool) -> Result<Option<Value>, claude::Error> {
        let reply = {
            let mut state = self.lock();
            state.prompts.push(prompt.to_string());
            state.shapes.push(shape.name.clone());
            state.replies.pop_front()
        };

        match reply {
            Some(MockReply::Story(story)) => serde_json::to_value(story)
                .map(Some)
                .map_err(|e| claude::Error::Parse(e.to_string())),
            Some(MockReply::Raw(value)) => Ok(Some(value)),
            Some(MockReply::Empty) => Ok(None),
            Some(MockReply::Failure(detail)) => Err(claude::Error::Network(detail)),
            None => Ok(Some(serde_json::json!({
                "title": "Out of Script",
                "story": "The mock model has no more scripted stories."
            }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let mock = MockModel::new(vec![MockReply::story("One", "First."), MockReply::Empty]);
        let shape = StoryResult::as_tool();

        let first = mock.produce("a", &shape).await.unwrap().unwrap();
        assert_eq!(first["title"], "One");
        assert!(mock.produce("b", &shape).await.unwrap().is_none());
        assert_eq!(mock.prompts(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(mock.remaining(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let mock = MockModel::default();
        let handle = mock.clone();
        handle.queue(MockReply::failure("boom"));

        let err = mock
            .produce("x", &StoryResult::as_tool())
            .await
            .unwrap_err();
        assert!(matches!(err, claude::Error::Network(ref d) if d == "boom"));
        assert_eq!(handle.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_script_still_answers() {
        let mock = MockModel::default();
        let value = mock.produce("x", &StoryResult::as_tool()).await.unwrap();
        assert!(StoryResult::from_output(value.unwrap()).is_some());
    }
}
