//! Plain-text export and share links for finished stories.

use reqwest::Url;
use tracing::warn;

use crate::story::StoryResult;

const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";
const HASHTAG: &str = "#Nanotale";

/// Longest story text carried into a share link before it is cut.
pub const SHARE_TEXT_LIMIT: usize = 250;

/// Title, a blank line, then the story.
pub fn story_text(result: &StoryResult) -> String {
    format!("{}\n\n{}", result.title, result.story)
}

/// Text placed in a share link, cut to [`SHARE_TEXT_LIMIT`] characters and tagged.
pub fn share_text(result: &StoryResult) -> String {
    let text = story_text(result);
    if text.chars().count() > SHARE_TEXT_LIMIT {
        let cut: String = text.chars().take(SHARE_TEXT_LIMIT).collect();
        format!("{cut}... {HASHTAG}")
    } else {
        format!("{text} {HASHTAG}")
    }
}

/// A tweet intent link prefilled with [`share_text`].
pub fn share_url(result: &StoryResult) -> String {
    let text = share_text(result);
    match Url::parse_with_params(TWEET_INTENT, &[("text", text.as_str())]) {
        Ok(url) => url.into(),
        Err(e) => {
            warn!(error = %e, "could not build share link");
            TWEET_INTENT.to_string()
        }
    }
}
