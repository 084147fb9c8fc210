//! Headless mode for Nanotale.
//!
//! A line protocol on stdin/stdout for scripts and agents. Lines starting
//! with `#` are commands; any other line is a JSON form record, answered
//! with the JSON outcome.

use nanotale_core::headless::{HeadlessCommand, HeadlessReply, HeadlessSession, HELP};
use nanotale_core::{StoryDraft, StoryGenerator};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

/// Initial draft values from the command line.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    pub theme: Option<String>,
    pub words: Vec<String>,
    pub length: Option<String>,
}

impl HeadlessConfig {
    /// Apply the configured values over a random starting draft.
    pub fn draft(&self) -> StoryDraft {
        let mut draft = StoryDraft::new(&mut rand::thread_rng());
        if let Some(theme) = &self.theme {
            draft.set_theme(theme.as_str());
        }
        if !self.words.is_empty() {
            draft.set_words(self.words.iter().map(String::as_str));
        }
        if let Some(length) = &self.length {
            draft.set_length(length.as_str());
        }
        draft
    }
}

/// Run the headless protocol on stdin/stdout.
pub async fn run_headless(generator: StoryGenerator, config: HeadlessConfig) -> anyhow::Result<()> {
    let session = HeadlessSession::with_draft(generator, config.draft());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    writeln!(stdout, "=== Nanotale Headless Mode ===")?;
    writeln!(stdout, "{HELP}")?;
    writeln!(stdout)?;

    run_lines(session, stdin, &mut stdout).await
}

/// Drive a session from `input`, writing one reply per command to `out`.
pub async fn run_lines<R, W>(
    mut session: HeadlessSession,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "{}",
        HeadlessReply::Draft(session.draft().clone()).render()
    )?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match HeadlessCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "[ERROR] {e}")?;
                out.flush()?;
                continue;
            }
        };

        match session.execute(command).await {
            Ok(HeadlessReply::Quit) => {
                writeln!(out, "{}", HeadlessReply::Quit.render())?;
                break;
            }
            Ok(reply) => writeln!(out, "{}", reply.render())?,
            Err(e) => {
                warn!(error = %e, "headless command failed");
                writeln!(out, "[ERROR] {e}")?;
            }
        }
        out.flush()?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanotale_core::{MockModel, MockReply};

    async fn run(script: &str, replies: Vec<MockReply>) -> String {
        let generator = StoryGenerator::new(MockModel::new(replies));
        let config = HeadlessConfig {
            theme: Some("mystery".to_string()),
            words: vec!["clock".to_string()],
            length: Some("100".to_string()),
        };
        let session = HeadlessSession::with_draft(generator, config.draft());

        let mut out = Vec::new();
        run_lines(session, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_config_overrides_draft() {
        let config = HeadlessConfig {
            theme: Some("horror".to_string()),
            words: vec!["crypt".to_string(), "wraith".to_string()],
            length: Some("50".to_string()),
        };
        let draft = config.draft();
        assert_eq!(draft.theme(), "horror");
        assert_eq!(draft.words(), ["crypt", "wraith"]);
        assert_eq!(draft.listed_length(), Some(50));

        let draft = HeadlessConfig::default().draft();
        assert_eq!(draft.theme(), "sci-fi");
        assert_eq!(draft.words().len(), 3);
    }

    #[tokio::test]
    async fn test_script_generates_story() {
        let output = run(
            "#go\n#quit\n#go\n",
            vec![MockReply::story("The Stopped Clock", "Midnight, again.")],
        )
        .await;

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("\"theme\":\"mystery\""));
        assert!(lines[1].starts_with("{\"story\":"));
        assert!(lines[1].contains("The Stopped Clock"));
        assert_eq!(lines[2], "bye");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_errors_are_reported_and_loop_continues() {
        let output = run("#dance\n#save out.txt\n\n#length\n#status\n", vec![]).await;
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[1].starts_with("[ERROR] Unknown command: #dance"));
        assert_eq!(lines[2], "[ERROR] No story to save yet");
        assert_eq!(lines[3], "[ERROR] #length needs an argument");
        assert!(lines[4].contains("\"words\":[\"clock\"]"));
    }

    #[tokio::test]
    async fn test_json_record_answers_json() {
        let output = run(r#"{"theme": "sci-fi", "words": [], "length": 100}"#, vec![]).await;
        let last = output.lines().last().unwrap();
        assert_eq!(last, r#"{"error":"Please select or enter at least one word."}"#);
    }
}
