//! Main application state and logic

use std::io;
use std::path::{Path, PathBuf};

use nanotale_core::catalog::{Catalog, SUGGESTION_COUNT};
use nanotale_core::share::{share_url, story_text};
use nanotale_core::{GenerateOutcome, StoryDraft, StoryResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::ui::theme::UiTheme;
use crate::worker::{GenerationDone, GenerationJob};

/// Where `:w` writes when no path is given.
pub const DEFAULT_SAVE_PATH: &str = "story.txt";

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - typing a custom word
    Insert,
    /// Command mode - entering : commands
    Command,
}

/// Form sections, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Words,
    Custom,
    Theme,
    Length,
    Story,
}

impl Section {
    const ORDER: [Section; 5] = [
        Section::Words,
        Section::Custom,
        Section::Theme,
        Section::Length,
        Section::Story,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Overlay types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Share { url: String },
}

/// A message for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    // UI state
    pub theme: UiTheme,
    pub focus: Section,
    overlay: Option<Overlay>,
    pub input_mode: InputMode,

    // Form
    draft: StoryDraft,
    suggestions: Vec<&'static str>,
    pub word_cursor: usize,
    theme_index: usize,
    length_index: usize,

    // Custom word input
    input_buffer: String,
    cursor_position: usize,

    // Command line (without the leading ':')
    command_buffer: String,

    // Generation
    pending_job: Option<u64>,
    next_job_id: u64,
    story: Option<StoryResult>,
    pub story_scroll: usize,
    story_scroll_limit: usize,

    // Status
    status: Option<StatusMessage>,
    pub should_quit: bool,
    pub quit_after_save: bool,

    // Work for the main loop
    pub pending_save: Option<PathBuf>,
    pending_clipboard: Option<String>,

    // Animation
    pub animation_frame: u8,

    rng: StdRng,
}

impl App {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create the app with a specific random source.
    pub fn with_rng(mut rng: StdRng) -> Self {
        let catalog = Catalog::global();
        let draft = StoryDraft::new(&mut rng);
        let theme_index = catalog.theme_index(draft.theme()).unwrap_or(0);
        let length_index = draft
            .listed_length()
            .and_then(|l| catalog.length_index(l))
            .unwrap_or(0);
        let suggestions = catalog.sample_words(&mut rng, SUGGESTION_COUNT);

        Self {
            theme: UiTheme::default(),
            focus: Section::default(),
            overlay: None,
            input_mode: InputMode::Normal,
            draft,
            suggestions,
            word_cursor: 0,
            theme_index,
            length_index,
            input_buffer: String::new(),
            cursor_position: 0,
            command_buffer: String::new(),
            pending_job: None,
            next_job_id: 1,
            story: None,
            story_scroll: 0,
            story_scroll_limit: usize::MAX,
            status: Some(StatusMessage {
                text: "Pick some words, a theme and a length, then press g".to_string(),
                is_error: false,
            }),
            should_quit: false,
            quit_after_save: false,
            pending_save: None,
            pending_clipboard: None,
            animation_frame: 0,
            rng,
        }
    }

    // ========================================================================
    // Form state
    // ========================================================================

    pub fn draft(&self) -> &StoryDraft {
        &self.draft
    }

    pub fn suggestions(&self) -> &[&'static str] {
        &self.suggestions
    }

    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    pub fn length_index(&self) -> usize {
        self.length_index
    }

    /// Move the suggestion cursor, wrapping at both ends
    pub fn move_word_cursor(&mut self, delta: isize) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        let next = (self.word_cursor as isize + delta).rem_euclid(len as isize);
        self.word_cursor = next as usize;
    }

    /// Toggle the suggestion under the cursor
    pub fn toggle_current_word(&mut self) {
        let Some(word) = self.suggestions.get(self.word_cursor).copied() else {
            return;
        };
        if self.draft.toggle_word(word) {
            self.set_status(format!("Added \"{word}\""));
        } else {
            self.set_status(format!("Removed \"{word}\""));
        }
    }

    /// Show a fresh set of suggestions. The selection is kept.
    pub fn refresh_suggestions(&mut self) {
        self.suggestions = Catalog::global().sample_words(&mut self.rng, SUGGESTION_COUNT);
        self.word_cursor = 0;
        self.set_status("New suggestions");
    }

    /// Replace the selection with random words
    pub fn randomize_words(&mut self) {
        self.draft.randomize_words(&mut self.rng);
        self.set_status(format!("Random words: {}", self.draft.words().join(", ")));
    }

    pub fn remove_last_word(&mut self) {
        match self.draft.pop_word() {
            Some(word) => self.set_status(format!("Removed \"{word}\"")),
            None => self.set_status("No words selected"),
        }
    }

    /// Add the typed custom word to the selection
    pub fn add_custom_word(&mut self) {
        let raw = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        match self.draft.add_custom_word(&raw) {
            Some(word) => self.set_status(format!("Added \"{word}\"")),
            None if raw.trim().is_empty() => {}
            None => {
                let word = raw.trim().to_lowercase();
                self.set_status(format!("\"{word}\" is already selected"));
            }
        }
    }

    /// Move the theme selection
    pub fn select_theme(&mut self, delta: isize) {
        let themes = Catalog::global().themes();
        self.theme_index = step(self.theme_index, delta, themes.len());
        self.draft.set_theme(themes[self.theme_index]);
    }

    /// Move the length selection
    pub fn select_length(&mut self, delta: isize) {
        let lengths = Catalog::global().lengths();
        self.length_index = step(self.length_index, delta, lengths.len());
        self.draft.set_length(lengths[self.length_index]);
    }

    // ========================================================================
    // Focus and overlays
    // ========================================================================

    pub fn cycle_focus(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn cycle_focus_reverse(&mut self) {
        self.set_focus(self.focus.prev());
    }

    /// Focus a section; the custom word field starts in insert mode
    pub fn set_focus(&mut self, section: Section) {
        self.focus = section;
        self.input_mode = if section == Section::Custom {
            InputMode::Insert
        } else {
            InputMode::Normal
        };
    }

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    // ========================================================================
    // Generation
    // ========================================================================

    pub fn is_generating(&self) -> bool {
        self.pending_job.is_some()
    }

    pub fn story(&self) -> Option<&StoryResult> {
        self.story.as_ref()
    }

    /// Start a submission of the current draft.
    ///
    /// Returns the job to hand to the worker, or `None` while another
    /// submission is still in flight.
    pub fn submit(&mut self) -> Option<GenerationJob> {
        if self.is_generating() {
            self.set_status("Still writing the current story...");
            return None;
        }

        let id = self.next_job_id;
        self.next_job_id += 1;
        self.pending_job = Some(id);
        self.story = None;
        self.story_scroll = 0;
        self.animation_frame = 0;
        self.set_status("Writing your story...");

        Some(GenerationJob {
            id,
            form: self.draft.to_form(),
        })
    }

    /// Give up on a job the worker never received
    pub fn abandon_job(&mut self, id: u64) {
        if self.pending_job == Some(id) {
            self.pending_job = None;
            self.set_error("The story worker is not running");
        }
    }

    /// Apply a finished job. Outcomes for anything but the pending job are ignored.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_outcome(&mut self, done: GenerationDone) -> bool {
        if self.pending_job != Some(done.id) {
            debug!(id = done.id, pending = ?self.pending_job, "discarding stale outcome");
            return false;
        }
        self.pending_job = None;

        match done.outcome {
            GenerateOutcome::Story(story) => {
                self.set_status(format!(
                    "\"{}\" is ready (y copy, s share, :w save)",
                    story.title
                ));
                self.story = Some(story);
                self.story_scroll = 0;
            }
            GenerateOutcome::Error(message) => self.set_error(message),
        }
        true
    }

    // ========================================================================
    // Story actions
    // ========================================================================

    pub fn scroll_story_down(&mut self, lines: usize) {
        self.story_scroll = self
            .story_scroll
            .saturating_add(lines)
            .min(self.story_scroll_limit);
    }

    /// Largest useful scroll offset, as measured by the last frame drawn
    pub fn set_story_scroll_limit(&mut self, limit: usize) {
        self.story_scroll_limit = limit;
        self.story_scroll = self.story_scroll.min(limit);
    }

    pub fn scroll_story_up(&mut self, lines: usize) {
        self.story_scroll = self.story_scroll.saturating_sub(lines);
    }

    /// Queue the story text for the clipboard
    pub fn copy_story(&mut self) {
        match &self.story {
            Some(story) => {
                self.pending_clipboard = Some(story_text(story));
                self.set_status("Copied to clipboard");
            }
            None => self.set_error("Nothing to copy yet"),
        }
    }

    /// Text waiting to be copied by the main loop
    pub fn take_clipboard(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    /// Show the share link
    pub fn show_share(&mut self) {
        match &self.story {
            Some(story) => {
                self.overlay = Some(Overlay::Share {
                    url: share_url(story),
                });
            }
            None => self.set_error("Nothing to share yet"),
        }
    }

    /// Ask the main loop to write the story to `path`
    pub fn request_save(&mut self, path: Option<&str>) {
        if self.story.is_none() {
            self.set_error("Nothing to save yet");
            self.quit_after_save = false;
            return;
        }
        let path = PathBuf::from(path.unwrap_or(DEFAULT_SAVE_PATH));
        self.set_status(format!("Saving to {}...", path.display()));
        self.pending_save = Some(path);
    }

    /// The text the main loop should write for a pending save
    pub fn save_contents(&self) -> Option<String> {
        self.story.as_ref().map(story_text)
    }

    /// Report how a save went
    pub fn finish_save(&mut self, path: &Path, result: io::Result<()>) {
        match result {
            Ok(()) => {
                self.set_status(format!("Saved to {}", path.display()));
                if self.quit_after_save {
                    self.should_quit = true;
                }
            }
            Err(e) => {
                self.set_error(format!("Save failed: {e}"));
                self.quit_after_save = false;
            }
        }
    }

    // ========================================================================
    // Custom word input
    // ========================================================================

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Insert a character at the cursor
    pub fn type_char(&mut self, c: char) {
        let byte_pos = byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let byte_pos = byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.remove(byte_pos);
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            let byte_pos = byte_index(&self.input_buffer, self.cursor_position);
            self.input_buffer.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    // ========================================================================
    // Command mode
    // ========================================================================

    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.command_buffer.clear();
    }

    pub fn leave_command_mode(&mut self) {
        self.command_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn command_push(&mut self, c: char) {
        self.command_buffer.push(c);
    }

    /// Remove the last command character. Returns false when the line was already empty.
    pub fn command_pop(&mut self) -> bool {
        self.command_buffer.pop().is_some()
    }

    /// Run the typed command.
    ///
    /// Returns a job when the command asked for a story.
    pub fn run_command(&mut self) -> Option<GenerationJob> {
        let command = std::mem::take(&mut self.command_buffer);
        self.leave_command_mode();

        let mut parts = command.split_whitespace();
        let name = parts.next()?;
        let arg = parts.next();

        match name {
            "q" | "quit" | "exit" => {
                self.should_quit = true;
                None
            }
            "w" | "save" => {
                self.request_save(arg);
                None
            }
            "wq" => {
                self.quit_after_save = true;
                self.request_save(arg);
                None
            }
            "g" | "go" | "generate" => self.submit(),
            "y" | "copy" => {
                self.copy_story();
                None
            }
            "share" => {
                self.show_share();
                None
            }
            "random" => {
                self.randomize_words();
                None
            }
            "help" | "h" => {
                self.toggle_help();
                None
            }
            other => {
                self.set_error(format!("Unknown command: {other}"));
                None
            }
        }
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: message.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: message.into(),
            is_error: true,
        });
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Advance animations
    pub fn tick(&mut self) {
        if self.is_generating() {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Move `index` by `delta`, staying within `0..len`
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).clamp(0, len as isize - 1) as usize
}

/// Byte offset of the `chars`-th character
fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
