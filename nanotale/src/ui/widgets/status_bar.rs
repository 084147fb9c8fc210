//! Status bar and hotkey bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{InputMode, Section, StatusMessage};
use crate::ui::theme::UiTheme;

/// Mode indicator plus the status message or the command line
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    message: Option<&'a StatusMessage>,
    command: &'a str,
    theme: &'a UiTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a UiTheme) -> Self {
        Self {
            input_mode,
            message: None,
            command: "",
            theme,
        }
    }

    pub fn message(mut self, message: Option<&'a StatusMessage>) -> Self {
        self.message = message;
        self
    }

    pub fn command(mut self, command: &'a str) -> Self {
        self.command = command;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode, color) = match self.input_mode {
            InputMode::Normal => (" NORMAL ", Color::Blue),
            InputMode::Insert => (" INSERT ", Color::Green),
            InputMode::Command => (" COMMAND ", Color::Magenta),
        };

        let mut spans = vec![
            Span::styled(
                mode,
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if self.input_mode == InputMode::Command {
            spans.push(Span::styled(
                format!(":{}", self.command),
                Style::default().fg(self.theme.foreground),
            ));
            spans.push(Span::styled(
                "▌",
                Style::default().fg(self.theme.cursor),
            ));
        } else if let Some(message) = self.message {
            spans.push(Span::styled(
                message.text.as_str(),
                self.theme.status_style(message.is_error),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Key hints for the focused section and mode
pub struct HotkeyBarWidget<'a> {
    input_mode: InputMode,
    focus: Section,
    theme: &'a UiTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(input_mode: InputMode, focus: Section, theme: &'a UiTheme) -> Self {
        Self {
            input_mode,
            focus,
            theme,
        }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match (self.input_mode, self.focus) {
            (InputMode::Insert, _) => &[("Enter", "add"), ("Esc", "done"), ("Tab", "next")],
            (InputMode::Command, _) => &[("Enter", "run"), ("Esc", "cancel")],
            (InputMode::Normal, Section::Words) => &[
                ("h/l", "move"),
                ("Space", "pick"),
                ("r", "refresh"),
                ("R", "random"),
                ("d", "drop last"),
                ("g", "generate"),
                ("Tab", "next"),
                ("?", "help"),
            ],
            (InputMode::Normal, Section::Custom) => &[
                ("i", "type"),
                ("g", "generate"),
                ("Tab", "next"),
                ("?", "help"),
            ],
            (InputMode::Normal, Section::Theme | Section::Length) => &[
                ("j/k", "choose"),
                ("g", "generate"),
                ("Tab", "next"),
                ("?", "help"),
            ],
            (InputMode::Normal, Section::Story) => &[
                ("j/k", "scroll"),
                ("y", "copy"),
                ("s", "share"),
                (":w", "save"),
                ("g", "again"),
                ("?", "help"),
            ],
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default()
            .fg(self.theme.border_focused)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (key, action) in self.hints() {
            spans.push(Span::styled(format!(" {key}"), key_style));
            spans.push(Span::styled(format!(" {action} "), self.theme.muted_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
