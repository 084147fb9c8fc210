//! Color theme and styling for the Nanotale TUI

use ratatui::style::{Color, Modifier, Style};

use nanotale_core::markup::RunStyle;

/// UI color theme
#[derive(Debug, Clone)]
pub struct UiTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Form colors
    pub selected: Color,
    pub cursor: Color,
    pub muted: Color,

    // Story colors
    pub story_text: Color,
    pub story_title: Color,
    pub skeleton: Color,

    // Status colors
    pub info: Color,
    pub error: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            selected: Color::LightGreen,
            cursor: Color::Cyan,
            muted: Color::DarkGray,

            story_text: Color::White,
            story_title: Color::Yellow,
            skeleton: Color::DarkGray,

            info: Color::Gray,
            error: Color::LightRed,
        }
    }
}

impl UiTheme {
    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style for a section block
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Style for a choice in a word list or option list
    pub fn choice_style(&self, selected: bool, under_cursor: bool) -> Style {
        let mut style = if selected {
            Style::default()
                .fg(self.selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.foreground)
        };
        if under_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }

    pub fn story_title_style(&self) -> Style {
        Style::default()
            .fg(self.story_title)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a run of story text
    pub fn story_style(&self, run: RunStyle) -> Style {
        let mut style = Style::default().fg(if run.heading {
            self.story_title
        } else {
            self.story_text
        });
        if run.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if run.strong || run.heading {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn skeleton_style(&self) -> Style {
        Style::default().fg(self.skeleton)
    }

    /// Style for the status message
    pub fn status_style(&self, is_error: bool) -> Style {
        if is_error {
            Style::default().fg(self.error).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.info)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_style() {
        let theme = UiTheme::default();
        let style = theme.story_style(RunStyle {
            emphasis: true,
            strong: true,
            heading: false,
        });
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, Some(theme.story_text));

        let heading = theme.story_style(RunStyle {
            heading: true,
            ..RunStyle::default()
        });
        assert_eq!(heading.fg, Some(theme.story_title));
    }

    #[test]
    fn test_choice_style() {
        let theme = UiTheme::default();
        let style = theme.choice_style(true, true);
        assert_eq!(style.fg, Some(theme.selected));
        assert!(style.add_modifier.contains(Modifier::REVERSED));
        assert!(!theme
            .choice_style(false, false)
            .add_modifier
            .contains(Modifier::REVERSED));
    }
}
