//! Word suggestions and the current selection

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use nanotale_core::catalog::MAX_WORDS;

use crate::ui::theme::UiTheme;

/// Suggested words, with the chosen ones listed underneath
pub struct WordPickerWidget<'a> {
    suggestions: &'a [&'static str],
    chosen: &'a [String],
    cursor: usize,
    theme: &'a UiTheme,
    focused: bool,
}

impl<'a> WordPickerWidget<'a> {
    pub fn new(suggestions: &'a [&'static str], chosen: &'a [String], theme: &'a UiTheme) -> Self {
        Self {
            suggestions,
            chosen,
            cursor: 0,
            theme,
            focused: false,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn is_chosen(&self, word: &str) -> bool {
        self.chosen.iter().any(|w| w == word)
    }
}

impl Widget for WordPickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Words [h/l move, space pick, r refresh] "
        } else {
            " Words "
        };
        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (i, word) in self.suggestions.iter().enumerate() {
            let under_cursor = self.focused && i == self.cursor;
            let style = self.theme.choice_style(self.is_chosen(word), under_cursor);
            spans.push(Span::styled(format!(" {word} "), style));
            spans.push(Span::raw(" "));
        }

        let count_style = if self.chosen.len() > MAX_WORDS {
            self.theme.status_style(true)
        } else {
            self.theme.muted_style()
        };

        let chosen = if self.chosen.is_empty() {
            Span::styled("none yet", self.theme.muted_style())
        } else {
            Span::styled(
                self.chosen.join(", "),
                Style::default().fg(self.theme.selected),
            )
        };

        let lines = vec![
            Line::from(spans),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("Chosen ({}/{MAX_WORDS}): ", self.chosen.len()),
                    count_style,
                ),
                chosen,
            ]),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_lists_suggestions_and_choice() {
        let theme = UiTheme::default();
        let suggestions = ["comet", "ember"];
        let chosen = vec!["ember".to_string(), "lantern".to_string()];
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        WordPickerWidget::new(&suggestions, &chosen, &theme).render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("comet"));
        assert!(rendered.contains("Chosen (2/5): ember, lantern"));
    }

    #[test]
    fn test_cursor_only_when_focused() {
        let theme = UiTheme::default();
        let suggestions = ["comet"];
        let area = Rect::new(0, 0, 50, 6);

        let mut buf = Buffer::empty(area);
        WordPickerWidget::new(&suggestions, &[], &theme)
            .focused(true)
            .render(area, &mut buf);
        // border, leading space, then the word
        assert!(buf[(2, 1)].modifier.contains(Modifier::REVERSED));

        let mut buf = Buffer::empty(area);
        WordPickerWidget::new(&suggestions, &[], &theme).render(area, &mut buf);
        assert!(!buf[(2, 1)].modifier.contains(Modifier::REVERSED));
    }
}
