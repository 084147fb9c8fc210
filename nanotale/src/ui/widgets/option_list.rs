//! Vertical list of choices with one selected

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::UiTheme;

/// A titled list where exactly one entry is selected (themes, lengths)
pub struct OptionListWidget<'a> {
    title: &'a str,
    options: Vec<String>,
    selected: usize,
    theme: &'a UiTheme,
    focused: bool,
}

impl<'a> OptionListWidget<'a> {
    pub fn new(title: &'a str, options: Vec<String>, theme: &'a UiTheme) -> Self {
        Self {
            title,
            options,
            selected: 0,
            theme,
            focused: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for OptionListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.title);
        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        // Keep the selection visible when the list is taller than the area
        let visible = inner.height as usize;
        let offset = if visible == 0 {
            0
        } else {
            self.selected.saturating_sub(visible - 1)
        };

        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .skip(offset)
            .map(|(i, option)| {
                let selected = i == self.selected;
                let marker = if selected { "● " } else { "○ " };
                Line::from(Span::styled(
                    format!("{marker}{option}"),
                    self.theme.choice_style(selected, selected && self.focused),
                ))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_marks_selection() {
        let theme = UiTheme::default();
        let options = vec!["sci-fi".to_string(), "horror".to_string()];
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        OptionListWidget::new("Theme", options, &theme)
            .selected(1)
            .render(area, &mut buf);

        assert!(row(&buf, 0).contains("Theme"));
        assert!(row(&buf, 1).contains("○ sci-fi"));
        assert!(row(&buf, 2).contains("● horror"));
    }

    #[test]
    fn test_scrolls_to_selection() {
        let theme = UiTheme::default();
        let options: Vec<String> = (1..=10).map(|n| format!("option {n}")).collect();
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        OptionListWidget::new("Length", options, &theme)
            .selected(9)
            .render(area, &mut buf);

        assert!(row(&buf, 3).contains("● option 10"));
        assert!(row(&buf, 1).contains("option 8"));
    }
}
