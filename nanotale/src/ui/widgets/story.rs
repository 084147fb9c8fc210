//! Story display widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use nanotale_core::markup::parse_story;
use nanotale_core::StoryResult;

use crate::ui::theme::UiTheme;

/// Widths of the placeholder bars drawn while a story is being written
const SKELETON_ROWS: [u16; 7] = [90, 100, 95, 70, 0, 100, 85];

/// Widget for the generated story
pub struct StoryWidget<'a> {
    story: Option<&'a StoryResult>,
    scroll: usize,
    theme: &'a UiTheme,
    focused: bool,
    generating: bool,
    frame: u8,
}

impl<'a> StoryWidget<'a> {
    pub fn new(story: Option<&'a StoryResult>, theme: &'a UiTheme) -> Self {
        Self {
            story,
            scroll: 0,
            theme,
            focused: false,
            generating: false,
            frame: 0,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draw the loading skeleton instead of the story
    pub fn generating(mut self, generating: bool, frame: u8) -> Self {
        self.generating = generating;
        self.frame = frame;
        self
    }

    fn story_lines(&self, story: &StoryResult) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                story.title.clone(),
                self.theme.story_title_style(),
            )),
            Line::from(""),
        ];

        for markup in parse_story(&story.story) {
            let spans: Vec<Span> = markup
                .runs
                .into_iter()
                .map(|run| Span::styled(run.text, self.theme.story_style(run.style)))
                .collect();
            lines.push(Line::from(spans));
        }
        lines
    }

    fn skeleton_lines(&self, width: u16) -> Vec<Line<'static>> {
        // A brighter band sweeps down the bars
        let highlight = (self.frame / 2) as usize % SKELETON_ROWS.len();
        let mut lines = vec![
            Line::from(Span::styled(
                "Writing your story...",
                self.theme.muted_style(),
            )),
            Line::from(""),
        ];

        for (i, percent) in SKELETON_ROWS.iter().enumerate() {
            let len = (width as usize * *percent as usize) / 100;
            let style = if i == highlight {
                self.theme.skeleton_style().add_modifier(Modifier::BOLD)
            } else {
                self.theme.skeleton_style().add_modifier(Modifier::DIM)
            };
            lines.push(Line::from(Span::styled("░".repeat(len), style)));
        }
        lines
    }
}

impl StoryWidget<'_> {
    fn paragraph(&self, width: u16) -> Paragraph<'static> {
        let lines = if self.generating {
            self.skeleton_lines(width)
        } else if let Some(story) = self.story {
            self.story_lines(story)
        } else {
            vec![Line::from(Span::styled(
                "Your story will appear here. Press g to write one.",
                self.theme.muted_style(),
            ))]
        };
        Paragraph::new(lines).wrap(Wrap { trim: false })
    }

    /// Largest useful scroll offset when drawn into `area`.
    ///
    /// Counts rows after wrapping, so a long paragraph scrolls row by row.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let text = text_area(Block::default().borders(Borders::ALL).inner(area));
        self.paragraph(text.width)
            .line_count(text.width)
            .saturating_sub(text.height as usize)
    }
}

/// The inner area minus the scrollbar column
fn text_area(inner: Rect) -> Rect {
    Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    }
}

impl Widget for StoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Story [j/k scroll] "
        } else {
            " Story "
        };

        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let text = text_area(inner);
        let paragraph = self.paragraph(text.width);

        // Calculate scroll position over wrapped rows
        let visible_height = text.height as usize;
        let total_rows = paragraph.line_count(text.width);
        let max_scroll = total_rows.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll).min(u16::MAX as usize);

        paragraph.scroll((scroll as u16, 0)).render(text, buf);

        // Render scrollbar if content exceeds visible area
        if total_rows > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}
