//! Render orchestration for the Nanotale TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use nanotale_core::catalog::Catalog;

use crate::app::{App, InputMode, Overlay, Section};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    HotkeyBarWidget, InputWidget, OptionListWidget, StatusBarWidget, StoryWidget,
    WordPickerWidget,
};

/// Main render function
///
/// Returns the story panel's scroll limit for this frame.
pub fn render(frame: &mut Frame, app: &App) -> usize {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let words = WordPickerWidget::new(app.suggestions(), app.draft().words(), &app.theme)
        .cursor(app.word_cursor)
        .focused(app.focus == Section::Words);
    frame.render_widget(words, layout.words_area);

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .focused(app.focus == Section::Custom)
        .editing(app.focus == Section::Custom && app.input_mode == InputMode::Insert);
    frame.render_widget(input, layout.custom_area);

    let catalog = Catalog::global();
    let themes = catalog.themes().iter().map(|t| t.to_string()).collect();
    let theme_list = OptionListWidget::new("Theme", themes, &app.theme)
        .selected(app.theme_index())
        .focused(app.focus == Section::Theme);
    frame.render_widget(theme_list, layout.theme_area);

    let lengths = catalog
        .lengths()
        .iter()
        .map(|l| format!("{l} words"))
        .collect();
    let length_list = OptionListWidget::new("Length", lengths, &app.theme)
        .selected(app.length_index())
        .focused(app.focus == Section::Length);
    frame.render_widget(length_list, layout.length_area);

    let story = StoryWidget::new(app.story(), &app.theme)
        .scroll(app.story_scroll)
        .focused(app.focus == Section::Story)
        .generating(app.is_generating(), app.animation_frame);
    let story_scroll_limit = story.max_scroll(layout.story_area);
    frame.render_widget(story, layout.story_area);

    let status = StatusBarWidget::new(app.input_mode, &app.theme)
        .message(app.status())
        .command(app.command_buffer());
    frame.render_widget(status, layout.status_bar);

    let hotkeys = HotkeyBarWidget::new(app.input_mode, app.focus, &app.theme);
    frame.render_widget(hotkeys, layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }

    story_scroll_limit
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let draft = app.draft();
    let length = match draft.listed_length() {
        Some(length) => length.to_string(),
        None => "?".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(
            " Nanotale ",
            Style::default()
                .fg(app.theme.story_title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} | {} words ", draft.theme(), length),
            app.theme.muted_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Share { url } => render_share_overlay(frame, app, url, area),
    }
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(54, 26, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Nanotale - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Building the story:"),
        Line::from("  Tab/Shift+Tab   Move between sections"),
        Line::from("  h/l, Space      Move and pick suggested words"),
        Line::from("  i, Enter        Type a word of your own"),
        Line::from("  j/k             Choose theme or length"),
        Line::from("  r / R           New suggestions / random words"),
        Line::from("  d               Drop the last chosen word"),
        Line::from(""),
        heading("The story:"),
        Line::from("  g               Generate"),
        Line::from("  j/k, PgUp/PgDn  Scroll"),
        Line::from("  y               Copy to clipboard"),
        Line::from("  s               Share link"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  :w [file]       Save (default story.txt)"),
        Line::from("  :wq             Save and quit"),
        Line::from("  :q              Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Render share overlay
fn render_share_overlay(frame: &mut Frame, app: &App, url: &str, area: Rect) {
    let popup_area = centered_rect_fixed(70, 12, area);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from("Open this link to share your story:"),
        Line::from(""),
        Line::from(Span::styled(
            url,
            Style::default()
                .fg(app.theme.border_focused)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Share ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
