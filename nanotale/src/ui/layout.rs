//! Layout calculations for the Nanotale TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculate the main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub words_area: Rect,
    pub custom_area: Rect,
    pub theme_area: Rect,
    pub length_area: Rect,
    pub story_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        // Main vertical split
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(10),   // Main content
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        // Content area: form + story
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[1]);

        // Form column: words, custom word, then theme and length side by side
        let form_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(7),     // Words
                Constraint::Length(3),  // Custom word
                Constraint::Length(12), // Theme + length
            ])
            .split(content_chunks[0]);

        let option_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(form_chunks[2]);

        Self {
            title_area: main_chunks[0],
            words_area: form_chunks[0],
            custom_area: form_chunks[1],
            theme_area: option_chunks[0],
            length_area: option_chunks[1],
            story_area: content_chunks[1],
            status_bar: main_chunks[2],
            hotkey_bar: main_chunks[3],
        }
    }
}

/// Calculate centered popup area with fixed size
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_area() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = AppLayout::calculate(area);
        assert_eq!(layout.title_area.height, 1);
        assert_eq!(layout.hotkey_bar.y, 39);
        assert_eq!(layout.story_area.x, layout.words_area.width);
        assert_eq!(layout.theme_area.height, 12);
        assert_eq!(layout.length_area.y, layout.theme_area.y);
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect_fixed(60, 20, area);
        assert_eq!(popup, area);

        let popup = centered_rect_fixed(20, 4, area);
        assert_eq!(popup, Rect::new(10, 3, 20, 4));
    }
}
