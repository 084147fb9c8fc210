//! Event handling for the Nanotale TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode, Section};
use crate::worker::GenerationJob;

/// Result of handling an event
#[derive(Debug, Clone)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// A submission for the worker
    Submit(GenerationJob),
}

impl From<Option<GenerationJob>> for EventResult {
    fn from(job: Option<GenerationJob>) -> Self {
        match job {
            Some(job) => EventResult::Submit(job),
            None => EventResult::NeedsRedraw,
        }
    }
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    let result = match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    };

    if app.should_quit {
        EventResult::Quit
    } else {
        result
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_story_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_story_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    // Route based on input mode
    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

/// Handle keys while an overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle keys in NORMAL mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char(':') => {
            app.enter_command_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,

        // Section focus cycling
        KeyCode::Tab => {
            app.cycle_focus();
            EventResult::NeedsRedraw
        }
        KeyCode::BackTab => {
            app.cycle_focus_reverse();
            EventResult::NeedsRedraw
        }

        // Actions available everywhere
        KeyCode::Char('g') => app.submit().into(),
        KeyCode::Char('r') => {
            app.refresh_suggestions();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('R') => {
            app.randomize_words();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('y') => {
            app.copy_story();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('s') => {
            app.show_share();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') | KeyCode::Backspace => {
            app.remove_last_word();
            EventResult::NeedsRedraw
        }

        _ => handle_section_keys(app, key),
    }
}

/// Handle keys that depend on the focused section (normal mode)
fn handle_section_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match (app.focus, key.code) {
        (Section::Words, KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('k') | KeyCode::Up) => {
            app.move_word_cursor(-1);
            EventResult::NeedsRedraw
        }
        (
            Section::Words,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('j') | KeyCode::Down,
        ) => {
            app.move_word_cursor(1);
            EventResult::NeedsRedraw
        }
        (Section::Words, KeyCode::Char(' ') | KeyCode::Enter) => {
            app.toggle_current_word();
            EventResult::NeedsRedraw
        }

        (Section::Custom, KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter) => {
            app.input_mode = InputMode::Insert;
            app.cursor_end();
            EventResult::NeedsRedraw
        }

        (Section::Theme, KeyCode::Char('k') | KeyCode::Up) => {
            app.select_theme(-1);
            EventResult::NeedsRedraw
        }
        (Section::Theme, KeyCode::Char('j') | KeyCode::Down) => {
            app.select_theme(1);
            EventResult::NeedsRedraw
        }

        (Section::Length, KeyCode::Char('k') | KeyCode::Up) => {
            app.select_length(-1);
            EventResult::NeedsRedraw
        }
        (Section::Length, KeyCode::Char('j') | KeyCode::Down) => {
            app.select_length(1);
            EventResult::NeedsRedraw
        }

        (Section::Story, KeyCode::Char('k') | KeyCode::Up) => {
            app.scroll_story_up(1);
            EventResult::NeedsRedraw
        }
        (Section::Story, KeyCode::Char('j') | KeyCode::Down) => {
            app.scroll_story_down(1);
            EventResult::NeedsRedraw
        }
        (Section::Story, KeyCode::PageUp) => {
            app.scroll_story_up(10);
            EventResult::NeedsRedraw
        }
        (Section::Story, KeyCode::PageDown) => {
            app.scroll_story_down(10);
            EventResult::NeedsRedraw
        }
        (Section::Story, KeyCode::Home) => {
            app.story_scroll = 0;
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Handle keys in INSERT mode (typing a custom word)
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.add_custom_word();
            EventResult::NeedsRedraw
        }
        KeyCode::Tab => {
            app.cycle_focus();
            EventResult::NeedsRedraw
        }
        KeyCode::BackTab => {
            app.cycle_focus_reverse();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle keys in COMMAND mode
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.leave_command_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => app.run_command().into(),
        KeyCode::Backspace => {
            if !app.command_pop() {
                app.leave_command_mode();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.command_push(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Overlay;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> App {
        App::with_rng(StdRng::seed_from_u64(42))
    }

    fn press(app: &mut App, code: KeyCode) -> EventResult {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        app.toggle_help();
        let result = handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(matches!(result, EventResult::Quit));
    }

    #[test]
    fn test_g_submits_once() {
        let mut app = app();
        let first = press(&mut app, KeyCode::Char('g'));
        assert!(matches!(first, EventResult::Submit(_)));
        assert!(app.is_generating());

        let second = press(&mut app, KeyCode::Char('g'));
        assert!(matches!(second, EventResult::NeedsRedraw));
    }

    #[test]
    fn test_typing_custom_word() {
        let mut app = app();
        app.set_focus(Section::Custom);
        assert_eq!(app.input_mode, InputMode::Insert);

        type_str(&mut app, "Zephyrine");
        assert_eq!(app.input_buffer(), "Zephyrine");
        press(&mut app, KeyCode::Enter);
        assert!(app.draft().is_selected("zephyrine"));
        assert_eq!(app.input_buffer(), "");

        // 'q' is text while inserting
        type_str(&mut app, "q");
        assert_eq!(app.input_buffer(), "q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_word_picker_keys() {
        let mut app = app();
        let first = app.suggestions()[0];
        let second = app.suggestions()[1];
        let was_selected = app.draft().is_selected(second);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.word_cursor, 1);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.draft().is_selected(second), !was_selected);

        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.word_cursor, app.suggestions().len() - 1);
        assert_ne!(app.suggestions()[app.word_cursor], first);
    }

    #[test]
    fn test_theme_and_length_keys() {
        let mut app = app();
        app.set_focus(Section::Theme);
        let before = app.theme_index();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.theme_index(), before + 1);

        app.set_focus(Section::Length);
        let before = app.length_index();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.length_index(), before - 1);
    }

    #[test]
    fn test_command_line() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.input_mode, InputMode::Command);
        type_str(&mut app, "go");
        let result = press(&mut app, KeyCode::Enter);
        assert!(matches!(result, EventResult::Submit(_)));
        assert_eq!(app.input_mode, InputMode::Normal);

        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input_mode, InputMode::Normal);

        press(&mut app, KeyCode::Char(':'));
        type_str(&mut app, "q");
        assert!(matches!(press(&mut app, KeyCode::Enter), EventResult::Quit));
    }

    #[test]
    fn test_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay(), Some(&Overlay::Help));

        // 'g' does nothing while help is open
        assert!(matches!(
            press(&mut app, KeyCode::Char('g')),
            EventResult::Continue
        ));
        assert!(!app.is_generating());

        press(&mut app, KeyCode::Esc);
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_mouse_scrolls_story() {
        let mut app = app();
        let scroll = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };
        handle_event(&mut app, scroll(MouseEventKind::ScrollDown));
        assert_eq!(app.story_scroll, 3);
        handle_event(&mut app, scroll(MouseEventKind::ScrollUp));
        assert_eq!(app.story_scroll, 0);
    }
}
