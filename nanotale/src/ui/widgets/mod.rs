//! TUI widgets for Nanotale

pub mod input;
pub mod option_list;
pub mod status_bar;
pub mod story;
pub mod word_picker;

pub use input::InputWidget;
pub use option_list::OptionListWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
pub use story::StoryWidget;
pub use word_picker::WordPickerWidget;
