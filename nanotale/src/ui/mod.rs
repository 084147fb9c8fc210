//! UI module for the Nanotale TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
