//! Clipboard access through the terminal (OSC 52).
//!
//! Works over SSH and inside multiplexers that pass OSC 52 through, with no
//! platform clipboard library.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Escape sequence asking the terminal to put `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Write the OSC 52 sequence for `text` to `out`.
pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}
