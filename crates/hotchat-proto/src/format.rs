//! Outbound text hygiene.
//!
//! Chat text comes straight from user-edited settings, so it may carry line
//! breaks or terminal control characters. Anything after the first line
//! break would otherwise reach the server as a second command.

use crate::error::{self, ProtocolError};

/// mIRC formatting codes that chat servers pass through.
pub fn is_irc_format_code(ch: char) -> bool {
    matches!(
        ch,
        '\x02' | '\x03' | '\x04' | '\x0F' | '\x11' | '\x16' | '\x1D' | '\x1E' | '\x1F'
    )
}

/// Check if a character must never appear in an outbound line.
pub fn is_illegal_control_char(ch: char) -> bool {
    // BEL is always illegal
    if ch == '\x07' {
        return true;
    }
    ch.is_control() && ch != '\r' && ch != '\n' && !is_irc_format_code(ch)
}

/// Truncate at the first line ending and reject illegal control characters.
///
/// The returned string never contains `\r` or `\n`.
pub fn sanitize(mut data: String) -> error::Result<String> {
    if let Some(pos) = data.find(|c: char| c == '\r' || c == '\n') {
        data.truncate(pos);
    }

    for ch in data.chars() {
        if is_illegal_control_char(ch) {
            return Err(ProtocolError::IllegalControlChar(ch));
        }
    }

    Ok(data)
}
