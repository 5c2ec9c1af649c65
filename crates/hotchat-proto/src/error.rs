//! Error types for the wire protocol.

use thiserror::Error;

/// Result defaulting to [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// Transport failure underneath the codec.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in an inbound line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// The offending line, terminator included.
        raw_line: Vec<u8>,
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Decoder message.
        details: String,
    },

    /// Line exceeded the maximum allowed length.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual line length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Illegal control character in an outbound line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// Refused to send a chat message with no text.
    #[error("empty message")]
    EmptyMessage,
}
