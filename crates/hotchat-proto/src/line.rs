//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines, holding partial reads in the frame buffer
//! until the terminator arrives, so a line split across several TCP segments
//! still decodes as one line.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};
use crate::MAX_LINE_LEN;

/// Line-based codec that handles newline-terminated text.
pub struct LineCodec {
    /// Where the terminator scan resumes on the next call.
    next_index: usize,
    /// Upper bound on a line, terminator included.
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default line limit of [`MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    fn check_len(&self, len: usize) -> error::Result<()> {
        if len > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: len,
                limit: self.max_len,
            });
        }
        Ok(())
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        let Some(found) = src[self.next_index..].iter().position(|&b| b == b'\n') else {
            // Bytes before `next_index` hold no terminator; skip them next time.
            self.next_index = src.len();
            self.check_len(src.len())?;
            return Ok(None);
        };

        let end = self.next_index + found + 1;
        self.next_index = 0;
        let raw = src.split_to(end);
        self.check_len(raw.len())?;

        String::from_utf8(raw.to_vec())
            .map(Some)
            .map_err(|e| ProtocolError::InvalidUtf8 {
                byte_pos: e.utf8_error().valid_up_to(),
                details: e.utf8_error().to_string(),
                raw_line: e.into_bytes(),
            })
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}
