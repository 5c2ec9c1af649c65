//! Chat codec for tokio.
//!
//! Decodes [`Inbound`] lines and encodes [`Command`]s, sanitizing every
//! outbound line before it reaches the wire.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::command::Command;
use crate::error::{self, ProtocolError};
use crate::format;
use crate::inbound::Inbound;
use crate::line::LineCodec;

/// Tokio codec for a posting chat client.
///
/// Wraps [`LineCodec`] and classifies each decoded line.
#[derive(Default)]
pub struct ChatCodec {
    inner: LineCodec,
}

impl ChatCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            inner: LineCodec::with_max_len(max_len),
        }
    }
}

impl Decoder for ChatCodec {
    type Item = Inbound;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Inbound>> {
        Ok(self.inner.decode(src)?.map(|line| Inbound::parse(&line)))
    }
}

impl Encoder<Command> for ChatCodec {
    type Error = ProtocolError;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> error::Result<()> {
        if let Command::PRIVMSG(_, text) = &cmd {
            if format::sanitize(text.clone())?.trim().is_empty() {
                return Err(ProtocolError::EmptyMessage);
            }
        }
        let sanitized = format::sanitize(cmd.to_string())?;
        self.inner.encode(sanitized, dst)
    }
}
