//! # hotchat-proto
//!
//! The slice of the IRC wire protocol needed to post into a Twitch-style chat
//! channel: register with `PASS`/`NICK`, `JOIN` one channel, send a
//! `PRIVMSG`, and keep the connection alive by answering `PING` with `PONG`.
//!
//! ## Features
//!
//! - Outbound [`Command`] serialization with CRLF framing
//! - Inbound line classification into keep-alive probes and everything else
//! - Optional Tokio codec that buffers partial reads until a full line arrives
//!
//! ## Quick Start
//!
//! ```rust
//! use hotchat_proto::{Command, Inbound};
//!
//! let join = Command::join("summit1g");
//! assert_eq!(join.to_string(), "JOIN #summit1g");
//!
//! match Inbound::parse("PING :tmi.twitch.tv") {
//!     Inbound::Ping(token) => assert_eq!(Command::PONG(token).to_string(), "PONG :tmi.twitch.tv"),
//!     Inbound::Line(_) => unreachable!(),
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod format;
pub mod inbound;
#[cfg(feature = "tokio")]
pub mod codec;
#[cfg(feature = "tokio")]
pub mod line;

pub use self::command::Command;
pub use self::error::ProtocolError;
pub use self::inbound::{Inbound, WELCOME_TEXT};

#[cfg(feature = "tokio")]
pub use self::codec::ChatCodec;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;

/// Maximum length of a single inbound line, terminator included.
///
/// Twitch lines run well past the RFC 1459 limit of 512 bytes, so the codec
/// is more generous than a classic IRC parser.
pub const MAX_LINE_LEN: usize = 4096;
