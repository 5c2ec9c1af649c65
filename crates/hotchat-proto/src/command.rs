//! Outbound commands.
//!
//! Only the commands a posting client ever writes are modelled. Each
//! serializes without its line terminator; the codec appends CRLF.

use std::fmt;

/// An outbound IRC command with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// `PASS password`
    PASS(String),
    /// `NICK nickname`
    NICK(String),
    /// `JOIN #channel`
    JOIN(String),
    /// `PRIVMSG #channel :text`
    PRIVMSG(String, String),
    /// `PONG token`, echoing the token of a keep-alive probe.
    PONG(String),
}

impl Command {
    /// Build a `JOIN` for a bare channel name (no leading `#`).
    pub fn join(channel: &str) -> Self {
        Command::JOIN(channel_target(channel))
    }

    /// Build a `PRIVMSG` to a bare channel name (no leading `#`).
    pub fn privmsg(channel: &str, text: impl Into<String>) -> Self {
        Command::PRIVMSG(channel_target(channel), text.into())
    }

    /// The command verb, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::PASS(_) => "PASS",
            Command::NICK(_) => "NICK",
            Command::JOIN(_) => "JOIN",
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::PONG(_) => "PONG",
        }
    }

    /// Whether the serialized form carries a secret that must not be logged.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Command::PASS(_))
    }
}

fn channel_target(channel: &str) -> String {
    format!("#{}", channel.trim_start_matches('#'))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write!(f, "PASS {}", p),
            Command::NICK(n) => write!(f, "NICK {}", n),
            Command::JOIN(c) => write!(f, "JOIN {}", c),
            Command::PRIVMSG(t, m) => write!(f, "PRIVMSG {} :{}", t, m),
            Command::PONG(token) if token.is_empty() => f.write_str("PONG"),
            Command::PONG(token) => write!(f, "PONG {}", token),
        }
    }
}
