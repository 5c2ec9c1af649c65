//! Inbound line classification.
//!
//! A posting client never needs a full message parser: it only has to tell
//! keep-alive probes apart from everything else, and check the first real
//! line for the server greeting.

/// Text the server includes in its welcome numeric on successful login.
pub const WELCOME_TEXT: &str = "Welcome, GLHF!";

/// Prefix of a keep-alive probe line.
const PING_PREFIX: &str = "PING";

/// A line received from the server, without its terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// Keep-alive probe; carries the token to echo back in `PONG`.
    Ping(String),
    /// Any other line.
    Line(String),
}

impl Inbound {
    /// Classify a raw line. Trailing CR/LF are ignored.
    ///
    /// The probe token is everything after the four-character `PING` prefix,
    /// with the separating whitespace trimmed, so `PING :tag` yields `:tag`.
    pub fn parse(raw: &str) -> Self {
        let line = raw.trim_end_matches(&['\r', '\n'][..]);
        match line.strip_prefix(PING_PREFIX) {
            Some(rest) => Inbound::Ping(rest.trim_start().to_string()),
            None => Inbound::Line(line.to_string()),
        }
    }

    /// Whether this line confirms a successful login.
    pub fn is_welcome(&self) -> bool {
        matches!(self, Inbound::Line(line) if line.contains(WELCOME_TEXT))
    }

    /// The line text, without terminator.
    pub fn as_str(&self) -> &str {
        match self {
            Inbound::Ping(token) => token,
            Inbound::Line(line) => line,
        }
    }
}
