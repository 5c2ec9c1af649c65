//! Unified error handling for hotchat.
//!
//! Two failure domains exist: delivering a chat line over the network, and
//! converging the message registry onto a new list. Neither is allowed to
//! take the host down; the plugin logs and swallows both.

use hotchat_proto::ProtocolError;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Send Errors (connect → send → disconnect)
// ============================================================================

/// Errors that abort one chat delivery attempt.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("timed out during {stage} after {after:?}")]
    Timeout {
        stage: &'static str,
        after: Duration,
    },

    #[error("connection closed before the server greeting")]
    ConnectionClosed,

    /// The server answered the login with something other than its welcome.
    #[error("authentication failed: {reply}")]
    Authentication { reply: String },
}

impl SendError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "transport",
            Self::Protocol(_) => "protocol",
            Self::Timeout { .. } => "timeout",
            Self::ConnectionClosed => "connection_closed",
            Self::Authentication { .. } => "authentication",
        }
    }

    /// Whether the failure came from the transport rather than the server's
    /// answer to the login.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Io(_) | Self::Timeout { .. } | Self::ConnectionClosed => true,
            Self::Protocol(ProtocolError::Io(_)) => true,
            Self::Protocol(_) | Self::Authentication { .. } => false,
        }
    }
}

// ============================================================================
// Reconcile Errors (registry invariants)
// ============================================================================

/// Registry invariant violations.
///
/// Raised instead of continuing with a half-reindexed registry, which would
/// orphan persisted hotkey slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("registry position gap: entry at index {index} claims position {found}")]
    PositionGap { index: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_error_codes() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(SendError::from(io).error_code(), "transport");
        assert_eq!(SendError::ConnectionClosed.error_code(), "connection_closed");
        assert_eq!(
            SendError::Authentication {
                reply: "bad".into()
            }
            .error_code(),
            "authentication"
        );
    }

    #[test]
    fn test_transport_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert!(SendError::Protocol(ProtocolError::Io(io)).is_transport());
        assert!(
            SendError::Timeout {
                stage: "connect",
                after: Duration::from_secs(1)
            }
            .is_transport()
        );
        assert!(!SendError::Protocol(ProtocolError::EmptyMessage).is_transport());
        assert!(
            !SendError::Authentication {
                reply: String::new()
            }
            .is_transport()
        );
    }

    #[test]
    fn test_display() {
        let err = SendError::Authentication {
            reply: ":tmi.twitch.tv NOTICE * :Login authentication failed".into(),
        };
        assert_eq!(
            err.to_string(),
            "authentication failed: :tmi.twitch.tv NOTICE * :Login authentication failed"
        );

        let err = ReconcileError::PositionGap { index: 1, found: 3 };
        assert_eq!(
            err.to_string(),
            "registry position gap: entry at index 1 claims position 3"
        );
    }
}
