//! One chat delivery: connect, authenticate, join, send, disconnect.
//!
//! A session is built per send and never reused. It exists only once the
//! server has welcomed the login, and [`IrcSession::disconnect`] consumes it,
//! so a half-open or already-closed session cannot be held onto.

use crate::context::{ChatContext, Credentials};
use crate::error::SendError;
use crate::irc::RateLimiter;
use crate::telemetry::{SendTimer, spans};
use futures_util::{SinkExt, StreamExt};
use hotchat_proto::{ChatCodec, Command, Inbound, ProtocolError, format};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};
use tokio_util::codec::Framed;
use tracing::{Instrument, debug, info, trace, warn};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Disconnected,
    /// Transport open, login not yet written.
    Connecting,
    /// Login written, waiting for the greeting.
    Authenticating,
    /// Greeting received; chat lines may be sent.
    Joined,
}

/// A logged-in connection to one channel.
pub struct IrcSession<S> {
    framed: Framed<S, ChatCodec>,
    channel: String,
    nickname: String,
    limiter: Arc<RateLimiter>,
    state: SessionState,
}

impl IrcSession<TcpStream> {
    /// Open a TCP connection with the context's current login and complete
    /// the handshake.
    pub async fn connect(context: &ChatContext) -> Result<Self, SendError> {
        let credentials = context.credentials();
        let timeouts = context.timeouts();

        debug!(host = %credentials.host, port = credentials.port, "connecting");
        let stream = timeout(
            timeouts.connect,
            TcpStream::connect((credentials.host.as_str(), credentials.port)),
        )
        .await
        .map_err(|_| SendError::Timeout {
            stage: "connect",
            after: timeouts.connect,
        })??;

        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, "failed to set TCP_NODELAY");
        }

        Self::handshake(stream, &credentials, context).await
    }
}

impl<S> IrcSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Log in over an already-open transport.
    ///
    /// Sends `PASS` (when a password is set), `NICK` and `JOIN`, then waits
    /// for the greeting. On failure the transport is shut down before the
    /// error is returned.
    pub async fn handshake(
        stream: S,
        credentials: &Credentials,
        context: &ChatContext,
    ) -> Result<Self, SendError> {
        let mut session = Self {
            framed: Framed::new(stream, ChatCodec::new()),
            channel: credentials.channel.clone(),
            nickname: credentials.nickname.clone(),
            limiter: Arc::clone(context.limiter()),
            state: SessionState::Connecting,
        };

        match session
            .authenticate(credentials.password.as_deref(), context.timeouts().handshake)
            .await
        {
            Ok(()) => Ok(session),
            Err(e) => {
                session.abort().await;
                Err(e)
            }
        }
    }

    async fn authenticate(&mut self, password: Option<&str>, wait: Duration) -> Result<(), SendError> {
        if let Some(password) = password {
            self.write(Command::PASS(password.to_string())).await?;
        }
        self.write(Command::NICK(self.nickname.clone())).await?;
        self.write(Command::join(&self.channel)).await?;
        self.state = SessionState::Authenticating;

        let greeting = self.read_until_greeting(wait).await?;
        if !greeting.is_welcome() {
            return Err(SendError::Authentication {
                reply: greeting.as_str().to_string(),
            });
        }

        self.state = SessionState::Joined;
        debug!(channel = %self.channel, nick = %self.nickname, "joined");
        Ok(())
    }

    /// Read lines until the first one that is not a keep-alive probe.
    ///
    /// Probes are answered with `PONG` as they arrive. The whole wait is
    /// bounded by `wait`.
    async fn read_until_greeting(&mut self, wait: Duration) -> Result<Inbound, SendError> {
        let deadline = Instant::now() + wait;
        loop {
            let next = timeout_at(deadline, self.framed.next())
                .await
                .map_err(|_| SendError::Timeout {
                    stage: "greeting",
                    after: wait,
                })?;

            match next {
                None => return Err(SendError::ConnectionClosed),
                Some(Err(e)) => return Err(e.into()),
                Some(Ok(Inbound::Ping(token))) => {
                    trace!(token = %token, "keep-alive probe");
                    self.write(Command::PONG(token)).await?;
                }
                Some(Ok(line)) => {
                    trace!(line = %line.as_str(), "<-");
                    return Ok(line);
                }
            }
        }
    }

    /// Post one chat line, then hold for the rate-limit interval.
    pub async fn send(&mut self, message: &str) -> Result<(), SendError> {
        self.write(Command::privmsg(&self.channel, message)).await?;
        info!(
            channel = %self.channel,
            nick = %self.nickname,
            message = %message,
            "Sent chat message"
        );
        self.limiter.wait().await;
        Ok(())
    }

    /// Flush and shut down the transport, releasing it.
    ///
    /// The write half is shut down first so the server sees a clean end of
    /// stream; the read half closes when the transport is dropped here.
    pub async fn disconnect(mut self) -> Result<(), SendError> {
        self.state = SessionState::Disconnected;
        SinkExt::<Command>::close(&mut self.framed).await?;
        drop(self.framed.into_inner());
        debug!(channel = %self.channel, "disconnected");
        Ok(())
    }

    /// Best-effort shutdown after a failed handshake.
    async fn abort(&mut self) {
        self.state = SessionState::Disconnected;
        if let Err(e) = SinkExt::<Command>::close(&mut self.framed).await {
            debug!(error = %e, "shutdown after failed handshake");
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    async fn write(&mut self, command: Command) -> Result<(), SendError> {
        if command.is_sensitive() {
            trace!(command = command.name(), "-> (redacted)");
        } else {
            trace!(line = %command, "->");
        }
        self.framed.send(command).await?;
        Ok(())
    }
}

/// Connect, send one message and disconnect.
///
/// The transport is shut down on every path once the handshake succeeded,
/// including when the send itself fails.
pub async fn deliver(context: &ChatContext, message: &str) -> Result<(), SendError> {
    if format::sanitize(message.to_string())?.trim().is_empty() {
        return Err(ProtocolError::EmptyMessage.into());
    }

    let credentials = context.credentials();
    let span = spans::send(&credentials.channel, &credentials.nickname);
    async {
        let _timer = SendTimer::new(&credentials.channel);
        let mut session = IrcSession::connect(context).await?;
        let sent = session.send(message).await;
        let closed = session.disconnect().await;
        sent.and(closed)
    }
    .instrument(span)
    .await
}
