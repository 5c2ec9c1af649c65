//! Chat client: one short-lived session per send, paced by a shared limiter.

mod rate_limit;
mod session;

pub use rate_limit::RateLimiter;
pub use session::{IrcSession, SessionState, deliver};
