//! Integration test common infrastructure.
//!
//! Provides a fake chat server and config builders for driving the plugin
//! end to end over real localhost sockets.

pub mod server;

#[allow(unused_imports)]
pub use server::{FakeChatServer, Greeting};

use hotchat::config::{Config, Settings};

/// Config pointing at `port` on localhost with a near-zero send interval.
#[allow(dead_code)]
pub fn local_config(port: u16) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = port;
    config.server.connect_timeout_secs = 2;
    config.server.handshake_timeout_secs = 2;
    config.rate_limit.messages = 1000;
    config.rate_limit.per_secs = 1;
    config
}

/// Settings for channel `#chan`, nick `bot` and the given messages.
#[allow(dead_code)]
pub fn settings(messages: &[&str]) -> Settings {
    Settings {
        channel: "#Chan".to_string(),
        user: "Bot".to_string(),
        oauth: "oauth:Secret".to_string(),
        chat_text: String::new(),
        messages: messages.iter().map(|s| s.to_string()).collect(),
    }
}
