//! Fake chat server.
//!
//! Accepts a fixed number of connections on a background thread, answers the
//! login per [`Greeting`] and records every line each client sent. Runs on
//! plain std sockets because the plugin drives its own runtime.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

/// How the server answers a client's `JOIN`.
#[derive(Debug, Clone, Copy)]
pub enum Greeting {
    /// Probe with `PING` first, then welcome.
    PingThenWelcome,
    /// Refuse the login with a notice.
    Reject,
}

pub struct FakeChatServer {
    port: u16,
    handle: JoinHandle<Vec<Vec<String>>>,
}

impl FakeChatServer {
    /// Listen on an ephemeral port and serve `connections` clients in turn.
    pub fn spawn(greeting: Greeting, connections: usize) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let handle = std::thread::spawn(move || {
            listener
                .incoming()
                .take(connections)
                .filter_map(Result::ok)
                .map(|stream| serve(stream, greeting))
                .collect()
        });
        Ok(Self { port, handle })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for every expected client to hang up and return the lines each
    /// one sent, one list per connection.
    pub fn finish(self) -> Vec<Vec<String>> {
        self.handle.join().expect("fake server panicked")
    }
}

fn serve(stream: TcpStream, greeting: Greeting) -> Vec<String> {
    let mut writer = stream.try_clone().expect("clone socket");
    let reader = BufReader::new(stream);
    let mut received = Vec::new();

    for line in reader.lines() {
        let Ok(line) = line else { break };
        let line = line.trim_end_matches('\r').to_string();
        let joined = line.starts_with("JOIN ");
        received.push(line);

        if joined {
            let reply = match greeting {
                Greeting::PingThenWelcome => {
                    "PING :tmi.twitch.tv\r\n:tmi.twitch.tv 001 bot :Welcome, GLHF!\r\n"
                }
                Greeting::Reject => ":tmi.twitch.tv NOTICE * :Login authentication failed\r\n",
            };
            // The client may already be gone.
            let _ = writer.write_all(reply.as_bytes());
            let _ = writer.flush();
        }
    }
    received
}
