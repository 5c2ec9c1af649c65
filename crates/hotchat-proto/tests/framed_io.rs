//! Framed I/O over an in-memory duplex pipe.
//!
//! Exercises the codec the way a session uses it: the server side writes raw
//! bytes in arbitrary chunks and the client side reads whole lines.

use futures_util::{SinkExt, StreamExt};
use hotchat_proto::{ChatCodec, Command, Inbound};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::codec::Framed;

#[tokio::test]
async fn test_line_split_across_writes() {
    let (client, mut server) = tokio::io::duplex(64);
    let mut framed = Framed::new(client, ChatCodec::new());

    let writer = tokio::spawn(async move {
        for chunk in [":tmi.twitch.tv 001 ni", "ck :Welcome", ", GLHF!\r\n"] {
            server.write_all(chunk.as_bytes()).await.unwrap();
            server.flush().await.unwrap();
            tokio::task::yield_now().await;
        }
        server
    });

    let line = framed.next().await.unwrap().unwrap();
    assert_eq!(line, Inbound::Line(":tmi.twitch.tv 001 nick :Welcome, GLHF!".into()));
    assert!(line.is_welcome());

    writer.await.unwrap();
}

#[tokio::test]
async fn test_commands_are_crlf_terminated() {
    let (client, mut server) = tokio::io::duplex(256);
    let mut framed = Framed::new(client, ChatCodec::new());

    framed.send(Command::NICK("bot".into())).await.unwrap();
    framed.send(Command::join("chan")).await.unwrap();
    drop(framed);

    let mut received = String::new();
    server.read_to_string(&mut received).await.unwrap();
    assert_eq!(received, "NICK bot\r\nJOIN #chan\r\n");
}

#[tokio::test]
async fn test_stream_ends_on_close() {
    let (client, server) = tokio::io::duplex(64);
    let mut framed = Framed::new(client, ChatCodec::new());
    drop(server);

    assert!(framed.next().await.is_none());
}
