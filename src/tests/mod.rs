//! End-to-end tests of the smoke test exchange.
//! The peer is either a scripted fake, a real rmcp server, or a shell child process.


use crate::{Config, LineTransport, Outcome, SmokeTest};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf},
    task::JoinHandle,
};

pub type DuplexTransport = LineTransport<ReadHalf<DuplexStream>, WriteHalf<DuplexStream>>;

pub const INITIALIZE_OK: &str = r#"{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05","capabilities":{"resources":{}},"serverInfo":{"name":"fake","version":"0.0.1"}}}"#;

/// A peer that answers each request with the next canned reply.
///
/// A `None` reply closes the connection instead of answering. The task
/// resolves to every message it received once the client hangs up.
pub struct ScriptedPeer {
    handle: JoinHandle<Vec<Value>>,
}

impl ScriptedPeer {
    pub fn start<I>(replies: I) -> (Self, DuplexTransport)
    where
        I: IntoIterator<Item = Option<&'static str>>,
    {
        let (client, server) = tokio::io::duplex(1 << 17);
        let replies = replies.into_iter().collect();
        let handle = tokio::spawn(Self::serve(server, replies));

        let (read, write) = tokio::io::split(client);
        (Self { handle }, LineTransport::new(read, write))
    }

    async fn serve(stream: DuplexStream, mut replies: VecDeque<Option<&'static str>>) -> Vec<Value> {
        let (read, mut write) = tokio::io::split(stream);
        let mut lines = BufReader::new(read).lines();
        let mut received = vec![];

        while let Ok(Some(line)) = lines.next_line().await {
            let message: Value = serde_json::from_str(&line).unwrap();
            let is_request = message.get("id").is_some();
            received.push(message);
            if !is_request {
                continue;
            }

            let Some(Some(reply)) = replies.pop_front() else {
                break;
            };
            write.write_all(reply.as_bytes()).await.unwrap();
            write.write_all(b"\n").await.unwrap();
            write.flush().await.unwrap();
        }

        received
    }

    /// Waits for the client to hang up and returns what the peer received
    pub async fn received(self) -> Vec<Value> {
        self.handle.await.unwrap()
    }
}

/// Runs the exchange against a scripted peer and returns the report, the
/// outcome, and the methods the peer saw in order
pub async fn run_scripted<I>(replies: I) -> (String, crate::Result<Outcome>, Vec<String>)
where
    I: IntoIterator<Item = Option<&'static str>>,
{
    let (peer, mut transport) = ScriptedPeer::start(replies);
    let test = SmokeTest::new(Config::default());

    let mut out = vec![];
    let outcome = test.exchange(&mut transport, &mut out).await;
    drop(transport);

    let methods = peer
        .received()
        .await
        .iter()
        .map(|message| message["method"].as_str().unwrap().to_string())
        .collect();

    (String::from_utf8(out).unwrap(), outcome, methods)
}
