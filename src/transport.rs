use crate::Result;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Newline-delimited JSON over a pair of byte pipes
pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Writes one message as a single line and flushes it
    pub async fn send<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');

        tracing::debug!(line = %String::from_utf8_lossy(&line[..line.len() - 1]), "send");

        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Blocks until one line arrives. `None` means the peer closed its end first.
    pub async fn recv_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            tracing::debug!("recv: end of stream");
            return Ok(None);
        }

        tracing::debug!(line = %line.trim_end(), "recv");
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, duplex};

    #[tokio::test]
    async fn test_send_appends_newline() {
        let (client, mut server) = duplex(1024);
        let (read, write) = tokio::io::split(client);
        let mut transport = LineTransport::new(read, write);

        transport.send(&json!({"a": 1})).await.unwrap();
        transport.send(&json!({"b": 2})).await.unwrap();
        drop(transport);

        let mut received = String::new();
        server.read_to_string(&mut received).await.unwrap();
        assert_eq!(received, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[tokio::test]
    async fn test_recv_line_and_eof() {
        let (client, mut server) = duplex(1024);
        let (read, write) = tokio::io::split(client);
        let mut transport = LineTransport::new(read, write);

        server.write_all(b"{\"id\":1}\npartial").await.unwrap();
        drop(server);

        assert_eq!(
            transport.recv_line().await.unwrap().as_deref(),
            Some("{\"id\":1}\n")
        );
        // a trailing line without a newline is still a line
        assert_eq!(
            transport.recv_line().await.unwrap().as_deref(),
            Some("partial")
        );
        assert!(transport.recv_line().await.unwrap().is_none());
    }
}
