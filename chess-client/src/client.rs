//! Socket client for the game authority

use crate::error::{ClientError, ClientResult};
use crate::protocol::{ClientMessage, ServerEvent};
use crate::traits::Transport;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Inbound authority events, in arrival order.
pub type EventStream = mpsc::UnboundedReceiver<ServerEvent>;

/// Network client for communicating with the game authority.
///
/// Owns the sending half of a writer task; dropping the client closes the
/// outbound direction of the connection.
pub struct ChessClient {
    outbound: mpsc::UnboundedSender<ClientMessage>,
}

impl ChessClient {
    /// Connect over TCP, e.g. `"127.0.0.1:5150"`.
    pub async fn connect(addr: &str) -> ClientResult<(Self, EventStream)> {
        if addr.trim().is_empty() {
            return Err(ClientError::InvalidAddress(addr.to_string()));
        }
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        tracing::info!(addr, "Connected to authority");
        Ok(Self::from_stream(stream))
    }

    /// Connect over a Unix domain socket.
    #[cfg(unix)]
    pub async fn connect_uds(path: &std::path::Path) -> ClientResult<(Self, EventStream)> {
        let stream = tokio::net::UnixStream::connect(path).await?;
        tracing::info!(path = %path.display(), "Connected to authority");
        Ok(Self::from_stream(stream))
    }

    /// Drive the protocol over an already-established byte stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_stream<S>(stream: S) -> (Self, EventStream)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound, outbound_rx) = mpsc::unbounded_channel();

        tokio::spawn(read_loop(reader, event_tx));
        tokio::spawn(write_loop(writer, outbound_rx));

        (Self { outbound }, event_rx)
    }
}

impl Transport for ChessClient {
    fn send(&mut self, message: ClientMessage) -> ClientResult<()> {
        tracing::debug!(event = message.name(), "Sending to authority");
        self.outbound
            .send(message)
            .map_err(|_| ClientError::Disconnected)
    }
}

async fn read_loop<R>(reader: R, events: mpsc::UnboundedSender<ServerEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<ServerEvent>(&line) {
                    Ok(event) => {
                        tracing::debug!(event = event.name(), "Received from authority");
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Dropping malformed authority event: {}", e),
                }
            }
            Ok(None) => {
                tracing::info!("Authority closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!("Read from authority failed: {}", e);
                break;
            }
        }
    }
}

async fn write_loop<W>(mut writer: W, mut outbound: mpsc::UnboundedReceiver<ClientMessage>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = outbound.recv().await {
        if let Err(e) = write_message(&mut writer, &message).await {
            tracing::warn!(event = message.name(), "Write to authority failed: {}", e);
            break;
        }
    }
    if let Err(e) = writer.shutdown().await {
        tracing::debug!("Shutting down authority writer failed: {}", e);
    }
}

async fn write_message<W>(writer: &mut W, message: &ClientMessage) -> ClientResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ThinkingStatus;
    use chess::Square;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn delivers_inbound_events_and_skips_garbage() {
        let (client_side, mut server_side) = tokio::io::duplex(4096);
        let (_client, mut events) = ChessClient::from_stream(client_side);

        server_side
            .write_all(b"not json\n\n{\"event\":\"thinkingStatus\",\"data\":{\"thinking\":true}}\n")
            .await
            .unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            ServerEvent::ThinkingStatus(ThinkingStatus { thinking: true })
        );
    }

    #[tokio::test]
    async fn writes_one_json_line_per_message() {
        let (client_side, mut server_side) = tokio::io::duplex(4096);
        let (mut client, _events) = ChessClient::from_stream(client_side);

        client
            .send(ClientMessage::RequestDestinations {
                square: Square::new(6, 4).unwrap(),
            })
            .unwrap();
        client.send(ClientMessage::RequestRemoteMove).unwrap();
        drop(client);

        let mut received = String::new();
        server_side.read_to_string(&mut received).await.unwrap();
        let lines: Vec<&str> = received.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"event":"requestDestinations","data":{"square":[6,4]}}"#,
                r#"{"event":"requestRemoteMove"}"#,
            ]
        );
    }

    #[tokio::test]
    async fn stream_ends_when_authority_hangs_up() {
        let (client_side, server_side) = tokio::io::duplex(64);
        let (_client, mut events) = ChessClient::from_stream(client_side);
        drop(server_side);
        assert!(events.recv().await.is_none());
    }

    #[tokio::test]
    async fn rejects_empty_address() {
        assert!(matches!(
            ChessClient::connect("  ").await,
            Err(ClientError::InvalidAddress(_))
        ));
    }
}
