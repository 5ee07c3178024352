//! Events produced by an open connection.

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message;
use wsecho_shared::Lifecycle;

use crate::connector::WsStream;

/// A typed event read by the client's dispatch loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A payload arrived (binary payloads are decoded lossily)
    MessageReceived(String),
    /// The connection closed, with the peer's close reason if any
    Closed(Option<String>),
    /// Reading from the connection failed
    Errored(String),
    /// Local shutdown was requested
    ShutdownRequested,
}

/// Wait for the next event on `ws`.
///
/// A pending shutdown request wins over inbound traffic. Ping and pong
/// frames are answered by the protocol layer and are not surfaced.
pub async fn next_event(ws: &mut WsStream, lifecycle: &Lifecycle) -> ClientEvent {
    loop {
        let message = tokio::select! {
            biased;
            _ = lifecycle.wait_for_shutdown() => return ClientEvent::ShutdownRequested,
            message = ws.next() => message,
        };

        match message {
            Some(Ok(Message::Text(text))) => {
                return ClientEvent::MessageReceived(text.as_str().to_owned());
            }
            Some(Ok(Message::Binary(bytes))) => {
                return ClientEvent::MessageReceived(String::from_utf8_lossy(&bytes).into_owned());
            }
            Some(Ok(Message::Close(frame))) => {
                return ClientEvent::Closed(frame.map(|f| f.reason.as_str().to_owned()));
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return ClientEvent::Errored(e.to_string()),
            None => return ClientEvent::Closed(None),
        }
    }
}
