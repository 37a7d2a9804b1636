//! Transport abstraction for client implementations

use crate::error::ClientResult;
use crate::protocol::ClientMessage;

/// Outbound half of the connection to the game authority.
///
/// Implemented by both the socket-backed `ChessClient` and `MockTransport`.
/// Sending is fire-and-forget: any reply arrives later as an independent
/// `ServerEvent` on the event stream.
pub trait Transport {
    fn send(&mut self, message: ClientMessage) -> ClientResult<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, message: ClientMessage) -> ClientResult<()> {
        (**self).send(message)
    }
}
