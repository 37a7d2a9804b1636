//! Client library for talking to a ChessLink game authority.
//!
//! The authority owns all rules, legality and engine play. This crate only
//! moves messages: newline-delimited JSON over TCP or a Unix socket.
//!
//! # Example
//!
//! ```no_run
//! use chess_client::{ChessClient, ClientMessage, Transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (mut client, mut events) = ChessClient::connect("127.0.0.1:5150").await?;
//!     client.send(ClientMessage::RequestRemoteMove)?;
//!     while let Some(event) = events.recv().await {
//!         println!("{}", event.name());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod protocol;
mod traits;

pub use client::{ChessClient, EventStream};
pub use error::{ClientError, ClientResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use protocol::{ClientMessage, ServerEvent};
pub use traits::Transport;
