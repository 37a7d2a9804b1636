//! Mock Transport implementation for testing

use crate::error::{ClientError, ClientResult};
use crate::protocol::ClientMessage;
use crate::traits::Transport;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Records every outbound message instead of talking to an authority.
///
/// Clones share the same call log, so a test can keep one handle while the
/// controller under test owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    call_log: Arc<Mutex<Vec<ClientMessage>>>,
    disconnected: Arc<Mutex<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail as if the connection dropped.
    pub fn disconnect(&self) {
        *lock(&self.disconnected) = true;
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<ClientMessage> {
        lock(&self.call_log).clone()
    }

    /// Clear call history
    pub fn clear_calls(&self) {
        lock(&self.call_log).clear()
    }
}

/// A panicking test thread must not hide the calls recorded before it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Transport for MockTransport {
    fn send(&mut self, message: ClientMessage) -> ClientResult<()> {
        if *lock(&self.disconnected) {
            return Err(ClientError::Disconnected);
        }
        lock(&self.call_log).push(message);
        Ok(())
    }
}
