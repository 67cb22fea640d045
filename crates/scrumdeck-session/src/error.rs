//! Error types for the session layer.

use crate::SessionId;

/// Errors that can occur during session bookkeeping.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session id is already bound to a channel. Session ids come
    /// from the connection layer's monotonic counter, so hitting this
    /// means a caller reused an id for a second channel.
    #[error("session {0} is already registered")]
    AlreadyRegistered(SessionId),
}
