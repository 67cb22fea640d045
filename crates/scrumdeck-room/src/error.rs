use scrumdeck_protocol::RoomKey;
use thiserror::Error;

/// Errors surfaced by the room layer.
#[derive(Debug, Error)]
pub enum RoomError {
    /// The room's actor task has stopped and its mailbox is closed.
    #[error("room '{0}' is unavailable")]
    Unavailable(RoomKey),
}
