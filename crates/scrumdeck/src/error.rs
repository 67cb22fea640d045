//! Unified error type for the Scrumdeck server.

use scrumdeck_room::RoomError;
use scrumdeck_transport::TransportError;

/// Top-level error that wraps the errors a running server can surface.
///
/// Protocol and session failures never escape the room actor (they are
/// answered or logged in place), so only the transport and room layers
/// appear here. The `#[from]` impls let handler code use `?` directly.
#[derive(Debug, thiserror::Error)]
pub enum ScrumdeckError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A room-level error (the room's actor is gone).
    #[error(transparent)]
    Room(#[from] RoomError),
}
