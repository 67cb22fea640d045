//! Per-connection handler: room attachment and message routing.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Resolve the room from the handshake parameters
//!   2. Attach to the room actor with a fresh outbound channel
//!   3. Pump: inbound frames to the actor, outbound frames to the socket
//!   4. Detach on any exit path

use std::sync::Arc;

use scrumdeck_protocol::{ParticipantId, RoomKey};
use scrumdeck_room::RoomHandle;
use scrumdeck_session::SessionId;
use scrumdeck_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::ScrumdeckError;
use crate::server::{Outbound, ServerState};

/// Drop guard that detaches the session from its room when the handler
/// exits, panics included. `Drop` is synchronous, so the detach rides a
/// fire-and-forget task.
struct RoomGuard {
    session: SessionId,
    room: RoomHandle<Outbound>,
}

impl Drop for RoomGuard {
    fn drop(&mut self) {
        let session = self.session;
        let room = self.room.clone();
        tokio::spawn(async move {
            let _ = room.detach(session).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), ScrumdeckError> {
    let session = SessionId::new(conn.id().into_inner());
    let params = conn.params().clone();
    let room_key = RoomKey::new(params.room);
    let participant = ParticipantId::new(params.participant);

    tracing::info!(
        %session,
        room = %room_key,
        %participant,
        spectator = params.spectator,
        "handling new connection"
    );

    // Lock only for handle lookup, drop before any I/O.
    let room = {
        let mut rooms = state.rooms.lock().await;
        rooms.handle_for(&room_key)
    };

    // The room actor writes into this channel; a dedicated writer task
    // drains it onto the socket. When the writer dies, the channel
    // closes and the next broadcast reconciles the session away.
    let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let conn = Arc::new(conn);
    let writer_conn = Arc::clone(&conn);
    tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if writer_conn.send(&frame).await.is_err() {
                break;
            }
        }
        let _ = writer_conn.close().await;
    });

    room.attach(session, participant.clone(), params.spectator, outbound)
        .await?;
    let _guard = RoomGuard {
        session,
        room: room.clone(),
    };

    loop {
        match conn.recv().await {
            Ok(Some(data)) => room.frame(session, data).await?,
            Ok(None) => {
                tracing::info!(%session, %participant, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%session, %participant, error = %e, "recv error");
                break;
            }
        }
    }

    // _guard drops here → room detach fires.
    Ok(())
}
