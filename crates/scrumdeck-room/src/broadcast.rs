//! The broadcast engine: fan the room projection out to every live
//! channel, and reconcile the ones that turn out to be dead.
//!
//! Delivery is fire-and-forget; the only failure signal is a rejected
//! send, which means the channel is already gone. A failed channel must
//! not abort delivery to the rest, and it must not linger in the
//! registry — its participant may be gone with it, which changes the
//! very state being broadcast. So the engine runs an explicit bounded
//! loop: serialize the current projection, attempt every channel,
//! collect the failures, unregister them (cascading into participant
//! removal), and start over on the now-current state. Each retry
//! strictly shrinks the live channel set, so the loop terminates — in
//! the worst case with an empty registry and nothing to send.

use scrumdeck_protocol::{Codec, ProtocolError};
use scrumdeck_session::{OutboundSink, SessionId, SessionRegistry};

use crate::state::RoomState;

/// Serializes the current room projection and delivers it to every
/// registered channel, repeating until a pass completes with zero
/// delivery failures.
///
/// Failed channels are unregistered between passes; when a failure took
/// a participant's last session, the participant is removed from room
/// state before the next pass, so survivors always end up with a
/// snapshot of exactly the surviving membership.
///
/// # Errors
/// Only serialization can fail here; delivery failures are reconciled,
/// never surfaced.
pub fn broadcast_state<S, C>(
    state: &mut RoomState,
    registry: &mut SessionRegistry<S>,
    codec: &C,
) -> Result<(), ProtocolError>
where
    S: OutboundSink,
    C: Codec,
{
    loop {
        let frame = codec.encode(&state.snapshot())?;

        let failed: Vec<SessionId> = registry
            .iter()
            .filter(|(_, sink)| sink.deliver(frame.clone()).is_err())
            .map(|(session, _)| session)
            .collect();

        if failed.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            failed = failed.len(),
            live = registry.len(),
            "delivery failed, reconciling dead sessions"
        );

        for session in failed {
            if let Some(removal) = registry.unregister(session) {
                if removal.last_session {
                    tracing::info!(
                        participant = %removal.participant,
                        "participant evicted after failed delivery"
                    );
                    state.remove_participant(&removal.participant);
                }
            }
        }
    }
}

/// Delivers a pre-built raw frame to one session, bypassing the
/// reconciliation loop.
///
/// Used for participant-directed error notices only. A failure here is
/// logged and otherwise ignored: the next state broadcast will find the
/// dead channel and reconcile it.
pub fn send_to<S: OutboundSink>(
    registry: &SessionRegistry<S>,
    session: SessionId,
    frame: Vec<u8>,
) {
    let Some(sink) = registry.sink_of(session) else {
        return;
    };
    if sink.deliver(frame).is_err() {
        tracing::debug!(%session, "raw send to dead session dropped");
    }
}

// =========================================================================
// Tests
// =========================================================================
