//! The outbound side of a session, as the registry sees it.

use tokio::sync::mpsc;

/// The channel is gone: the remote side closed, or the writer task that
/// drains into the socket has exited.
///
/// This is the only failure a send can produce. Delivery is fire-and-forget
/// with no round-trip confirmation; a closed sink is treated as an implicit
/// disconnect and reconciled by the broadcast engine, never surfaced as an
/// error to anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("outbound channel closed")]
pub struct SinkClosed;

/// The write half of one session's channel.
///
/// The registry is generic over this so room logic and its tests never
/// touch a socket: production uses an unbounded mpsc sender whose receiver
/// is pumped into the WebSocket by a writer task, tests use the same
/// sender with the receiver held by the test.
pub trait OutboundSink: Send + 'static {
    /// Queues one encoded frame for delivery.
    ///
    /// # Errors
    /// Returns [`SinkClosed`] if the channel can no longer accept frames.
    fn deliver(&self, frame: Vec<u8>) -> Result<(), SinkClosed>;
}

impl OutboundSink for mpsc::UnboundedSender<Vec<u8>> {
    fn deliver(&self, frame: Vec<u8>) -> Result<(), SinkClosed> {
        self.send(frame).map_err(|_| SinkClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpsc_sender_delivers_while_receiver_lives() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.deliver(b"frame".to_vec()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), b"frame");
    }

    #[test]
    fn test_mpsc_sender_fails_after_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel::<Vec<u8>>();
        drop(rx);
        assert_eq!(tx.deliver(b"frame".to_vec()), Err(SinkClosed));
    }
}
