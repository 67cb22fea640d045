//! The room actor.
//!
//! Each room runs as one tokio task that exclusively owns its
//! [`RoomState`] and [`SessionRegistry`]. All interaction goes through
//! the actor's mailbox, so commands from any number of connections are
//! applied strictly one at a time, in arrival order, with no locking.
//! A [`RoomHandle`] is the cheap, cloneable sending side.

use scrumdeck_protocol::{
    Codec, ErrorNotice, JsonCodec, ParticipantId, RoomKey, StateSnapshot,
    parse_client_command,
};
use scrumdeck_session::{OutboundSink, SessionId, SessionRegistry};
use tokio::sync::{mpsc, oneshot};

use crate::broadcast::{broadcast_state, send_to};
use crate::dispatch::{Outcome, apply};
use crate::error::RoomError;
use crate::state::RoomState;

/// Everything a room actor can be asked to do.
pub(crate) enum RoomCommand<S> {
    /// A new connection joins the room as `participant`.
    Attach {
        session: SessionId,
        participant: ParticipantId,
        spectator: bool,
        sink: S,
    },
    /// A connection left, cleanly or otherwise.
    Detach { session: SessionId },
    /// A raw inbound frame from one of the room's connections.
    Frame { session: SessionId, data: Vec<u8> },
    /// Observe the current room projection.
    Snapshot { reply: oneshot::Sender<StateSnapshot> },
}

/// Cloneable handle to a running room actor.
#[derive(Debug)]
pub struct RoomHandle<S> {
    key: RoomKey,
    sender: mpsc::Sender<RoomCommand<S>>,
}

// Manual impl: the handle is a key plus a channel sender, cloneable for
// any sink type. A derive would demand `S: Clone`, which `OutboundSink`
// deliberately does not require.
impl<S> Clone for RoomHandle<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<S: OutboundSink> RoomHandle<S> {
    /// The key this room was spawned under.
    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    /// Registers a connection with the room and joins its participant
    /// if this is their first session.
    pub async fn attach(
        &self,
        session: SessionId,
        participant: ParticipantId,
        spectator: bool,
        sink: S,
    ) -> Result<(), RoomError> {
        self.send(RoomCommand::Attach { session, participant, spectator, sink })
            .await
    }

    /// Removes a connection; the participant leaves with their last
    /// session.
    pub async fn detach(&self, session: SessionId) -> Result<(), RoomError> {
        self.send(RoomCommand::Detach { session }).await
    }

    /// Forwards a raw inbound frame for decoding and dispatch.
    pub async fn frame(
        &self,
        session: SessionId,
        data: Vec<u8>,
    ) -> Result<(), RoomError> {
        self.send(RoomCommand::Frame { session, data }).await
    }

    /// Returns the room's current projection.
    pub async fn snapshot(&self) -> Result<StateSnapshot, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Snapshot { reply }).await?;
        rx.await
            .map_err(|_| RoomError::Unavailable(self.key.clone()))
    }

    async fn send(&self, command: RoomCommand<S>) -> Result<(), RoomError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| RoomError::Unavailable(self.key.clone()))
    }
}

/// Spawns a room actor task and returns a handle to its mailbox.
///
/// The task runs until every handle is dropped and the mailbox drains.
pub fn spawn_room<S: OutboundSink>(
    key: RoomKey,
    channel_size: usize,
) -> RoomHandle<S> {
    let (sender, receiver) = mpsc::channel(channel_size);
    let actor = RoomActor {
        key: key.clone(),
        state: RoomState::new(),
        registry: SessionRegistry::new(),
        codec: JsonCodec,
        receiver,
    };
    tokio::spawn(actor.run());
    RoomHandle { key, sender }
}

struct RoomActor<S> {
    key: RoomKey,
    state: RoomState,
    registry: SessionRegistry<S>,
    codec: JsonCodec,
    receiver: mpsc::Receiver<RoomCommand<S>>,
}

impl<S: OutboundSink> RoomActor<S> {
    async fn run(mut self) {
        tracing::info!(room = %self.key, "room actor started");
        while let Some(command) = self.receiver.recv().await {
            self.handle(command);
        }
        tracing::info!(room = %self.key, "room actor stopped");
    }

    fn handle(&mut self, command: RoomCommand<S>) {
        match command {
            RoomCommand::Attach { session, participant, spectator, sink } => {
                self.attach(session, participant, spectator, sink);
            }
            RoomCommand::Detach { session } => self.detach(session),
            RoomCommand::Frame { session, data } => self.frame(session, &data),
            RoomCommand::Snapshot { reply } => {
                let _ = reply.send(self.state.snapshot());
            }
        }
    }

    fn attach(
        &mut self,
        session: SessionId,
        participant: ParticipantId,
        spectator: bool,
        sink: S,
    ) {
        match self.registry.register(session, participant.clone(), sink) {
            Ok(first_session) => {
                tracing::info!(
                    room = %self.key,
                    %session,
                    %participant,
                    first_session,
                    "session attached"
                );
                if first_session {
                    self.state.add_participant(participant, spectator);
                }
                self.broadcast();
            }
            Err(error) => {
                tracing::warn!(room = %self.key, %session, %error, "attach rejected");
            }
        }
    }

    fn detach(&mut self, session: SessionId) {
        let Some(removal) = self.registry.unregister(session) else {
            tracing::debug!(room = %self.key, %session, "detach for unknown session");
            return;
        };
        tracing::info!(
            room = %self.key,
            %session,
            participant = %removal.participant,
            last_session = removal.last_session,
            "session detached"
        );
        if removal.last_session {
            self.state.remove_participant(&removal.participant);
        }
        self.broadcast();
    }

    fn frame(&mut self, session: SessionId, data: &[u8]) {
        let Some(actor) = self.registry.participant_of(session).cloned() else {
            tracing::debug!(room = %self.key, %session, "frame from unknown session");
            return;
        };

        match parse_client_command(data) {
            Err(error) => {
                tracing::debug!(room = %self.key, %session, %error, "malformed frame");
                self.notify_error(session, "invalid message");
            }
            Ok(None) => {
                tracing::debug!(room = %self.key, %session, "unrecognized command ignored");
            }
            Ok(Some(command)) => {
                if apply(&mut self.state, &actor, command) == Outcome::Applied {
                    self.broadcast();
                }
            }
        }
    }

    /// Sends an error notice to one session only; room state is not
    /// touched and nothing is broadcast.
    fn notify_error(&self, session: SessionId, message: &str) {
        match self.codec.encode(&ErrorNotice::new(message)) {
            Ok(frame) => send_to(&self.registry, session, frame),
            Err(error) => {
                tracing::error!(room = %self.key, %error, "failed to encode error notice");
            }
        }
    }

    fn broadcast(&mut self) {
        if let Err(error) =
            broadcast_state(&mut self.state, &mut self.registry, &self.codec)
        {
            tracing::error!(room = %self.key, %error, "failed to encode snapshot");
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
