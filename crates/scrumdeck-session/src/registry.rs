//! The session registry: every live channel in a room and who it belongs to.
//!
//! # Concurrency note
//!
//! `SessionRegistry` is NOT thread-safe by itself — it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the registry is
//! owned by exactly one room actor task, and all registry mutation happens
//! on that single logical thread of control. Keeping it simple here avoids
//! hidden locking overhead.

use std::collections::HashMap;

use scrumdeck_protocol::ParticipantId;

use crate::{OutboundSink, SessionError, SessionId};

/// One channel binding: which participant it belongs to and where to
/// queue outbound frames for it.
struct Entry<S> {
    participant: ParticipantId,
    sink: S,
}

/// The result of removing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The participant the removed session belonged to.
    pub participant: ParticipantId,
    /// `true` if this was the participant's last live session — the
    /// signal for the room to evict the participant record and
    /// re-broadcast membership.
    pub last_session: bool,
}

/// Tracks the live channel↔participant bindings of one room.
///
/// The registry owns sessions; it does not own participant records (those
/// live in the room state) and it never broadcasts. The room actor couples
/// the two through the first-session / last-session signals returned by
/// [`register`](Self::register) and [`unregister`](Self::unregister).
pub struct SessionRegistry<S> {
    sessions: HashMap<SessionId, Entry<S>>,
}

impl<S: OutboundSink> SessionRegistry<S> {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Binds a channel to a participant identity.
    ///
    /// Returns `true` if this is the participant's first live session
    /// (the room should create the participant record and append it to
    /// join order).
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyRegistered`] if the session id is
    /// already bound.
    pub fn register(
        &mut self,
        session: SessionId,
        participant: ParticipantId,
        sink: S,
    ) -> Result<bool, SessionError> {
        if self.sessions.contains_key(&session) {
            return Err(SessionError::AlreadyRegistered(session));
        }

        let first_session = self.session_count(&participant) == 0;
        self.sessions.insert(
            session,
            Entry {
                participant: participant.clone(),
                sink,
            },
        );

        tracing::debug!(
            %session,
            %participant,
            first_session,
            "session registered"
        );
        Ok(first_session)
    }

    /// Removes the session for exactly this channel.
    ///
    /// Returns `None` if the session was never registered (or already
    /// reconciled away by a failed broadcast). Otherwise reports which
    /// participant lost a session and whether it was their last one.
    pub fn unregister(&mut self, session: SessionId) -> Option<Removal> {
        let entry = self.sessions.remove(&session)?;
        let last_session = self.session_count(&entry.participant) == 0;

        tracing::debug!(
            %session,
            participant = %entry.participant,
            last_session,
            "session unregistered"
        );
        Some(Removal {
            participant: entry.participant,
            last_session,
        })
    }

    /// Returns the participant a session is bound to.
    pub fn participant_of(
        &self,
        session: SessionId,
    ) -> Option<&ParticipantId> {
        self.sessions.get(&session).map(|e| &e.participant)
    }

    /// Returns the sink for one session, used for participant-directed
    /// messages such as error notices.
    pub fn sink_of(&self, session: SessionId) -> Option<&S> {
        self.sessions.get(&session).map(|e| &e.sink)
    }

    /// Iterates every live session with its sink — the broadcast engine's
    /// fan-out surface.
    pub fn iter(&self) -> impl Iterator<Item = (SessionId, &S)> {
        self.sessions.iter().map(|(id, e)| (*id, &e.sink))
    }

    /// Returns how many live sessions a participant holds.
    pub fn session_count(&self, participant: &ParticipantId) -> usize {
        self.sessions
            .values()
            .filter(|e| &e.participant == participant)
            .count()
    }

    /// Returns the total number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<S: OutboundSink> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
