//! Live session tracking for scrumdeck.
//!
//! A *session* is one open channel bound to one participant identity.
//! Identities are not exclusive: the same participant can hold several
//! sessions at once (several browser tabs), and the participant record
//! itself lives only as long as at least one session does.
//!
//! This crate owns that bookkeeping:
//!
//! - [`SessionRegistry`] — the channel↔participant map, with
//!   first-session / last-session signals the room uses to create and
//!   evict participant records.
//! - [`OutboundSink`] — the write half of a channel, abstracted so tests
//!   can use bare in-memory channels.
//!
//! # How it fits in the stack
//!
//! ```text
//! Room layer (above)   ← broadcasts over the registry, reacts to removal
//!     ↕
//! Session layer (this crate)
//!     ↕
//! Protocol layer (below)  ← provides ParticipantId
//! ```

mod error;
mod registry;
mod sink;

pub use error::SessionError;
pub use registry::{Removal, SessionRegistry};
pub use sink::{OutboundSink, SinkClosed};

use std::fmt;

/// Opaque identifier for one live channel binding.
///
/// Allocated by the connection layer (one per accepted channel) and used
/// as the registry key for the channel's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new `SessionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sess-{}", self.0)
    }
}
