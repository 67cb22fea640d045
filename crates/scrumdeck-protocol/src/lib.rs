//! Wire protocol for scrumdeck.
//!
//! This crate defines the "language" that clients and the room server speak:
//!
//! - **Types** ([`ClientCommand`], [`StateSnapshot`], [`Card`], [`Deck`],
//!   etc.) — the message structures that travel on the wire, plus the
//!   participant record they project.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`], [`parse_client_command`]) —
//!   how those messages are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and the room
//! (authoritative state). It doesn't know about connections or rooms —
//! it only knows how to serialize and deserialize messages.
//!
//! ```text
//! Transport (bytes) → Protocol (commands / snapshots) → Room (state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::{JsonCodec, parse_client_command};
pub use error::ProtocolError;
pub use types::{
    Card, ClientCommand, Deck, ErrorNotice, Participant, ParticipantId,
    Patch, RoomKey, StateSnapshot,
};
