//! Core protocol types for scrumdeck's wire format.
//!
//! Everything here either travels on the wire verbatim or is projected
//! onto it. The inbound side is [`ClientCommand`]: one JSON object per
//! message, discriminated by a `type` field. The outbound side is
//! [`StateSnapshot`] (the full room projection pushed to every channel)
//! and [`ErrorNotice`] (sent to a single channel on a parse failure).
//!
//! [`Participant`] pulls double duty: it is both the record the room
//! stores and the entry that appears in the snapshot's `users` array.
//! Keeping them the same type means the broadcast is a plain clone of
//! authoritative state, with no mapping layer to drift out of sync.

use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;

/// How many leading characters of an identity seed the default display name.
const DEFAULT_NAME_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A stable external identity for one participant.
///
/// Supplied by the client at connect time (the `id` query parameter) and
/// used as the membership map key. Two browser tabs with the same id are
/// the same participant with two sessions.
///
/// `#[serde(transparent)]` keeps the wire shape a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wraps a raw identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the default display name: the id's leading characters.
    pub fn default_name(&self) -> String {
        self.0.chars().take(DEFAULT_NAME_LEN).collect()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A human-entered room code addressing one room instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    /// Wraps a raw room code.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the room code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Cards and decks
// ---------------------------------------------------------------------------

/// One selectable card: a value label plus a color classification.
///
/// Immutable value object; appears as a member of a deck or as a
/// participant's vote. The server never interprets `value` — vote-value
/// semantics live entirely with the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The value label shown on the card face ("5", "?", "☕", ...).
    pub value: String,
    /// Color classification used by the client for rendering.
    pub color: String,
    /// Optional icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
}

/// A deck: an identifier, a display name, and an ordered card sequence.
///
/// Built-in decks are referenced by id only (their definitions live with
/// the presentation layer); a custom deck is carried in full, verbatim,
/// inside the room state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// One joined identity in a room, as stored and as broadcast.
///
/// Serialized shape (an entry of the snapshot's `users` array):
/// `{id, name, vote, avatar?, colorId?, isSpectator?}` — `vote` is always
/// present (`null` when the participant hasn't voted), the optional fields
/// are omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub vote: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_spectator: bool,
}

impl Participant {
    /// Creates a fresh participant with default profile fields.
    ///
    /// Used on the first channel registration under an identity: display
    /// name derived from the id, no vote, spectator flag as supplied at
    /// connect time.
    pub fn with_defaults(id: ParticipantId, is_spectator: bool) -> Self {
        let name = id.default_name();
        Self {
            id,
            name,
            vote: None,
            avatar: None,
            color_id: None,
            is_spectator,
        }
    }
}

// ---------------------------------------------------------------------------
// Patch — three-state optional field for profile edits
// ---------------------------------------------------------------------------

/// A field edit that distinguishes "not mentioned" from "explicitly cleared".
///
/// `setProfile` treats an absent field as "leave unchanged" and an explicit
/// JSON `null` as "reset to default". A plain `Option` can't tell those
/// apart, so this is the serde double-option idiom with names: combined
/// with `#[serde(default)]`, an absent field deserializes to [`Patch::Keep`],
/// `null` to [`Patch::Clear`], and a value to [`Patch::Set`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field was absent; keep the current value.
    #[default]
    Keep,
    /// Field was an explicit `null`; reset to the default.
    Clear,
    /// Field carried a value.
    Set(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the field is present: serde falls back to
        // `Default` (Keep) for absent fields.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

// ---------------------------------------------------------------------------
// ClientCommand — the inbound envelope
// ---------------------------------------------------------------------------

/// An inbound command, one JSON object per message, tagged by `type`.
///
/// The codec deliberately separates "not JSON at all" (an error reported
/// to the sender) from "JSON that isn't a recognized command" (a silent
/// no-op); see [`parse_client_command`](crate::parse_client_command).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientCommand {
    /// Set the sender's vote to the supplied card, or clear it on `null`.
    #[serde(rename = "vote")]
    Vote { card: Option<Card> },

    /// Show everyone's votes. Host only.
    #[serde(rename = "reveal")]
    Reveal,

    /// Hide votes and clear them for every participant. Host only.
    #[serde(rename = "reset")]
    Reset,

    /// Edit the sender's own profile fields.
    #[serde(rename = "setProfile", rename_all = "camelCase")]
    SetProfile {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        avatar: Patch<String>,
        #[serde(default)]
        color_id: Patch<String>,
    },

    /// Select a built-in deck by id. Host only; invalidates the round.
    #[serde(rename = "setDeck", rename_all = "camelCase")]
    SetDeck { deck_id: String },

    /// Supply a full custom deck. Host only; invalidates the round.
    #[serde(rename = "setCustomDeck")]
    SetCustomDeck { deck: Deck },
}

// ---------------------------------------------------------------------------
// Outbound envelopes
// ---------------------------------------------------------------------------

/// The externally visible projection of room state, pushed to every channel.
///
/// Wire shape: `{type:"state", users:[...], revealed, deckId,
/// activeCustomDeck}` with `users` in join order. Join order is the only
/// ordering on the wire — host precedence is derived by the client the
/// same way the server derives it, not encoded in list position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "state", rename_all = "camelCase")]
pub struct StateSnapshot {
    pub users: Vec<Participant>,
    pub revealed: bool,
    pub deck_id: String,
    pub active_custom_deck: Option<Deck>,
}

/// An error report delivered to the originating channel only.
///
/// Wire shape: `{error: "..."}` — no `type` tag, so clients can pattern
/// match on the `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub error: String,
}

impl ErrorNotice {
    /// Builds a notice from any displayable error.
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
