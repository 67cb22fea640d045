//! The authoritative room record: membership in join order, the reveal
//! flag, and the deck selection.
//!
//! Pure data plus two mutation-safety rules every mutator honors:
//!
//! 1. Clearing votes iterates every current participant, not just the
//!    ones who voted.
//! 2. Switching decks (built-in or custom) always forces `revealed =
//!    false` and clears every vote — a deck change invalidates the round.
//!
//! No method here returns an error. All mutations are total functions of
//! valid input; invalid input is rejected upstream by the dispatcher.

use std::collections::HashMap;

use scrumdeck_protocol::{
    Card, Deck, Participant, ParticipantId, Patch, StateSnapshot,
};

/// The deck a freshly created room starts on.
pub const DEFAULT_DECK_ID: &str = "fibonacci";

/// One room's authoritative state.
///
/// Invariants, upheld by every mutator:
/// - every id in `join_order` has an entry in `participants` and vice
///   versa; `join_order` is append-only except for removals (never
///   reordered, so host precedence is stable);
/// - `custom_deck` is `Some` only while it is the active deck: selecting
///   a built-in deck clears it, selecting a custom deck sets `deck_id`
///   and the payload together.
pub struct RoomState {
    join_order: Vec<ParticipantId>,
    participants: HashMap<ParticipantId, Participant>,
    revealed: bool,
    deck_id: String,
    custom_deck: Option<Deck>,
}

impl RoomState {
    /// Creates an empty room: votes hidden, default deck, nobody joined.
    pub fn new() -> Self {
        Self {
            join_order: Vec::new(),
            participants: HashMap::new(),
            revealed: false,
            deck_id: DEFAULT_DECK_ID.to_string(),
            custom_deck: None,
        }
    }

    // -- Membership --------------------------------------------------------

    /// Adds a participant with default profile fields and appends it to
    /// join order. No-op if the identity is already present (a second
    /// tab never resets an existing record).
    pub fn add_participant(&mut self, id: ParticipantId, is_spectator: bool) {
        if self.participants.contains_key(&id) {
            return;
        }
        self.join_order.push(id.clone());
        self.participants
            .insert(id.clone(), Participant::with_defaults(id, is_spectator));
    }

    /// Removes a participant from both the map and the join order.
    pub fn remove_participant(&mut self, id: &ParticipantId) {
        self.participants.remove(id);
        self.join_order.retain(|p| p != id);
    }

    /// Returns a participant record, if the identity has joined.
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// Identities in join order — the basis for host precedence.
    pub fn join_order(&self) -> &[ParticipantId] {
        &self.join_order
    }

    /// Returns the number of joined participants.
    pub fn len(&self) -> usize {
        self.join_order.len()
    }

    /// Returns `true` if nobody has joined.
    pub fn is_empty(&self) -> bool {
        self.join_order.is_empty()
    }

    // -- Voting ------------------------------------------------------------

    /// Sets (or clears, on `None`) one participant's vote.
    pub fn set_vote(&mut self, id: &ParticipantId, vote: Option<Card>) {
        if let Some(participant) = self.participants.get_mut(id) {
            participant.vote = vote;
        }
    }

    /// Shows everyone's votes.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Hides votes and clears them for every current participant.
    pub fn reset_round(&mut self) {
        self.revealed = false;
        for participant in self.participants.values_mut() {
            participant.vote = None;
        }
    }

    /// Whether votes are currently shown.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    // -- Deck selection ----------------------------------------------------

    /// Selects a built-in deck by id. Clears any custom payload and
    /// invalidates the round.
    pub fn select_deck(&mut self, deck_id: String) {
        self.deck_id = deck_id;
        self.custom_deck = None;
        self.reset_round();
    }

    /// Installs a host-supplied custom deck, held verbatim, and
    /// invalidates the round.
    pub fn select_custom_deck(&mut self, deck: Deck) {
        self.deck_id = deck.id.clone();
        self.custom_deck = Some(deck);
        self.reset_round();
    }

    /// The active deck id.
    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    /// The custom deck payload, present only while it is active.
    pub fn custom_deck(&self) -> Option<&Deck> {
        self.custom_deck.as_ref()
    }

    // -- Profile -----------------------------------------------------------

    /// Applies a profile edit to one participant.
    ///
    /// Per field: absent leaves the current value, an explicit null or an
    /// empty string clears back to the default (the derived name for
    /// `name`, unset for `avatar`/`color_id`), a value replaces it.
    pub fn patch_profile(
        &mut self,
        id: &ParticipantId,
        name: Patch<String>,
        avatar: Patch<String>,
        color_id: Patch<String>,
    ) {
        let Some(participant) = self.participants.get_mut(id) else {
            return;
        };
        match name {
            Patch::Keep => {}
            Patch::Set(value) if !value.is_empty() => {
                participant.name = value;
            }
            // Explicit null or empty string falls back to the derived name.
            Patch::Clear | Patch::Set(_) => {
                participant.name = id.default_name();
            }
        }
        apply_optional(&mut participant.avatar, avatar);
        apply_optional(&mut participant.color_id, color_id);
    }

    // -- Projection --------------------------------------------------------

    /// The externally visible projection broadcast to every channel.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            users: self
                .join_order
                .iter()
                .filter_map(|id| self.participants.get(id).cloned())
                .collect(),
            revealed: self.revealed,
            deck_id: self.deck_id.clone(),
            active_custom_deck: self.custom_deck.clone(),
        }
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

/// Patch semantics for optional string fields: empty string counts as a
/// clear, same as explicit null.
fn apply_optional(slot: &mut Option<String>, patch: Patch<String>) {
    match patch {
        Patch::Keep => {}
        Patch::Set(value) if !value.is_empty() => *slot = Some(value),
        Patch::Clear | Patch::Set(_) => *slot = None,
    }
}

// =========================================================================
// Tests
// =========================================================================
