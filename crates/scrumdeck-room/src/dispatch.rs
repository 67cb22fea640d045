//! The command dispatcher: validates an inbound command against the
//! acting participant's role and applies it to room state.
//!
//! Authorization failures are no-ops by design — a non-host sending
//! `reveal` or a spectator sending `vote` is dropped with a debug log,
//! never answered. The caller broadcasts exactly when the outcome is
//! [`Outcome::Applied`]; an ignored command produces no traffic at all,
//! so the only thing a rejected sender observes is the absence of a
//! state change.

use scrumdeck_protocol::{ClientCommand, ParticipantId};

use crate::host::{Role, role_of};
use crate::state::RoomState;

/// Whether a command mutated room state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command passed its preconditions and was applied; broadcast.
    Applied,
    /// Precondition failed (or the sender isn't a member); do nothing.
    Ignored,
}

/// Validates and applies one command from `actor`.
///
/// Total over its inputs: nothing here fails, commands are either
/// applied or ignored.
pub fn apply(
    state: &mut RoomState,
    actor: &ParticipantId,
    command: ClientCommand,
) -> Outcome {
    let Some(role) = role_of(state, actor) else {
        tracing::debug!(%actor, "command from unknown participant, ignoring");
        return Outcome::Ignored;
    };

    match command {
        ClientCommand::Vote { card } => {
            if role == Role::Spectator {
                tracing::debug!(%actor, "spectator vote ignored");
                return Outcome::Ignored;
            }
            state.set_vote(actor, card);
            Outcome::Applied
        }

        ClientCommand::Reveal => {
            if role != Role::Host {
                tracing::debug!(%actor, "reveal from non-host ignored");
                return Outcome::Ignored;
            }
            state.reveal();
            Outcome::Applied
        }

        ClientCommand::Reset => {
            if role != Role::Host {
                tracing::debug!(%actor, "reset from non-host ignored");
                return Outcome::Ignored;
            }
            state.reset_round();
            Outcome::Applied
        }

        ClientCommand::SetProfile {
            name,
            avatar,
            color_id,
        } => {
            // Any member may edit their own profile, spectators included.
            state.patch_profile(actor, name, avatar, color_id);
            Outcome::Applied
        }

        ClientCommand::SetDeck { deck_id } => {
            if role != Role::Host {
                tracing::debug!(%actor, "setDeck from non-host ignored");
                return Outcome::Ignored;
            }
            state.select_deck(deck_id);
            Outcome::Applied
        }

        ClientCommand::SetCustomDeck { deck } => {
            if role != Role::Host {
                tracing::debug!(%actor, "setCustomDeck from non-host ignored");
                return Outcome::Ignored;
            }
            if deck.id.is_empty() || deck.name.is_empty() {
                tracing::debug!(
                    %actor,
                    "custom deck with empty id or name ignored"
                );
                return Outcome::Ignored;
            }
            state.select_custom_deck(deck);
            Outcome::Applied
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
