//! Host privilege, derived — never stored.
//!
//! There is no role field anywhere in room state. The host is whoever is
//! first in join order among non-spectators, recomputed from scratch on
//! every command, so eligibility can never go stale as participants
//! join, leave, or were spectators all along. When the current host
//! disconnects, the next non-spectator silently inherits the privilege;
//! the only observable effect is the routine state broadcast.

use scrumdeck_protocol::ParticipantId;

use crate::RoomState;

/// A participant's standing for one command, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// First non-spectator in join order; may reveal, reset, and change
    /// decks.
    Host,
    /// A non-spectator who isn't the host; may vote and edit their
    /// own profile.
    Voter,
    /// Excluded from voting and from host eligibility.
    Spectator,
}

/// Returns the current host: the first non-spectator in join order, or
/// `None` if the room is empty or everyone is a spectator.
pub fn resolve_host(state: &RoomState) -> Option<&ParticipantId> {
    state
        .join_order()
        .iter()
        .find(|id| state.participant(id).is_some_and(|p| !p.is_spectator))
}

/// Derives one participant's [`Role`], or `None` if the identity has not
/// joined the room.
pub fn role_of(state: &RoomState, id: &ParticipantId) -> Option<Role> {
    let participant = state.participant(id)?;
    if participant.is_spectator {
        Some(Role::Spectator)
    } else if resolve_host(state) == Some(id) {
        Some(Role::Host)
    } else {
        Some(Role::Voter)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ParticipantId {
        ParticipantId::new(id)
    }

    #[test]
    fn test_resolve_host_empty_room_is_none() {
        let state = RoomState::new();
        assert_eq!(resolve_host(&state), None);
    }

    #[test]
    fn test_resolve_host_skips_leading_spectators() {
        let mut state = RoomState::new();
        state.add_participant(pid("watcher"), true);
        state.add_participant(pid("ana"), false);
        state.add_participant(pid("bob"), false);

        assert_eq!(resolve_host(&state), Some(&pid("ana")));
    }

    #[test]
    fn test_resolve_host_all_spectators_is_none() {
        let mut state = RoomState::new();
        state.add_participant(pid("a"), true);
        state.add_participant(pid("b"), true);

        assert_eq!(resolve_host(&state), None);
    }

    #[test]
    fn test_host_passes_to_next_in_join_order_on_removal() {
        let mut state = RoomState::new();
        state.add_participant(pid("ana"), false);
        state.add_participant(pid("bob"), false);
        assert_eq!(resolve_host(&state), Some(&pid("ana")));

        state.remove_participant(&pid("ana"));

        assert_eq!(resolve_host(&state), Some(&pid("bob")));
    }

    #[test]
    fn test_role_of_distinguishes_host_voter_spectator() {
        let mut state = RoomState::new();
        state.add_participant(pid("ana"), false);
        state.add_participant(pid("bob"), false);
        state.add_participant(pid("eve"), true);

        assert_eq!(role_of(&state, &pid("ana")), Some(Role::Host));
        assert_eq!(role_of(&state, &pid("bob")), Some(Role::Voter));
        assert_eq!(role_of(&state, &pid("eve")), Some(Role::Spectator));
        assert_eq!(role_of(&state, &pid("nobody")), None);
    }
}
