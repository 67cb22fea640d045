//! Room core for scrumdeck: the state-synchronization engine.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns the
//! authoritative [`RoomState`] and the room's
//! [`SessionRegistry`](scrumdeck_session::SessionRegistry). Everything
//! reaches a room through its mailbox, so all mutation for one room
//! happens on a single logical thread of control, in arrival order.
//!
//! # Key pieces
//!
//! - [`RoomState`] — join-ordered membership, reveal flag, deck selection
//! - [`resolve_host`] / [`Role`] — host privilege derived from join order,
//!   recomputed per command, never stored
//! - [`dispatch`](apply) — the inbound command table
//! - [`broadcast_state`] — fan-out with failed-delivery reconciliation
//! - [`RoomHandle`] — cheap-clone handle into a running room actor
//! - [`RoomManager`] — one live actor per room key

mod broadcast;
mod dispatch;
mod error;
mod host;
mod manager;
mod room;
mod state;

pub use broadcast::{broadcast_state, send_to};
pub use dispatch::{Outcome, apply};
pub use error::RoomError;
pub use host::{Role, resolve_host, role_of};
pub use manager::RoomManager;
pub use room::{RoomHandle, spawn_room};
pub use state::{DEFAULT_DECK_ID, RoomState};
