use std::collections::HashMap;

use scrumdeck_protocol::RoomKey;
use scrumdeck_session::OutboundSink;

use crate::room::{RoomHandle, spawn_room};

/// Mailbox depth for each room actor.
const ROOM_CHANNEL_SIZE: usize = 64;

/// Lazily spawns room actors and hands out their handles.
///
/// Rooms come into existence on first lookup and are never evicted;
/// an emptied room keeps its actor alive for the next visitor.
#[derive(Debug)]
pub struct RoomManager<S> {
    rooms: HashMap<RoomKey, RoomHandle<S>>,
}

impl<S: OutboundSink> RoomManager<S> {
    pub fn new() -> Self {
        Self { rooms: HashMap::new() }
    }

    /// Returns the handle for `key`, spawning the room's actor if this
    /// is the first time the key is seen.
    pub fn handle_for(&mut self, key: &RoomKey) -> RoomHandle<S> {
        self.rooms
            .entry(key.clone())
            .or_insert_with(|| {
                tracing::info!(room = %key, "spawning room");
                spawn_room(key.clone(), ROOM_CHANNEL_SIZE)
            })
            .clone()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl<S: OutboundSink> Default for RoomManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
