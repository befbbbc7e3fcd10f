use super::*;
use std::collections::HashMap;

/// Key used when a client joins with an empty room id.
pub const DEFAULT_ROOM: &str = "room1";

/// Live rooms by user-chosen key. Creation is lazy and idempotent per
/// key; removal happens only when a room empties out or finishes, so no
/// two rooms ever share a key. Single-writer: only the gateway touches it.
#[derive(Debug, Default)]
pub struct Registry {
    rooms: HashMap<String, Room>,
}

impl Registry {
    /// The room under this key, created Waiting on first sight.
    pub fn room(&mut self, key: &str) -> &mut Room {
        self.rooms.entry(key.to_string()).or_insert_with(|| {
            log::info!("opened room {}", key);
            Room::default()
        })
    }
    pub fn find(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }
    pub fn find_mut(&mut self, key: &str) -> Option<&mut Room> {
        self.rooms.get_mut(key)
    }
    pub fn remove(&mut self, key: &str) -> Option<Room> {
        self.rooms
            .remove(key)
            .inspect(|_| log::info!("closed room {}", key))
    }
    /// Keys of every room this player currently sits in.
    pub fn containing(&self, id: PlayerId) -> Vec<String> {
        self.rooms
            .iter()
            .filter(|(_, room)| room.contains(id))
            .map(|(key, _)| key.clone())
            .collect()
    }
    pub fn len(&self) -> usize {
        self.rooms.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
