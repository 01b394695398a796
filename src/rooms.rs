//! Room membership for realtime connections.
//!
//! A room is named after an asset id. Connections join rooms by subscribing
//! and leave every room when they disconnect. Nothing publishes to rooms yet;
//! membership is tracked so a publisher can be added without touching the
//! socket handler.

use dashmap::DashMap;
use std::collections::HashSet;
use uuid::Uuid;

/// Identifier assigned to each realtime connection.
pub type ConnectionId = Uuid;

/// Room name to member connections.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, HashSet<ConnectionId>>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Adds `conn` to `room`. Returns false if it was already a member.
    pub fn join(&self, room: &str, conn: ConnectionId) -> bool {
        self.rooms.entry(room.to_string()).or_default().insert(conn)
    }

    /// Removes `conn` from every room, dropping rooms left empty.
    /// Returns the number of rooms it left.
    pub fn leave_all(&self, conn: ConnectionId) -> usize {
        let mut left = 0;
        self.rooms.retain(|_, members| {
            if members.remove(&conn) {
                left += 1;
            }
            !members.is_empty()
        });
        left
    }

    /// Number of connections in `room`.
    #[must_use]
    pub fn members(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, |m| m.len())
    }

    /// Returns true if `conn` is in `room`.
    #[must_use]
    pub fn is_member(&self, room: &str, conn: ConnectionId) -> bool {
        self.rooms.get(room).is_some_and(|m| m.contains(&conn))
    }

    /// Number of non-empty rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
