//! In-process room registry.
//!
//! Holds room definitions and their live participant lists, and broadcasts a
//! [`MembershipEvent`] after every membership change. Events for a room are
//! sent in the order the changes were applied. [`InMemoryRoomRegistry::close`]
//! ends the event stream for every subscriber.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domains::rooms::errors::RoomError;
use crate::domains::rooms::events::MembershipEvent;
use crate::domains::rooms::models::{Participant, Room, RoomId};
use crate::kernel::BaseRoomRegistry;

/// Default number of buffered membership events before slow subscribers lag.
const DEFAULT_EVENT_CAPACITY: usize = 1024;

pub struct InMemoryRoomRegistry {
    rooms: RwLock<Vec<Room>>,
    /// `None` once closed
    events: Mutex<Option<broadcast::Sender<MembershipEvent>>>,
}

impl InMemoryRoomRegistry {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self::with_capacity(rooms, DEFAULT_EVENT_CAPACITY)
    }

    /// Subscribers that fall more than `capacity` events behind lose the oldest ones.
    pub fn with_capacity(rooms: Vec<Room>, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self {
            rooms: RwLock::new(rooms),
            events: Mutex::new(Some(events)),
        }
    }

    /// Load room definitions from a JSON array.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rooms file {}", path.display()))?;
        let rooms: Vec<Room> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rooms file {}", path.display()))?;
        Ok(Self::new(rooms))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Room>> {
        self.rooms.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Room>> {
        self.rooms.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a room, replacing any existing room with the same id.
    pub fn add_room(&self, room: Room) {
        let mut rooms = self.write();
        match rooms.iter().position(|r| r.id == room.id) {
            Some(index) => rooms[index] = room,
            None => rooms.push(room),
        }
    }

    pub fn remove_room(&self, room_id: &RoomId) -> Option<Room> {
        let mut rooms = self.write();
        let index = rooms.iter().position(|r| &r.id == room_id)?;
        Some(rooms.remove(index))
    }

    /// Add a participant to a room and return the new participant count.
    ///
    /// A participant that is already present is updated in place; that is
    /// not a membership change, so no event is sent.
    pub fn join(&self, room_id: &RoomId, participant: Participant) -> Result<usize, RoomError> {
        let mut rooms = self.write();
        let room = rooms
            .iter_mut()
            .find(|r| &r.id == room_id)
            .ok_or_else(|| RoomError::NotFound {
                room_id: room_id.clone(),
            })?;

        let changed = match room.participants.iter().position(|p| p.id == participant.id) {
            Some(index) => {
                room.participants[index] = participant;
                false
            }
            None => {
                room.participants.push(participant);
                true
            }
        };

        let count = room.participant_count();
        // Emitted under the write lock so events follow the order changes were applied
        if changed {
            self.emit(MembershipEvent::join(room_id.clone()).with_participant_count(count));
        }
        Ok(count)
    }

    /// Remove a participant from a room and return the new participant count.
    ///
    /// Removing someone who is not in the room changes nothing and sends no event.
    pub fn leave(&self, room_id: &RoomId, participant_id: &str) -> Result<usize, RoomError> {
        let mut rooms = self.write();
        let room = rooms
            .iter_mut()
            .find(|r| &r.id == room_id)
            .ok_or_else(|| RoomError::NotFound {
                room_id: room_id.clone(),
            })?;

        let before = room.participants.len();
        room.participants.retain(|p| p.id != participant_id);

        let count = room.participant_count();
        if count != before {
            self.emit(MembershipEvent::leave(room_id.clone()).with_participant_count(count));
        }
        Ok(count)
    }

    /// Stop broadcasting. Subscribers receive what is already buffered, then
    /// see the stream end. Membership changes after this send no events.
    pub fn close(&self) {
        if self.events.lock().unwrap_or_else(|e| e.into_inner()).take().is_some() {
            debug!("Membership event stream closed");
        }
    }

    fn emit(&self, event: MembershipEvent) {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let Some(sender) = events.as_ref() else {
            return;
        };
        // Ignore send errors (no active subscribers)
        let receivers = sender.send(event.clone()).unwrap_or(0);
        debug!(
            room_id = %event.room_id,
            kind = ?event.kind,
            receivers,
            "Membership event emitted"
        );
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl BaseRoomRegistry for InMemoryRoomRegistry {
    async fn get_all_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.read().clone())
    }

    async fn get_room_with_participants(&self, room_id: &RoomId) -> Result<Room, RoomError> {
        self.read()
            .iter()
            .find(|r| &r.id == room_id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound {
                room_id: room_id.clone(),
            })
    }

    fn subscribe(&self) -> broadcast::Receiver<MembershipEvent> {
        match self.events.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(sender) => sender.subscribe(),
            None => {
                // Already closed: hand out a receiver whose sender is gone
                let (_, receiver) = broadcast::channel(1);
                receiver
            }
        }
    }
}
