//! Per-room record of the last dispatch time.
//!
//! Shared by the membership-event path and the periodic sweep. A single lock
//! guards the whole map; check-and-set happens under that lock so two callers
//! can never both claim the same room for the same window.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domains::rooms::RoomId;

#[derive(Clone, Default)]
pub struct LastNotifiedStore {
    inner: Arc<Mutex<HashMap<RoomId, DateTime<Utc>>>>,
}

impl LastNotifiedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RoomId, DateTime<Utc>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, room_id: &RoomId) -> Option<DateTime<Utc>> {
        self.lock().get(room_id).copied()
    }

    /// Unconditionally record a dispatch at `at`.
    pub fn record(&self, room_id: &RoomId, at: DateTime<Utc>) {
        self.lock().insert(room_id.clone(), at);
    }

    /// Atomically decide and record.
    ///
    /// `decide` sees the room's last dispatch time. If it returns `Some`, the
    /// room is stamped with `now` before the lock is released.
    pub fn claim_with<T>(
        &self,
        room_id: &RoomId,
        now: DateTime<Utc>,
        decide: impl FnOnce(Option<DateTime<Utc>>) -> Option<T>,
    ) -> Option<T> {
        let mut map = self.lock();
        let decision = decide(map.get(room_id).copied());
        if decision.is_some() {
            map.insert(room_id.clone(), now);
        }
        decision
    }

    /// Drop entries for rooms not in `live`. Returns how many were removed.
    pub fn prune(&self, live: &HashSet<RoomId>) -> usize {
        let mut map = self.lock();
        let before = map.len();
        map.retain(|room_id, _| live.contains(room_id));
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
