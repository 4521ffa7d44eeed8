//! Notification engine.
//!
//! Two drivers share one [`LastNotifiedStore`]:
//!
//! ```text
//! Registry event ──► handle_membership_event()
//!                        └─► machine.decide_membership() ─► stamp ─► Dispatcher
//!
//! Scheduler tick ──► run_sweep()
//!                        └─► for each room: store.claim_with(machine.decide_sweep) ─► Dispatcher
//! ```
//!
//! The store lock is never held while a message is being sent.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::NotifierSettings;
use crate::domains::notifications::effects::Dispatcher;
use crate::domains::notifications::errors::NotificationError;
use crate::domains::notifications::machines::NotificationMachine;
use crate::domains::notifications::models::LastNotifiedStore;
use crate::domains::rooms::{MembershipEvent, RoomError, RoomId};
use crate::kernel::ServerDeps;

#[derive(Clone)]
pub struct NotificationEngine {
    deps: ServerDeps,
    machine: NotificationMachine,
    last_notified: LastNotifiedStore,
    dispatcher: Dispatcher,
}

impl NotificationEngine {
    pub fn new(deps: ServerDeps, settings: &NotifierSettings) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&deps.messenger));
        Self {
            deps,
            machine: NotificationMachine::new(settings.default_min_interval),
            last_notified: LastNotifiedStore::new(),
            dispatcher,
        }
    }

    pub fn last_notified(&self) -> &LastNotifiedStore {
        &self.last_notified
    }

    /// Handle one join/leave.
    ///
    /// Returns the dispatch task when an announcement went out. A room that
    /// vanished before it could be looked up comes back as
    /// [`NotificationError::RoomNotFound`]; callers treat that as "no action".
    pub async fn handle_membership_event(
        &self,
        event: &MembershipEvent,
    ) -> Result<Option<JoinHandle<()>>, NotificationError> {
        let room = self
            .deps
            .registry
            .get_room_with_participants(&event.room_id)
            .await
            .map_err(|e| match e {
                RoomError::NotFound { room_id } => NotificationError::RoomNotFound { room_id },
            })?;

        if let Some(count) = event.participant_count {
            if count != room.participant_count() {
                debug!(
                    room_id = %room.id,
                    event_count = count,
                    live_count = room.participant_count(),
                    "Room changed again since this event, payload shows current state"
                );
            }
        }

        let Some(command) = self.machine.decide_membership(event, &room) else {
            return Ok(None);
        };

        let now = self.deps.clock.now();
        self.last_notified.record(&room.id, now);
        info!(room_id = %room.id, command = ?command, "Occupancy transition, notifying");

        Ok(Some(self.dispatcher.dispatch(command, &room)))
    }

    /// One pass over all rooms, re-announcing occupied rooms whose throttle
    /// window has passed. Returns the dispatch tasks it started.
    pub async fn run_sweep(&self) -> Vec<JoinHandle<()>> {
        let rooms = match self.deps.registry.get_all_rooms().await {
            Ok(rooms) => rooms,
            Err(e) => {
                error!("Sweep could not list rooms: {:#}", e);
                return Vec::new();
            }
        };

        let now = self.deps.clock.now();
        let mut dispatched = Vec::new();

        for room in &rooms {
            let command = self.last_notified.claim_with(&room.id, now, |last| {
                self.machine.decide_sweep(room, last, now)
            });

            if let Some(command) = command {
                debug!(room_id = %room.id, "Room still occupied and due, notifying");
                dispatched.push(self.dispatcher.dispatch(command, room));
            }
        }

        let live: HashSet<RoomId> = rooms.into_iter().map(|room| room.id).collect();
        let pruned = self.last_notified.prune(&live);
        if pruned > 0 {
            debug!(pruned, "Dropped last-notified entries for removed rooms");
        }

        dispatched
    }

    /// Consume registry events on a background task, one at a time in arrival order.
    ///
    /// The subscription is taken before this returns, so no event emitted after
    /// the call is missed. The task ends when the registry closes its event stream.
    pub fn spawn_event_listener(&self) -> JoinHandle<()> {
        let mut events = self.deps.registry.subscribe();
        let engine = self.clone();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => match engine.handle_membership_event(&event).await {
                        Ok(_) => {}
                        Err(e @ NotificationError::RoomNotFound { .. }) => {
                            debug!(error = %e, "Ignoring membership event");
                        }
                        Err(e) => {
                            warn!(error = %e, "Membership event not handled");
                        }
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Membership listener lagged, events dropped");
                    }
                    Err(RecvError::Closed) => {
                        info!("Membership event stream closed, listener stopping");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::notifications::{ContextElement, DisplayBlock};
    use crate::domains::rooms::{NotificationConfig, Participant, Room};
    use crate::kernel::test_dependencies::TestDependencies;

    fn engine_with(rooms: Vec<Room>) -> (NotificationEngine, TestDependencies) {
        let deps = TestDependencies::with_rooms(rooms);
        let engine = NotificationEngine::new(deps.server_deps(), &NotifierSettings::default());
        (engine, deps)
    }

    #[tokio::test]
    async fn vanished_room_is_reported_not_dispatched() {
        let (engine, deps) = engine_with(vec![]);

        let result = engine
            .handle_membership_event(&MembershipEvent::join("gone"))
            .await;

        assert!(matches!(result, Err(NotificationError::RoomNotFound { .. })));
        assert_eq!(deps.messenger.call_count(), 0);
        assert!(engine.last_notified().is_empty());
    }

    #[tokio::test]
    async fn late_event_uses_event_count_and_current_payload() {
        let lobby = Room::new("lobby", "Lobby", "https://meet.example.org/lobby")
            .with_notification(NotificationConfig::new("C1"))
            .with_participants(vec![
                Participant::new("u1", "ada"),
                Participant::new("u2", "bob"),
            ]);
        let (engine, deps) = engine_with(vec![lobby]);

        // First join is only handled after the second one already landed
        let event = MembershipEvent::join("lobby").with_participant_count(1);
        let handle = engine.handle_membership_event(&event).await.unwrap();
        handle.expect("transition dispatched").await.unwrap();

        let message = deps.messenger.last_message().unwrap();
        assert!(message.blocks.contains(&DisplayBlock::Context {
            elements: vec![ContextElement::Text {
                text: "2 participants".to_string()
            }]
        }));
    }

    #[tokio::test]
    async fn sweep_prunes_removed_rooms() {
        let lobby = Room::new("lobby", "Lobby", "https://meet.example.org/lobby")
            .with_notification(NotificationConfig::new("C1"))
            .with_participants(vec![Participant::new("u1", "ada")]);
        let (engine, deps) = engine_with(vec![lobby]);

        for handle in engine.run_sweep().await {
            handle.await.unwrap();
        }
        assert_eq!(engine.last_notified().len(), 1);

        deps.registry.remove_room(&RoomId::new("lobby"));
        assert!(engine.run_sweep().await.is_empty());
        assert!(engine.last_notified().is_empty());
    }
}
