//! Test harness wiring the notification engine to mock dependencies.

use notifier_core::domains::notifications::NotificationEngine;
use notifier_core::domains::rooms::{MembershipEvent, Participant, Room, RoomId};
use notifier_core::kernel::TestDependencies;
use notifier_core::NotifierSettings;
use tokio::task::JoinHandle;

pub struct TestHarness {
    pub deps: TestDependencies,
    pub engine: NotificationEngine,
}

impl TestHarness {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self::with_settings(rooms, NotifierSettings::default())
    }

    pub fn with_settings(rooms: Vec<Room>, settings: NotifierSettings) -> Self {
        Self::from_deps(TestDependencies::with_rooms(rooms), settings)
    }

    pub fn from_deps(deps: TestDependencies, settings: NotifierSettings) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let engine = NotificationEngine::new(deps.server_deps(), &settings);
        Self { deps, engine }
    }

    /// Join via the registry and feed the resulting event to the engine
    pub async fn join(&self, room_id: &str, participant: Participant) {
        let room_id = RoomId::new(room_id);
        let count = self
            .deps
            .registry
            .join(&room_id, participant)
            .expect("room exists");
        self.deliver(MembershipEvent::join(room_id).with_participant_count(count))
            .await;
    }

    /// Leave via the registry and feed the resulting event to the engine
    pub async fn leave(&self, room_id: &str, participant_id: &str) {
        let room_id = RoomId::new(room_id);
        let count = self
            .deps
            .registry
            .leave(&room_id, participant_id)
            .expect("room exists");
        self.deliver(MembershipEvent::leave(room_id).with_participant_count(count))
            .await;
    }

    /// Handle an event and wait for any dispatch it started
    pub async fn deliver(&self, event: MembershipEvent) {
        if let Ok(Some(handle)) = self.engine.handle_membership_event(&event).await {
            handle.await.expect("dispatch task panicked");
        }
    }

    /// Run one sweep and wait for every dispatch it started
    pub async fn sweep(&self) -> usize {
        let handles = self.engine.run_sweep().await;
        let count = handles.len();
        await_all(handles).await;
        count
    }

    pub fn sent(&self) -> usize {
        self.deps.messenger.call_count()
    }
}

pub async fn await_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        handle.await.expect("dispatch task panicked");
    }
}
