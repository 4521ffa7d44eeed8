// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseClock, BaseMessenger, Receipt, ServerDeps};
use crate::domains::notifications::DisplayBlock;
use crate::domains::rooms::{InMemoryRoomRegistry, Room};

// =============================================================================
// Mock Messenger
// =============================================================================

/// A message captured by the mock messenger
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub channel_id: String,
    pub blocks: Vec<DisplayBlock>,
}

impl SentMessage {
    /// Text of the first section block, if any
    pub fn headline(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            DisplayBlock::Section { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

pub struct MockMessenger {
    calls: Arc<Mutex<Vec<SentMessage>>>,
    failing: AtomicBool,
    next_ts: AtomicUsize,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
            next_ts: AtomicUsize::new(1),
        }
    }

    /// Make every send fail (the attempt is still recorded)
    pub fn failing(self) -> Self {
        self.failing.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all messages that were sent
    pub fn calls(&self) -> Vec<SentMessage> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of send attempts
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Get the last message sent
    pub fn last_message(&self) -> Option<SentMessage> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Check if any message headline contains the given text
    pub fn was_sent_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.headline().map_or(false, |h| h.contains(text)))
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMessenger for MockMessenger {
    async fn send(&self, channel_id: &str, blocks: &[DisplayBlock]) -> Result<Receipt> {
        // Record the call
        self.calls.lock().unwrap().push(SentMessage {
            channel_id: channel_id.to_string(),
            blocks: blocks.to_vec(),
        });

        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("channel_not_found");
        }

        let ts = self.next_ts.fetch_add(1, Ordering::SeqCst);
        Ok(Receipt {
            id: format!("1700000000.{:06}", ts),
            channel_id: channel_id.to_string(),
        })
    }
}

// =============================================================================
// Mock Clock
// =============================================================================

pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }
}

impl BaseClock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub registry: Arc<InMemoryRoomRegistry>,
    pub messenger: Arc<MockMessenger>,
    pub clock: Arc<MockClock>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_rooms(Vec::new())
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            registry: Arc::new(InMemoryRoomRegistry::new(rooms)),
            messenger: Arc::new(MockMessenger::new()),
            clock: Arc::new(MockClock::default()),
        }
    }

    /// Set a mock messenger
    pub fn mock_messenger(mut self, messenger: MockMessenger) -> Self {
        self.messenger = Arc::new(messenger);
        self
    }

    /// Set a mock clock
    pub fn mock_clock(mut self, clock: MockClock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Build ServerDeps backed by these mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.registry.clone(),
            self.messenger.clone(),
            self.clock.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
