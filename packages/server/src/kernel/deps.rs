//! Server dependencies for the notification engine (using traits for testability)
//!
//! All external services use trait abstractions to enable testing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use slack::SlackService;
use std::sync::Arc;

use crate::domains::notifications::{ContextElement, DisplayBlock};
use crate::kernel::{BaseClock, BaseMessenger, BaseRoomRegistry, Receipt};

// =============================================================================
// SlackService Adapter (implements BaseMessenger trait)
// =============================================================================

/// Wrapper around SlackService that implements BaseMessenger trait
pub struct SlackAdapter(pub Arc<SlackService>);

impl SlackAdapter {
    pub fn new(service: Arc<SlackService>) -> Self {
        Self(service)
    }
}

/// Render a block as Slack Block Kit JSON.
pub fn to_block_kit(block: &DisplayBlock) -> Value {
    match block {
        DisplayBlock::Section { text } => json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": text },
        }),
        DisplayBlock::Context { elements } => json!({
            "type": "context",
            "elements": elements.iter().map(|element| match element {
                ContextElement::Image { image_url, alt_text } => json!({
                    "type": "image",
                    "image_url": image_url,
                    "alt_text": alt_text,
                }),
                ContextElement::Text { text } => json!({
                    "type": "mrkdwn",
                    "text": text,
                }),
            }).collect::<Vec<_>>(),
        }),
    }
}

#[async_trait]
impl BaseMessenger for SlackAdapter {
    async fn send(&self, channel_id: &str, blocks: &[DisplayBlock]) -> Result<Receipt> {
        let blocks: Vec<Value> = blocks.iter().map(to_block_kit).collect();

        let response = self
            .0
            .post_message(channel_id, &blocks)
            .await
            .context("Slack chat.postMessage failed")?;

        if let Some(warning) = &response.warning {
            tracing::warn!(channel = %channel_id, warning = %warning, "Slack accepted message with a warning");
        }

        Ok(Receipt {
            id: response.ts.unwrap_or_default(),
            channel_id: response.channel.unwrap_or_else(|| channel_id.to_string()),
        })
    }
}

// =============================================================================
// System Clock
// =============================================================================

pub struct SystemClock;

impl BaseClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by both notification drivers
#[derive(Clone)]
pub struct ServerDeps {
    pub registry: Arc<dyn BaseRoomRegistry>,
    pub messenger: Arc<dyn BaseMessenger>,
    pub clock: Arc<dyn BaseClock>,
}

impl ServerDeps {
    pub fn new(
        registry: Arc<dyn BaseRoomRegistry>,
        messenger: Arc<dyn BaseMessenger>,
        clock: Arc<dyn BaseClock>,
    ) -> Self {
        Self {
            registry,
            messenger,
            clock,
        }
    }
}
