//! Room occupancy notifier
//!
//! Seeds the room registry, wires the Slack messenger into the notification
//! engine, and runs the membership listener and periodic sweep until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use notifier_core::domains::notifications::NotificationEngine;
use notifier_core::domains::rooms::InMemoryRoomRegistry;
use notifier_core::kernel::{start_scheduler, ServerDeps, SlackAdapter, SystemClock};
use notifier_core::Config;
use slack::{SlackOptions, SlackService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,notifier_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    tracing::info!("Starting room notifier");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let registry = match &config.rooms_file {
        Some(path) => Arc::new(
            InMemoryRoomRegistry::from_json_file(path).context("Failed to seed room registry")?,
        ),
        None => {
            tracing::warn!("NOTIFIER_ROOMS_FILE not set, starting with no rooms");
            Arc::new(InMemoryRoomRegistry::default())
        }
    };

    let Some(token) = config.slack_bot_token.clone() else {
        tracing::warn!("SLACK_BOT_TOKEN not set, room notifications are disabled");
        return Ok(());
    };

    let slack = Arc::new(SlackService::new(
        SlackOptions::new(token).with_api_base(config.slack_api_base_url.clone()),
    ));
    let deps = ServerDeps::new(
        registry.clone(),
        Arc::new(SlackAdapter::new(slack)),
        Arc::new(SystemClock),
    );

    let settings = config.notifier_settings();
    let engine = NotificationEngine::new(deps, &settings);

    let listener = engine.spawn_event_listener();
    let mut scheduler = start_scheduler(engine, settings.sweep_interval)
        .await
        .context("Failed to start scheduler")?;

    tracing::info!(
        sweep_interval = ?settings.sweep_interval,
        min_interval = ?settings.default_min_interval,
        "Room notifier running"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    scheduler
        .shutdown()
        .await
        .context("Failed to stop scheduler")?;
    registry.close();
    if let Err(e) = listener.await {
        tracing::warn!("Membership listener ended abnormally: {}", e);
    }

    Ok(())
}
