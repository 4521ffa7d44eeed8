//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The notification sweep runs on a fixed period for the life of the process,
//! independent of any per-room interval:
//!
//! ```text
//! Scheduler (every sweep_interval)
//!     │
//!     └─► engine.run_sweep()
//!             └─► For each occupied, due room → Dispatcher (detached send)
//! ```

use anyhow::Result;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::notifications::NotificationEngine;

/// Start all scheduled tasks
pub async fn start_scheduler(
    engine: NotificationEngine,
    sweep_interval: Duration,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sweep_job = Job::new_repeated_async(sweep_interval, move |_uuid, _lock| {
        let engine = engine.clone();
        Box::pin(async move {
            run_notification_sweep(&engine).await;
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Scheduled tasks started (notification sweep every {:?})",
        sweep_interval
    );
    Ok(scheduler)
}

/// Run one notification sweep
///
/// Sends are detached; this only reports how many were started.
async fn run_notification_sweep(engine: &NotificationEngine) {
    let dispatched = engine.run_sweep().await;

    if dispatched.is_empty() {
        tracing::debug!("Notification sweep: nothing due");
    } else {
        tracing::info!(
            "Notification sweep: re-announced {} occupied rooms",
            dispatched.len()
        );
    }
}
