//! Background suspension sweep.
//!
//! Reactivates users whose suspension lifts today. The sweep is
//! idempotent, so overlapping with the admin-triggered sweep route is
//! harmless.

use std::time::Duration;

use chrono::Utc;
use lumbr_common::config::SweepConfig;
use lumbr_core::ModerationService;
use tokio::time::interval;

/// Spawn the periodic sweep task.
pub fn spawn(service: ModerationService, config: SweepConfig) {
    tokio::spawn(run(service, config));
}

async fn run(service: ModerationService, config: SweepConfig) {
    let mut interval = interval(Duration::from_secs(config.interval_secs));
    loop {
        interval.tick().await;
        match service.sweep_expired_suspensions(Utc::now()).await {
            Ok(unsuspended) => {
                if !unsuspended.is_empty() {
                    tracing::info!(count = unsuspended.len(), "Suspension sweep completed");
                }
            }
            Err(e) => {
                // Keep the task alive; the next tick retries.
                tracing::error!(error = %e, "Suspension sweep failed");
            }
        }
    }
}
