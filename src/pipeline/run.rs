// src/pipeline/run.rs

//! Monitor entry points: wiring from configuration, banner and summary.

use std::future::Future;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::check::SeatMonitor;
use crate::pipeline::schedule::{RunSummary, Scheduler};
use crate::services::{HttpInventory, SeatFilter, WebhookNotifier};
use crate::utils::format_local;
use crate::utils::http::create_client;
use crate::utils::log::{header, sub_item, summary};

/// Build a ready-to-run monitor from configuration.
pub fn build_monitor(config: &Config) -> Result<SeatMonitor> {
    let client = create_client(&config.http)?;
    let notifier = WebhookNotifier::from_config(
        client.clone(),
        &config.notifier,
        &config.monitor.booking_url,
    )?;
    if !notifier.is_configured() {
        log::warn!("Webhook URL not configured; alerts will only be logged");
    }

    Ok(SeatMonitor::new(
        Box::new(HttpInventory::new(client, &config.monitor.inventory_url)),
        SeatFilter::new(&config.monitor.target_car),
        Box::new(notifier),
        config.monitor.threshold,
    ))
}

/// Run the periodic monitor until the deadline or `shutdown`.
pub async fn run_monitor<F>(config: &Config, shutdown: F) -> Result<RunSummary>
where
    F: Future,
{
    let tz = config.notifier.timezone()?;
    let monitor = build_monitor(config)?;

    header("Seat monitor starting");
    sub_item(&format!("Start time: {}", format_local(chrono::Utc::now(), tz)));
    sub_item(&format!("Target car: {}", config.monitor.target_car));
    sub_item(&format!(
        "Check interval: {} s",
        config.monitor.check_interval_secs
    ));
    sub_item(&format!(
        "Max runtime: {:.1} h",
        config.monitor.max_runtime_secs as f64 / 3600.0
    ));

    let mut scheduler = Scheduler::new(
        config.monitor.check_interval(),
        config.monitor.max_runtime(),
    );
    let result = scheduler.run(&monitor, shutdown).await;

    summary(
        &format!("Monitor stopped: {}", result.reason),
        &[
            ("Total checks", result.checks.to_string()),
            ("Started", format_local(result.started_at, tz)),
            ("Ended", format_local(result.ended_at, tz)),
        ],
    );

    Ok(result)
}
