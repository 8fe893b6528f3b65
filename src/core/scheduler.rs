//! Cron-based scheduler that runs quote-check ticks

use crate::core::runtime::QuoteMonitor;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Convert an interval to a cron expression (second minute hour day month weekday).
pub fn interval_to_cron(interval_seconds: u64) -> Result<String, String> {
    if interval_seconds == 0 {
        return Err("Scheduler disabled: interval_seconds is 0".to_string());
    }
    if interval_seconds >= 60 {
        let minutes = interval_seconds / 60;
        Ok(format!("0 */{} * * * *", minutes))
    } else {
        Ok(format!("*/{} * * * * *", interval_seconds))
    }
}

/// Runs [`QuoteMonitor::run_tick`] on a cron schedule, one tick at a time.
pub struct TickScheduler {
    monitor: Arc<QuoteMonitor>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl TickScheduler {
    pub fn new(
        monitor: Arc<QuoteMonitor>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let cron_expr = interval_to_cron(interval_seconds)?;

        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            markets = monitor.markets().len(),
            "TickScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            monitor,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn start(&self) {
        let monitor = self.monitor.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("TickScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                match monitor.run_tick().await {
                    Ok(report) => {
                        for alert in &report.alerts {
                            println!("{}", alert);
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "TickScheduler: tick failed, records left unchanged");
                    }
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("TickScheduler: started successfully");
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("TickScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
