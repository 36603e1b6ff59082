/**
* filename : runner
* author : HAMA
* date: 2025. 11. 12.
* description: Periodic refresh of the statement feed and depositor ledger
**/

use crate::fetcher::fetcher::{BoxStorage, TransactionIndex};
use crate::tasks::vault_ledger::VaultLedger;

use log::{info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};

pub async fn run_refresher<I, S>(
  ledger: Arc<VaultLedger<I, S>>,
  app_id: u64,
  viewer: Option<String>,
  interval_duration: Duration,
  mut shutdown: watch::Receiver<bool>,
) where
  I: TransactionIndex + 'static,
  S: BoxStorage + 'static,
{
  let mut tick = interval(interval_duration);
  tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
  info!(
    "[Refresher] Starting for app {} (viewer: {}) with interval {:?}",
    app_id,
    viewer.as_deref().unwrap_or("-"),
    interval_duration
  );

  loop {
    tokio::select! {
      _ = tick.tick() => {}
      _ = shutdown.changed() => break,
    }

    let statements = async {
      match viewer.as_deref() {
        Some(viewer) => Some(ledger.refresh_statements(app_id, viewer).await),
        None => None,
      }
    };
    let (statements, depositors) = tokio::join!(statements, ledger.refresh_depositors(app_id));

    match statements {
      Some(Ok(statements)) => match serde_json::to_string_pretty(statements.as_ref()) {
        Ok(json) => info!("[Refresher] {} statements for app {}:\n{}", statements.len(), app_id, json),
        Err(e) => warn!("[Refresher] Failed to render statements: {}", e),
      },
      Some(Err(e)) => warn!("[Refresher] Error loading statements: {}", e),
      None => {}
    }

    match depositors {
      Ok(ledger) => match serde_json::to_string_pretty(ledger.as_ref()) {
        Ok(json) => info!("[Refresher] {} depositors for app {}:\n{}", ledger.depositors.len(), app_id, json),
        Err(e) => warn!("[Refresher] Failed to render depositors: {}", e),
      },
      Err(e) => warn!("[Refresher] Error loading depositors: {}", e),
    }
  }

  info!("[Refresher] Loop exited.");
}
