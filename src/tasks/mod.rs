/**
* filename : tasks
* author : HAMA
* date: 2025. 11. 12.
* description: Refresh pipelines and their spawn helper
**/
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};

use crate::fetcher::fetcher::{BoxStorage, TransactionIndex};
use crate::fetcher::runner::run_refresher;

pub mod depositor_ledger;
pub mod vault_ledger;

pub use depositor_ledger::{decode_depositor, refresh_depositors};
pub use vault_ledger::VaultLedger;

pub fn spawn_refresher<I, S>(
  ledger: Arc<VaultLedger<I, S>>,
  app_id: u64,
  viewer: Option<String>,
  interval_secs: u64,
  shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
  I: TransactionIndex + 'static,
  S: BoxStorage + 'static,
{
  tokio::spawn(run_refresher(
    ledger,
    app_id,
    viewer,
    Duration::from_secs(interval_secs),
    shutdown,
  ))
}
