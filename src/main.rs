// src/main.rs
/**
* author : HAMA
* date: 2025. 11. 12.
* description: Entry point for the vault statement and depositor refresh service.
**/

use vault_ledger::coin::algorand::address::application_address;
use vault_ledger::coin::algorand::client::AlgorandClient;
use vault_ledger::config::Settings;
use vault_ledger::fetcher::AlgorandFetcher;
use vault_ledger::shutdown::{shutdown_channel, shutdown_signal};
use vault_ledger::tasks::{spawn_refresher, VaultLedger};
use vault_ledger::types::AppError;

use log::{debug, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
  // 1. Initialize logging
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  info!("Application starting...");

  // 2. Load configuration
  let settings = Settings::new()?;
  info!("Configuration loaded.");

  let app_id = settings.vault.app_id;
  info!("Vault app {} escrow address: {}", app_id, application_address(app_id));

  // 3. Create API client
  let client = Arc::new(AlgorandClient::from_settings(&settings.algorand)?);
  let fetcher = Arc::new(AlgorandFetcher::new(client));

  // 4. Both pipelines share the same index/storage backend
  let ledger = Arc::new(VaultLedger::new(
    fetcher.clone(),
    fetcher,
    settings.refresh.box_fetch_concurrency,
  ));

  // 5. Spawn refresher
  let (shutdown_tx, shutdown_rx) = shutdown_channel();
  let refresher_handle = spawn_refresher(
    ledger,
    app_id,
    settings.vault.viewer_address.clone(),
    settings.refresh.interval_secs,
    shutdown_rx,
  );

  // 6. Wait for shutdown signal
  shutdown_signal().await;
  if shutdown_tx.send(true).is_err() {
    debug!("Refresher already exited before shutdown was signalled.");
  }
  info!("Waiting for refresher to finish...");

  refresher_handle.await?;

  info!("Application exited cleanly.");
  Ok(())
}
