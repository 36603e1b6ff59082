use serde::Deserialize;
use std::collections::HashMap;

use crate::coin::algorand::address::is_valid_address;
use crate::types::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
  pub algorand: AlgorandSettings,
  pub vault: VaultSettings,
  #[serde(default)]
  pub refresh: RefreshSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlgorandSettings {
  pub algod_api: String,
  pub indexer_api: String,
  #[serde(default)]
  pub api_token: Option<String>,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
  #[serde(default = "default_page_limit")]
  pub page_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VaultSettings {
  pub app_id: u64,
  // Without a viewer only the depositor ledger is refreshed
  #[serde(default)]
  pub viewer_address: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
  #[serde(default = "default_interval_secs")]
  pub interval_secs: u64,
  #[serde(default = "default_box_fetch_concurrency")]
  pub box_fetch_concurrency: usize,
}

impl Default for RefreshSettings {
  fn default() -> Self {
    Self {
      interval_secs: default_interval_secs(),
      box_fetch_concurrency: default_box_fetch_concurrency(),
    }
  }
}

fn default_request_timeout_secs() -> u64 {
  10
}

fn default_page_limit() -> u32 {
  1000
}

fn default_interval_secs() -> u64 {
  30
}

fn default_box_fetch_concurrency() -> usize {
  8
}

const DEFAULT_CONFIG_PATH: &str = "./config.toml";
const ENV_PREFIX: &str = "APP"; // Environment variable prefix (e.g., APP_VAULT__APP_ID=42)

impl Settings {
  pub fn new() -> Result<Self, AppError> {
    Self::load(config::File::with_name(DEFAULT_CONFIG_PATH).required(true), None)
  }

  /// Layers `APP_`-prefixed variables over `file`. `env_source` replaces the
  /// process environment when given.
  pub fn load<S>(file: S, env_source: Option<HashMap<String, String>>) -> Result<Self, AppError>
  where
    S: config::Source + Send + Sync + 'static,
  {
    let environment = config::Environment::with_prefix(ENV_PREFIX)
      .prefix_separator("_")
      .separator("__")
      .try_parsing(true)
      .source(env_source);

    let builder = config::Config::builder()
      .add_source(file)
      .add_source(environment);

    let mut settings: Settings = builder.build()?.try_deserialize()?;

    // An empty env override means "no viewer"
    if settings.vault.viewer_address.as_deref().map(str::trim) == Some("") {
      settings.vault.viewer_address = None;
    }
    if settings.algorand.api_token.as_deref().map(str::trim) == Some("") {
      settings.algorand.api_token = None;
    }

    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> Result<(), AppError> {
    if self.vault.app_id == 0 {
      return Err(AppError::Config("vault.app_id must be greater than zero".to_string()));
    }
    if let Some(viewer) = &self.vault.viewer_address {
      if !is_valid_address(viewer) {
        return Err(AppError::Config(format!("vault.viewer_address is not a valid address: {}", viewer)));
      }
    }
    if self.refresh.box_fetch_concurrency == 0 {
      return Err(AppError::Config("refresh.box_fetch_concurrency must be at least 1".to_string()));
    }
    if self.refresh.interval_secs == 0 {
      return Err(AppError::Config("refresh.interval_secs must be at least 1".to_string()));
    }
    if self.algorand.request_timeout_secs == 0 {
      return Err(AppError::Config("algorand.request_timeout_secs must be at least 1".to_string()));
    }
    Ok(())
  }
}
