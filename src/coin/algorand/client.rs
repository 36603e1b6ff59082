/**
 * author: HAMA
 * date: 2025. 11. 12.
 * description: ALGORAND indexer / algod client
 **/

use std::time::Duration;

use data_encoding::BASE64;
use reqwest::Client;
use async_trait::async_trait;

use crate::coin::coin_trait::BlockchainClient;
use crate::coin::algorand::model::{
  BoxListResponse, BoxValueResponse, TransactionEnvelope, TransactionSearchResponse, TxKind,
};
use crate::config::AlgorandSettings;
use crate::types::AppError;

const ALGOD_TOKEN_HEADER: &str = "X-Algo-API-Token";
const INDEXER_TOKEN_HEADER: &str = "X-Indexer-API-Token";

#[derive(Clone)]
pub struct AlgorandClient {
  client: Client,
  algod_url: String,
  indexer_url: String,
  api_token: Option<String>,
  page_limit: u32,
}

impl AlgorandClient {
  pub fn new(
    algod_url: String,
    indexer_url: String,
    api_token: Option<String>,
    request_timeout: Duration,
    page_limit: u32,
  ) -> Result<Self, AppError> {
    let client = Client::builder()
      .timeout(request_timeout)
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      algod_url: algod_url.trim_end_matches('/').to_string(),
      indexer_url: indexer_url.trim_end_matches('/').to_string(),
      api_token,
      page_limit,
    })
  }

  pub fn from_settings(settings: &AlgorandSettings) -> Result<Self, AppError> {
    Self::new(
      settings.algod_api.clone(),
      settings.indexer_api.clone(),
      settings.api_token.clone(),
      Duration::from_secs(settings.request_timeout_secs),
      settings.page_limit,
    )
  }

  /// Searches the indexer, following `next-token` until the last page.
  pub async fn search_transactions(
    &self,
    address: Option<&str>,
    address_role: Option<&str>,
    kind: Option<TxKind>,
  ) -> Result<Vec<TransactionEnvelope>, AppError> {
    let url = format!("{}/v2/transactions", self.indexer_url);
    let mut transactions = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
      let mut query: Vec<(&str, String)> = vec![("limit", self.page_limit.to_string())];
      if let Some(address) = address {
        query.push(("address", address.to_string()));
      }
      if let Some(role) = address_role {
        query.push(("address-role", role.to_string()));
      }
      if let Some(tx_type) = kind.and_then(|k| k.as_query_param()) {
        query.push(("tx-type", tx_type.to_string()));
      }
      if let Some(token) = &next_token {
        query.push(("next", token.clone()));
      }

      let page: TransactionSearchResponse = self.get_json(&url, INDEXER_TOKEN_HEADER, &query).await?;
      let page_len = page.transactions.len();
      transactions.extend(page.transactions);

      match page.next_token {
        Some(token) if page_len > 0 => next_token = Some(token),
        _ => break,
      }
    }

    log::debug!("[ALGORAND] Indexer search returned {} transactions", transactions.len());
    Ok(transactions)
  }

  pub async fn fetch_box_names(&self, app_id: u64) -> Result<Vec<Vec<u8>>, AppError> {
    let url = format!("{}/v2/applications/{}/boxes", self.algod_url, app_id);
    let response: BoxListResponse = self.get_json(&url, ALGOD_TOKEN_HEADER, &[]).await?;
    Ok(response.boxes.into_iter().map(|b| b.name).collect())
  }

  pub async fn fetch_box_value(&self, app_id: u64, name: &[u8]) -> Result<Vec<u8>, AppError> {
    let url = format!("{}/v2/applications/{}/box", self.algod_url, app_id);
    let query = [("name", format!("b64:{}", BASE64.encode(name)))];
    let response: BoxValueResponse = self.get_json(&url, ALGOD_TOKEN_HEADER, &query).await?;
    Ok(response.value)
  }
}

#[async_trait]
impl BlockchainClient for AlgorandClient {
  fn get_http_client(&self) -> &Client {
    &self.client
  }

  fn get_api_token(&self) -> Option<&str> {
    self.api_token.as_deref()
  }
}
