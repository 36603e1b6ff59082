/**
 * filename: algorand_fetcher
 * author: HAMA
 * date: 2025. 11. 12.
 * description: ALGORAND index and box storage backed by the REST client
 **/

use crate::coin::algorand::client::AlgorandClient;
use crate::coin::algorand::model::TransactionEnvelope;
use crate::fetcher::fetcher::{BoxStorage, TransactionFilter, TransactionIndex};
use crate::types::AppError;

use async_trait::async_trait;
use std::sync::Arc;

pub struct AlgorandFetcher {
  pub client: Arc<AlgorandClient>,
}

impl AlgorandFetcher {
  pub fn new(client: Arc<AlgorandClient>) -> Self {
    Self { client }
  }
}

#[async_trait]
impl TransactionIndex for AlgorandFetcher {
  async fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionEnvelope>, AppError> {
    self.client
      .search_transactions(
        filter.address.as_deref(),
        filter.address_role.map(|role| role.as_query_param()),
        filter.kind,
      )
      .await
      .map_err(|e| AppError::QueryFailure(format!("Failed to search ALGORAND transactions: {}", e)))
  }
}

#[async_trait]
impl BoxStorage for AlgorandFetcher {
  async fn list_box_names(&self, app_id: u64) -> Result<Vec<Vec<u8>>, AppError> {
    self.client
      .fetch_box_names(app_id)
      .await
      .map_err(|e| AppError::QueryFailure(format!("Failed to list boxes of app {}: {}", app_id, e)))
  }

  async fn get_box_value(&self, app_id: u64, name: &[u8]) -> Result<Vec<u8>, AppError> {
    self.client
      .fetch_box_value(app_id, name)
      .await
      .map_err(|e| AppError::QueryFailure(format!("Failed to fetch box of app {}: {}", app_id, e)))
  }
}
