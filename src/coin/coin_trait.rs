/**
* filename : coin_trait
* author : HAMA
* date: 2025. 11. 12.
* description: Shared REST plumbing for chain clients
**/

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::types::AppError;

#[async_trait]
pub trait BlockchainClient: Clone + Send + Sync {
  fn get_http_client(&self) -> &Client;
  fn get_api_token(&self) -> Option<&str>;

  /// GET `url` with `query`, failing on non-success status, and decode the JSON body.
  async fn get_json<T>(&self, url: &str, token_header: &str, query: &[(&str, String)]) -> Result<T, AppError>
  where
    T: DeserializeOwned + Send,
  {
    let mut request = self.get_http_client().get(url);
    if !query.is_empty() {
      request = request.query(query);
    }
    if let Some(token) = self.get_api_token() {
      request = request.header(token_header, token);
    }

    let response = request.send().await?;
    let status = response.status();
    let response_text = response.text().await?;

    if !status.is_success() {
      return Err(AppError::QueryFailure(format!(
        "{} returned HTTP {}: {}",
        url, status, response_text
      )));
    }

    log::debug!("Raw API response from {}: {}", url, response_text);
    Ok(serde_json::from_str(&response_text)?)
  }
}
