use data_encoding::BASE64;
use serde::{Deserialize, Deserializer};

/**
 * filename: model
 * author: HAMA
 * date: 2025. 11. 12.
 * description: ALGORAND indexer and algod data structures
 **/

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
  #[serde(rename = "appl")]
  ApplicationCall,
  #[serde(rename = "pay")]
  Payment,
  // axfer, acfg, keyreg, ... are never relevant to the vault
  #[serde(other)]
  Other,
}

impl TxKind {
  pub fn as_query_param(&self) -> Option<&'static str> {
    match self {
      TxKind::ApplicationCall => Some("appl"),
      TxKind::Payment => Some("pay"),
      TxKind::Other => None,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
  pub amount: u64,
  pub receiver: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCallDetails {
  #[serde(rename = "application-id")]
  pub application_id: u64,
}

/// A committed transaction as reported by the indexer.
///
/// Inner transactions reuse the same shape but carry no `id` of their own.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
  #[serde(default)]
  pub id: String,
  #[serde(rename = "tx-type")]
  pub kind: TxKind,
  pub sender: String,
  #[serde(rename = "confirmed-round", default)]
  pub confirmed_round: u64,
  #[serde(rename = "round-time", default)]
  pub round_time: Option<u64>,
  #[serde(default)]
  pub group: Option<String>,
  #[serde(rename = "application-transaction", default)]
  pub application: Option<ApplicationCallDetails>,
  #[serde(rename = "payment-transaction", default)]
  pub payment: Option<PaymentDetails>,
  #[serde(default, deserialize_with = "deserialize_base64_list")]
  pub logs: Vec<Vec<u8>>,
  #[serde(rename = "inner-txns", default)]
  pub inner_transactions: Vec<TransactionEnvelope>,
}

impl TransactionEnvelope {
  pub fn application_id(&self) -> Option<u64> {
    self.application.as_ref().map(|app| app.application_id)
  }
}

#[derive(Deserialize, Debug)]
pub struct TransactionSearchResponse {
  #[serde(default)]
  pub transactions: Vec<TransactionEnvelope>,
  #[serde(rename = "next-token", default)]
  pub next_token: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct BoxDescriptor {
  #[serde(deserialize_with = "deserialize_base64")]
  pub name: Vec<u8>,
}

#[derive(Deserialize, Debug)]
pub struct BoxListResponse {
  #[serde(default)]
  pub boxes: Vec<BoxDescriptor>,
}

#[derive(Deserialize, Debug)]
pub struct BoxValueResponse {
  #[serde(deserialize_with = "deserialize_base64")]
  pub value: Vec<u8>,
}

fn deserialize_base64<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
  D: Deserializer<'de>,
{
  let encoded = String::deserialize(deserializer)?;
  BASE64.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
}

fn deserialize_base64_list<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
where
  D: Deserializer<'de>,
{
  let encoded = Vec::<String>::deserialize(deserializer)?;
  encoded
    .iter()
    .map(|entry| BASE64.decode(entry.as_bytes()).map_err(serde::de::Error::custom))
    .collect()
}
