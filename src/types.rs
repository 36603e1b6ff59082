/**
* filename : types
* author : HAMA
* date: 2025. 11. 12.
* description: Unified error type for the vault ledger
**/

// ====== Unified Error Type ======
#[derive(Debug, thiserror::Error)]
pub enum AppError {
  /// Index or storage service unreachable, or answered with a protocol-level error.
  #[error("Query failure: {0}")]
  QueryFailure(String),

  #[error("Invalid key length: expected 32 bytes, got {0}")]
  InvalidKeyLength(usize),

  #[error("Invalid value length: expected at least 8 bytes, got {0}")]
  InvalidValueLength(usize),

  #[error("Invalid address: {0}")]
  InvalidAddress(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Task join error: {0}")]
  JoinError(#[from] tokio::task::JoinError),
}

impl AppError {
  /// Decode-layer conditions that the depositor ledger skips per record.
  pub fn is_decode_skip(&self) -> bool {
    matches!(self, AppError::InvalidKeyLength(_) | AppError::InvalidValueLength(_))
  }
}

// ====== Error Conversions (From impls) ======

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      AppError::QueryFailure(format!("Request timed out: {}", err))
    } else {
      AppError::QueryFailure(format!("Reqwest error: {}", err))
    }
  }
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
    AppError::QueryFailure(format!("JSON parse error: {}", err))
  }
}

impl From<data_encoding::DecodeError> for AppError {
  fn from(err: data_encoding::DecodeError) -> Self {
    AppError::QueryFailure(format!("Base64 decode error: {}", err))
  }
}

impl From<config::ConfigError> for AppError {
  fn from(err: config::ConfigError) -> Self {
    AppError::Config(err.to_string())
  }
}
