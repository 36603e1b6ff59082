/**
* filename : fetcher
* author : HAMA
* date: 2025. 11. 12.
* description: Collaborator interfaces consumed by the reconciler and ledger builder
**/

use async_trait::async_trait;

use crate::coin::algorand::model::{TransactionEnvelope, TxKind};
use crate::types::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
  Sender,
  Receiver,
}

impl AddressRole {
  pub fn as_query_param(&self) -> &'static str {
    match self {
      AddressRole::Sender => "sender",
      AddressRole::Receiver => "receiver",
    }
  }
}

/// Independent, composable predicates for an index search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
  pub address: Option<String>,
  pub address_role: Option<AddressRole>,
  pub kind: Option<TxKind>,
}

impl TransactionFilter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn address(mut self, address: impl Into<String>) -> Self {
    self.address = Some(address.into());
    self
  }

  pub fn address_role(mut self, role: AddressRole) -> Self {
    self.address_role = Some(role);
    self
  }

  pub fn kind(mut self, kind: TxKind) -> Self {
    self.kind = Some(kind);
    self
  }

  /// Whether `tx` satisfies every predicate that is set.
  pub fn matches(&self, tx: &TransactionEnvelope) -> bool {
    if let Some(kind) = self.kind {
      if tx.kind != kind {
        return false;
      }
    }
    let Some(address) = &self.address else {
      return true;
    };
    let is_sender = &tx.sender == address;
    let is_receiver = tx.payment.as_ref().map(|p| &p.receiver == address).unwrap_or(false);
    match self.address_role {
      Some(AddressRole::Sender) => is_sender,
      Some(AddressRole::Receiver) => is_receiver,
      None => is_sender || is_receiver,
    }
  }
}

#[async_trait]
pub trait TransactionIndex: Send + Sync {
  async fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionEnvelope>, AppError>;
}

#[async_trait]
pub trait BoxStorage: Send + Sync {
  async fn list_box_names(&self, app_id: u64) -> Result<Vec<Vec<u8>>, AppError>;
  async fn get_box_value(&self, app_id: u64, name: &[u8]) -> Result<Vec<u8>, AppError>;
}
