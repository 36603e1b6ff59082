#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vault_ledger::coin::algorand::address::encode_address;
use vault_ledger::coin::algorand::model::{
  ApplicationCallDetails, PaymentDetails, TransactionEnvelope, TxKind,
};
use vault_ledger::fetcher::{BoxStorage, TransactionFilter, TransactionIndex};
use vault_ledger::types::AppError;

pub mod http;

pub const APP_ID: u64 = 42;

pub fn account(seed: u8) -> String {
  encode_address(&[seed; 32])
}

pub fn viewer() -> String {
  account(7)
}

// ====== Envelope builders ======

pub fn app_call(id: &str, sender: &str, app_id: u64, round: u64) -> TransactionEnvelope {
  TransactionEnvelope {
    id: id.to_string(),
    kind: TxKind::ApplicationCall,
    sender: sender.to_string(),
    confirmed_round: round,
    round_time: Some(1_700_000_000 + round),
    group: None,
    application: Some(ApplicationCallDetails { application_id: app_id }),
    payment: None,
    logs: Vec::new(),
    inner_transactions: Vec::new(),
  }
}

pub fn payment(id: &str, sender: &str, receiver: &str, amount: u64, round: u64) -> TransactionEnvelope {
  TransactionEnvelope {
    id: id.to_string(),
    kind: TxKind::Payment,
    sender: sender.to_string(),
    confirmed_round: round,
    round_time: Some(1_700_000_000 + round),
    group: None,
    application: None,
    payment: Some(PaymentDetails {
      amount,
      receiver: receiver.to_string(),
    }),
    logs: Vec::new(),
    inner_transactions: Vec::new(),
  }
}

pub fn inner_payment(sender: &str, receiver: &str, amount: u64) -> TransactionEnvelope {
  payment("", sender, receiver, amount, 0)
}

// ====== Fake transaction index ======

pub struct FakeIndex {
  transactions: Vec<TransactionEnvelope>,
  fail_on: Mutex<Option<TxKind>>,
  pub calls: Mutex<Vec<TransactionFilter>>,
}

impl FakeIndex {
  pub fn new(transactions: Vec<TransactionEnvelope>) -> Self {
    Self {
      transactions,
      fail_on: Mutex::new(None),
      calls: Mutex::new(Vec::new()),
    }
  }

  /// Searches filtered on `kind` answer with a query failure.
  pub fn failing_on(self, kind: TxKind) -> Self {
    self.set_failing(Some(kind));
    self
  }

  pub fn set_failing(&self, kind: Option<TxKind>) {
    *self.fail_on.lock().unwrap() = kind;
  }
}

#[async_trait]
impl TransactionIndex for FakeIndex {
  async fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionEnvelope>, AppError> {
    self.calls.lock().unwrap().push(filter.clone());
    let fail_on = *self.fail_on.lock().unwrap();
    if fail_on.is_some() && filter.kind == fail_on {
      return Err(AppError::QueryFailure("indexer unavailable".to_string()));
    }
    Ok(self.transactions.iter().filter(|tx| filter.matches(tx)).cloned().collect())
  }
}

// ====== Fake box storage ======

pub struct FakeBoxStorage {
  boxes: Vec<(Vec<u8>, Vec<u8>)>,
  delays: HashMap<Vec<u8>, Duration>,
  fail_value_of: Option<Vec<u8>>,
  in_flight: AtomicUsize,
  pub max_in_flight: AtomicUsize,
  pub value_fetches: AtomicUsize,
}

impl FakeBoxStorage {
  pub fn new(boxes: Vec<(Vec<u8>, Vec<u8>)>) -> Self {
    Self {
      boxes,
      delays: HashMap::new(),
      fail_value_of: None,
      in_flight: AtomicUsize::new(0),
      max_in_flight: AtomicUsize::new(0),
      value_fetches: AtomicUsize::new(0),
    }
  }

  pub fn with_delay(mut self, name: Vec<u8>, delay: Duration) -> Self {
    self.delays.insert(name, delay);
    self
  }

  pub fn failing_value_of(mut self, name: Vec<u8>) -> Self {
    self.fail_value_of = Some(name);
    self
  }
}

#[async_trait]
impl BoxStorage for FakeBoxStorage {
  async fn list_box_names(&self, _app_id: u64) -> Result<Vec<Vec<u8>>, AppError> {
    Ok(self.boxes.iter().map(|(name, _)| name.clone()).collect())
  }

  async fn get_box_value(&self, _app_id: u64, name: &[u8]) -> Result<Vec<u8>, AppError> {
    self.value_fetches.fetch_add(1, Ordering::SeqCst);
    let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(now, Ordering::SeqCst);

    if let Some(delay) = self.delays.get(name) {
      tokio::time::sleep(*delay).await;
    } else {
      tokio::task::yield_now().await;
    }
    self.in_flight.fetch_sub(1, Ordering::SeqCst);

    if self.fail_value_of.as_deref() == Some(name) {
      return Err(AppError::QueryFailure("algod unavailable".to_string()));
    }
    self.boxes
      .iter()
      .find(|(n, _)| n.as_slice() == name)
      .map(|(_, value)| value.clone())
      .ok_or_else(|| AppError::QueryFailure("box not found".to_string()))
  }
}
