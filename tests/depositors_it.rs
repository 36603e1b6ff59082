mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FakeBoxStorage, APP_ID};
use rust_decimal::Decimal;
use vault_ledger::coin::algorand::address::{encode_address, encode_balance};
use vault_ledger::tasks::{decode_depositor, refresh_depositors};
use vault_ledger::types::AppError;

fn balance_box(seed: u8, micro_units: u64) -> (Vec<u8>, Vec<u8>) {
  (vec![seed; 32], encode_balance(micro_units).to_vec())
}

#[tokio::test]
async fn scenario_d_skips_non_account_keys() -> eyre::Result<()> {
  let storage = FakeBoxStorage::new(vec![
    balance_box(1, 1_000_000),
    (vec![2; 20], encode_balance(5).to_vec()),
    balance_box(3, 2_500_000),
  ]);

  let ledger = refresh_depositors(&storage, APP_ID, 4).await?;

  assert_eq!(ledger.depositors.len(), 2);
  assert_eq!(ledger.depositors[0].address, encode_address(&[1; 32]));
  assert_eq!(ledger.depositors[0].balance, Decimal::ONE);
  assert_eq!(ledger.depositors[1].address, encode_address(&[3; 32]));
  assert_eq!(ledger.depositors[1].balance, Decimal::new(25, 1));
  assert_eq!(ledger.total, Decimal::new(35, 1));
  // the 20-byte key is never fetched
  assert_eq!(storage.value_fetches.load(Ordering::SeqCst), 2);
  Ok(())
}

#[tokio::test]
async fn short_values_are_skipped_not_fatal() -> eyre::Result<()> {
  let storage = FakeBoxStorage::new(vec![
    (vec![1; 32], vec![0, 0, 1]),
    balance_box(2, 750_000),
  ]);

  let ledger = refresh_depositors(&storage, APP_ID, 2).await?;

  assert_eq!(ledger.depositors.len(), 1);
  assert_eq!(ledger.depositors[0].balance, Decimal::new(75, 2));
  Ok(())
}

#[tokio::test]
async fn order_follows_enumeration_not_completion() -> eyre::Result<()> {
  let storage = FakeBoxStorage::new(vec![balance_box(1, 1), balance_box(2, 2), balance_box(3, 3)])
    .with_delay(vec![1; 32], Duration::from_millis(60))
    .with_delay(vec![2; 32], Duration::from_millis(30));

  let ledger = refresh_depositors(&storage, APP_ID, 3).await?;

  let addresses: Vec<String> = ledger.depositors.iter().map(|d| d.address.clone()).collect();
  assert_eq!(
    addresses,
    vec![encode_address(&[1; 32]), encode_address(&[2; 32]), encode_address(&[3; 32])]
  );
  Ok(())
}

#[tokio::test]
async fn value_fetches_are_bounded() -> eyre::Result<()> {
  let boxes = (1..=10u8).map(|seed| balance_box(seed, seed as u64)).collect();
  let mut storage = FakeBoxStorage::new(boxes);
  for seed in 1..=10u8 {
    storage = storage.with_delay(vec![seed; 32], Duration::from_millis(10));
  }

  let ledger = refresh_depositors(&storage, APP_ID, 3).await?;

  assert_eq!(ledger.depositors.len(), 10);
  let peak = storage.max_in_flight.load(Ordering::SeqCst);
  assert!(peak <= 3, "peak concurrency was {}", peak);
  assert!(peak > 1, "fetches never overlapped");
  Ok(())
}

#[tokio::test]
async fn failed_value_fetch_fails_the_refresh() {
  let storage = FakeBoxStorage::new(vec![balance_box(1, 1), balance_box(2, 2)]).failing_value_of(vec![2; 32]);

  let result = refresh_depositors(&storage, APP_ID, 2).await;

  assert!(matches!(result, Err(AppError::QueryFailure(_))));
}

#[tokio::test]
async fn empty_storage_yields_empty_ledger() -> eyre::Result<()> {
  let ledger = refresh_depositors(&FakeBoxStorage::new(Vec::new()), APP_ID, 1).await?;
  assert!(ledger.depositors.is_empty());
  assert_eq!(ledger.total, Decimal::ZERO);
  Ok(())
}

#[test]
fn decode_depositor_reports_explicit_errors() {
  assert!(matches!(decode_depositor(&[1; 31], &[0; 8]), Err(AppError::InvalidKeyLength(31))));
  assert!(matches!(decode_depositor(&[1; 32], &[0; 4]), Err(AppError::InvalidValueLength(4))));
  let depositor = decode_depositor(&[1; 32], &encode_balance(123_456)).unwrap();
  assert_eq!(depositor.balance, Decimal::new(123_456, 6));
}
