use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};

use crate::analyzer::chains::types::{Depositor, DepositorLedger};
use crate::analyzer::chains::utils::microalgo_to_algo;
use crate::coin::algorand::address::{decode_account_key, decode_balance, PUBLIC_KEY_LENGTH};
use crate::fetcher::fetcher::BoxStorage;
use crate::types::AppError;

/// Decodes the vault's account-balance boxes into a ledger snapshot.
///
/// Box values are fetched at most `concurrency` at a time. Depositors keep the
/// storage enumeration order whatever order the fetches complete in. Keys that
/// are not 32 bytes, and values shorter than 8 bytes, are skipped; any fetch
/// failure aborts the whole refresh.
pub async fn refresh_depositors<S>(
    storage: &S,
    app_id: u64,
    concurrency: usize,
) -> Result<DepositorLedger, AppError>
where
    S: BoxStorage + ?Sized,
{
    let names = storage.list_box_names(app_id).await?;
    let total_boxes = names.len();

    let account_keys: Vec<Vec<u8>> = names
        .into_iter()
        .filter(|name| {
            let is_account = name.len() == PUBLIC_KEY_LENGTH;
            if !is_account {
                debug!("[DepositorLedger] app {}: skipping {}-byte box key", app_id, name.len());
            }
            is_account
        })
        .collect();

    let records: Vec<(Vec<u8>, Vec<u8>)> = stream::iter(account_keys)
        .map(|name| async move {
            let value = storage.get_box_value(app_id, &name).await?;
            Ok::<_, AppError>((name, value))
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let mut depositors: Vec<Depositor> = Vec::with_capacity(records.len());
    for (name, value) in &records {
        match decode_depositor(name, value) {
            Ok(depositor) => depositors.push(depositor),
            Err(e) if e.is_decode_skip() => {
                debug!("[DepositorLedger] app {}: skipping box: {}", app_id, e);
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "[DepositorLedger] app {}: {} depositors from {} boxes",
        app_id,
        depositors.len(),
        total_boxes
    );

    Ok(DepositorLedger::new(app_id, depositors))
}

pub fn decode_depositor(name: &[u8], value: &[u8]) -> Result<Depositor, AppError> {
    let address = decode_account_key(name)?;
    let micro_units = decode_balance(value)?;
    Ok(Depositor {
        address,
        balance: microalgo_to_algo(micro_units),
    })
}
