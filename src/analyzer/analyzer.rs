use std::collections::HashMap;

use log::{debug, info};
use rust_decimal::Decimal;

use crate::analyzer::chains::algorand::{classify_transaction, ClassifyContext};
use crate::analyzer::chains::types::{AmountSource, Statement, StatementType};
use crate::analyzer::chains::utils::microalgo_to_algo;
use crate::coin::algorand::address::application_address;
use crate::coin::algorand::model::{TransactionEnvelope, TxKind};
use crate::fetcher::fetcher::{AddressRole, TransactionFilter, TransactionIndex};
use crate::types::AppError;

/// Rebuilds the viewer's statement feed for one vault.
///
/// Both index queries must succeed; a failure in either aborts the refresh
/// without a partial feed. Result is ordered by round, most recent first, ties
/// in query order.
///
/// Withdrawals can appear twice if the index reports the contract's payout both
/// as an inner transaction of the app call and as a standalone payment. Those
/// are not merged.
pub async fn refresh_statements<I>(
    index: &I,
    app_id: u64,
    viewer: &str,
) -> Result<Vec<Statement>, AppError>
where
    I: TransactionIndex + ?Sized,
{
    let app_address = application_address(app_id);
    let ctx = ClassifyContext {
        app_id,
        app_address: &app_address,
        viewer,
    };

    let app_call_filter = TransactionFilter::new()
        .address(viewer)
        .address_role(AddressRole::Sender)
        .kind(TxKind::ApplicationCall);
    let payment_filter = TransactionFilter::new()
        .address(app_address.as_str())
        .kind(TxKind::Payment);

    let (app_calls, payments) = tokio::try_join!(
        index.search_transactions(&app_call_filter),
        index.search_transactions(&payment_filter),
    )?;

    info!(
        "[Reconciler] app {}: {} app calls from viewer, {} payments touching the contract",
        app_id,
        app_calls.len(),
        payments.len()
    );

    let group_deposits = group_deposit_amounts(&payments, &ctx);

    let mut statements: Vec<Statement> = Vec::with_capacity(app_calls.len() + payments.len());

    for tx in app_calls.iter().filter(|tx| tx.kind == TxKind::ApplicationCall) {
        let Some(mut classification) = classify_transaction(tx, &ctx) else {
            continue;
        };

        if classification.statement_type == StatementType::Deposit
            && classification.amount_source == AmountSource::Placeholder
        {
            if let Some(amount) = tx.group.as_ref().and_then(|g| group_deposits.get(g)) {
                classification.amount = *amount;
                classification.amount_source = AmountSource::GroupPayment;
            }
        }

        statements.push(Statement {
            id: tx.id.clone(),
            round: tx.confirmed_round,
            amount: classification.amount,
            statement_type: classification.statement_type,
            sender: tx.sender.clone(),
            receiver: app_address.clone(),
            timestamp: tx.round_time,
            amount_source: classification.amount_source,
        });
    }

    for tx in payments.iter().filter(|tx| tx.kind == TxKind::Payment) {
        let (Some(classification), Some(payment)) = (classify_transaction(tx, &ctx), &tx.payment) else {
            continue;
        };

        statements.push(Statement {
            id: tx.id.clone(),
            round: tx.confirmed_round,
            amount: classification.amount,
            statement_type: classification.statement_type,
            sender: tx.sender.clone(),
            receiver: payment.receiver.clone(),
            timestamp: tx.round_time,
            amount_source: classification.amount_source,
        });
    }

    // Vec::sort_by is stable
    statements.sort_by(|a, b| b.round.cmp(&a.round));

    debug!("[Reconciler] app {}: {} statements for {}", app_id, statements.len(), viewer);
    Ok(statements)
}

/// viewer → contract payment legs, keyed by atomic group id.
///
/// The vault's deposit call takes a single payment argument, so when a group
/// holds several such legs the first one in index order is kept.
fn group_deposit_amounts(
    payments: &[TransactionEnvelope],
    ctx: &ClassifyContext<'_>,
) -> HashMap<String, Decimal> {
    let mut amounts = HashMap::new();
    for tx in payments.iter().filter(|tx| tx.kind == TxKind::Payment && tx.sender == ctx.viewer) {
        let (Some(payment), Some(group)) = (&tx.payment, &tx.group) else {
            continue;
        };
        if payment.receiver != ctx.app_address {
            continue;
        }
        amounts
            .entry(group.clone())
            .or_insert_with(|| microalgo_to_algo(payment.amount));
    }
    amounts
}
