use super::types::{AmountSource, Classification, StatementType};
use super::utils::microalgo_to_algo;
use crate::coin::algorand::model::{TransactionEnvelope, TxKind};
use log::debug;
use rust_decimal::Decimal;

/// Who is asking, and about which vault.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub app_id: u64,
    pub app_address: &'a str,
    pub viewer: &'a str,
}

/// Weak signal: the call's logs, read as text, mention a withdrawal.
///
/// Kept as the single place that interprets log text, so a structured method
/// tag can replace it without touching the reconciler.
pub fn is_withdraw_log(logs: &[Vec<u8>]) -> bool {
    let text = logs
        .iter()
        .map(|entry| String::from_utf8_lossy(entry))
        .collect::<Vec<_>>()
        .join(" ");
    text.to_lowercase().contains("withdraw")
}

/// Classifies one indexer transaction against the vault.
///
/// Returns `None` when the transaction is not relevant: an app call to another
/// application, a payment that is not contract → viewer, or any other kind.
pub fn classify_transaction(
    tx: &TransactionEnvelope,
    ctx: &ClassifyContext<'_>,
) -> Option<Classification> {
    match tx.kind {
        TxKind::ApplicationCall => classify_application_call(tx, ctx),
        TxKind::Payment => classify_direct_payment(tx, ctx),
        TxKind::Other => None,
    }
}

fn classify_application_call(
    tx: &TransactionEnvelope,
    ctx: &ClassifyContext<'_>,
) -> Option<Classification> {
    if tx.application_id() != Some(ctx.app_id) {
        debug!(
            "[Classifier] {} targets app {:?}, not {}",
            tx.id,
            tx.application_id(),
            ctx.app_id
        );
        return None;
    }

    let mut classification = Classification {
        statement_type: StatementType::Deposit,
        amount: Decimal::ONE,
        amount_source: AmountSource::Placeholder,
    };

    if is_withdraw_log(&tx.logs) {
        classification.statement_type = StatementType::Withdrawal;
    }

    // Only the first inner payment counts
    let first_payment = tx
        .inner_transactions
        .iter()
        .find_map(|inner| match (inner.kind, &inner.payment) {
            (TxKind::Payment, Some(payment)) => Some((inner, payment)),
            _ => None,
        });

    if let Some((inner, payment)) = first_payment {
        classification.amount = microalgo_to_algo(payment.amount);
        classification.amount_source = AmountSource::InnerPayment;
        if inner.sender == ctx.app_address && payment.receiver == ctx.viewer {
            classification.statement_type = StatementType::Withdrawal;
        }
    }

    Some(classification)
}

fn classify_direct_payment(
    tx: &TransactionEnvelope,
    ctx: &ClassifyContext<'_>,
) -> Option<Classification> {
    let payment = tx.payment.as_ref()?;

    // viewer → contract legs are already captured by the deposit app call
    if tx.sender != ctx.app_address || payment.receiver != ctx.viewer {
        return None;
    }

    Some(Classification {
        statement_type: StatementType::Withdrawal,
        amount: microalgo_to_algo(payment.amount),
        amount_source: AmountSource::DirectPayment,
    })
}
