use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementType {
    Deposit,
    Withdrawal,
}

/// Where a statement's amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSource {
    /// First payment among the app call's inner transactions.
    InnerPayment,
    /// A top-level payment from the contract.
    DirectPayment,
    /// The viewer's payment leg in the same atomic group as the app call.
    GroupPayment,
    /// No amount signal was found; the amount is the fixed placeholder of 1.
    Placeholder,
}

/// Classifier verdict for one relevant transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub statement_type: StatementType,
    pub amount: Decimal,
    pub amount_source: AmountSource,
}

/// One reconciled entry of a viewer's statement feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub id: String,
    pub round: u64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub statement_type: StatementType,
    pub sender: String,
    pub receiver: String,
    pub timestamp: Option<u64>,
    pub amount_source: AmountSource,
}

/// Decoded balance box of one depositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Depositor {
    pub address: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepositorLedger {
    pub app_id: u64,
    pub depositors: Vec<Depositor>,
    pub total: Decimal,
}

impl DepositorLedger {
    pub fn new(app_id: u64, depositors: Vec<Depositor>) -> Self {
        let total = depositors.iter().map(|d| d.balance).sum();
        Self {
            app_id,
            depositors,
            total,
        }
    }
}
