pub mod types;
pub mod utils;
pub mod algorand;

pub use types::{AmountSource, Classification, Depositor, DepositorLedger, Statement, StatementType};
pub use algorand::{classify_transaction, is_withdraw_log, ClassifyContext};
