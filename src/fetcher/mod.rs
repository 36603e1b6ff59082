pub mod runner;
pub mod fetcher;
pub mod algorand_fetcher;

pub use fetcher::{AddressRole, BoxStorage, TransactionFilter, TransactionIndex};
pub use algorand_fetcher::AlgorandFetcher;
