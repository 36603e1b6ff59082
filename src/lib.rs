pub mod analyzer;
pub mod coin;
pub mod config;
pub mod fetcher;
pub mod respository;
pub mod shutdown;
pub mod tasks;
pub mod types;
