pub mod analyzer;
pub mod chains;

pub use analyzer::refresh_statements;
