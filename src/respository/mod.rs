mod memory;

pub use memory::{RefreshStore, RefreshTicket};
