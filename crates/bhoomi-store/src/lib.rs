//! Storage layer: analysed cases keyed by user, with optional JSON snapshot persistence.

mod cases;
mod error;
mod stats;

pub use cases::{CaseStore, DEFAULT_PAGE_SIZE};
pub use error::StoreError;
pub use stats::{CaseListItem, UserStats};
