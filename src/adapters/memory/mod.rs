//! In-memory adapters.
//!
//! Used by tests and by the binary when no database is configured.

mod period_store;

pub use period_store::InMemoryPeriodStore;
