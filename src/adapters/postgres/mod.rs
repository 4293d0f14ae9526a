//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresPeriodRepository` - Conditional writes and owner-scoped lookups
//! - `PostgresPeriodReader` - Filtered, paged listing
//!
//! The schema lives in `migrations/` at the crate root.

mod period_reader;
mod period_repository;

pub use period_reader::PostgresPeriodReader;
pub use period_repository::PostgresPeriodRepository;
