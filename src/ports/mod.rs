//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PeriodRepository` - conditional writes and owner-scoped lookups
//! - `PeriodReader` - filtered listing for history and calendar views
//! - `SessionValidator` - bearer token validation

mod period_reader;
mod period_repository;
mod session_validator;

pub use period_reader::{PeriodFilter, PeriodReader, DEFAULT_LIMIT, MAX_LIMIT};
pub use period_repository::{PeriodRepository, WriteOutcome};
pub use session_validator::SessionValidator;
