//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation
//! - `http` - axum REST API
//! - `memory` - In-memory period store
//! - `postgres` - PostgreSQL period store

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::StaticTokenValidator;
pub use memory::InMemoryPeriodStore;
pub use postgres::{PostgresPeriodReader, PostgresPeriodRepository};
