//! Period tracker backend.
//!
//! Logs menstrual periods per user, derives average period and cycle lengths
//! from each user's closed history and predicts the next period.
//!
//! # Layers
//!
//! - `domain` - Records, statistics, prediction (no I/O)
//! - `ports` - Storage and authentication contracts
//! - `application` - Command and query handlers
//! - `adapters` - PostgreSQL, in-memory, auth and HTTP implementations
//! - `config` - Environment-driven configuration
//! - `logging` - Tracing subscriber setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
