//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth identity)
//! - `period` - Period records, cycle statistics and next-cycle prediction

pub mod foundation;
pub mod period;
