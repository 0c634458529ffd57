//! Command implementations.
//!
//! Every command writes to the given writer so it can be exercised without
//! touching stdout.

pub mod classify;
pub mod config;
pub mod inspect;
pub mod known;
