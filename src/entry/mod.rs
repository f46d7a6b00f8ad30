//! Time-entry synchronization for Chronobridge.
//!
//! This module implements the per-event workflows that move a single time
//! entry between the platforms: create, update, and delete, plus the entry
//! backup mirror and the retention cleanup pass over the mapping store. Each
//! workflow is a stateless, run-to-completion unit; durable state lives in
//! the mapping store, and the retry queue compensates for bookkeeping
//! writes that fail after the remote write already succeeded. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
