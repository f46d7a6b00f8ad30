//! Bulk job/client reconciliation for Chronobridge.
//!
//! Timer-driven workflows that converge the tracker's client and project
//! catalog to the agency's live state: the catalog pass creates missing
//! clients and projects, and the change pass diffs the live job list
//! against a durable snapshot to upsert drifted rows, drop vanished ones,
//! and delete tracker projects orphaned by job removal. The module follows
//! hexagonal architecture:
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
