//! Port contracts and adapters for the bridge's external collaborators.
//!
//! The bridge talks to three remote parties: the **tracker** platform where
//! time entries originate, the **agency** platform that owns the
//! authoritative jobs and timesheets, and a fire-and-forget failure
//! notification sink. This module defines their port traits, the shared
//! identifier and wire-model types, HTTP adapters built on `reqwest`, and
//! in-memory fakes used by the workflow tests. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
