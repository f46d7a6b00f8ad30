//! Port contracts for the remote platforms and the failure notifier.
//!
//! Ports define infrastructure-agnostic interfaces; workflows depend on
//! these traits, never on the HTTP adapters directly.

pub mod agency;
pub mod notifier;
pub mod tracker;

pub use agency::AgencyPort;
pub use notifier::{FailureNotifier, Notice};
pub use tracker::TrackerPort;
