//! Deferred-mutation retry queue for Chronobridge.
//!
//! When a workflow's bookkeeping write fails after the authoritative remote
//! write already succeeded, the mutation is captured as a typed
//! [`domain::RetryOperation`] and enqueued for later replay. Delivery is
//! at-least-once, so every replay handler is an idempotent put-by-key or
//! delete-by-key. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The replay worker in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
