//! The replay worker over delivered retry batches.

mod worker;

pub use worker::{BatchFailure, BatchReport, RetryWorker};
