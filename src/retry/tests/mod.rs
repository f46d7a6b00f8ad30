//! Unit tests for the retry wire format and the replay worker.

mod operation_tests;
mod worker_tests;
