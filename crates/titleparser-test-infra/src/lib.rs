//! Disposable containers for integration tests.
//!
//! Tests using these fixtures need a running Docker daemon.

pub mod error;
pub mod redis;

pub use error::{Result, TestInfraError};
