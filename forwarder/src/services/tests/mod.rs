//! Tests for forwarder services
//!
//! The HTTP client is exercised against a local mock server.

pub mod api_client;

// Re-export test utilities
pub use crate::traits::*;
