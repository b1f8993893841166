//! Forwarder services implementations

pub mod api_client;
pub mod callbacks;

#[cfg(test)]
pub mod tests;

pub use api_client::*;
pub use callbacks::*;
