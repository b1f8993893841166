//! Forwarder library for contact-center call analytics
//!
//! Turns completed contact records into media processing requests, submits
//! them to the media API and classifies failures for retry.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::ForwarderConfig;
pub use self::core::{AttributeExtractor, Forwarder, RequestBuilder};
pub use error::{ForwarderError, ForwarderResult};
pub use traits::*;
pub use types::*;
pub use services::{CallbackSettings, RealMediaClient};
