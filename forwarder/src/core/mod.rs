//! Forwarder core business logic

pub mod attributes;
pub mod builder;
pub mod forwarder;
pub mod gating;

pub use attributes::{AttributeExtractor, keys, voicebase_attribute_name};
pub use builder::RequestBuilder;
pub use forwarder::{Forwarder, prepare_request};
pub use gating::{Gate, gate, override_or};
