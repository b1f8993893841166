//! Test fixtures and utilities

pub mod logs;
pub mod records;

#[allow(unused_imports)]
pub use logs::*;
#[allow(unused_imports)]
pub use records::*;
