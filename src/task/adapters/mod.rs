//! Adapter implementations for task ports.
//!
//! The HTTP implementation lives in [`crate::remote::http`].

pub mod memory;
