//! Adapter implementations of the comment port.

pub mod memory;
