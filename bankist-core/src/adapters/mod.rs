//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - In-memory vector for the AccountRepository port
//! - System and fixed clocks for the Clock port
//! - Demo account data used to seed the store

pub mod clock;
pub mod demo;
pub mod memory;
