//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The session
//! controller depends only on these traits, not on concrete implementations.

mod clock;
mod repository;

pub use clock::Clock;
pub use repository::AccountRepository;
