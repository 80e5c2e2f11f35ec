//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or timers.

mod account;
mod movement;
mod summary;
pub mod result;

pub use account::Account;
pub use movement::{Movement, MovementKind, SortOrder};
pub use summary::AccountSummary;
