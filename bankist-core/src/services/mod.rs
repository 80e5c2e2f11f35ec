//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod format;
pub mod logging;
mod session;
mod status;
mod timer;
pub mod view;

pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use session::{loan_limit, SessionController, SessionState, LOAN_LIMIT_PERCENT};
pub use status::{AccountListing, StatusService, StatusSummary};
pub use timer::InactivityTimer;
pub use view::{AccountView, MovementRow, LOGGED_OUT_MESSAGE};
