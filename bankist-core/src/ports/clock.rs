//! Clock port - source of "now" for timestamps and relative date labels

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
