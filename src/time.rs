//! Clock
//!
//! Browser-local "today"; every date rule takes it as a parameter.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}
