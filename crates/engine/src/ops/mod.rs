use chrono::{DateTime, Duration, Utc};

use crate::{EngineError, ResultEngine};

mod ledger;
mod summary;

pub use summary::Summary;

/// Lower bound of a lookback window of `days` ending now.
fn window_start(days: u32) -> ResultEngine<DateTime<Utc>> {
    Utc::now()
        .checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or(EngineError::InvalidWindow(days))
}
