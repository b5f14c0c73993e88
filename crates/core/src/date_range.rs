//! Inclusive calendar date ranges used for schedule generation.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;

/// A run of `days` consecutive calendar days starting at `start`.
///
/// `days` is always at least 1, so `end()` is never before `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    days: u32,
}

impl DateRange {
    /// Build a range, rejecting empty ranges and ranges that overflow the
    /// calendar.
    pub fn new(start: NaiveDate, days: u32) -> Result<Self, CoreError> {
        if days == 0 {
            return Err(CoreError::Validation(
                "Date range must cover at least one day".to_string(),
            ));
        }
        start
            .checked_add_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| CoreError::Validation(format!("Date range starting {start} overflows")))?;
        Ok(Self { start, days })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Last day of the range (inclusive).
    pub fn end(&self) -> NaiveDate {
        // Checked in `new`.
        self.start + Days::new(u64::from(self.days - 1))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Every date in the range, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).map(move |offset| self.start + Days::new(u64::from(offset)))
    }
}
