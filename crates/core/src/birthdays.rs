//! Upcoming-birthday window.
//!
//! The window is built by stepping forward one calendar day at a time from today and keeping
//! each date's `MM-DD`. Because every step lands on a real date, the year boundary and
//! February 29 need no special handling: Dec 30 is followed by Dec 31 then Jan 01, and `02-29`
//! appears only when the current year actually has that day.

use crate::constants::BIRTHDAY_WINDOW_DAYS;
use crate::{ContactError, ContactResult};
use chrono::{Datelike, Days, NaiveDate};
use contacts_types::MonthDay;

/// Month and day of a calendar date, year dropped.
pub fn month_day_of(date: NaiveDate) -> ContactResult<MonthDay> {
    MonthDay::new(date.month(), date.day()).map_err(|e| ContactError::InvalidData(e.to_string()))
}

/// The `MM-DD` keys for `today` and the following seven days, in calendar order.
pub fn birthday_window(today: NaiveDate) -> ContactResult<Vec<MonthDay>> {
    (0..BIRTHDAY_WINDOW_DAYS)
        .map(|offset| {
            let date = today
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| {
                    ContactError::InvalidInput(format!("date out of range: {today} + {offset}"))
                })?;
            month_day_of(date)
        })
        .collect()
}
