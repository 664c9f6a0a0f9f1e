//! Small value types shared by the contacts crates.
//!
//! - [`ContactId`] and [`OwnerId`] keep contact identifiers and user identities from being mixed
//!   up at call sites that take both.
//! - [`MonthDay`] is the year-independent `MM-DD` key used for birthday matching.

use std::fmt;
use std::str::FromStr;

/// Identifier of a stored contact, assigned by the store and unique across all owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an authenticated user. Every contact is owned by exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when creating a [`MonthDay`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MonthDayError {
    /// The input was not of the form `MM-DD`
    #[error("expected MM-DD, got {0:?}")]
    Format(String),
    /// The month was outside `1..=12`
    #[error("month out of range: {0}")]
    Month(u32),
    /// The day does not exist in the given month in any year
    #[error("day {day} out of range for month {month}")]
    Day { month: u32, day: u32 },
}

/// A month and day with no year attached.
///
/// February 29 is accepted because it is a valid month-day in leap years. The textual form is
/// always zero-padded `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Creates a new `MonthDay`, rejecting combinations that never occur on a calendar.
    pub fn new(month: u32, day: u32) -> Result<Self, MonthDayError> {
        let max_day = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return Err(MonthDayError::Month(month)),
        };
        if day == 0 || day > max_day {
            return Err(MonthDayError::Day { month, day });
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = MonthDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || MonthDayError::Format(s.to_owned());

        let (month, day) = s.split_once('-').ok_or_else(format_err)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(format_err());
        }
        if !month.bytes().chain(day.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(format_err());
        }

        let month = month.parse().map_err(|_| format_err())?;
        let day = day.parse().map_err(|_| format_err())?;
        Self::new(month, day)
    }
}

impl serde::Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
