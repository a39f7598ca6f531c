//! Per-persona dialogue history entries

use crate::core::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date format accepted by the date filter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One exchange between the user and a persona (Entity)
///
/// The calendar date is stamped when the entry is created so that date-range
/// filtering never has to guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user_text: String,
    pub assistant_text: String,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
}

impl HistoryEntry {
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self::at(user_text, assistant_text, Utc::now())
    }

    pub fn at(
        user_text: impl Into<String>,
        assistant_text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
            timestamp,
            date: timestamp.date_naive(),
        }
    }

    /// Case-insensitive substring match over both sides of the exchange.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        self.user_text.to_lowercase().contains(needle_lower)
            || self.assistant_text.to_lowercase().contains(needle_lower)
    }
}

/// How many trailing entries feed a prompt (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct HistoryDepth(usize);

impl HistoryDepth {
    pub const MIN: usize = 1;
    /// Enforced ceiling. Older help texts advertised 50; 10 is what is enforced.
    pub const MAX: usize = 10;
    pub const DEFAULT: HistoryDepth = HistoryDepth(5);

    pub fn try_new(value: i64) -> Result<Self, DomainError> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(DomainError::InvalidDepth {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value as usize))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for HistoryDepth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for HistoryDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for HistoryDepth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::NotANumber(s.trim().to_string()))?;
        Self::try_new(value)
    }
}

impl TryFrom<i64> for HistoryDepth {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<HistoryDepth> for i64 {
    fn from(depth: HistoryDepth) -> Self {
        depth.0 as i64
    }
}

/// Inclusive calendar-date range used by the history filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(s.trim().to_string()))
}
