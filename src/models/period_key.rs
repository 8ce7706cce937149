//! Calendar labels for payroll periods.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A `YYYYMM` label identifying one monthly payroll run.
///
/// Keys order chronologically, so sorting a list of keys sorts the periods.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PeriodKey;
///
/// let key: PeriodKey = "202501".parse()?;
/// assert_eq!(key.year(), 2025);
/// assert_eq!(key.month(), 1);
/// assert!("202513".parse::<PeriodKey>().is_err());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    label: String,
    first_day: NaiveDate,
}

impl PeriodKey {
    /// Validates and wraps a `YYYYMM` label.
    pub fn parse(key: &str) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidPeriodKey {
            key: key.to_string(),
            message: message.to_string(),
        };

        if key.len() != 6 || !key.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be exactly 6 digits (YYYYMM)"));
        }

        let year: i32 = key[..4]
            .parse()
            .map_err(|_| invalid("year is not a number"))?;
        let month: u32 = key[4..]
            .parse()
            .map_err(|_| invalid("month is not a number"))?;

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| invalid("month must be between 01 and 12"))?;

        Ok(Self {
            label: key.to_string(),
            first_day,
        })
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// The four-digit year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for PeriodKey {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        Self::parse(&value)
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.label
    }
}
