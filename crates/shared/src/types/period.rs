//! Calendar period keys used as aggregation buckets.
//!
//! Both keys order chronologically; for four-digit years this is the same as
//! ordering their canonical strings.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_YEAR: i32 = 9999;

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, rejecting months outside 1..=12 and years that do
    /// not fit four digits.
    pub fn of(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(0..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonthKey(format!(
                "{year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    ///
    /// The year is not checked; callers pass dates already validated to fall
    /// in years 0000..=9999, as record constructors do.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The twelve months of `year`, January first. `year` must be in 0..=9999.
    pub fn months_of(year: i32) -> impl Iterator<Item = Self> {
        (1..=12).map(move |month| Self { year, month })
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1..=12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // year and month are always inside chrono's supported range
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The quarter this month belongs to.
    #[must_use]
    pub const fn quarter_key(&self) -> QuarterKey {
        QuarterKey::from_month(*self)
    }

    /// Returns true if the month closes its quarter (March, June, September, December).
    #[must_use]
    pub const fn closes_quarter(&self) -> bool {
        self.month % 3 == 0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonthKey(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if !is_digits(year, 4) || !is_digits(month, 2) {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::of(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

/// A calendar quarter, rendered as `YYYY-QN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuarterKey {
    year: i32,
    quarter: u32,
}

impl QuarterKey {
    /// Creates a quarter key, rejecting quarters outside 1..=4.
    pub fn of(year: i32, quarter: u32) -> Result<Self, ValidationError> {
        if !(0..=MAX_YEAR).contains(&year) || !(1..=4).contains(&quarter) {
            return Err(ValidationError::InvalidQuarterKey(format!(
                "{year:04}-Q{quarter}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// The quarter of a month: `((month - 1) / 3) + 1`.
    #[must_use]
    pub const fn from_month(month: MonthKey) -> Self {
        Self {
            year: month.year,
            quarter: ((month.month - 1) / 3) + 1,
        }
    }

    /// The quarter containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(MonthKey::from_date(date))
    }

    /// The four quarters of `year`, Q1 first. `year` must be in 0..=9999.
    pub fn quarters_of(year: i32) -> impl Iterator<Item = Self> {
        (1..=4).map(move |quarter| Self { year, quarter })
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number, 1..=4.
    #[must_use]
    pub const fn quarter(&self) -> u32 {
        self.quarter
    }

    /// The three months of the quarter in order.
    #[must_use]
    pub const fn months(&self) -> [MonthKey; 3] {
        let first = (self.quarter - 1) * 3 + 1;
        [
            MonthKey {
                year: self.year,
                month: first,
            },
            MonthKey {
                year: self.year,
                month: first + 1,
            },
            MonthKey {
                year: self.year,
                month: first + 2,
            },
        ]
    }

    /// Last month of the quarter.
    #[must_use]
    pub const fn last_month(&self) -> MonthKey {
        self.months()[2]
    }
}

impl From<MonthKey> for QuarterKey {
    fn from(month: MonthKey) -> Self {
        Self::from_month(month)
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for QuarterKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidQuarterKey(s.to_string());
        let (year, quarter) = s.split_once("-Q").ok_or_else(invalid)?;
        if !is_digits(year, 4) || !is_digits(quarter, 1) {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let quarter = quarter.parse().map_err(|_| invalid())?;
        Self::of(year, quarter).map_err(|_| invalid())
    }
}

impl TryFrom<String> for QuarterKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuarterKey> for String {
    fn from(value: QuarterKey) -> Self {
        value.to_string()
    }
}

/// Bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Calendar month.
    Month,
    /// Calendar quarter.
    Quarter,
}

/// A month or quarter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    /// `YYYY-MM`.
    Month(MonthKey),
    /// `YYYY-QN`.
    Quarter(QuarterKey),
}

impl PeriodKey {
    /// The key of the given kind containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate, kind: PeriodKind) -> Self {
        match kind {
            PeriodKind::Month => Self::Month(MonthKey::from_date(date)),
            PeriodKind::Quarter => Self::Quarter(QuarterKey::from_date(date)),
        }
    }

    /// Granularity of this key.
    #[must_use]
    pub const fn kind(&self) -> PeriodKind {
        match self {
            Self::Month(_) => PeriodKind::Month,
            Self::Quarter(_) => PeriodKind::Quarter,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(key) => key.fmt(f),
            Self::Quarter(key) => key.fmt(f),
        }
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
