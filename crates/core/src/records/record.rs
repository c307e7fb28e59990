//! The closed set of record kinds and their shared date behaviour.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use autonomo_shared::ValidationError;
use autonomo_shared::types::{MonthKey, PeriodKey, PeriodKind, QuarterKey};

use super::budget::BudgetEntry;
use super::expense::Expense;
use super::invoice::Invoice;
use super::state_payment::StatePayment;
use super::transfer::Transfer;

/// A record filed under a calendar date.
///
/// Period keys are derived from [`Dated::event_date`] on every call.
pub trait Dated {
    /// The date the record is filed under.
    fn event_date(&self) -> NaiveDate;

    /// `YYYY-MM` bucket.
    fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.event_date())
    }

    /// `YYYY-QN` bucket, derived from the month.
    fn quarter_key(&self) -> QuarterKey {
        QuarterKey::from_month(self.month_key())
    }

    /// Bucket of the requested granularity.
    fn period_key(&self, kind: PeriodKind) -> PeriodKey {
        match kind {
            PeriodKind::Month => PeriodKey::Month(self.month_key()),
            PeriodKind::Quarter => PeriodKey::Quarter(self.quarter_key()),
        }
    }
}

/// Rejects a date whose month key would not fit `YYYY-MM`.
pub(crate) fn keyed_date(
    date: NaiveDate,
    field: &'static str,
) -> Result<NaiveDate, ValidationError> {
    MonthKey::of(date.year(), date.month())
        .map(|_| date)
        .map_err(|_| ValidationError::DateOutOfRange { field, date })
}

/// Record type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    /// [`Invoice`].
    Invoice,
    /// [`Expense`].
    Expense,
    /// [`StatePayment`].
    StatePayment,
    /// [`Transfer`].
    Transfer,
    /// [`BudgetEntry`].
    Budget,
}

impl RecordType {
    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "INVOICE",
            Self::Expense => "EXPENSE",
            Self::StatePayment => "STATE_PAYMENT",
            Self::Transfer => "TRANSFER",
            Self::Budget => "BUDGET",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INVOICE" => Ok(Self::Invoice),
            "EXPENSE" => Ok(Self::Expense),
            "STATE_PAYMENT" => Ok(Self::StatePayment),
            "TRANSFER" => Ok(Self::Transfer),
            "BUDGET" => Ok(Self::Budget),
            _ => Err(format!("Unknown record type: {s}")),
        }
    }
}

/// Any financial record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "record_type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum Record {
    /// An issued invoice.
    Invoice(Invoice),
    /// A business expense.
    Expense(Expense),
    /// A payment to the state.
    StatePayment(StatePayment),
    /// A bank transfer.
    Transfer(Transfer),
    /// A budget plan.
    Budget(BudgetEntry),
}

impl Record {
    /// The record's type tag.
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Invoice(_) => RecordType::Invoice,
            Self::Expense(_) => RecordType::Expense,
            Self::StatePayment(_) => RecordType::StatePayment,
            Self::Transfer(_) => RecordType::Transfer,
            Self::Budget(_) => RecordType::Budget,
        }
    }
}

impl Dated for Record {
    fn event_date(&self) -> NaiveDate {
        match self {
            Self::Invoice(r) => r.event_date(),
            Self::Expense(r) => r.event_date(),
            Self::StatePayment(r) => r.event_date(),
            Self::Transfer(r) => r.event_date(),
            Self::Budget(r) => r.event_date(),
        }
    }
}

impl From<Invoice> for Record {
    fn from(value: Invoice) -> Self {
        Self::Invoice(value)
    }
}

impl From<Expense> for Record {
    fn from(value: Expense) -> Self {
        Self::Expense(value)
    }
}

impl From<StatePayment> for Record {
    fn from(value: StatePayment) -> Self {
        Self::StatePayment(value)
    }
}

impl From<Transfer> for Record {
    fn from(value: Transfer) -> Self {
        Self::Transfer(value)
    }
}

impl From<BudgetEntry> for Record {
    fn from(value: BudgetEntry) -> Self {
        Self::Budget(value)
    }
}
