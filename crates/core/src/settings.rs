//! Per-workspace-year configuration for summary computation.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use autonomo_shared::types::{Money, MonthKey, Rate};

use crate::records::IvaRate;

/// Settings for one summaries request.
///
/// `year` selects which periods are emitted; `obligacion_130` decides whether
/// the Modelo 130 provisional payment is estimated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Calendar year to summarize, 0..=9999. Deserialization rejects other
    /// years.
    #[serde(deserialize_with = "year_in_range")]
    pub year: i32,
    /// Date the activity started.
    pub start_date: NaiveDate,
    /// Standard IVA rate of the workspace.
    pub iva_std: Rate,
    /// Fraction of net income due as provisional IRPF (Modelo 130).
    pub irpf_rate: Rate,
    /// Whether the worker files Modelo 130.
    pub obligacion_130: bool,
    /// Cash position before the first period of `year`.
    pub opening_balance: Money,
    /// Known expense categories.
    #[serde(default)]
    pub expense_categories: BTreeSet<String>,
}

fn year_in_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let year = i32::deserialize(deserializer)?;
    MonthKey::of(year, 1)
        .map(|_| year)
        .map_err(serde::de::Error::custom)
}

impl Settings {
    /// Creates settings for `year` with standard rates, no Modelo 130
    /// obligation, zero opening balance and no categories.
    #[must_use]
    pub fn new(year: i32, start_date: NaiveDate) -> Self {
        Self {
            year,
            start_date,
            iva_std: IvaRate::Standard.to_rate(),
            irpf_rate: Rate::from_decimal(rust_decimal::Decimal::new(20, 2)),
            obligacion_130: false,
            opening_balance: Money::ZERO,
            expense_categories: BTreeSet::new(),
        }
    }

    /// Sets the Modelo 130 obligation.
    #[must_use]
    pub const fn with_obligacion_130(mut self, obligacion_130: bool) -> Self {
        self.obligacion_130 = obligacion_130;
        self
    }

    /// Sets the provisional IRPF rate.
    #[must_use]
    pub const fn with_irpf_rate(mut self, irpf_rate: Rate) -> Self {
        self.irpf_rate = irpf_rate;
        self
    }

    /// Sets the opening balance.
    #[must_use]
    pub const fn with_opening_balance(mut self, opening_balance: Money) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    /// Adds an expense category.
    #[must_use]
    pub fn with_expense_category(mut self, category: impl Into<String>) -> Self {
        self.expense_categories.insert(category.into());
        self
    }

    /// Returns true if `category` is configured, or if no categories are configured at all.
    #[must_use]
    pub fn accepts_category(&self, category: &str) -> bool {
        self.expense_categories.is_empty() || self.expense_categories.contains(category)
    }

    /// First month that counts towards accumulated income in `year`: January,
    /// or the start month when the activity started during the year.
    ///
    /// Returns `None` when the activity starts after `year`.
    #[must_use]
    pub fn first_active_month(&self) -> Option<MonthKey> {
        let start = MonthKey::from_date(self.start_date);
        match self.start_date.year().cmp(&self.year) {
            std::cmp::Ordering::Less => MonthKey::months_of(self.year).next(),
            std::cmp::Ordering::Equal => Some(start),
            std::cmp::Ordering::Greater => None,
        }
    }
}
