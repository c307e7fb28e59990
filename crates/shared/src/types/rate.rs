//! Decimal multipliers applied to money.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::ValidationError;

/// A decimal multiplier, e.g. `0.21` for a 21% tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from its decimal multiplier.
    #[must_use]
    pub const fn from_decimal(multiplier: Decimal) -> Self {
        Self(multiplier)
    }

    /// The decimal multiplier.
    #[must_use]
    pub const fn decimal(&self) -> Decimal {
        self.0
    }

    /// Applies the rate: `money * multiplier`, unrounded.
    #[must_use]
    pub fn of(&self, money: Money) -> Money {
        Money::new(money.amount() * self.0)
    }
}

impl FromStr for Rate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidDecimal(s.to_string()))
    }
}

/// A share in `[0, 1]`, e.g. the deductible part of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage, rejecting values outside `[0, 1]`.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ValidationError::PercentageOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// The share as a decimal.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Applies the share to an amount.
    #[must_use]
    pub fn of(&self, money: Money) -> Money {
        Money::new(money.amount() * self.0)
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(value: Percentage) -> Self {
        value.0
    }
}
