//! Payments made to the tax agency and social security.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autonomo_shared::ValidationError;
use autonomo_shared::types::Money;

use super::record::{Dated, keyed_date};

/// What a state payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatePaymentType {
    /// Quarterly VAT return.
    Modelo303,
    /// Quarterly provisional income-tax payment.
    Modelo130,
    /// Self-employed social security fee.
    SeguridadSocial,
    /// Annual income-tax return.
    RentaAnual,
    /// Anything else.
    Other,
}

/// Input for creating a state payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStatePayment {
    /// Date paid.
    pub payment_date: NaiveDate,
    /// What the payment settles.
    #[serde(rename = "type")]
    pub payment_type: StatePaymentType,
    /// Amount paid.
    pub amount: Money,
}

/// A payment to the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewStatePayment", into = "NewStatePayment")]
pub struct StatePayment {
    payment_date: NaiveDate,
    payment_type: StatePaymentType,
    amount: Money,
}

impl StatePayment {
    /// Creates a state payment.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeAmount` if the amount is negative, or
    /// `ValidationError::DateOutOfRange` if a date falls outside years 0000..=9999.
    pub fn new(input: NewStatePayment) -> Result<Self, ValidationError> {
        Ok(Self {
            payment_date: keyed_date(input.payment_date, "StatePayment.payment_date")?,
            payment_type: input.payment_type,
            amount: Money::non_negative(input.amount.amount(), "StatePayment.amount")?,
        })
    }

    /// Date paid.
    #[must_use]
    pub const fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    /// What the payment settles.
    #[must_use]
    pub const fn payment_type(&self) -> StatePaymentType {
        self.payment_type
    }

    /// Amount paid.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }
}

impl Dated for StatePayment {
    fn event_date(&self) -> NaiveDate {
        self.payment_date
    }
}

impl TryFrom<NewStatePayment> for StatePayment {
    type Error = ValidationError;

    fn try_from(input: NewStatePayment) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<StatePayment> for NewStatePayment {
    fn from(payment: StatePayment) -> Self {
        Self {
            payment_date: payment.payment_date,
            payment_type: payment.payment_type,
            amount: payment.amount,
        }
    }
}
