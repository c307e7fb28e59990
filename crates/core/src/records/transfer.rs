//! Bank transfers in and out of the business account.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autonomo_shared::ValidationError;
use autonomo_shared::types::Money;

use super::record::{Dated, keyed_date};

/// Direction of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferOp {
    /// Money into the account.
    Inflow,
    /// Money out of the account.
    Outflow,
}

/// Input for creating a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransfer {
    /// Value date.
    pub date: NaiveDate,
    /// Direction.
    pub operation: TransferOp,
    /// Unsigned amount.
    pub amount: Money,
    /// Free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A transfer that moves cash without being income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewTransfer", into = "NewTransfer")]
pub struct Transfer {
    date: NaiveDate,
    operation: TransferOp,
    amount: Money,
    note: Option<String>,
}

impl Transfer {
    /// Creates a transfer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeAmount` if the amount is negative, or
    /// `ValidationError::DateOutOfRange` if a date falls outside years 0000..=9999.
    pub fn new(input: NewTransfer) -> Result<Self, ValidationError> {
        Ok(Self {
            date: keyed_date(input.date, "Transfer.date")?,
            operation: input.operation,
            amount: Money::non_negative(input.amount.amount(), "Transfer.amount")?,
            note: input.note,
        })
    }

    /// Value date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Direction.
    #[must_use]
    pub const fn operation(&self) -> TransferOp {
        self.operation
    }

    /// Unsigned amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Free-text note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// `+amount` for inflows, `-amount` for outflows.
    #[must_use]
    pub fn signed(&self) -> Money {
        match self.operation {
            TransferOp::Inflow => self.amount,
            TransferOp::Outflow => -self.amount,
        }
    }
}

impl Dated for Transfer {
    fn event_date(&self) -> NaiveDate {
        self.date
    }
}

impl TryFrom<NewTransfer> for Transfer {
    type Error = ValidationError;

    fn try_from(input: NewTransfer) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<Transfer> for NewTransfer {
    fn from(transfer: Transfer) -> Self {
        Self {
            date: transfer.date,
            operation: transfer.operation,
            amount: transfer.amount,
            note: transfer.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(TransferOp::Inflow, dec!(150))]
    #[case(TransferOp::Outflow, dec!(-150))]
    fn test_signed(#[case] operation: TransferOp, #[case] expected: rust_decimal::Decimal) {
        let transfer = Transfer::new(NewTransfer {
            date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            operation,
            amount: Money::new(dec!(150)),
            note: None,
        })
        .unwrap();
        assert_eq!(transfer.signed(), Money::new(expected));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = Transfer::new(NewTransfer {
            date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            operation: TransferOp::Inflow,
            amount: Money::new(dec!(-1)),
            note: Some("savings".to_string()),
        });
        assert!(result.is_err());
    }

    #[rstest]
    #[case(10_000)]
    #[case(-1)]
    fn test_date_outside_key_range_rejected(#[case] year: i32) {
        let date = NaiveDate::from_ymd_opt(year, 3, 1).unwrap();
        let result = Transfer::new(NewTransfer {
            date,
            operation: TransferOp::Outflow,
            amount: Money::new(dec!(10)),
            note: None,
        });
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DateOutOfRange {
                field: "Transfer.date",
                date,
            }
        );
    }
}
