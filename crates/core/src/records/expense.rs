//! Business expenses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autonomo_shared::ValidationError;
use autonomo_shared::types::{Money, Percentage};

use super::rates::IvaRate;
use super::record::{Dated, keyed_date};

/// Input for creating an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Date on the supplier's document.
    pub document_date: NaiveDate,
    /// Supplier name.
    pub vendor: String,
    /// Expense category.
    pub category: String,
    /// Base, VAT excluded.
    pub base_excl_vat: Money,
    /// IVA tier charged by the supplier.
    pub iva_rate: IvaRate,
    /// Whether the VAT paid can be offset against VAT charged.
    pub vat_recoverable_flag: bool,
    /// Share of the base that is tax deductible, in `[0, 1]`.
    pub deductible_share: Decimal,
    /// Date the expense was paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Amount actually paid when it differs from the total payable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid_override: Option<Money>,
}

/// A business expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewExpense", into = "NewExpense")]
pub struct Expense {
    document_date: NaiveDate,
    vendor: String,
    category: String,
    base_excl_vat: Money,
    iva_rate: IvaRate,
    vat_recoverable_flag: bool,
    deductible_share: Percentage,
    payment_date: Option<NaiveDate>,
    amount_paid_override: Option<Money>,
}

impl Expense {
    /// Creates an expense.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeAmount` if the base is negative,
    /// `ValidationError::PercentageOutOfRange` if the deductible share is
    /// outside `[0, 1]`, or `ValidationError::DateOutOfRange` if a date falls
    /// outside years 0000..=9999.
    pub fn new(input: NewExpense) -> Result<Self, ValidationError> {
        let base_excl_vat =
            Money::non_negative(input.base_excl_vat.amount(), "Expense.base_excl_vat")?;
        let deductible_share = Percentage::new(input.deductible_share)?;
        let document_date = keyed_date(input.document_date, "Expense.document_date")?;
        let payment_date = input
            .payment_date
            .map(|date| keyed_date(date, "Expense.payment_date"))
            .transpose()?;

        Ok(Self {
            document_date,
            vendor: input.vendor,
            category: input.category,
            base_excl_vat,
            iva_rate: input.iva_rate,
            vat_recoverable_flag: input.vat_recoverable_flag,
            deductible_share,
            payment_date,
            amount_paid_override: input.amount_paid_override,
        })
    }

    /// Date on the supplier's document.
    #[must_use]
    pub const fn document_date(&self) -> NaiveDate {
        self.document_date
    }

    /// Supplier name.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Expense category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Base, VAT excluded.
    #[must_use]
    pub const fn base_excl_vat(&self) -> Money {
        self.base_excl_vat
    }

    /// IVA tier.
    #[must_use]
    pub const fn iva_rate(&self) -> IvaRate {
        self.iva_rate
    }

    /// Whether the VAT paid is recoverable.
    #[must_use]
    pub const fn vat_recoverable_flag(&self) -> bool {
        self.vat_recoverable_flag
    }

    /// Deductible share of the base.
    #[must_use]
    pub const fn deductible_share(&self) -> Percentage {
        self.deductible_share
    }

    /// Payment date, if paid.
    #[must_use]
    pub const fn payment_date(&self) -> Option<NaiveDate> {
        self.payment_date
    }

    /// Explicit paid amount, if any.
    #[must_use]
    pub const fn amount_paid_override(&self) -> Option<Money> {
        self.amount_paid_override
    }

    /// VAT paid: `iva_rate * base`.
    #[must_use]
    pub fn iva_amount(&self) -> Money {
        self.iva_rate.to_rate().of(self.base_excl_vat)
    }

    /// `deductible_share * base`.
    #[must_use]
    pub fn deductible_base(&self) -> Money {
        self.deductible_share.of(self.base_excl_vat)
    }

    /// The VAT paid when recoverable, zero otherwise.
    #[must_use]
    pub fn vat_recoverable(&self) -> Money {
        if self.vat_recoverable_flag {
            self.iva_amount()
        } else {
            Money::ZERO
        }
    }

    /// `base + iva_amount`.
    #[must_use]
    pub fn total_payable(&self) -> Money {
        self.base_excl_vat + self.iva_amount()
    }

    /// The override when present, otherwise the total payable.
    #[must_use]
    pub fn amount_paid(&self) -> Money {
        self.amount_paid_override
            .unwrap_or_else(|| self.total_payable())
    }
}

impl Dated for Expense {
    fn event_date(&self) -> NaiveDate {
        self.payment_date.unwrap_or(self.document_date)
    }
}

impl TryFrom<NewExpense> for Expense {
    type Error = ValidationError;

    fn try_from(input: NewExpense) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<Expense> for NewExpense {
    fn from(expense: Expense) -> Self {
        Self {
            document_date: expense.document_date,
            vendor: expense.vendor,
            category: expense.category,
            base_excl_vat: expense.base_excl_vat,
            iva_rate: expense.iva_rate,
            vat_recoverable_flag: expense.vat_recoverable_flag,
            deductible_share: expense.deductible_share.value(),
            payment_date: expense.payment_date,
            amount_paid_override: expense.amount_paid_override,
        }
    }
}
