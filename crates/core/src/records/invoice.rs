//! Issued invoices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autonomo_shared::ValidationError;
use autonomo_shared::types::Money;

use super::rates::{IvaRate, RetencionRate};
use super::record::{Dated, keyed_date};

/// Input for creating an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    /// Date the invoice was issued.
    pub invoice_date: NaiveDate,
    /// Invoice number.
    pub number: String,
    /// Client name.
    pub client: String,
    /// Taxable base, VAT excluded.
    pub base_excl_vat: Money,
    /// IVA tier.
    pub iva_rate: IvaRate,
    /// IRPF withholding tier.
    pub retencion: RetencionRate,
    /// Date the invoice was collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Amount actually collected when it differs from the total receivable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_received_override: Option<Money>,
}

/// An issued invoice.
///
/// Tax amounts are derived on every call; nothing computed is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewInvoice", into = "NewInvoice")]
pub struct Invoice {
    invoice_date: NaiveDate,
    number: String,
    client: String,
    base_excl_vat: Money,
    iva_rate: IvaRate,
    retencion: RetencionRate,
    payment_date: Option<NaiveDate>,
    amount_received_override: Option<Money>,
}

impl Invoice {
    /// Creates an invoice.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeAmount` if the base is negative, or
    /// `ValidationError::DateOutOfRange` if a date falls outside years 0000..=9999.
    pub fn new(input: NewInvoice) -> Result<Self, ValidationError> {
        let base_excl_vat =
            Money::non_negative(input.base_excl_vat.amount(), "Invoice.base_excl_vat")?;
        let invoice_date = keyed_date(input.invoice_date, "Invoice.invoice_date")?;
        let payment_date = input
            .payment_date
            .map(|date| keyed_date(date, "Invoice.payment_date"))
            .transpose()?;

        Ok(Self {
            invoice_date,
            number: input.number,
            client: input.client,
            base_excl_vat,
            iva_rate: input.iva_rate,
            retencion: input.retencion,
            payment_date,
            amount_received_override: input.amount_received_override,
        })
    }

    /// Date the invoice was issued.
    #[must_use]
    pub const fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    /// Invoice number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Client name.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Taxable base, VAT excluded.
    #[must_use]
    pub const fn base_excl_vat(&self) -> Money {
        self.base_excl_vat
    }

    /// IVA tier.
    #[must_use]
    pub const fn iva_rate(&self) -> IvaRate {
        self.iva_rate
    }

    /// IRPF withholding tier.
    #[must_use]
    pub const fn retencion(&self) -> RetencionRate {
        self.retencion
    }

    /// Collection date, if collected.
    #[must_use]
    pub const fn payment_date(&self) -> Option<NaiveDate> {
        self.payment_date
    }

    /// Explicit collected amount, if any.
    #[must_use]
    pub const fn amount_received_override(&self) -> Option<Money> {
        self.amount_received_override
    }

    /// VAT charged: `iva_rate * base`.
    #[must_use]
    pub fn iva_amount(&self) -> Money {
        self.iva_rate.to_rate().of(self.base_excl_vat)
    }

    /// IRPF withheld by the client, as a non-positive amount.
    #[must_use]
    pub fn irpf_withheld(&self) -> Money {
        -self.retencion.to_rate().of(self.base_excl_vat)
    }

    /// `base + iva_amount + irpf_withheld`.
    #[must_use]
    pub fn total_receivable(&self) -> Money {
        self.base_excl_vat + self.iva_amount() + self.irpf_withheld()
    }

    /// The override when present, otherwise the total receivable.
    #[must_use]
    pub fn amount_received(&self) -> Money {
        self.amount_received_override
            .unwrap_or_else(|| self.total_receivable())
    }
}

impl Dated for Invoice {
    fn event_date(&self) -> NaiveDate {
        self.payment_date.unwrap_or(self.invoice_date)
    }
}

impl TryFrom<NewInvoice> for Invoice {
    type Error = ValidationError;

    fn try_from(input: NewInvoice) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<Invoice> for NewInvoice {
    fn from(invoice: Invoice) -> Self {
        Self {
            invoice_date: invoice.invoice_date,
            number: invoice.number,
            client: invoice.client,
            base_excl_vat: invoice.base_excl_vat,
            iva_rate: invoice.iva_rate,
            retencion: invoice.retencion,
            payment_date: invoice.payment_date,
            amount_received_override: invoice.amount_received_override,
        }
    }
}
