//! Summary data types.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use autonomo_shared::types::{Money, MonthKey, QuarterKey};

use crate::records::{Expense, Invoice, StatePayment, StatePaymentType, Transfer};
use crate::settings::Settings;

/// State payments of one period, grouped by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePaymentTotals {
    /// Modelo 303 (VAT).
    pub modelo_303: Money,
    /// Modelo 130 (provisional IRPF).
    pub modelo_130: Money,
    /// Social security.
    pub seguridad_social: Money,
    /// Annual income tax.
    pub renta_anual: Money,
    /// Other payments.
    pub other: Money,
}

impl StatePaymentTotals {
    /// Adds `amount` under `payment_type`.
    pub fn add(&mut self, payment_type: StatePaymentType, amount: Money) {
        *self.slot(payment_type) += amount;
    }

    /// Total paid under `payment_type`.
    #[must_use]
    pub const fn get(&self, payment_type: StatePaymentType) -> Money {
        match payment_type {
            StatePaymentType::Modelo303 => self.modelo_303,
            StatePaymentType::Modelo130 => self.modelo_130,
            StatePaymentType::SeguridadSocial => self.seguridad_social,
            StatePaymentType::RentaAnual => self.renta_anual,
            StatePaymentType::Other => self.other,
        }
    }

    /// Sum over all types.
    #[must_use]
    pub fn total(&self) -> Money {
        self.modelo_303 + self.modelo_130 + self.seguridad_social + self.renta_anual + self.other
    }

    fn slot(&mut self, payment_type: StatePaymentType) -> &mut Money {
        match payment_type {
            StatePaymentType::Modelo303 => &mut self.modelo_303,
            StatePaymentType::Modelo130 => &mut self.modelo_130,
            StatePaymentType::SeguridadSocial => &mut self.seguridad_social,
            StatePaymentType::RentaAnual => &mut self.renta_anual,
            StatePaymentType::Other => &mut self.other,
        }
    }
}

impl AddAssign for StatePaymentTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.modelo_303 += rhs.modelo_303;
        self.modelo_130 += rhs.modelo_130;
        self.seguridad_social += rhs.seguridad_social;
        self.renta_anual += rhs.renta_anual;
        self.other += rhs.other;
    }
}

/// Metrics accumulated for one period bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Sum of invoice bases.
    pub income_base: Money,
    /// Sum of VAT charged on invoices.
    pub vat_output: Money,
    /// Sum of IRPF withheld on invoices (non-positive).
    pub irpf_withheld: Money,
    /// Cash collected from invoices.
    pub amount_received: Money,
    /// Sum of expense bases.
    pub expense_base: Money,
    /// Sum of deductible expense bases.
    pub deductible_base: Money,
    /// Recoverable VAT paid on expenses.
    pub vat_input: Money,
    /// Cash paid for expenses.
    pub amount_paid: Money,
    /// State payments by type.
    pub state_payments: StatePaymentTotals,
    /// Signed sum of transfers.
    pub transfers_net: Money,
}

impl PeriodMetrics {
    /// Adds an invoice's contribution.
    pub fn add_invoice(&mut self, invoice: &Invoice) {
        self.income_base += invoice.base_excl_vat();
        self.vat_output += invoice.iva_amount();
        self.irpf_withheld += invoice.irpf_withheld();
        self.amount_received += invoice.amount_received();
    }

    /// Adds an expense's contribution.
    pub fn add_expense(&mut self, expense: &Expense) {
        self.expense_base += expense.base_excl_vat();
        self.deductible_base += expense.deductible_base();
        self.vat_input += expense.vat_recoverable();
        self.amount_paid += expense.amount_paid();
    }

    /// Adds a state payment.
    pub fn add_state_payment(&mut self, payment: &StatePayment) {
        self.state_payments
            .add(payment.payment_type(), payment.amount());
    }

    /// Adds a transfer.
    pub fn add_transfer(&mut self, transfer: &Transfer) {
        self.transfers_net += transfer.signed();
    }

    /// VAT owed for the period: output minus recoverable input.
    #[must_use]
    pub fn vat_balance(&self) -> Money {
        self.vat_output - self.vat_input
    }

    /// Income base minus deductible expenses.
    #[must_use]
    pub fn net_income(&self) -> Money {
        self.income_base - self.deductible_base
    }

    /// IRPF withheld by clients as a positive amount.
    #[must_use]
    pub fn withholding(&self) -> Money {
        -self.irpf_withheld
    }

    /// Cash movement: collected, minus paid, minus state payments, plus transfers.
    #[must_use]
    pub fn net_cashflow(&self) -> Money {
        self.amount_received - self.amount_paid - self.state_payments.total() + self.transfers_net
    }
}

impl AddAssign for PeriodMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.income_base += rhs.income_base;
        self.vat_output += rhs.vat_output;
        self.irpf_withheld += rhs.irpf_withheld;
        self.amount_received += rhs.amount_received;
        self.expense_base += rhs.expense_base;
        self.deductible_base += rhs.deductible_base;
        self.vat_input += rhs.vat_input;
        self.amount_paid += rhs.amount_paid;
        self.state_payments += rhs.state_payments;
        self.transfers_net += rhs.transfers_net;
    }
}

/// Modelo 130 provisional payment estimate, cumulative from the start of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modelo130Estimate {
    /// Net income accumulated since the first active month.
    pub accumulated_net_income: Money,
    /// IRPF withheld by clients over the same months.
    pub accumulated_withholding: Money,
    /// Modelo 130 payments recorded in the year up to the period.
    pub prior_payments: Money,
    /// Amount due, never negative.
    pub amount: Money,
}

/// Summary of one period, tagged with its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary<K> {
    /// Period key.
    pub period: K,
    /// Sum of invoice bases.
    pub income_base: Money,
    /// VAT charged on invoices.
    pub vat_output: Money,
    /// IRPF withheld on invoices (non-positive).
    pub irpf_withheld: Money,
    /// Cash collected from invoices.
    pub amount_received: Money,
    /// Sum of expense bases.
    pub expense_base: Money,
    /// Deductible expense base.
    pub deductible_base: Money,
    /// Recoverable VAT on expenses.
    pub vat_input: Money,
    /// Cash paid for expenses.
    pub amount_paid: Money,
    /// State payments by type.
    pub state_payments: StatePaymentTotals,
    /// Signed sum of transfers.
    pub transfers_net: Money,
    /// `vat_output - vat_input`.
    pub vat_balance: Money,
    /// `income_base - deductible_base`.
    pub net_income: Money,
    /// Cash movement of the period.
    pub net_cashflow: Money,
    /// Balance carried in from the previous period.
    pub opening_balance: Money,
    /// `opening_balance + net_cashflow`.
    pub closing_balance: Money,
    /// Present only when the worker files Modelo 130 and the period closes a quarter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo_130: Option<Modelo130Estimate>,
}

/// Summary of a calendar month.
pub type MonthSummary = PeriodSummary<MonthKey>;

/// Summary of a calendar quarter.
pub type QuarterSummary = PeriodSummary<QuarterKey>;

impl<K> PeriodSummary<K> {
    /// Builds the summary of `period` from its metrics and the balance carried in.
    #[must_use]
    pub fn new(
        period: K,
        metrics: &PeriodMetrics,
        opening_balance: Money,
        modelo_130: Option<Modelo130Estimate>,
    ) -> Self {
        let net_cashflow = metrics.net_cashflow();
        Self {
            period,
            income_base: metrics.income_base,
            vat_output: metrics.vat_output,
            irpf_withheld: metrics.irpf_withheld,
            amount_received: metrics.amount_received,
            expense_base: metrics.expense_base,
            deductible_base: metrics.deductible_base,
            vat_input: metrics.vat_input,
            amount_paid: metrics.amount_paid,
            state_payments: metrics.state_payments,
            transfers_net: metrics.transfers_net,
            vat_balance: metrics.vat_balance(),
            net_income: metrics.net_income(),
            net_cashflow,
            opening_balance,
            closing_balance: opening_balance + net_cashflow,
            modelo_130,
        }
    }

    /// Returns true if no record contributed to the period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income_base.is_zero()
            && self.vat_output.is_zero()
            && self.irpf_withheld.is_zero()
            && self.amount_received.is_zero()
            && self.expense_base.is_zero()
            && self.deductible_base.is_zero()
            && self.vat_input.is_zero()
            && self.amount_paid.is_zero()
            && self.state_payments.total().is_zero()
            && self.transfers_net.is_zero()
    }
}

/// Month summaries for a workspace year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummariesResponse {
    /// Settings the summaries were computed with.
    pub settings: Settings,
    /// Twelve summaries, January first.
    pub items: Vec<MonthSummary>,
}

/// Quarter summaries for a workspace year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterSummariesResponse {
    /// Settings the summaries were computed with.
    pub settings: Settings,
    /// Four summaries, Q1 first.
    pub items: Vec<QuarterSummary>,
}
