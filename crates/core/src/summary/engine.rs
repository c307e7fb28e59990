//! Period bucketing of records.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use autonomo_shared::types::{MonthKey, QuarterKey};

use super::types::{
    Modelo130Estimate, MonthSummary, PeriodMetrics, PeriodSummary, QuarterSummary,
};
use crate::records::{Dated, Expense, Invoice, Record, StatePayment, Transfer};
use crate::settings::Settings;

/// Accumulates records into month and quarter buckets.
///
/// Every record lands in exactly one month and exactly one quarter, both
/// derived from its event date. The engine keeps no record identities, so
/// registering the same record twice counts it twice.
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    months: BTreeMap<MonthKey, PeriodMetrics>,
    quarters: BTreeMap<QuarterKey, PeriodMetrics>,
}

impl AggregationEngine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers any record. Budget entries are accepted and ignored.
    pub fn register(&mut self, record: &Record) {
        match record {
            Record::Invoice(invoice) => self.register_invoice(invoice),
            Record::Expense(expense) => self.register_expense(expense),
            Record::StatePayment(payment) => self.record_state_payment(payment),
            Record::Transfer(transfer) => self.record_transfer(transfer),
            Record::Budget(entry) => {
                trace!(month = %entry.month_key(), "Skipping budget entry");
            }
        }
    }

    /// Adds an invoice to its month and quarter.
    pub fn register_invoice(&mut self, invoice: &Invoice) {
        trace!(number = invoice.number(), date = %invoice.event_date(), "Registering invoice");
        self.bucket(invoice, |metrics| metrics.add_invoice(invoice));
    }

    /// Adds an expense to its month and quarter.
    pub fn register_expense(&mut self, expense: &Expense) {
        trace!(vendor = expense.vendor(), date = %expense.event_date(), "Registering expense");
        self.bucket(expense, |metrics| metrics.add_expense(expense));
    }

    /// Adds a state payment to its month and quarter.
    pub fn record_state_payment(&mut self, payment: &StatePayment) {
        trace!(payment_type = ?payment.payment_type(), date = %payment.event_date(), "Registering state payment");
        self.bucket(payment, |metrics| metrics.add_state_payment(payment));
    }

    /// Adds a transfer to its month and quarter.
    pub fn record_transfer(&mut self, transfer: &Transfer) {
        trace!(operation = ?transfer.operation(), date = %transfer.event_date(), "Registering transfer");
        self.bucket(transfer, |metrics| metrics.add_transfer(transfer));
    }

    /// Metrics of a month, if any record fell into it.
    #[must_use]
    pub fn month_metrics(&self, month: MonthKey) -> Option<&PeriodMetrics> {
        self.months.get(&month)
    }

    /// Metrics of a quarter, if any record fell into it.
    #[must_use]
    pub fn quarter_metrics(&self, quarter: QuarterKey) -> Option<&PeriodMetrics> {
        self.quarters.get(&quarter)
    }

    /// Twelve summaries for `settings.year`, January first.
    ///
    /// Months without records yield all-zero metrics. Balances chain from
    /// `settings.opening_balance`. A Modelo 130 estimate is attached to
    /// quarter-closing months when `settings.obligacion_130` is set.
    #[must_use]
    pub fn month_summaries(&self, settings: &Settings) -> Vec<MonthSummary> {
        let empty = PeriodMetrics::default();
        let mut balance = settings.opening_balance;

        let summaries: Vec<MonthSummary> = MonthKey::months_of(settings.year)
            .map(|month| {
                let metrics = self.months.get(&month).unwrap_or(&empty);
                let modelo_130 = (settings.obligacion_130 && month.closes_quarter())
                    .then(|| Modelo130Estimate::compute(&self.months, settings, month));
                let summary = PeriodSummary::new(month, metrics, balance, modelo_130);
                balance = summary.closing_balance;
                summary
            })
            .collect();

        debug!(
            year = settings.year,
            closing_balance = %balance,
            "Emitted month summaries"
        );
        summaries
    }

    /// Four summaries for `settings.year`, Q1 first.
    ///
    /// Quarters without records yield all-zero metrics. Balances chain from
    /// `settings.opening_balance`. Every quarter carries a Modelo 130 estimate
    /// when `settings.obligacion_130` is set.
    #[must_use]
    pub fn quarter_summaries(&self, settings: &Settings) -> Vec<QuarterSummary> {
        let empty = PeriodMetrics::default();
        let mut balance = settings.opening_balance;

        let summaries: Vec<QuarterSummary> = QuarterKey::quarters_of(settings.year)
            .map(|quarter| {
                let metrics = self.quarters.get(&quarter).unwrap_or(&empty);
                let modelo_130 = settings.obligacion_130.then(|| {
                    Modelo130Estimate::compute(&self.months, settings, quarter.last_month())
                });
                let summary = PeriodSummary::new(quarter, metrics, balance, modelo_130);
                balance = summary.closing_balance;
                summary
            })
            .collect();

        debug!(
            year = settings.year,
            closing_balance = %balance,
            "Emitted quarter summaries"
        );
        summaries
    }

    fn bucket<R: Dated>(&mut self, record: &R, apply: impl Fn(&mut PeriodMetrics)) {
        apply(self.months.entry(record.month_key()).or_default());
        apply(self.quarters.entry(record.quarter_key()).or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autonomo_shared::types::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::records::{
        BudgetEntry, IvaRate, NewBudgetEntry, NewExpense, NewInvoice, NewStatePayment,
        NewTransfer, RetencionRate, StatePaymentType, TransferOp,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> Settings {
        Settings::new(2024, date(2024, 1, 1))
    }

    fn invoice(invoice_date: NaiveDate, payment_date: Option<NaiveDate>) -> Invoice {
        Invoice::new(NewInvoice {
            invoice_date,
            number: "F-1".to_string(),
            client: "Acme".to_string(),
            base_excl_vat: Money::new(dec!(100)),
            iva_rate: IvaRate::Standard,
            retencion: RetencionRate::Zero,
            payment_date,
            amount_received_override: None,
        })
        .unwrap()
    }

    #[test]
    fn test_invoice_lands_in_payment_month() {
        let mut engine = AggregationEngine::new();
        engine.register_invoice(&invoice(date(2024, 5, 30), Some(date(2024, 6, 20))));

        let june = engine.month_metrics(MonthKey::of(2024, 6).unwrap()).unwrap();
        assert_eq!(june.income_base, Money::new(dec!(100)));
        assert_eq!(june.vat_output, Money::new(dec!(21)));
        assert!(engine.month_metrics(MonthKey::of(2024, 5).unwrap()).is_none());

        let q2 = engine.quarter_metrics(QuarterKey::of(2024, 2).unwrap()).unwrap();
        assert_eq!(q2.income_base, Money::new(dec!(100)));
    }

    #[test]
    fn test_unpaid_invoice_falls_back_to_invoice_date() {
        let mut engine = AggregationEngine::new();
        engine.register(&Record::Invoice(invoice(date(2024, 3, 31), None)));

        assert!(engine.month_metrics(MonthKey::of(2024, 3).unwrap()).is_some());
        assert!(engine.quarter_metrics(QuarterKey::of(2024, 1).unwrap()).is_some());
    }

    #[test]
    fn test_expense_and_state_payment() {
        let mut engine = AggregationEngine::new();
        engine.register_expense(
            &Expense::new(NewExpense {
                document_date: date(2024, 2, 10),
                vendor: "Hosting".to_string(),
                category: "Software".to_string(),
                base_excl_vat: Money::new(dec!(50)),
                iva_rate: IvaRate::Standard,
                vat_recoverable_flag: true,
                deductible_share: dec!(1),
                payment_date: None,
                amount_paid_override: None,
            })
            .unwrap(),
        );
        engine.record_state_payment(
            &StatePayment::new(NewStatePayment {
                payment_date: date(2024, 2, 20),
                payment_type: StatePaymentType::SeguridadSocial,
                amount: Money::new(dec!(230)),
            })
            .unwrap(),
        );

        let feb = engine.month_metrics(MonthKey::of(2024, 2).unwrap()).unwrap();
        assert_eq!(feb.deductible_base, Money::new(dec!(50)));
        assert_eq!(feb.vat_input, Money::new(dec!(10.50)));
        assert_eq!(feb.amount_paid, Money::new(dec!(60.50)));
        assert_eq!(
            feb.state_payments.get(StatePaymentType::SeguridadSocial),
            Money::new(dec!(230))
        );
        assert_eq!(feb.net_cashflow(), Money::new(dec!(-290.50)));
    }

    #[test]
    fn test_budget_entry_is_ignored() {
        let mut engine = AggregationEngine::new();
        engine.register(&Record::Budget(
            BudgetEntry::new(NewBudgetEntry {
                month_key: MonthKey::of(2024, 4).unwrap(),
                planned_spend: Money::new(dec!(500)),
                earned: Money::new(dec!(0)),
                description: None,
                budget_goal: None,
            })
            .unwrap(),
        ));

        assert!(engine.month_metrics(MonthKey::of(2024, 4).unwrap()).is_none());
        assert!(engine.month_summaries(&settings()).iter().all(PeriodSummary::is_empty));
    }

    #[test]
    fn test_empty_year() {
        let engine = AggregationEngine::new();
        let settings = settings().with_opening_balance(Money::new(dec!(1000)));

        let months = engine.month_summaries(&settings);
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(PeriodSummary::is_empty));
        assert!(months.iter().all(|m| m.closing_balance == Money::new(dec!(1000))));
        assert!(months.iter().all(|m| m.modelo_130.is_none()));

        let quarters = engine.quarter_summaries(&settings);
        assert_eq!(quarters.len(), 4);
        assert_eq!(quarters[0].period.to_string(), "2024-Q1");
        assert_eq!(quarters[3].period.to_string(), "2024-Q4");
    }

    #[test]
    fn test_balances_chain() {
        let mut engine = AggregationEngine::new();
        engine.record_transfer(
            &Transfer::new(NewTransfer {
                date: date(2024, 1, 15),
                operation: TransferOp::Inflow,
                amount: Money::new(dec!(300)),
                note: None,
            })
            .unwrap(),
        );
        engine.record_transfer(
            &Transfer::new(NewTransfer {
                date: date(2024, 4, 15),
                operation: TransferOp::Outflow,
                amount: Money::new(dec!(100)),
                note: None,
            })
            .unwrap(),
        );

        let settings = settings().with_opening_balance(Money::new(dec!(50)));
        let months = engine.month_summaries(&settings);
        assert_eq!(months[0].opening_balance, Money::new(dec!(50)));
        assert_eq!(months[0].closing_balance, Money::new(dec!(350)));
        assert_eq!(months[3].opening_balance, Money::new(dec!(350)));
        assert_eq!(months[3].closing_balance, Money::new(dec!(250)));
        assert_eq!(months[11].closing_balance, Money::new(dec!(250)));

        let quarters = engine.quarter_summaries(&settings);
        assert_eq!(quarters[0].closing_balance, Money::new(dec!(350)));
        assert_eq!(quarters[1].opening_balance, Money::new(dec!(350)));
        assert_eq!(quarters[3].closing_balance, Money::new(dec!(250)));
    }

    #[test]
    fn test_modelo_130_only_when_obliged() {
        let mut engine = AggregationEngine::new();
        engine.register_invoice(&invoice(date(2024, 2, 1), None));

        let obliged = settings().with_obligacion_130(true);
        let months = engine.month_summaries(&obliged);
        let with_estimate: Vec<u32> = months
            .iter()
            .filter(|m| m.modelo_130.is_some())
            .map(|m| m.period.month())
            .collect();
        assert_eq!(with_estimate, vec![3, 6, 9, 12]);
        assert_eq!(
            months[2].modelo_130.map(|e| e.amount),
            Some(Money::new(dec!(20)))
        );

        let quarters = engine.quarter_summaries(&obliged);
        assert!(quarters.iter().all(|q| q.modelo_130.is_some()));

        let not_obliged = engine.quarter_summaries(&settings());
        assert!(not_obliged.iter().all(|q| q.modelo_130.is_none()));
    }

    #[test]
    fn test_records_outside_year_are_not_emitted() {
        let mut engine = AggregationEngine::new();
        engine.register_invoice(&invoice(date(2023, 12, 31), Some(date(2023, 12, 31))));
        engine.record_transfer(
            &Transfer::new(NewTransfer {
                date: date(2023, 12, 20),
                operation: TransferOp::Inflow,
                amount: Money::new(dec!(900)),
                note: None,
            })
            .unwrap(),
        );
        engine.register_invoice(&invoice(date(2024, 2, 10), Some(date(2024, 2, 10))));

        let settings = settings().with_opening_balance(Money::new(dec!(40)));
        let months = engine.month_summaries(&settings);
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.period.year() == 2024));
        assert_eq!(months[0].opening_balance, Money::new(dec!(40)));
        assert!(months[0].is_empty());
        assert_eq!(months[1].income_base, Money::new(dec!(100)));
        assert_eq!(months[11].closing_balance, Money::new(dec!(161)));
        let year_income: Money = months.iter().map(|m| m.income_base).sum();
        assert_eq!(year_income, Money::new(dec!(100)));

        let quarters = engine.quarter_summaries(&settings);
        assert_eq!(quarters[0].opening_balance, Money::new(dec!(40)));
        assert_eq!(quarters[0].income_base, Money::new(dec!(100)));
        assert_eq!(quarters[0].transfers_net, Money::ZERO);
        assert_eq!(quarters[3].closing_balance, months[11].closing_balance);
    }

    #[test]
    fn test_duplicate_registration_counts_twice() {
        let paid = invoice(date(2024, 5, 2), Some(date(2024, 5, 9)));
        let mut engine = AggregationEngine::new();
        engine.register_invoice(&paid);
        engine.register(&Record::Invoice(paid));

        let may = engine.month_metrics(MonthKey::of(2024, 5).unwrap()).unwrap();
        assert_eq!(may.income_base, Money::new(dec!(200)));
        assert_eq!(may.vat_output, Money::new(dec!(42)));
        assert_eq!(may.amount_received, Money::new(dec!(242)));

        let q2 = engine.quarter_metrics(QuarterKey::of(2024, 2).unwrap()).unwrap();
        assert_eq!(q2.income_base, Money::new(dec!(200)));
    }
}
