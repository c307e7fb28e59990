//! Integration tests for SummariesService.
//!
//! Loads records into an in-memory store and checks the month and quarter
//! summaries computed from it.

use autonomo_core::records::{
    Expense, Invoice, IvaRate, NewExpense, NewInvoice, NewStatePayment, RetencionRate,
    StatePayment, StatePaymentType,
};
use autonomo_core::source::{RecordItem, RecordSource, SourceError};
use autonomo_core::summary::SummaryError;
use autonomo_core::{InMemoryRecordStore, Record, Settings, SummariesService};
use autonomo_shared::AppError;
use autonomo_shared::types::{Money, MonthKey, QuarterKey, RecordId, WorkspaceId};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn workspace() -> WorkspaceId {
    WorkspaceId::parse("ws-test").unwrap()
}

fn settings() -> Settings {
    Settings::new(2024, date(2024, 1, 1))
}

fn invoice(
    invoice_date: NaiveDate,
    payment_date: Option<NaiveDate>,
    base: Decimal,
    retencion: RetencionRate,
) -> Record {
    Record::Invoice(
        Invoice::new(NewInvoice {
            invoice_date,
            number: "F-1".to_string(),
            client: "Client".to_string(),
            base_excl_vat: Money::new(base),
            iva_rate: IvaRate::Standard,
            retencion,
            payment_date,
            amount_received_override: None,
        })
        .unwrap(),
    )
}

fn store_with(workspace_id: &WorkspaceId, records: Vec<Record>) -> InMemoryRecordStore {
    let mut store = InMemoryRecordStore::new();
    for (i, record) in records.into_iter().enumerate() {
        let id = RecordId::parse(format!("rec-{i}")).unwrap();
        store
            .insert(RecordItem::new(workspace_id.clone(), record, Some(id), "tester", Utc::now()))
            .unwrap();
    }
    store
}

// ============================================================================
// Bucketing
// ============================================================================

#[test]
fn test_paid_invoice_in_june_and_q2() {
    let ws = workspace();
    let store = store_with(
        &ws,
        vec![invoice(date(2024, 6, 1), Some(date(2024, 6, 20)), dec!(100), RetencionRate::Zero)],
    );
    let service = SummariesService::new(&store);

    let months = service.month_summaries(&ws, &settings()).unwrap();
    assert_eq!(months.items.len(), 12);
    let june = &months.items[5];
    assert_eq!(june.period, MonthKey::of(2024, 6).unwrap());
    assert_eq!(june.income_base, Money::new(dec!(100)));
    assert_eq!(june.vat_output, Money::new(dec!(21)));
    assert_eq!(june.vat_balance, Money::new(dec!(21)));
    assert!(months.items.iter().filter(|m| !m.is_empty()).count() == 1);

    let quarters = service.quarter_summaries(&ws, &settings()).unwrap();
    assert_eq!(quarters.items.len(), 4);
    let q2 = &quarters.items[1];
    assert_eq!(q2.period, QuarterKey::of(2024, 2).unwrap());
    assert_eq!(q2.income_base, Money::new(dec!(100)));
    assert_eq!(q2.vat_output, Money::new(dec!(21)));
}

#[test]
fn test_unpaid_invoice_uses_invoice_date() {
    let ws = workspace();
    let store = store_with(
        &ws,
        vec![invoice(date(2024, 3, 31), None, dec!(200), RetencionRate::Zero)],
    );
    let service = SummariesService::new(&store);

    let months = service.month_summaries(&ws, &settings()).unwrap();
    assert_eq!(months.items[2].income_base, Money::new(dec!(200)));

    let quarters = service.quarter_summaries(&ws, &settings()).unwrap();
    assert_eq!(quarters.items[0].income_base, Money::new(dec!(200)));
    assert!(quarters.items[1].is_empty());
}

#[test]
fn test_empty_year() {
    let store = InMemoryRecordStore::new();
    let service = SummariesService::new(&store);

    let months = service.month_summaries(&workspace(), &settings()).unwrap();
    assert_eq!(months.items.len(), 12);
    assert!(months.items.iter().all(|m| m.is_empty()));
    assert_eq!(months.settings, settings());

    let quarters = service.quarter_summaries(&workspace(), &settings()).unwrap();
    assert_eq!(quarters.items.len(), 4);
    assert!(quarters.items.iter().all(|q| q.is_empty()));
}

#[test]
fn test_other_years_and_workspaces_are_ignored() {
    let ws = workspace();
    let mut store = store_with(
        &ws,
        vec![invoice(date(2023, 12, 31), None, dec!(500), RetencionRate::Zero)],
    );
    let other = WorkspaceId::parse("ws-other").unwrap();
    store
        .insert(RecordItem::new(
            other,
            invoice(date(2024, 5, 5), None, dec!(700), RetencionRate::Zero),
            None,
            "tester",
            Utc::now(),
        ))
        .unwrap();

    let service = SummariesService::new(&store);
    let months = service.month_summaries(&ws, &settings()).unwrap();
    assert!(months.items.iter().all(|m| m.is_empty()));
}

// ============================================================================
// Cash balance and Modelo 130
// ============================================================================

#[test]
fn test_running_balance_and_modelo_130() {
    let ws = workspace();
    let expense = Record::Expense(
        Expense::new(NewExpense {
            document_date: date(2024, 1, 5),
            vendor: "Coworking".to_string(),
            category: "Office".to_string(),
            base_excl_vat: Money::new(dec!(180)),
            iva_rate: IvaRate::Standard,
            vat_recoverable_flag: true,
            deductible_share: dec!(1),
            payment_date: None,
            amount_paid_override: None,
        })
        .unwrap(),
    );
    let modelo_130 = Record::StatePayment(
        StatePayment::new(NewStatePayment {
            payment_date: date(2024, 4, 20),
            payment_type: StatePaymentType::Modelo130,
            amount: Money::new(dec!(110)),
        })
        .unwrap(),
    );
    let store = store_with(
        &ws,
        vec![
            invoice(date(2024, 1, 31), Some(date(2024, 2, 15)), dec!(3000), RetencionRate::Standard),
            expense,
            modelo_130,
        ],
    );
    let settings = settings()
        .with_obligacion_130(true)
        .with_opening_balance(Money::new(dec!(1000)))
        .with_expense_category("Office");
    let service = SummariesService::new(&store);

    let quarters = service.quarter_summaries(&ws, &settings).unwrap();
    let q1 = &quarters.items[0];
    // 3000 + 630 - 450 received, 180 + 37.80 paid
    assert_eq!(q1.amount_received, Money::new(dec!(3180)));
    assert_eq!(q1.amount_paid, Money::new(dec!(217.80)));
    assert_eq!(q1.closing_balance, Money::new(dec!(3962.20)));

    let q1_estimate = q1.modelo_130.unwrap();
    assert_eq!(q1_estimate.accumulated_net_income, Money::new(dec!(2820)));
    assert_eq!(q1_estimate.accumulated_withholding, Money::new(dec!(450)));
    assert_eq!(q1_estimate.amount, Money::new(dec!(114)));

    let q2 = &quarters.items[1];
    assert_eq!(q2.opening_balance, q1.closing_balance);
    assert_eq!(q2.closing_balance, Money::new(dec!(3852.20)));
    let q2_estimate = q2.modelo_130.unwrap();
    assert_eq!(q2_estimate.prior_payments, Money::new(dec!(110)));
    assert_eq!(q2_estimate.amount, Money::new(dec!(4)));

    let months = service.month_summaries(&ws, &settings).unwrap();
    assert!(months.items[1].modelo_130.is_none());
    assert_eq!(months.items[2].modelo_130, Some(q1_estimate));
    assert_eq!(months.items[11].closing_balance, quarters.items[3].closing_balance);
}

// ============================================================================
// Errors
// ============================================================================

struct UnavailableSource;

impl RecordSource for UnavailableSource {
    fn query_by_month(
        &self,
        _workspace_id: &WorkspaceId,
        _month: MonthKey,
        _record_type: Option<autonomo_core::RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError> {
        Err(SourceError::Unavailable("table offline".to_string()))
    }

    fn query_by_quarter(
        &self,
        _workspace_id: &WorkspaceId,
        _quarter: QuarterKey,
        _record_type: Option<autonomo_core::RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError> {
        Err(SourceError::Unavailable("table offline".to_string()))
    }
}

#[test]
fn test_source_failure_propagates() {
    let service = SummariesService::new(UnavailableSource);

    let err = service.month_summaries(&workspace(), &settings()).unwrap_err();
    assert!(matches!(err, SummaryError::Source(SourceError::Unavailable(_))));

    let app: AppError = err.into();
    assert_eq!(app.error_code(), "RECORD_SOURCE_ERROR");
    assert_eq!(app.status_code(), 500);
}

#[test]
fn test_response_serializes_period_keys() {
    let ws = workspace();
    let store = store_with(
        &ws,
        vec![invoice(date(2024, 6, 1), None, dec!(100), RetencionRate::Zero)],
    );
    let service = SummariesService::new(&store);

    let json = serde_json::to_value(service.quarter_summaries(&ws, &settings()).unwrap()).unwrap();
    assert_eq!(json["items"][1]["period"], "2024-Q2");
    assert_eq!(json["settings"]["year"], 2024);
    assert!(json["items"][1].get("modelo_130").is_none());
}
