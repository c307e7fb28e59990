//! Financial record types.
//!
//! Every record is an immutable value whose invariants are checked once, at
//! construction or deserialization. Tax amounts and period keys are derived
//! on demand.

pub mod budget;
pub mod expense;
pub mod invoice;
pub mod key;
pub mod rates;
pub mod record;
pub mod state_payment;
pub mod transfer;

pub use budget::{BudgetEntry, NewBudgetEntry};
pub use expense::{Expense, NewExpense};
pub use invoice::{Invoice, NewInvoice};
pub use key::RecordKey;
pub use rates::{IvaRate, RetencionRate};
pub use record::{Dated, Record, RecordType};
pub use state_payment::{NewStatePayment, StatePayment, StatePaymentType};
pub use transfer::{NewTransfer, Transfer, TransferOp};
