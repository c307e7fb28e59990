//! Core business logic for Autonomo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Record types, validation rules and summary calculations live here.
//!
//! # Modules
//!
//! - `records` - Invoices, expenses, state payments, transfers and budget entries
//! - `settings` - Per-year configuration of a workspace
//! - `summary` - Month and quarter aggregation, cash balance and Modelo 130
//! - `source` - Record source port and in-memory store

pub mod records;
pub mod settings;
pub mod source;
pub mod summary;

pub use records::{Dated, Record, RecordKey, RecordType};
pub use settings::Settings;
pub use source::{InMemoryRecordStore, RecordItem, RecordSource, SourceError};
pub use summary::{AggregationEngine, SummariesService, SummaryError};
