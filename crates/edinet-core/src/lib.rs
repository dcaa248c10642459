#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edinet-data/edinet-data/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for EDINET filing data.
//!
//! This crate provides the foundational abstractions for working with
//! Japanese securities filings:
//!
//! - [`FilingProvider`](provider::FilingProvider) - Trait for feed backends
//! - [`FilingEntry`](types::FilingEntry) - One filing from the disclosure feed
//! - [`FinancialSummary`](types::FinancialSummary) - Extracted facts, tagged by accounting standard
//! - [`PeriodSelector`](period::PeriodSelector) - Reporting-period selection
//! - [`EdinetError`](error::EdinetError) - Common error taxonomy

/// Error types for filing data operations.
pub mod error;
/// Reporting-period selection and context-id derivation.
pub mod period;
/// Provider traits for fetching filing data.
pub mod provider;
/// Core data types (Symbol, FilingEntry, fact records).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EdinetError, Result};
pub use period::{PeriodSelector, PeriodType, context_ids_for_label};
pub use provider::{DataProvider, FilingProvider};
pub use types::{
    AccountingStandard, BalanceSheetFacts, DeiRecord, FilingEntry, FinancialSummary,
    JapanGaapFacts, Symbol, UsGaapFacts,
};
