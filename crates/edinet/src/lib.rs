#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edinet-data/edinet-data/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified interface for EDINET filing data.
//!
//! This crate re-exports the core types, the ufocatch feed provider and
//! the XBRL extraction pipeline, and provides a [`FilingReader`] for
//! batch reads, DataFrame views and on-disk summary extraction.
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use edinet::{FilingReader, Symbol, UfocatchProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> edinet::Result<()> {
//!     let provider = Arc::new(UfocatchProvider::new());
//!     let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2015, 12, 31).unwrap();
//!     let reader = FilingReader::new(provider, start, end);
//!
//!     let results = reader.read_many(&[Symbol::new("E02144"), Symbol::new("E04425")]).await?;
//!     for (symbol, entries) in &results {
//!         match entries {
//!             Some(entries) => println!("{symbol}: {} filings", entries.len()),
//!             None => println!("{symbol}: failed"),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use edinet_core::*;

// Feed provider
pub use edinet_feed::{RetryPolicy, UfocatchProvider};

// XBRL extraction
pub use edinet_xbrl::{
    DiagnosticSink, ErrorPolicy, Fact, GaapExtractor, TracingSink, XbrlDocument, extract_dei,
};

mod reader;
pub use reader::{FilingReader, entries_frame};
