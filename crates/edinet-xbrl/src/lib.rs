#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edinet-data/edinet-data/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! XBRL fact extraction for EDINET filings.
//!
//! The pipeline has three stages:
//!
//! - [`XbrlDocument`](document::XbrlDocument) - Parse an instance document into a flat fact list
//! - [`concepts`] - Static concept-to-tag tables for the summary taxonomies
//! - [`GaapExtractor`](extract::GaapExtractor) - Resolve concepts into typed summary records

/// Concept-to-tag tables for DEI, Japan GAAP, US GAAP and balance-sheet facts.
pub mod concepts;
/// Instance-document parsing and the fact index.
pub mod document;
/// DEI and GAAP summary extraction.
pub mod extract;
/// Extraction error policies and diagnostic sinks.
pub mod policy;
/// Name matching, context filtering and numeric coercion.
pub mod resolve;

// Re-export commonly used items at crate root
pub use document::{Fact, XbrlDocument};
pub use extract::{extract_dei, GaapExtractor};
pub use policy::{DiagnosticSink, ErrorPolicy, TracingSink};
pub use resolve::{is_numeric_literal, resolve_number, resolve_text};
