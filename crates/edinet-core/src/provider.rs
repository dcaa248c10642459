//! Provider traits for fetching filing data.
//!
//! This module defines the core provider traits:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`FilingProvider`] - Disclosure-feed retrieval

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{FilingEntry, Symbol},
};

/// Base trait for all data providers.
///
/// All providers must implement this trait to expose basic metadata about
/// the backend and its capabilities.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "ufocatch").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider for disclosure-feed filing entries.
///
/// Implement this trait to expose an EDINET-style filing feed. One call
/// covers one symbol; batching across symbols is the reader's concern so
/// that per-symbol failures stay independent.
#[async_trait]
pub trait FilingProvider: DataProvider {
    /// Fetches the filing entries for a symbol whose feed timestamps fall
    /// inside `start..=end` (date comparison is timezone-naive).
    ///
    /// Transient transport failures are retried internally; exhausting the
    /// retries fails this symbol only.
    async fn fetch_filings(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FilingEntry>>;
}
