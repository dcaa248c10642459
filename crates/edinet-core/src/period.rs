//! Reporting-period selection and context-id derivation.
//!
//! This module defines [`PeriodType`] for the filing's reporting frequency
//! and [`PeriodSelector`] for choosing which fiscal period's facts to
//! extract. The selector maps to the context-id suffixes EDINET taxonomies
//! attach to fact contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting frequency of a filing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Annual securities report.
    #[default]
    Annual,
    /// Quarterly report.
    Quarterly,
}

impl PeriodType {
    /// Returns true for quarterly filings.
    #[must_use]
    pub const fn is_quarterly(&self) -> bool {
        matches!(self, Self::Quarterly)
    }
}

/// Which fiscal period's facts to extract from a filing.
///
/// Summaries of business results carry up to five fiscal periods per
/// filing: the current one and the four before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodSelector {
    /// The filing's own reporting period.
    #[default]
    Current,
    /// One period back.
    Prior1,
    /// Two periods back.
    Prior2,
    /// Three periods back.
    Prior3,
    /// Four periods back.
    Prior4,
}

impl PeriodSelector {
    /// Returns the selector's context-id prefix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Prior1 => "Prior1",
            Self::Prior2 => "Prior2",
            Self::Prior3 => "Prior3",
            Self::Prior4 => "Prior4",
        }
    }

    /// Parses a selector from its context-id prefix.
    ///
    /// Returns `None` for anything other than the five recognized labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Current" => Some(Self::Current),
            "Prior1" => Some(Self::Prior1),
            "Prior2" => Some(Self::Prior2),
            "Prior3" => Some(Self::Prior3),
            "Prior4" => Some(Self::Prior4),
            _ => None,
        }
    }

    /// Returns the context ids a fact's context reference must contain for
    /// this selector.
    ///
    /// Quarterly filings report year-to-date durations; annual filings
    /// report both an instant and a duration per fiscal year.
    #[must_use]
    pub fn context_ids(&self, period: PeriodType) -> Vec<String> {
        let prefix = self.as_str();
        match period {
            PeriodType::Quarterly => vec![format!("{prefix}YTDDuration")],
            PeriodType::Annual => vec![
                format!("{prefix}YearInstant"),
                format!("{prefix}YearDuration"),
            ],
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the context ids for a selector given as a raw label.
///
/// Unrecognized labels produce an empty set, so every dependent fact
/// resolves to its default rather than matching arbitrary contexts.
#[must_use]
pub fn context_ids_for_label(label: &str, period: PeriodType) -> Vec<String> {
    PeriodSelector::from_label(label)
        .map(|selector| selector.context_ids(period))
        .unwrap_or_default()
}
