//! Core data types for EDINET filing data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Security code or EDINET code identifying a filer
//! - [`FilingEntry`] - One filing from the disclosure feed
//! - [`DeiRecord`] - Document and Entity Information metadata
//! - [`JapanGaapFacts`] / [`UsGaapFacts`] - Standard-specific summary facts
//! - [`BalanceSheetFacts`] - Balance-sheet facts shared by both standards
//! - [`FinancialSummary`] - The extracted record, tagged by standard

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::period::PeriodType;

/// A security code or EDINET code identifying a filer.
///
/// Codes are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Accounting standard declared by a filing's DEI section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountingStandard {
    /// Japanese GAAP disclosure taxonomy.
    JapanGaap,
    /// US GAAP disclosure taxonomy.
    UsGaap,
}

impl AccountingStandard {
    /// Returns the DEI label for this standard.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JapanGaap => "Japan GAAP",
            Self::UsGaap => "US GAAP",
        }
    }

    /// Parses a DEI accounting-standards value.
    ///
    /// Only the exact labels "Japan GAAP" and "US GAAP" are recognized;
    /// anything else (including IFRS filings) returns `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Japan GAAP" => Some(Self::JapanGaap),
            "US GAAP" => Some(Self::UsGaap),
            _ => None,
        }
    }
}

impl fmt::Display for AccountingStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One filing from the disclosure feed.
///
/// Produced by a [`FilingProvider`](crate::provider::FilingProvider) for
/// every feed entry inside the requested date window; immutable once
/// produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilingEntry {
    /// Feed entry identifier.
    pub id: String,
    /// Filing title as published.
    pub title: String,
    /// EDINET document id.
    pub doc_id: String,
    /// URL of the filing's zip package.
    pub package_url: String,
    /// Feed update timestamp (timezone-naive).
    pub updated: NaiveDateTime,
    /// True if the title marks an annual or quarterly securities report.
    pub is_securities_report: bool,
    /// True if the title marks a quarterly report.
    pub is_quarterly: bool,
    /// Local paths of XBRL documents extracted from the package, if
    /// package fetching was requested.
    pub xbrl_documents: Vec<PathBuf>,
}

impl FilingEntry {
    /// Returns the filing's reporting frequency.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        if self.is_quarterly {
            PeriodType::Quarterly
        } else {
            PeriodType::Annual
        }
    }
}

/// Document and Entity Information metadata for one filing.
///
/// All fields default to the empty string when the concept is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeiRecord {
    /// EDINET code of the filer.
    pub edinet_code: String,
    /// Security code of the filer.
    pub trading_symbol: String,
    /// Company name from the cover page.
    pub company_name: String,
    /// Accounting-standards label (e.g. "Japan GAAP").
    pub accounting_standards: String,
    /// Start date of the current fiscal year.
    pub current_fy_start: String,
    /// End date of the current fiscal year.
    pub current_fy_end: String,
    /// Label of the current period type (e.g. "FY", "Q2").
    pub type_of_current_period: String,
}

impl DeiRecord {
    /// Returns the recognized accounting standard, if any.
    #[must_use]
    pub fn standard(&self) -> Option<AccountingStandard> {
        AccountingStandard::from_label(&self.accounting_standards)
    }
}

/// Balance-sheet facts shared by both accounting standards.
///
/// Every field is 0.0 when the concept did not resolve.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetFacts {
    /// Total number of issued shares.
    pub shares_outstanding: f64,
    /// Total assets.
    pub assets: f64,
    /// Current assets.
    pub current_assets: f64,
    /// Non-current assets.
    pub non_current_assets: f64,
    /// Total liabilities.
    pub liabilities: f64,
    /// Current liabilities.
    pub current_liabilities: f64,
    /// Non-current liabilities.
    pub non_current_liabilities: f64,
    /// Net assets.
    pub net_assets: f64,
}

/// Summary facts from a Japanese GAAP filing.
///
/// Field names follow the summary-of-business-results concepts; every
/// field is 0.0 when the concept did not resolve for the selected period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JapanGaapFacts {
    /// Net sales.
    pub netsales: f64,
    /// Ordinary income or loss.
    pub ordinary_income_loss: f64,
    /// Profit or loss attributable to owners of parent.
    pub profit_loss: f64,
    /// Comprehensive income.
    pub comprehensive_income: f64,
    /// Net assets as reported in the summary.
    pub net_assets: f64,
    /// Total assets as reported in the summary.
    pub total_assets: f64,
    /// Net assets per share.
    pub bps: f64,
    /// Dividend paid per share.
    pub dps: f64,
    /// Basic earnings per share.
    pub basic_eps: f64,
    /// Diluted earnings per share.
    pub diluted_eps: f64,
    /// Equity-to-asset ratio.
    pub equity_to_asset_ratio: f64,
    /// Rate of return on equity.
    pub roe: f64,
    /// Price-earnings ratio.
    pub per: f64,
    /// Net cash provided by (used in) operating activities.
    pub cf_from_operating: f64,
    /// Net cash provided by (used in) investing activities.
    pub cf_from_investing: f64,
    /// Net cash provided by (used in) financing activities.
    pub cf_from_financing: f64,
    /// Balance-sheet facts from the financial-statement taxonomy.
    pub balance: BalanceSheetFacts,
}

/// Summary facts from a US GAAP filing.
///
/// Every field is 0.0 when the concept did not resolve for the selected
/// period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UsGaapFacts {
    /// Revenues.
    pub revenues: f64,
    /// Operating income or loss.
    pub operating_income_loss: f64,
    /// Profit or loss before tax.
    pub profit_loss_before_tax: f64,
    /// Net income or loss attributable to owners of parent.
    pub net_income_loss: f64,
    /// Comprehensive income.
    pub comprehensive_income: f64,
    /// Basic earnings per share.
    pub basic_eps: f64,
    /// Diluted earnings per share.
    pub diluted_eps: f64,
    /// Price-earnings ratio.
    pub per: f64,
    /// Cash flows from (used in) operating activities.
    pub cf_from_operating: f64,
    /// Cash flows from (used in) investing activities.
    pub cf_from_investing: f64,
    /// Cash flows from (used in) financing activities.
    pub cf_from_financing: f64,
    /// Balance-sheet facts from the financial-statement taxonomy.
    pub balance: BalanceSheetFacts,
}

/// The extracted financial record for one filing, tagged by accounting
/// standard.
///
/// The variant is chosen from the filing's DEI accounting-standards value;
/// both variants carry the shared [`BalanceSheetFacts`] tail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FinancialSummary {
    /// Facts extracted under the Japanese GAAP taxonomy.
    JapanGaap(JapanGaapFacts),
    /// Facts extracted under the US GAAP taxonomy.
    UsGaap(UsGaapFacts),
}

impl FinancialSummary {
    /// Returns the accounting standard this record was extracted under.
    #[must_use]
    pub const fn standard(&self) -> AccountingStandard {
        match self {
            Self::JapanGaap(_) => AccountingStandard::JapanGaap,
            Self::UsGaap(_) => AccountingStandard::UsGaap,
        }
    }

    /// Returns the shared balance-sheet facts.
    #[must_use]
    pub const fn balance(&self) -> &BalanceSheetFacts {
        match self {
            Self::JapanGaap(facts) => &facts.balance,
            Self::UsGaap(facts) => &facts.balance,
        }
    }

    /// Returns the Japanese GAAP facts, if this is a Japan GAAP record.
    #[must_use]
    pub const fn as_japan_gaap(&self) -> Option<&JapanGaapFacts> {
        match self {
            Self::JapanGaap(facts) => Some(facts),
            Self::UsGaap(_) => None,
        }
    }

    /// Returns the US GAAP facts, if this is a US GAAP record.
    #[must_use]
    pub const fn as_us_gaap(&self) -> Option<&UsGaapFacts> {
        match self {
            Self::JapanGaap(_) => None,
            Self::UsGaap(facts) => Some(facts),
        }
    }
}
