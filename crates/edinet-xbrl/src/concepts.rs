//! Concept-to-tag tables for the EDINET summary taxonomies.
//!
//! The extractor resolves a fixed vocabulary of concepts. Each concept
//! maps to exactly one qualified tag name; the tables here are the whole
//! mapping, grouped by record family. Names are matched against the
//! document case-insensitively, so the casing below is documentation of
//! the taxonomy, not a matching requirement.

/// DEI concepts in extraction order.
pub const DEI_CONCEPTS: [&str; 7] = [
    "edinet_code",
    "trading_symbol",
    "company_name",
    "accounting_standards",
    "current_fy_start",
    "current_fy_end",
    "type_of_current_period",
];

/// Japan GAAP summary concepts in extraction order.
pub const JAPAN_GAAP_CONCEPTS: [&str; 16] = [
    "netsales",
    "ordinary_income_loss",
    "profit_loss",
    "comprehensive_income",
    "net_assets",
    "total_assets",
    "bps",
    "dps",
    "basic_eps",
    "diluted_eps",
    "equity_to_asset_ratio",
    "roe",
    "per",
    "cf_from_operating",
    "cf_from_investing",
    "cf_from_financing",
];

/// US GAAP summary concepts in extraction order.
pub const US_GAAP_CONCEPTS: [&str; 11] = [
    "revenues",
    "operating_income_loss",
    "profit_loss_before_tax",
    "net_income_loss",
    "comprehensive_income",
    "basic_eps",
    "diluted_eps",
    "per",
    "cf_from_operating",
    "cf_from_investing",
    "cf_from_financing",
];

/// Shared balance-sheet concepts in extraction order.
pub const BALANCE_SHEET_CONCEPTS: [&str; 8] = [
    "shares_outstanding",
    "assets",
    "current_assets",
    "non_current_assets",
    "liabilities",
    "current_liabilities",
    "non_current_liabilities",
    "net_assets",
];

/// Qualified tag name for a DEI concept.
#[must_use]
pub fn dei_tag(concept: &str) -> Option<&'static str> {
    match concept {
        "edinet_code" => Some("jpdei_cor:EDINETCodeDEI"),
        "trading_symbol" => Some("jpdei_cor:SecurityCodeDei"),
        "company_name" => Some("jpcrp_cor:CompanyNameCoverPage"),
        "accounting_standards" => Some("jpdei_cor:AccountingStandardsDEI"),
        "current_fy_start" => Some("jpdei_cor:CurrentFiscalYearStartDateDei"),
        "current_fy_end" => Some("jpdei_cor:CurrentFiscalYearEndDateDei"),
        "type_of_current_period" => Some("jpdei_cor:TypeOfCurrentPeriodDEI"),
        _ => None,
    }
}

/// Qualified tag name for a Japan GAAP summary concept.
#[must_use]
pub fn japan_gaap_tag(concept: &str) -> Option<&'static str> {
    match concept {
        // Income statement
        "netsales" => Some("jpcrp_cor:NetSalesSummaryOfBusinessResults"),
        "ordinary_income_loss" => Some("jpcrp_cor:OrdinaryIncomeLossSummaryOfBusinessResults"),
        "profit_loss" => {
            Some("jpcrp_cor:ProfitLossAttributableToOwnersOfParentSummaryOfBusinessResults")
        }
        "comprehensive_income" => Some("jpcrp_cor:ComprehensiveIncomeSummaryOfBusinessResults"),

        // Position summary
        "net_assets" => Some("jpcrp_cor:NetAssetsSummaryOfBusinessResults"),
        "total_assets" => Some("jpcrp_cor:TotalAssetsSummaryOfBusinessResults"),

        // Per-share and ratios
        "bps" => Some("jpcrp_cor:NetAssetsPerShareSummaryOfBusinessResults"),
        "dps" => Some("jpcrp_cor:DividendPaidPerShareSummaryOfBusinessResults"),
        "basic_eps" => Some("jpcrp_cor:BasicEarningsLossPerShareSummaryOfBusinessResults"),
        "diluted_eps" => Some("jpcrp_cor:DilutedEarningsPerShareSummaryOfBusinessResults"),
        "equity_to_asset_ratio" => Some("jpcrp_cor:EquityToAssetRatioSummaryOfBusinessResults"),
        "roe" => Some("jpcrp_cor:RateOfReturnOnEquitySummaryOfBusinessResults"),
        "per" => Some("jpcrp_cor:PriceEarningsRatioSummaryOfBusinessResults"),

        // Cash flows
        "cf_from_operating" => {
            Some("jpcrp_cor:NetCashProvidedByUsedInOperatingActivitiesSummaryOfBusinessResults")
        }
        "cf_from_investing" => {
            Some("jpcrp_cor:NetCashProvidedByUsedInInvestingActivitiesSummaryOfBusinessResults")
        }
        "cf_from_financing" => {
            Some("jpcrp_cor:NetCashProvidedByUsedInFinancingActivitiesSummaryOfBusinessResults")
        }
        _ => None,
    }
}

/// Qualified tag name for a US GAAP summary concept.
#[must_use]
pub fn us_gaap_tag(concept: &str) -> Option<&'static str> {
    match concept {
        // Income statement
        "revenues" => Some("jpcrp_cor:RevenuesUSGAAPSummaryOfBusinessResults"),
        "operating_income_loss" => {
            Some("jpcrp_cor:OperatingIncomeLossUSGAAPSummaryOfBusinessResults")
        }
        "profit_loss_before_tax" => {
            Some("jpcrp_cor:ProfitLossBeforeTaxUSGAAPSummaryOfBusinessResults")
        }
        "net_income_loss" => Some(
            "jpcrp_cor:NetIncomeLossAttributableToOwnersOfParentUSGAAPSummaryOfBusinessResults",
        ),
        "comprehensive_income" => {
            Some("jpcrp_cor:ComprehensiveIncomeUSGAAPSummaryOfBusinessResults")
        }

        // Per-share and ratios
        "basic_eps" => Some("jpcrp_cor:BasicEarningsLossPerShareUSGAAPSummaryOfBusinessResults"),
        "diluted_eps" => {
            Some("jpcrp_cor:DilutedEarningsLossPerShareUSGAAPSummaryOfBusinessResults")
        }
        "per" => Some("jpcrp_cor:PriceEarningsRatioUSGAAPSummaryOfBusinessResults"),

        // Cash flows
        "cf_from_operating" => {
            Some("jpcrp_cor:CashFlowsFromUsedInOperatingActivitiesUSGAAPSummaryOfBusinessResults")
        }
        "cf_from_investing" => {
            Some("jpcrp_cor:CashFlowsFromUsedInInvestingActivitiesUSGAAPSummaryOfBusinessResults")
        }
        "cf_from_financing" => {
            Some("jpcrp_cor:CashFlowsFromUsedInFinancingActivitiesUSGAAPSummaryOfBusinessResults")
        }
        _ => None,
    }
}

/// Qualified tag name for a shared balance-sheet concept.
///
/// Shares outstanding comes from the report summary; the rest are
/// financial-statement taxonomy tags common to both standards.
#[must_use]
pub fn balance_sheet_tag(concept: &str) -> Option<&'static str> {
    match concept {
        "shares_outstanding" => {
            Some("jpcrp_cor:TotalNumberOfIssuedSharesSummaryOfBusinessResults")
        }
        "assets" => Some("jppfs_cor:Assets"),
        "current_assets" => Some("jppfs_cor:CurrentAssets"),
        "non_current_assets" => Some("jppfs_cor:NonCurrentAssets"),
        "liabilities" => Some("jppfs_cor:Liabilities"),
        "current_liabilities" => Some("jppfs_cor:CurrentLiabilities"),
        "non_current_liabilities" => Some("jppfs_cor:NonCurrentLiabilities"),
        "net_assets" => Some("jppfs_cor:NetAssets"),
        _ => None,
    }
}
