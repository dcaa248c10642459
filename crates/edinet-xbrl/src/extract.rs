//! DEI and GAAP extraction.
//!
//! [`extract_dei`] resolves the document-and-entity metadata concepts;
//! [`GaapExtractor`] assembles the full summary record for one reporting
//! period, choosing the Japan GAAP or US GAAP concept table from the
//! filing's declared accounting standard and always resolving the shared
//! balance-sheet tail.

use tracing::debug;

use edinet_core::{
    AccountingStandard, BalanceSheetFacts, DeiRecord, EdinetError, FinancialSummary,
    JapanGaapFacts, PeriodSelector, PeriodType, Result, UsGaapFacts,
};

use crate::concepts::{balance_sheet_tag, dei_tag, japan_gaap_tag, us_gaap_tag};
use crate::document::XbrlDocument;
use crate::policy::{DiagnosticSink, ErrorPolicy, TracingSink};
use crate::resolve::{resolve_number, resolve_text};

/// Extracts the DEI metadata record from an instance document.
///
/// DEI facts are context-independent singletons: resolution takes the
/// first match per concept and defaults to the empty string. This never
/// fails.
#[must_use]
pub fn extract_dei(doc: &XbrlDocument) -> DeiRecord {
    let text = |concept: &str| match dei_tag(concept) {
        Some(tag) => resolve_text(&doc.facts_by_name(tag)),
        None => String::new(),
    };

    DeiRecord {
        edinet_code: text("edinet_code"),
        trading_symbol: text("trading_symbol"),
        company_name: text("company_name"),
        accounting_standards: text("accounting_standards"),
        current_fy_start: text("current_fy_start"),
        current_fy_end: text("current_fy_end"),
        type_of_current_period: text("type_of_current_period"),
    }
}

/// Extracts financial summary records from instance documents.
///
/// Carries the error policy and the diagnostic sink; construct once and
/// reuse across filings.
#[derive(Debug)]
pub struct GaapExtractor {
    policy: ErrorPolicy,
    sink: Box<dyn DiagnosticSink>,
}

impl Default for GaapExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl GaapExtractor {
    /// Creates an extractor with the default lenient policy and a
    /// tracing-backed sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: ErrorPolicy::default(),
            sink: Box::new(TracingSink),
        }
    }

    /// Sets the error policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the sink receiving failures under [`ErrorPolicy::Logged`].
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Extracts one summary record for the selected reporting period.
    ///
    /// The record variant follows the filing's DEI accounting-standards
    /// value; a value outside the two supported taxonomies is an
    /// [`EdinetError::UnresolvedStandard`]. Balance-sheet facts for such
    /// filings remain reachable through [`Self::extract_balance_sheet`].
    pub fn extract(
        &self,
        doc: &XbrlDocument,
        selector: PeriodSelector,
        period: PeriodType,
    ) -> Result<FinancialSummary> {
        let dei = extract_dei(doc);
        let contexts = selector.context_ids(period);
        debug!(
            standard = %dei.accounting_standards,
            selector = %selector,
            "extracting financial summary"
        );

        match dei.standard() {
            Some(AccountingStandard::JapanGaap) => Ok(FinancialSummary::JapanGaap(
                self.japan_facts(doc, &contexts)?,
            )),
            Some(AccountingStandard::UsGaap) => {
                Ok(FinancialSummary::UsGaap(self.us_facts(doc, &contexts)?))
            }
            None => Err(EdinetError::UnresolvedStandard {
                value: dei.accounting_standards,
            }),
        }
    }

    /// Extracts the shared balance-sheet facts for the selected period.
    ///
    /// These concepts are standard-independent, so they resolve even for
    /// filings whose accounting standard is unrecognized.
    pub fn extract_balance_sheet(
        &self,
        doc: &XbrlDocument,
        selector: PeriodSelector,
        period: PeriodType,
    ) -> Result<BalanceSheetFacts> {
        let contexts = selector.context_ids(period);
        self.balance_facts(doc, &contexts)
    }

    fn japan_facts(&self, doc: &XbrlDocument, contexts: &[String]) -> Result<JapanGaapFacts> {
        Ok(JapanGaapFacts {
            netsales: self.number(doc, japan_gaap_tag("netsales"), contexts)?,
            ordinary_income_loss: self.number(
                doc,
                japan_gaap_tag("ordinary_income_loss"),
                contexts,
            )?,
            profit_loss: self.number(doc, japan_gaap_tag("profit_loss"), contexts)?,
            comprehensive_income: self.number(
                doc,
                japan_gaap_tag("comprehensive_income"),
                contexts,
            )?,
            net_assets: self.number(doc, japan_gaap_tag("net_assets"), contexts)?,
            total_assets: self.number(doc, japan_gaap_tag("total_assets"), contexts)?,
            bps: self.number(doc, japan_gaap_tag("bps"), contexts)?,
            dps: self.number(doc, japan_gaap_tag("dps"), contexts)?,
            basic_eps: self.number(doc, japan_gaap_tag("basic_eps"), contexts)?,
            diluted_eps: self.number(doc, japan_gaap_tag("diluted_eps"), contexts)?,
            equity_to_asset_ratio: self.number(
                doc,
                japan_gaap_tag("equity_to_asset_ratio"),
                contexts,
            )?,
            roe: self.number(doc, japan_gaap_tag("roe"), contexts)?,
            per: self.number(doc, japan_gaap_tag("per"), contexts)?,
            cf_from_operating: self.number(doc, japan_gaap_tag("cf_from_operating"), contexts)?,
            cf_from_investing: self.number(doc, japan_gaap_tag("cf_from_investing"), contexts)?,
            cf_from_financing: self.number(doc, japan_gaap_tag("cf_from_financing"), contexts)?,
            balance: self.balance_facts(doc, contexts)?,
        })
    }

    fn us_facts(&self, doc: &XbrlDocument, contexts: &[String]) -> Result<UsGaapFacts> {
        Ok(UsGaapFacts {
            revenues: self.number(doc, us_gaap_tag("revenues"), contexts)?,
            operating_income_loss: self.number(
                doc,
                us_gaap_tag("operating_income_loss"),
                contexts,
            )?,
            profit_loss_before_tax: self.number(
                doc,
                us_gaap_tag("profit_loss_before_tax"),
                contexts,
            )?,
            net_income_loss: self.number(doc, us_gaap_tag("net_income_loss"), contexts)?,
            comprehensive_income: self.number(doc, us_gaap_tag("comprehensive_income"), contexts)?,
            basic_eps: self.number(doc, us_gaap_tag("basic_eps"), contexts)?,
            diluted_eps: self.number(doc, us_gaap_tag("diluted_eps"), contexts)?,
            per: self.number(doc, us_gaap_tag("per"), contexts)?,
            cf_from_operating: self.number(doc, us_gaap_tag("cf_from_operating"), contexts)?,
            cf_from_investing: self.number(doc, us_gaap_tag("cf_from_investing"), contexts)?,
            cf_from_financing: self.number(doc, us_gaap_tag("cf_from_financing"), contexts)?,
            balance: self.balance_facts(doc, contexts)?,
        })
    }

    fn balance_facts(&self, doc: &XbrlDocument, contexts: &[String]) -> Result<BalanceSheetFacts> {
        Ok(BalanceSheetFacts {
            shares_outstanding: self.number(
                doc,
                balance_sheet_tag("shares_outstanding"),
                contexts,
            )?,
            assets: self.number(doc, balance_sheet_tag("assets"), contexts)?,
            current_assets: self.number(doc, balance_sheet_tag("current_assets"), contexts)?,
            non_current_assets: self.number(
                doc,
                balance_sheet_tag("non_current_assets"),
                contexts,
            )?,
            liabilities: self.number(doc, balance_sheet_tag("liabilities"), contexts)?,
            current_liabilities: self.number(
                doc,
                balance_sheet_tag("current_liabilities"),
                contexts,
            )?,
            non_current_liabilities: self.number(
                doc,
                balance_sheet_tag("non_current_liabilities"),
                contexts,
            )?,
            net_assets: self.number(doc, balance_sheet_tag("net_assets"), contexts)?,
        })
    }

    /// Resolves one numeric concept, routing failures through the policy.
    ///
    /// A concept missing from its table behaves like a concept with no
    /// matching facts.
    fn number(
        &self,
        doc: &XbrlDocument,
        tag: Option<&'static str>,
        contexts: &[String],
    ) -> Result<f64> {
        let Some(tag) = tag else {
            return Ok(0.0);
        };
        match resolve_number(tag, &doc.facts_by_name(tag), contexts, false) {
            Ok(value) => Ok(value),
            Err(err) => self.policy.absorb(err, self.sink.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn instance(facts: &[(&str, Option<&str>, &str)]) -> XbrlDocument {
        let mut body = String::new();
        for (tag, context, value) in facts {
            match context {
                Some(context) => {
                    body.push_str(&format!(
                        "  <{tag} contextRef=\"{context}\">{value}</{tag}>\n"
                    ));
                }
                None => body.push_str(&format!("  <{tag}>{value}</{tag}>\n")),
            }
        }
        let xml = format!(
            concat!(
                "<xbrli:xbrl xmlns:xbrli=\"http://www.xbrl.org/2003/instance\"\n",
                "            xmlns:jpdei_cor=\"http://disclosure.edinet-fsa.go.jp/taxonomy/jpdei\"\n",
                "            xmlns:jpcrp_cor=\"http://disclosure.edinet-fsa.go.jp/taxonomy/jpcrp\"\n",
                "            xmlns:jppfs_cor=\"http://disclosure.edinet-fsa.go.jp/taxonomy/jppfs\">\n",
                "{}</xbrli:xbrl>"
            ),
            body
        );
        XbrlDocument::parse(&xml).unwrap()
    }

    fn japan_dei() -> (&'static str, Option<&'static str>, &'static str) {
        (
            "jpdei_cor:AccountingStandardsDEI",
            Some("FilingDateInstant"),
            "Japan GAAP",
        )
    }

    #[test]
    fn test_dei_extraction() {
        let doc = instance(&[
            ("jpdei_cor:EDINETCodeDEI", Some("FilingDateInstant"), "E02144"),
            ("jpdei_cor:SecurityCodeDei", Some("FilingDateInstant"), "72030"),
            (
                "jpcrp_cor:CompanyNameCoverPage",
                Some("FilingDateInstant"),
                "トヨタ自動車株式会社",
            ),
            japan_dei(),
            (
                "jpdei_cor:CurrentFiscalYearStartDateDei",
                Some("FilingDateInstant"),
                "2014-04-01",
            ),
            (
                "jpdei_cor:CurrentFiscalYearEndDateDei",
                Some("FilingDateInstant"),
                "2015-03-31",
            ),
            ("jpdei_cor:TypeOfCurrentPeriodDEI", Some("FilingDateInstant"), "FY"),
        ]);

        let dei = extract_dei(&doc);
        assert_eq!(dei.edinet_code, "E02144");
        assert_eq!(dei.trading_symbol, "72030");
        assert_eq!(dei.company_name, "トヨタ自動車株式会社");
        assert_eq!(dei.accounting_standards, "Japan GAAP");
        assert_eq!(dei.current_fy_start, "2014-04-01");
        assert_eq!(dei.current_fy_end, "2015-03-31");
        assert_eq!(dei.type_of_current_period, "FY");
        assert_eq!(dei.standard(), Some(AccountingStandard::JapanGaap));
    }

    #[test]
    fn test_dei_missing_concepts_default_to_empty() {
        let doc = instance(&[japan_dei()]);
        let dei = extract_dei(&doc);
        assert_eq!(dei.edinet_code, "");
        assert_eq!(dei.company_name, "");
        assert_eq!(dei.accounting_standards, "Japan GAAP");
    }

    #[test]
    fn test_japan_gaap_round_trip() {
        let doc = instance(&[
            japan_dei(),
            ("jpcrp_cor:NetSalesSummaryOfBusinessResults", Some("CurrentYearDuration"), "27234521"),
            ("jpcrp_cor:OrdinaryIncomeLossSummaryOfBusinessResults", Some("CurrentYearDuration"), "2892828"),
            ("jpcrp_cor:ProfitLossAttributableToOwnersOfParentSummaryOfBusinessResults", Some("CurrentYearDuration"), "2173338"),
            ("jpcrp_cor:ComprehensiveIncomeSummaryOfBusinessResults", Some("CurrentYearDuration"), "3123521"),
            ("jpcrp_cor:NetAssetsSummaryOfBusinessResults", Some("CurrentYearInstant"), "16788131"),
            ("jpcrp_cor:TotalAssetsSummaryOfBusinessResults", Some("CurrentYearInstant"), "47729830"),
            ("jpcrp_cor:NetAssetsPerShareSummaryOfBusinessResults", Some("CurrentYearInstant"), "5128.74"),
            ("jpcrp_cor:DividendPaidPerShareSummaryOfBusinessResults", Some("CurrentYearInstant"), "200"),
            ("jpcrp_cor:BasicEarningsLossPerShareSummaryOfBusinessResults", Some("CurrentYearDuration"), "688.02"),
            ("jpcrp_cor:DilutedEarningsPerShareSummaryOfBusinessResults", Some("CurrentYearDuration"), "687.66"),
            ("jpcrp_cor:EquityToAssetRatioSummaryOfBusinessResults", Some("CurrentYearInstant"), "0.352"),
            ("jpcrp_cor:RateOfReturnOnEquitySummaryOfBusinessResults", Some("CurrentYearDuration"), "0.139"),
            ("jpcrp_cor:PriceEarningsRatioSummaryOfBusinessResults", Some("CurrentYearDuration"), "12.2"),
            ("jpcrp_cor:NetCashProvidedByUsedInOperatingActivitiesSummaryOfBusinessResults", Some("CurrentYearDuration"), "3685753"),
            ("jpcrp_cor:NetCashProvidedByUsedInInvestingActivitiesSummaryOfBusinessResults", Some("CurrentYearDuration"), "-3813490"),
            ("jpcrp_cor:NetCashProvidedByUsedInFinancingActivitiesSummaryOfBusinessResults", Some("CurrentYearDuration"), "306045"),
            ("jpcrp_cor:TotalNumberOfIssuedSharesSummaryOfBusinessResults", Some("CurrentYearInstant"), "3417997492"),
            ("jppfs_cor:Assets", Some("CurrentYearInstant"), "47729830"),
            ("jppfs_cor:CurrentAssets", Some("CurrentYearInstant"), "19954309"),
            ("jppfs_cor:NonCurrentAssets", Some("CurrentYearInstant"), "27775521"),
            ("jppfs_cor:Liabilities", Some("CurrentYearInstant"), "30941699"),
            ("jppfs_cor:CurrentLiabilities", Some("CurrentYearInstant"), "17574598"),
            ("jppfs_cor:NonCurrentLiabilities", Some("CurrentYearInstant"), "13367100"),
            ("jppfs_cor:NetAssets", Some("CurrentYearInstant"), "16788131"),
        ]);

        let extractor = GaapExtractor::new();
        let summary = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();

        let expected = JapanGaapFacts {
            netsales: 27234521.0,
            ordinary_income_loss: 2892828.0,
            profit_loss: 2173338.0,
            comprehensive_income: 3123521.0,
            net_assets: 16788131.0,
            total_assets: 47729830.0,
            bps: 5128.74,
            dps: 200.0,
            basic_eps: 688.02,
            diluted_eps: 687.66,
            equity_to_asset_ratio: 0.352,
            roe: 0.139,
            per: 12.2,
            cf_from_operating: 3685753.0,
            cf_from_investing: -3813490.0,
            cf_from_financing: 306045.0,
            balance: BalanceSheetFacts {
                shares_outstanding: 3417997492.0,
                assets: 47729830.0,
                current_assets: 19954309.0,
                non_current_assets: 27775521.0,
                liabilities: 30941699.0,
                current_liabilities: 17574598.0,
                non_current_liabilities: 13367100.0,
                net_assets: 16788131.0,
            },
        };
        assert_eq!(summary, FinancialSummary::JapanGaap(expected));
    }

    #[test]
    fn test_us_gaap_extraction() {
        let doc = instance(&[
            (
                "jpdei_cor:AccountingStandardsDEI",
                Some("FilingDateInstant"),
                "US GAAP",
            ),
            (
                "jpcrp_cor:RevenuesUSGAAPSummaryOfBusinessResults",
                Some("CurrentYearDuration"),
                "27234521",
            ),
            (
                "jpcrp_cor:BasicEarningsLossPerShareUSGAAPSummaryOfBusinessResults",
                Some("CurrentYearDuration"),
                "688.02",
            ),
            ("jppfs_cor:Assets", Some("CurrentYearInstant"), "47729830"),
        ]);

        let extractor = GaapExtractor::new();
        let summary = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();

        let facts = summary.as_us_gaap().unwrap();
        assert_eq!(facts.revenues, 27234521.0);
        assert_eq!(facts.basic_eps, 688.02);
        assert_eq!(facts.operating_income_loss, 0.0);
        assert_eq!(facts.balance.assets, 47729830.0);
        assert_eq!(summary.standard(), AccountingStandard::UsGaap);
    }

    #[test]
    fn test_segmented_prior_context_resolves() {
        let doc = instance(&[
            japan_dei(),
            (
                "jpcrp_cor:NetSalesSummaryOfBusinessResults",
                Some("Prior1YearInstant_SomeSegment"),
                "12345.6",
            ),
        ]);
        let extractor = GaapExtractor::new();

        let summary = extractor
            .extract(&doc, PeriodSelector::Prior1, PeriodType::Annual)
            .unwrap();
        let facts = summary.as_japan_gaap().unwrap();
        assert_eq!(facts.netsales, 12345.6);

        // The same fact does not leak into the current period.
        let summary = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();
        let facts = summary.as_japan_gaap().unwrap();
        assert_eq!(facts.netsales, 0.0);
    }

    #[test]
    fn test_quarterly_uses_ytd_duration() {
        let doc = instance(&[
            japan_dei(),
            (
                "jpcrp_cor:NetSalesSummaryOfBusinessResults",
                Some("CurrentYTDDuration"),
                "555.5",
            ),
        ]);
        let extractor = GaapExtractor::new();

        let quarterly = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Quarterly)
            .unwrap();
        assert_eq!(quarterly.as_japan_gaap().unwrap().netsales, 555.5);

        let annual = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();
        assert_eq!(annual.as_japan_gaap().unwrap().netsales, 0.0);
    }

    #[test]
    fn test_unrecognized_standard_is_an_error() {
        let doc = instance(&[
            ("jpdei_cor:AccountingStandardsDEI", Some("FilingDateInstant"), "IFRS"),
            ("jppfs_cor:Assets", Some("CurrentYearInstant"), "47729830"),
        ]);
        let extractor = GaapExtractor::new();

        let err = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap_err();
        assert!(matches!(
            err,
            EdinetError::UnresolvedStandard { ref value } if value == "IFRS"
        ));

        // Balance facts stay reachable for such filings.
        let balance = extractor
            .extract_balance_sheet(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();
        assert_eq!(balance.assets, 47729830.0);
    }

    #[test]
    fn test_missing_standard_is_an_error() {
        let doc = instance(&[("jppfs_cor:Assets", Some("CurrentYearInstant"), "1")]);
        let extractor = GaapExtractor::new();
        let err = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap_err();
        assert!(matches!(
            err,
            EdinetError::UnresolvedStandard { ref value } if value.is_empty()
        ));
    }

    #[test]
    fn test_strict_policy_aborts_on_missing_context_ref() {
        let doc = instance(&[
            japan_dei(),
            ("jpcrp_cor:NetSalesSummaryOfBusinessResults", None, "100"),
        ]);

        let strict = GaapExtractor::new().with_policy(ErrorPolicy::Strict);
        let err = strict
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap_err();
        assert!(matches!(err, EdinetError::Extraction { .. }));

        let lenient = GaapExtractor::new();
        let summary = lenient
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();
        assert_eq!(summary.as_japan_gaap().unwrap().netsales, 0.0);
    }

    #[derive(Clone, Debug, Default)]
    struct SharedSink(Arc<Mutex<Vec<String>>>);

    impl DiagnosticSink for SharedSink {
        fn record(&self, error: &EdinetError) {
            self.0.lock().unwrap().push(error.to_string());
        }
    }

    #[test]
    fn test_logged_policy_reports_to_sink() {
        let doc = instance(&[
            japan_dei(),
            ("jpcrp_cor:NetSalesSummaryOfBusinessResults", None, "100"),
        ]);

        let sink = SharedSink::default();
        let extractor = GaapExtractor::new()
            .with_policy(ErrorPolicy::Logged)
            .with_sink(Box::new(sink.clone()));

        let summary = extractor
            .extract(&doc, PeriodSelector::Current, PeriodType::Annual)
            .unwrap();
        assert_eq!(summary.as_japan_gaap().unwrap().netsales, 0.0);

        let messages = sink.0.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("contextRef"));
    }
}
