//! Batch filing reads and DataFrame views.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use edinet_core::{
    EdinetError, FilingEntry, FilingProvider, FinancialSummary, PeriodSelector, Result, Symbol,
};
use edinet_xbrl::{GaapExtractor, XbrlDocument};
use polars::prelude::*;
use tracing::{debug, warn};

/// Reads EDINET filings for one or many symbols over a date window.
///
/// Symbols are processed sequentially; each symbol's feed read runs to
/// completion before the next begins. In batch reads a failed symbol is
/// non-fatal and maps to an absent marker, provided at least one symbol
/// succeeded.
///
/// # Example
/// ```no_run
/// use chrono::NaiveDate;
/// use edinet::{FilingReader, Symbol, UfocatchProvider};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> edinet::Result<()> {
/// let provider = Arc::new(UfocatchProvider::new());
/// let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2015, 12, 31).unwrap();
/// let reader = FilingReader::new(provider, start, end);
///
/// let frame = reader.read_frame(&[Symbol::new("E02144")]).await?;
/// println!("{}", frame);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FilingReader {
    provider: Arc<dyn FilingProvider>,
    start: NaiveDate,
    end: NaiveDate,
    extractor: GaapExtractor,
}

impl FilingReader {
    /// Create a reader over `start..=end` backed by the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn FilingProvider>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            provider,
            start,
            end,
            extractor: GaapExtractor::new(),
        }
    }

    /// Replace the extractor used by [`Self::extract_summaries`].
    #[must_use]
    pub fn with_extractor(mut self, extractor: GaapExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Read the filing entries for a single symbol.
    pub async fn read_one(&self, symbol: &Symbol) -> Result<Vec<FilingEntry>> {
        self.provider.fetch_filings(symbol, self.start, self.end).await
    }

    /// Read filing entries for several symbols.
    ///
    /// Failed symbols map to `None` as long as at least one symbol
    /// succeeded; each failure is reported as a warning. When every
    /// symbol fails (or none were given) the whole read fails with
    /// [`EdinetError::NoData`] naming the requested symbols.
    pub async fn read_many(
        &self,
        symbols: &[Symbol],
    ) -> Result<HashMap<Symbol, Option<Vec<FilingEntry>>>> {
        let mut results = HashMap::with_capacity(symbols.len());
        let mut failed = Vec::new();

        for symbol in symbols {
            match self.provider.fetch_filings(symbol, self.start, self.end).await {
                Ok(entries) => {
                    debug!("Read {} filings for {}", entries.len(), symbol);
                    results.insert(symbol.clone(), Some(entries));
                }
                Err(err) => {
                    warn!("Failed to read symbol {}: {}", symbol, err);
                    failed.push(symbol.clone());
                }
            }
        }

        if results.is_empty() {
            return Err(EdinetError::NoData {
                symbols: symbols.iter().map(ToString::to_string).collect(),
            });
        }
        for symbol in failed {
            results.insert(symbol, None);
        }

        Ok(results)
    }

    /// Read several symbols into a single DataFrame.
    ///
    /// Rows follow the order of `symbols`; failed symbols contribute no
    /// rows. An all-failed read surfaces the same [`EdinetError::NoData`]
    /// as [`Self::read_many`].
    pub async fn read_frame(&self, symbols: &[Symbol]) -> Result<DataFrame> {
        let results = self.read_many(symbols).await?;

        let mut frames = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let Some(Some(entries)) = results.get(symbol) else {
                continue;
            };
            if entries.is_empty() {
                continue;
            }

            let mut df = entries_frame(entries)?;
            let symbol_col =
                Column::new("symbol".into(), vec![symbol.as_str(); df.height()]);
            let df = df
                .with_column(symbol_col)
                .map_err(|e| EdinetError::Other(e.to_string()))?
                .clone();
            frames.push(df);
        }

        if frames.is_empty() {
            return Ok(DataFrame::empty());
        }

        let combined = concat(
            frames
                .iter()
                .map(|df| df.clone().lazy())
                .collect::<Vec<_>>(),
            UnionArgs::default(),
        )
        .map_err(|e| EdinetError::Other(e.to_string()))?
        .collect()
        .map_err(|e| EdinetError::Other(e.to_string()))?;

        Ok(combined)
    }

    /// Extract one financial summary per XBRL document of an entry.
    ///
    /// The entry's own classification decides annual versus quarterly
    /// context selection; `selector` picks the reporting period. Entries
    /// read without a package directory have no documents and yield an
    /// empty list.
    pub fn extract_summaries(
        &self,
        entry: &FilingEntry,
        selector: PeriodSelector,
    ) -> Result<Vec<(PathBuf, FinancialSummary)>> {
        let mut summaries = Vec::with_capacity(entry.xbrl_documents.len());
        for path in &entry.xbrl_documents {
            let doc = XbrlDocument::load(path)?;
            let summary = self.extractor.extract(&doc, selector, entry.period_type())?;
            summaries.push((path.clone(), summary));
        }
        Ok(summaries)
    }
}

/// Build a DataFrame view of filing entries.
///
/// One row per entry with columns id, title, doc_id, package_url,
/// updated (millisecond datetime), is_securities_report and
/// is_quarterly.
pub fn entries_frame(entries: &[FilingEntry]) -> Result<DataFrame> {
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    let doc_ids: Vec<&str> = entries.iter().map(|e| e.doc_id.as_str()).collect();
    let package_urls: Vec<&str> = entries.iter().map(|e| e.package_url.as_str()).collect();
    let updated: Vec<i64> = entries
        .iter()
        .map(|e| e.updated.and_utc().timestamp_millis())
        .collect();
    let is_securities: Vec<bool> = entries.iter().map(|e| e.is_securities_report).collect();
    let is_quarterly: Vec<bool> = entries.iter().map(|e| e.is_quarterly).collect();

    let updated_col = Column::new("updated".into(), updated)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .map_err(|e| EdinetError::Other(e.to_string()))?;

    let df = DataFrame::new(vec![
        Column::new("id".into(), ids),
        Column::new("title".into(), titles),
        Column::new("doc_id".into(), doc_ids),
        Column::new("package_url".into(), package_urls),
        updated_col,
        Column::new("is_securities_report".into(), is_securities),
        Column::new("is_quarterly".into(), is_quarterly),
    ])
    .map_err(|e| EdinetError::Other(e.to_string()))?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edinet_core::DataProvider;
    use std::io::Write;

    #[derive(Debug)]
    struct StubProvider {
        failing: Vec<&'static str>,
    }

    impl StubProvider {
        fn new(failing: &[&'static str]) -> Self {
            Self {
                failing: failing.to_vec(),
            }
        }
    }

    impl DataProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn description(&self) -> &str {
            "In-memory filing provider for tests"
        }
    }

    #[async_trait]
    impl FilingProvider for StubProvider {
        async fn fetch_filings(
            &self,
            symbol: &Symbol,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<FilingEntry>> {
            if self.failing.contains(&symbol.as_str()) {
                return Err(EdinetError::Network(format!("refused: {}", symbol)));
            }
            Ok((1..=3).map(|n| entry(symbol.as_str(), n)).collect())
        }
    }

    fn entry(symbol: &str, n: u32) -> FilingEntry {
        FilingEntry {
            id: format!("ED{symbol}{n:05}"),
            title: "有価証券報告書－第111期".to_string(),
            doc_id: format!("S{symbol}{n}"),
            package_url: format!("http://localhost/data/{symbol}/{n}"),
            updated: NaiveDate::from_ymd_opt(2015, 6, 25)
                .unwrap()
                .and_hms_opt(9, 0, n)
                .unwrap(),
            is_securities_report: true,
            is_quarterly: false,
            xbrl_documents: Vec::new(),
        }
    }

    fn reader(failing: &[&'static str]) -> FilingReader {
        FilingReader::new(
            Arc::new(StubProvider::new(failing)),
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_read_many_marks_failed_symbols_absent() {
        let reader = reader(&["E99999"]);
        let symbols = [Symbol::new("E02144"), Symbol::new("E99999")];

        let results = reader.read_many(&symbols).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[&symbols[0]].as_ref().unwrap().len(), 3);
        assert!(results[&symbols[1]].is_none());
    }

    #[tokio::test]
    async fn test_read_many_all_failed_is_no_data() {
        let reader = reader(&["E02144", "E99999"]);
        let symbols = [Symbol::new("E02144"), Symbol::new("E99999")];

        let err = reader.read_many(&symbols).await.unwrap_err();
        match err {
            EdinetError::NoData { symbols } => {
                assert_eq!(symbols, vec!["E02144".to_string(), "E99999".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_read_many_empty_input_is_no_data() {
        let reader = reader(&[]);
        let err = reader.read_many(&[]).await.unwrap_err();
        assert!(matches!(err, EdinetError::NoData { symbols } if symbols.is_empty()));
    }

    #[test]
    fn test_entries_frame_shape() {
        let entries = vec![entry("E02144", 1), entry("E02144", 2)];
        let df = entries_frame(&entries).unwrap();

        assert_eq!(df.shape(), (2, 7));
        let names: Vec<&str> = df
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "id",
                "title",
                "doc_id",
                "package_url",
                "updated",
                "is_securities_report",
                "is_quarterly"
            ]
        );
    }

    #[tokio::test]
    async fn test_read_frame_skips_failed_symbols() {
        let reader = reader(&["E99999"]);
        let symbols = [Symbol::new("E02144"), Symbol::new("E99999")];

        let df = reader.read_frame(&symbols).await.unwrap();
        assert_eq!(df.height(), 3);
        assert!(df.column("symbol").is_ok());
    }

    #[tokio::test]
    async fn test_extract_summaries_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.xbrl");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"<xbrli:xbrl xmlns:xbrli="http://www.xbrl.org/2003/instance"
            xmlns:jpdei_cor="http://disclosure.edinet-fsa.go.jp/taxonomy/jpdei"
            xmlns:jpcrp_cor="http://disclosure.edinet-fsa.go.jp/taxonomy/jpcrp">
  <jpdei_cor:AccountingStandardsDEI contextRef="FilingDateInstant">Japan GAAP</jpdei_cor:AccountingStandardsDEI>
  <jpcrp_cor:NetSalesSummaryOfBusinessResults contextRef="CurrentYearDuration">1000</jpcrp_cor:NetSalesSummaryOfBusinessResults>
</xbrli:xbrl>"#,
        )
        .unwrap();

        let mut filing = entry("E02144", 1);
        filing.xbrl_documents = vec![path.clone()];

        let reader = reader(&[]);
        let summaries = reader
            .extract_summaries(&filing, PeriodSelector::Current)
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].0, path);
        assert_eq!(summaries[0].1.as_japan_gaap().unwrap().netsales, 1000.0);
    }
}
