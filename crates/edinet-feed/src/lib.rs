#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edinet-data/edinet-data/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! EDINET filing feed provider via the ufocatch Atom mirror.
//!
//! This crate provides:
//!
//! - Per-symbol Atom feed retrieval with retry and request pacing
//! - Report-type classification from filing titles
//! - Date-window filtering of feed entries
//! - Optional download and extraction of XBRL packages

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use edinet_core::{DataProvider, EdinetError, FilingEntry, FilingProvider, Result, Symbol};
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// Ufocatch EDINET feed base URL; the symbol is appended as the last
/// path segment.
const DEFAULT_BASE_URL: &str = "http://resource.ufocatch.com/atom/edinetx/query";

/// Atom namespace used by the feed.
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("edinet-data/", env!("CARGO_PKG_VERSION"));

/// Minimum spacing between requests to the mirror.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Settle delay after each completed feed read.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Title marker for annual securities reports (有価証券報告書).
const ANNUAL_REPORT_MARKER: &str = "有価証券報告書";

/// Title marker for quarterly reports (四半期報告書).
const QUARTERLY_REPORT_MARKER: &str = "四半期報告書";

/// Retry behavior for transient feed failures.
///
/// `max_attempts` counts the first try as well, so the default of two
/// means one retry after a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay between consecutive attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

/// Rate limiter enforcing a minimum interval between requests.
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// EDINET filing feed provider backed by the ufocatch Atom mirror.
///
/// Fetches the per-symbol feed, classifies entries by report type and,
/// when a package directory is configured, downloads each entry's zip
/// package and extracts the contained XBRL instance documents.
///
/// # Example
/// ```
/// use edinet_feed::{RetryPolicy, UfocatchProvider};
/// use std::time::Duration;
///
/// let provider = UfocatchProvider::new()
///     .with_retry_policy(RetryPolicy { max_attempts: 3, backoff: Duration::from_secs(2) })
///     .with_package_dir("filings");
/// ```
#[derive(Debug)]
pub struct UfocatchProvider {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    retry: RetryPolicy,
    package_dir: Option<PathBuf>,
}

impl Default for UfocatchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl UfocatchProvider {
    /// Create a provider with the default HTTP client and feed URL.
    ///
    /// The client identifies itself with a crate-versioned user agent and
    /// times out requests after 30 seconds.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client)
    }

    /// Create a provider with a pre-configured HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(MIN_REQUEST_INTERVAL))),
            retry: RetryPolicy::default(),
            package_dir: None,
        }
    }

    /// Override the feed base URL (primarily for tests and mirrors).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the retry policy for transient feed failures.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enable package fetching: every entry's zip package is downloaded
    /// and its XBRL documents are extracted under `dir`.
    #[must_use]
    pub fn with_package_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.package_dir = Some(dir.into());
        self
    }

    /// Fetch the raw Atom feed for a symbol, retrying transient failures
    /// per the configured policy.
    async fn fetch_feed(&self, symbol: &Symbol) -> Result<String> {
        let url = format!("{}/{}", self.base_url, symbol);
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            self.rate_limiter.lock().await.wait().await;

            debug!("Fetching filing feed from {} (attempt {})", url, attempt);
            match self.get_text(&url).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    warn!("Feed request for {} failed: {}", symbol, err);
                    last_error = Some(err);
                    if attempt < self.retry.max_attempts {
                        sleep(self.retry.backoff).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EdinetError::InvalidParameter("Retry policy allows zero attempts".to_string())
        }))
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EdinetError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EdinetError::Network(format!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| EdinetError::Network(e.to_string()))
    }

    /// Download one entry's zip package and extract its XBRL documents.
    ///
    /// A non-success HTTP status skips the package with a warning; the
    /// entry itself stays in the result with no documents.
    async fn fetch_package(&self, entry: &mut FilingEntry, dir: &Path) -> Result<()> {
        self.rate_limiter.lock().await.wait().await;

        debug!("Fetching XBRL package from {}", entry.package_url);
        let response = self
            .client
            .get(&entry.package_url)
            .send()
            .await
            .map_err(|e| EdinetError::Network(e.to_string()))?;

        if !response.status().is_success() {
            warn!(
                "Package download for {} failed: HTTP {}",
                entry.doc_id,
                response.status()
            );
            return Ok(());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EdinetError::Network(e.to_string()))?;

        entry.xbrl_documents = extract_xbrl_documents(&bytes, entry.is_securities_report, dir)?;
        Ok(())
    }
}

impl DataProvider for UfocatchProvider {
    fn name(&self) -> &str {
        "EDINET (ufocatch)"
    }

    fn description(&self) -> &str {
        "EDINET filing feed provider for Japanese securities and quarterly reports via the ufocatch Atom mirror"
    }
}

#[async_trait]
impl FilingProvider for UfocatchProvider {
    async fn fetch_filings(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FilingEntry>> {
        if start > end {
            return Err(EdinetError::InvalidParameter(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        let body = self.fetch_feed(symbol).await?;
        let mut entries = parse_feed(&body, start, end)?;

        if let Some(dir) = &self.package_dir {
            for entry in &mut entries {
                self.fetch_package(entry, dir).await?;
            }
        }

        // Settle before returning so back-to-back reads stay paced.
        sleep(SETTLE_DELAY).await;

        debug!("Fetched {} filings for {}", entries.len(), symbol);
        Ok(entries)
    }
}

/// Parse an Atom feed document into filing entries inside the window.
///
/// The `updated` timestamp decides window membership, compared
/// date-granular and inclusive on both ends. Entries outside the window
/// are skipped before any other field is touched, so incomplete entries
/// there never fail the parse. An in-window entry missing a required
/// field is a [`EdinetError::Parse`].
pub fn parse_feed(xml: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<FilingEntry>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| EdinetError::Parse(format!("Invalid feed XML: {}", e)))?;

    let mut entries = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.has_tag_name((ATOM_NS, "entry")))
    {
        let updated = parse_updated(required_text(node, "updated")?)?;
        if !(start..=end).contains(&updated.date()) {
            continue;
        }

        let id = required_text(node, "id")?;
        let title = required_text(node, "title")?;
        let doc_id = required_text(node, "docid")?;
        let package_url = node
            .children()
            .find(|n| {
                n.has_tag_name((ATOM_NS, "link")) && n.attribute("type") == Some("application/zip")
            })
            .and_then(|n| n.attribute("href"))
            .ok_or_else(|| {
                EdinetError::Parse(format!("Feed entry {} has no application/zip link", id))
            })?;

        let is_securities_report =
            title.contains(ANNUAL_REPORT_MARKER) || title.contains(QUARTERLY_REPORT_MARKER);
        let is_quarterly = title.contains(QUARTERLY_REPORT_MARKER);

        entries.push(FilingEntry {
            id: id.to_string(),
            title: title.to_string(),
            doc_id: doc_id.to_string(),
            package_url: package_url.to_string(),
            updated,
            is_securities_report,
            is_quarterly,
            xbrl_documents: Vec::new(),
        });
    }

    Ok(entries)
}

fn required_text<'a>(entry: roxmltree::Node<'a, '_>, local: &str) -> Result<&'a str> {
    entry
        .children()
        .find(|n| n.has_tag_name((ATOM_NS, local)))
        .and_then(|n| n.text())
        .ok_or_else(|| EdinetError::Parse(format!("Feed entry missing element: {}", local)))
}

/// Parse a feed timestamp into a timezone-naive value.
///
/// The feed publishes offset timestamps; window comparison is naive, so
/// the offset is discarded and the clock time kept as written.
fn parse_updated(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    if let Ok(stamped) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamped.naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| EdinetError::Parse(format!("Invalid updated timestamp {:?}: {}", trimmed, e)))
}

/// Extract the XBRL instance documents from a zip package into `dir`.
///
/// Only packages of classified reports are unpacked; the qualifying
/// members are those whose path contains ".xbrl" and not "AuditDoc".
/// Archive directory structure is preserved under `dir`. Returns the
/// paths of all extracted documents.
pub fn extract_xbrl_documents(bytes: &[u8], is_report: bool, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| EdinetError::Package(format!("Invalid zip package: {}", e)))?;

    let mut extracted = Vec::new();
    for index in 0..archive.len() {
        let mut member = archive
            .by_index(index)
            .map_err(|e| EdinetError::Package(format!("Unreadable zip member: {}", e)))?;
        let name = member.name().to_string();

        if !(is_report && name.contains(".xbrl") && !name.contains("AuditDoc")) {
            continue;
        }

        let Some(enclosed) = member.enclosed_name() else {
            warn!("Skipping zip member with unsafe path: {}", name);
            continue;
        };
        let target = dir.join(enclosed);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EdinetError::Package(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut contents = Vec::with_capacity(member.size() as usize);
        member
            .read_to_end(&mut contents)
            .map_err(|e| EdinetError::Package(format!("Failed to read {}: {}", name, e)))?;
        std::fs::write(&target, &contents).map_err(|e| {
            EdinetError::Package(format!("Failed to write {}: {}", target.display(), e))
        })?;

        debug!("Extracted {}", target.display());
        extracted.push(target);
    }

    Ok(extracted)
}
