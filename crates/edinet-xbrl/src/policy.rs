//! Extraction error policy and diagnostics.
//!
//! Every fact-resolution failure (not the "no match" default path) is
//! routed through one [`ErrorPolicy`] injected into the extractor. The
//! logged mode writes to a caller-owned [`DiagnosticSink`]; the library
//! never configures logging itself.

use std::fmt::Debug;

use tracing::error;

use edinet_core::{EdinetError, Result};

/// How fact-extraction failures propagate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Propagate the first failure, aborting the filing's extraction.
    Strict,
    /// Substitute 0.0 for the failing field and continue.
    #[default]
    Lenient,
    /// Report the failure to the diagnostic sink, substitute 0.0 and
    /// continue. Never aborts.
    Logged,
}

impl ErrorPolicy {
    /// Routes one extraction failure according to the mode, returning the
    /// substitute value when the failure is absorbed.
    pub(crate) fn absorb(self, err: EdinetError, sink: &dyn DiagnosticSink) -> Result<f64> {
        match self {
            Self::Strict => Err(err),
            Self::Lenient => Ok(0.0),
            Self::Logged => {
                sink.record(&err);
                Ok(0.0)
            }
        }
    }
}

/// Receives extraction failures under [`ErrorPolicy::Logged`].
pub trait DiagnosticSink: Send + Sync + Debug {
    /// Records one extraction failure.
    fn record(&self, error: &EdinetError);
}

/// Default sink forwarding failures to [`tracing::error!`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, error: &EdinetError) {
        error!("extraction failure: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct CollectingSink {
        messages: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for CollectingSink {
        fn record(&self, error: &EdinetError) {
            self.messages.lock().unwrap().push(error.to_string());
        }
    }

    fn sample_error() -> EdinetError {
        EdinetError::Extraction {
            concept: "jpcrp_cor:NetSalesSummaryOfBusinessResults".to_string(),
            text: "n/a".to_string(),
            reason: "missing contextRef attribute".to_string(),
        }
    }

    #[test]
    fn test_strict_propagates() {
        let sink = CollectingSink::default();
        let result = ErrorPolicy::Strict.absorb(sample_error(), &sink);
        assert!(result.is_err());
        assert!(sink.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_lenient_substitutes_zero() {
        let sink = CollectingSink::default();
        let result = ErrorPolicy::Lenient.absorb(sample_error(), &sink);
        assert_eq!(result.unwrap(), 0.0);
        assert!(sink.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_logged_records_and_substitutes() {
        let sink = CollectingSink::default();
        let result = ErrorPolicy::Logged.absorb(sample_error(), &sink);
        assert_eq!(result.unwrap(), 0.0);
        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("NetSales"));
    }

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Lenient);
    }
}
