//! XBRL instance document model.
//!
//! [`XbrlDocument::parse`] flattens an instance document into owned
//! [`Fact`]s in document order and builds a lowercased name index so
//! concept lookup is a hash probe instead of a tree scan.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use edinet_core::{EdinetError, Result};

/// Structural elements of an instance document that never carry facts.
const NON_FACT_ELEMENTS: [&str; 4] = ["context", "unit", "xbrl", "schemaRef"];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// A single fact from an XBRL instance document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Qualified tag name as written in the document (e.g.
    /// `jpdei_cor:EDINETCodeDEI`).
    pub name: String,
    /// Text content with whitespace collapsed and trimmed.
    pub value: String,
    /// The `contextRef` attribute linking the fact to a reporting period.
    pub context_ref: Option<String>,
    /// The `unitRef` attribute, when present.
    pub unit_ref: Option<String>,
    /// The `decimals` attribute, when present.
    pub decimals: Option<String>,
}

impl Fact {
    /// Returns whether the context reference, split on underscores,
    /// contains any of the given context ids.
    ///
    /// `None` when the fact carries no context reference at all, so the
    /// caller can treat that as an extraction failure rather than a
    /// mismatch.
    #[must_use]
    pub fn context_matches(&self, context_ids: &[String]) -> Option<bool> {
        let context_ref = self.context_ref.as_deref()?;
        Some(
            context_ref
                .split('_')
                .any(|segment| context_ids.iter().any(|id| id == segment)),
        )
    }
}

/// A parsed XBRL instance document.
///
/// Owns its facts; nothing borrows from the raw XML after parsing.
#[derive(Clone, Debug, Default)]
pub struct XbrlDocument {
    facts: Vec<Fact>,
    index: HashMap<String, Vec<usize>>,
}

impl XbrlDocument {
    /// Parses an instance document from its XML text.
    ///
    /// Facts are the namespaced direct children of the root element;
    /// context, unit and schema-reference machinery is skipped.
    pub fn parse(xml: &str) -> Result<Self> {
        let tree = roxmltree::Document::parse(xml)
            .map_err(|e| EdinetError::Parse(format!("invalid XBRL document: {e}")))?;

        let mut facts = Vec::new();
        for node in tree.root_element().children() {
            if !node.is_element() {
                continue;
            }
            let local = node.tag_name().name();
            if NON_FACT_ELEMENTS.contains(&local) || node.tag_name().namespace().is_none() {
                continue;
            }

            let namespace = node.tag_name().namespace().unwrap_or("");
            let prefix = node.lookup_prefix(namespace).unwrap_or("");
            let name = if prefix.is_empty() {
                local.to_string()
            } else {
                format!("{prefix}:{local}")
            };

            let value = WHITESPACE
                .replace_all(node.text().unwrap_or(""), " ")
                .trim()
                .to_string();

            facts.push(Fact {
                name,
                value,
                context_ref: attribute_ignore_case(&node, "contextRef"),
                unit_ref: attribute_ignore_case(&node, "unitRef"),
                decimals: attribute_ignore_case(&node, "decimals"),
            });
        }

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, fact) in facts.iter().enumerate() {
            index
                .entry(fact.name.to_lowercase())
                .or_default()
                .push(position);
        }

        Ok(Self { facts, index })
    }

    /// Reads and parses an instance document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)
            .map_err(|e| EdinetError::Other(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&xml)
    }

    /// Returns all facts in document order.
    #[must_use]
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Returns the facts matching a qualified name, case-insensitively,
    /// in document order.
    #[must_use]
    pub fn facts_by_name(&self, name: &str) -> Vec<&Fact> {
        self.index
            .get(&name.to_lowercase())
            .map(|positions| positions.iter().map(|&i| &self.facts[i]).collect())
            .unwrap_or_default()
    }

    /// Returns the number of facts in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if the document contains no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Looks up an attribute by name without regard to case.
///
/// Instance documents in the wild vary between `contextRef` and
/// `contextref`.
fn attribute_ignore_case(node: &roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    node.attributes()
        .find(|a| a.name().eq_ignore_ascii_case(name))
        .map(|a| a.value().to_string())
}
