//! The raw link feed and the [CrossRefIndex] built from it.
//!
//! Links are bucketed by their source chapter under the key
//! `to_id_prefix(book) + chapter + "v"`, so all verse-level links leaving one chapter are one
//! hash lookup away.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, path::Path};

use crate::{
    feed::{records_from_value, BuildReport},
    names::{to_id_prefix, BookName},
    reference::{parse, ParsedReference},
    ScriptureError,
};

/// Weight assumed for a link record that carries none.
pub const DEFAULT_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLink {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl RawLink {
    pub fn new<S: Into<String>, T: Into<String>>(source: S, target: T) -> RawLink {
        RawLink {
            source: source.into(),
            target: target.into(),
            weight: None,
        }
    }

    pub fn weighted<S: Into<String>, T: Into<String>>(source: S, target: T, weight: u32) -> RawLink {
        RawLink {
            weight: Some(weight),
            ..RawLink::new(source, target)
        }
    }
}

/// The link feed as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCorpus {
    pub links: Vec<RawLink>,
}

impl LinkCorpus {
    pub fn new(links: Vec<RawLink>) -> Self {
        LinkCorpus { links }
    }

    pub fn from_value(value: Value) -> Result<Self, ScriptureError> {
        Ok(LinkCorpus {
            links: records_from_value(value, "link")?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptureError> {
        LinkCorpus::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScriptureError> {
        tracing::debug!("Reading link corpus from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path)?;
        LinkCorpus::from_json_str(&content)
    }
}

/// An indexed link. `source` always parses to a verse-level reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    pub weight: u32,
    pub source_ref: ParsedReference,
    /// `None` when the target identifier does not parse; such links are still served.
    pub target_ref: Option<ParsedReference>,
}

/// Bucket key for the links leaving `book` chapter `chapter`. `book` may be any spelling.
pub fn bucket_key(book: &str, chapter: u32) -> String {
    format!("{}{}v", to_id_prefix(book), chapter)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossRefIndex {
    buckets: HashMap<String, Vec<LinkRecord>>,
    report: BuildReport,
}

impl CrossRefIndex {
    /// Build the index in one pass. A link is skipped when its source does not parse, parses
    /// without a verse, or when it carries a weight of zero.
    #[tracing::instrument(skip_all)]
    pub fn build(links: &[RawLink]) -> CrossRefIndex {
        let mut index = CrossRefIndex::default();
        for link in links {
            let Some(source_ref) = parse(&link.source) else {
                tracing::debug!(
                    "[CrossRefIndex::build] skipping link with unparseable source '{}'",
                    link.source
                );
                index.report.skipped += 1;
                continue;
            };
            if source_ref.verse.is_none() {
                tracing::debug!(
                    "[CrossRefIndex::build] skipping link with chapter-level source '{}'",
                    link.source
                );
                index.report.skipped += 1;
                continue;
            }
            let weight = link.weight.unwrap_or(DEFAULT_WEIGHT);
            if weight == 0 {
                tracing::debug!(
                    "[CrossRefIndex::build] skipping zero-weight link {} -> {}",
                    link.source,
                    link.target
                );
                index.report.skipped += 1;
                continue;
            }

            let target_ref = parse(&link.target);
            index.note_fallback(&source_ref);
            if let Some(target_ref) = target_ref.as_ref() {
                index.note_fallback(target_ref);
            }

            let key = bucket_key(&source_ref.book, source_ref.chapter);
            index.buckets.entry(key).or_default().push(LinkRecord {
                source: link.source.clone(),
                target: link.target.clone(),
                weight,
                source_ref,
                target_ref,
            });
            index.report.accepted += 1;
        }

        tracing::info!(
            "[CrossRefIndex::build] indexed {} links into {} chapter buckets ({} skipped)",
            index.report.accepted,
            index.buckets.len(),
            index.report.skipped
        );
        index
    }

    fn note_fallback(&mut self, reference: &ParsedReference) {
        if let BookName::Fallback(name) = reference.book_name() {
            if self.report.fallback_names.insert(reference.book.clone()) {
                tracing::warn!(
                    "[CrossRefIndex::build] book '{}' has no alias entry, indexing it as '{}'",
                    reference.book,
                    name
                );
            }
        }
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Links leaving `book` chapter `chapter`, in feed order. Empty when there are none.
    pub fn bucket(&self, book: &str, chapter: u32) -> &[LinkRecord] {
        self.bucket_by_key(&bucket_key(book, chapter))
    }

    pub fn bucket_by_key(&self, key: &str) -> &[LinkRecord] {
        self.buckets
            .get(key)
            .map(|records| records.as_slice())
            .unwrap_or_default()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.report.accepted
    }

    pub fn is_empty(&self) -> bool {
        self.report.accepted == 0
    }
}
