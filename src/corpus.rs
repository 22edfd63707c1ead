//! [Corpus] owns the two raw feeds and the indices built from them.
//!
//! Each index is built the first time it is needed and cached for the life of the corpus.
//! Construction sits behind a [OnceCell], so concurrent first calls build once and every caller
//! receives the same index. After that, all access is read-only and needs no locking.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, path::Path};

use crate::{
    config::ScriptureConfig,
    names::{missing_alias_entries, AliasTable},
    query::{query, Connections, Mode},
    text::{TextCorpus, TextIndex, TextNotFound},
    xref::{CrossRefIndex, LinkCorpus},
    ScriptureError,
};

#[derive(Debug, Default)]
pub struct Corpus {
    text: TextCorpus,
    links: LinkCorpus,
    text_index: OnceCell<TextIndex>,
    xref_index: OnceCell<CrossRefIndex>,
}

/// Data-quality findings for a loaded corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusAudit {
    /// Book names in the text feed that only resolved through the title-case fallback.
    pub text_fallbacks: BTreeSet<String>,
    /// Book tokens in link identifiers that only resolved through the fallback.
    pub link_fallbacks: BTreeSet<String>,
    /// Records dropped while building the text index.
    pub text_skipped: usize,
    /// Records dropped while building the cross-reference index.
    pub links_skipped: usize,
    /// Canonical names without an entry in one of the alias tables.
    pub missing_aliases: Vec<(String, AliasTable)>,
}

impl CorpusAudit {
    pub fn is_clean(&self) -> bool {
        self.text_fallbacks.is_empty()
            && self.link_fallbacks.is_empty()
            && self.missing_aliases.is_empty()
    }
}

impl Corpus {
    pub fn new(text: TextCorpus, links: LinkCorpus) -> Corpus {
        Corpus {
            text,
            links,
            ..Default::default()
        }
    }

    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        text_path: P,
        links_path: Q,
    ) -> Result<Corpus, ScriptureError> {
        Ok(Corpus::new(
            TextCorpus::from_path(text_path)?,
            LinkCorpus::from_path(links_path)?,
        ))
    }

    /// Load both feeds named by `config`. With `strict_names` set, the indices are built
    /// immediately and any book name that misses the alias tables fails the load.
    pub fn from_config(config: &ScriptureConfig) -> Result<Corpus, ScriptureError> {
        let corpus = Corpus::from_paths(&config.text_corpus, &config.link_corpus)?;
        if config.strict_names {
            let audit = corpus.audit();
            if !audit.is_clean() {
                let names = audit
                    .text_fallbacks
                    .iter()
                    .chain(audit.link_fallbacks.iter())
                    .cloned()
                    .collect::<BTreeSet<_>>();
                return Err(ScriptureError::Corpus(format!(
                    "strict_names is set and these book names have no alias entry: {}",
                    names.into_iter().collect::<Vec<_>>().join(", ")
                )));
            }
        }
        Ok(corpus)
    }

    pub fn text_corpus(&self) -> &TextCorpus {
        &self.text
    }

    pub fn link_corpus(&self) -> &LinkCorpus {
        &self.links
    }

    pub fn text_index(&self) -> &TextIndex {
        self.text_index
            .get_or_init(|| TextIndex::build(&self.text.books))
    }

    pub fn xref_index(&self) -> &CrossRefIndex {
        self.xref_index
            .get_or_init(|| CrossRefIndex::build(&self.links.links))
    }

    /// Whether both indices have been built yet.
    pub fn is_built(&self) -> bool {
        self.text_index.get().is_some() && self.xref_index.get().is_some()
    }

    /// Chapter or verse text for `reference_id`.
    pub fn get_text(&self, reference_id: &str) -> Result<String, TextNotFound> {
        self.text_index().get_text(reference_id)
    }

    /// See [crate::query::query].
    pub fn get_connections(
        &self,
        book: Option<&str>,
        chapter: Option<u32>,
        mode: Mode,
    ) -> Option<Connections> {
        query(self.xref_index(), book, chapter, mode)
    }

    /// Books present in the text feed, normalized and in canonical order. Names outside the
    /// canon come last.
    pub fn list_canonical_books(&self) -> Vec<String> {
        self.text_index().books()
    }

    /// Builds both indices if needed and collects their data-quality findings.
    pub fn audit(&self) -> CorpusAudit {
        let text_report = self.text_index().report();
        let link_report = self.xref_index().report();
        let audit = CorpusAudit {
            text_fallbacks: text_report.fallback_names.clone(),
            link_fallbacks: link_report.fallback_names.clone(),
            text_skipped: text_report.skipped,
            links_skipped: link_report.skipped,
            missing_aliases: missing_alias_entries()
                .into_iter()
                .map(|(name, table)| (name.to_string(), table))
                .collect(),
        };
        if !audit.is_clean() {
            tracing::warn!(
                "[Corpus::audit] {} text and {} link book names hit the fallback path",
                audit.text_fallbacks.len(),
                audit.link_fallbacks.len()
            );
        }
        audit
    }
}
