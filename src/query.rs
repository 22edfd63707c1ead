//! Connection queries: the node/link subgraph of cross-references leaving one chapter.
//!
//! In [Mode::Verse] every indexed link becomes one [Link] between the identifiers exactly as
//! the feed wrote them. In [Mode::Chapter] both endpoints are truncated to canonical chapter
//! identifiers (`Genesis1`, `1Samuel16`) and links that collapse onto the same pair are merged,
//! summing their weights.
//!
//! Results are ordered canonically: by book position (unknown books last), chapter, verse
//! (chapter-level before verse-level), then identifier.

use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    canon::index_of,
    names::resolve,
    reference::{parse, ParsedReference},
    xref::{CrossRefIndex, LinkRecord},
    ScriptureError,
};

/// Query granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Chapter,
    Verse,
}

impl FromStr for Mode {
    type Err = ScriptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chapter" => Ok(Mode::Chapter),
            "verse" => Ok(Mode::Verse),
            other => Err(ScriptureError::Command(format!(
                "unknown mode '{other}', expected 'chapter' or 'verse'"
            ))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Chapter => write!(f, "chapter"),
            Mode::Verse => write!(f, "verse"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Normalized book name, used for coloring and sorting.
    pub book: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub value: u32,
}

/// A query result. An empty value means a valid selection with no connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connections {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Connections {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Canonical ordering key for a reference identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub book_index: usize,
    pub chapter: u32,
    pub verse: Option<u32>,
    pub id: String,
}

impl SortKey {
    /// Key for an arbitrary identifier. An identifier that does not parse sorts after every
    /// parsed reference with the same book position, then by its text.
    pub fn of(id: &str) -> SortKey {
        Endpoint::new(id.to_string(), parse(id).as_ref()).key
    }
}

#[derive(Debug, Clone)]
struct Endpoint {
    key: SortKey,
    node: Node,
}

impl Endpoint {
    fn new(id: String, reference: Option<&ParsedReference>) -> Endpoint {
        match reference {
            Some(reference) => {
                let book = reference.book_name().into_string();
                Endpoint {
                    key: SortKey {
                        book_index: index_of(&book),
                        chapter: reference.chapter,
                        verse: reference.verse,
                        id: id.clone(),
                    },
                    node: Node {
                        label: reference.label(),
                        book,
                        id,
                    },
                }
            }
            None => {
                let book = resolve(&id).into_string();
                Endpoint {
                    key: SortKey {
                        book_index: index_of(&book),
                        chapter: u32::MAX,
                        verse: None,
                        id: id.clone(),
                    },
                    node: Node {
                        label: id.clone(),
                        book,
                        id,
                    },
                }
            }
        }
    }
}

/// Query-facing endpoints of one indexed link at the given granularity.
fn endpoints(record: &LinkRecord, mode: Mode) -> (Endpoint, Endpoint) {
    match mode {
        Mode::Verse => (
            Endpoint::new(record.source.clone(), Some(&record.source_ref)),
            Endpoint::new(record.target.clone(), record.target_ref.as_ref()),
        ),
        Mode::Chapter => {
            let source = record.source_ref.to_chapter();
            let target = record.target_ref.as_ref().map(ParsedReference::to_chapter);
            let target_id = target
                .as_ref()
                .map(ParsedReference::chapter_id)
                .unwrap_or_else(|| record.target.clone());
            (
                Endpoint::new(source.chapter_id(), Some(&source)),
                Endpoint::new(target_id, target.as_ref()),
            )
        }
    }
}

/// The connection subgraph for `book` chapter `chapter`.
///
/// Returns `None` when either half of the selection is missing (or the book is blank), and an
/// empty [Connections] when the selection is valid but nothing leaves it.
#[tracing::instrument(skip(index))]
pub fn query(
    index: &CrossRefIndex,
    book: Option<&str>,
    chapter: Option<u32>,
    mode: Mode,
) -> Option<Connections> {
    let book = book.map(str::trim).filter(|book| !book.is_empty())?;
    let chapter = chapter?;
    let bucket = index.bucket(book, chapter);
    tracing::debug!("{} indexed links leave {} {}", bucket.len(), book, chapter);

    let mut nodes: HashMap<String, Endpoint> = HashMap::new();
    let mut links: Vec<(SortKey, SortKey, Link)> = Vec::with_capacity(bucket.len());
    // (source id, target id) -> position in `links`, chapter mode only
    let mut merged: HashMap<(String, String), usize> = HashMap::new();

    for record in bucket {
        let (source, target) = endpoints(record, mode);
        let pair = (source.node.id.clone(), target.node.id.clone());
        let existing = match mode {
            Mode::Chapter => merged.get(&pair).copied(),
            Mode::Verse => None,
        };
        if let Some(position) = existing {
            let merged_link = &mut links[position].2;
            merged_link.value = merged_link.value.saturating_add(record.weight);
        } else {
            if mode == Mode::Chapter {
                merged.insert(pair.clone(), links.len());
            }
            let (source_id, target_id) = pair;
            links.push((
                source.key.clone(),
                target.key.clone(),
                Link {
                    source: source_id,
                    target: target_id,
                    value: record.weight,
                },
            ));
        }
        nodes.entry(source.node.id.clone()).or_insert(source);
        nodes.entry(target.node.id.clone()).or_insert(target);
    }

    let nodes = nodes
        .into_values()
        .map(|endpoint| (endpoint.key, endpoint.node))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect::<Vec<_>>();

    links.sort_by(|(a_source, a_target, _), (b_source, b_target, _)| {
        a_target.cmp(b_target).then_with(|| a_source.cmp(b_source))
    });

    Some(Connections {
        nodes,
        links: links.into_iter().map(|(_, _, link)| link).collect(),
    })
}
