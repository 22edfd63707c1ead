//! The raw text feed and the [TextIndex] built from it.
//!
//! The index is a three level lookup, normalized book name → chapter → verse → text, built in
//! one pass over the feed and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::{btree_map::Entry, BTreeMap, HashMap},
    path::Path,
};
use thiserror::Error;

use crate::{
    canon::sort_canonically,
    feed::{records_from_value, skip_malformed, BuildReport},
    names::{resolve, BookName},
    reference::{parse, ParsedReference},
    ScriptureError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVerse {
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChapter {
    pub chapter: u32,
    #[serde(deserialize_with = "skip_malformed")]
    pub verses: Vec<RawVerse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBook {
    pub name: String,
    #[serde(deserialize_with = "skip_malformed")]
    pub chapters: Vec<RawChapter>,
}

/// The text feed as loaded: an ordered list of books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCorpus {
    pub books: Vec<RawBook>,
}

impl TextCorpus {
    pub fn new(books: Vec<RawBook>) -> Self {
        TextCorpus { books }
    }

    pub fn from_value(value: Value) -> Result<Self, ScriptureError> {
        Ok(TextCorpus {
            books: records_from_value(value, "text")?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptureError> {
        TextCorpus::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScriptureError> {
        tracing::debug!("Reading text corpus from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path)?;
        TextCorpus::from_json_str(&content)
    }
}

/// Why a text lookup came back empty. Each variant is an ordinary outcome that callers render
/// as a message, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum TextNotFound {
    #[error("'{0}' is not a recognized reference")]
    Unparseable(String),
    #[error("{0} is not in the text corpus")]
    Book(String),
    #[error("{book} has no chapter {chapter}")]
    Chapter { book: String, chapter: u32 },
    #[error("{book} {chapter} has no verse {verse}")]
    Verse {
        book: String,
        chapter: u32,
        verse: u32,
    },
}

type ChapterMap = BTreeMap<u32, BTreeMap<u32, String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextIndex {
    books: HashMap<String, ChapterMap>,
    report: BuildReport,
}

impl TextIndex {
    /// Build the index in one pass. Records with an empty book name or a zero chapter or verse
    /// number are skipped, as are repeated (book, chapter, verse) triples after the first.
    #[tracing::instrument(skip_all)]
    pub fn build(books: &[RawBook]) -> TextIndex {
        let mut index = TextIndex::default();
        for book in books {
            if book.name.trim().is_empty() {
                tracing::debug!("[TextIndex::build] skipping book record with an empty name");
                index.report.skipped += 1;
                continue;
            }
            let name = match resolve(&book.name) {
                BookName::Canonical(name) => name.to_string(),
                BookName::Fallback(name) => {
                    if index.report.fallback_names.insert(book.name.clone()) {
                        tracing::warn!(
                            "[TextIndex::build] book '{}' has no alias entry, indexing it as '{}'",
                            book.name,
                            name
                        );
                    }
                    name
                }
            };
            let chapters = index.books.entry(name.clone()).or_default();
            for chapter in book.chapters.iter() {
                if chapter.chapter == 0 {
                    tracing::debug!("[TextIndex::build] {}: skipping chapter 0", name);
                    index.report.skipped += chapter.verses.len().max(1);
                    continue;
                }
                let verses = chapters.entry(chapter.chapter).or_default();
                for verse in chapter.verses.iter() {
                    if verse.verse == 0 {
                        tracing::debug!(
                            "[TextIndex::build] {} {}: skipping verse 0",
                            name,
                            chapter.chapter
                        );
                        index.report.skipped += 1;
                        continue;
                    }
                    match verses.entry(verse.verse) {
                        Entry::Vacant(slot) => {
                            slot.insert(verse.text.clone());
                            index.report.accepted += 1;
                        }
                        Entry::Occupied(_) => {
                            tracing::debug!(
                                "[TextIndex::build] {} {}:{} repeats, keeping the first",
                                name,
                                chapter.chapter,
                                verse.verse
                            );
                            index.report.skipped += 1;
                        }
                    }
                }
            }
        }
        // A chapter whose verses were all rejected is not addressable
        for chapters in index.books.values_mut() {
            chapters.retain(|_, verses| !verses.is_empty());
        }
        index.books.retain(|_, chapters| !chapters.is_empty());

        tracing::info!(
            "[TextIndex::build] indexed {} verses across {} books ({} skipped)",
            index.report.accepted,
            index.books.len(),
            index.report.skipped
        );
        index
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Verses of `reference` in increasing verse order: the whole chapter when no verse is
    /// given, otherwise just the one verse.
    pub fn passage(&self, reference: &ParsedReference) -> Result<Vec<(u32, &str)>, TextNotFound> {
        let book = reference.book_name().into_string();
        let chapters = self
            .books
            .get(&book)
            .ok_or_else(|| TextNotFound::Book(book.clone()))?;
        let verses = chapters
            .get(&reference.chapter)
            .ok_or_else(|| TextNotFound::Chapter {
                book: book.clone(),
                chapter: reference.chapter,
            })?;
        match reference.verse {
            Some(verse) => verses
                .get(&verse)
                .map(|text| vec![(verse, text.as_str())])
                .ok_or(TextNotFound::Verse {
                    book,
                    chapter: reference.chapter,
                    verse,
                }),
            None => Ok(verses
                .iter()
                .map(|(verse, text)| (*verse, text.as_str()))
                .collect()),
        }
    }

    /// Chapter text (verses joined by single spaces) or a single verse's text.
    pub fn lookup(&self, reference: &ParsedReference) -> Result<String, TextNotFound> {
        let passage = self.passage(reference)?;
        Ok(passage
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Parse `reference_id` and look it up.
    pub fn get_text(&self, reference_id: &str) -> Result<String, TextNotFound> {
        let reference = parse(reference_id)
            .ok_or_else(|| TextNotFound::Unparseable(reference_id.to_string()))?;
        self.lookup(&reference)
    }

    /// Normalized names of the books present, in canonical order.
    pub fn books(&self) -> Vec<String> {
        sort_canonically(self.books.keys())
    }

    /// Chapter numbers present for `book` (any spelling), ascending.
    pub fn chapters(&self, book: &str) -> Vec<u32> {
        self.books
            .get(resolve(book).as_str())
            .map(|chapters| chapters.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn verse_count(&self) -> usize {
        self.report.accepted
    }
}
