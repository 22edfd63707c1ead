//! Shared test utilities for corpus and query testing

use crate::{
    corpus::Corpus,
    text::{RawBook, RawChapter, RawVerse, TextCorpus},
    xref::{CrossRefIndex, LinkCorpus, RawLink},
};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Helper function to create a book with numbered verses whose text is `"<name> c:v"`
pub fn create_test_book(name: &str, chapters: &[(u32, u32)]) -> RawBook {
    RawBook {
        name: name.to_string(),
        chapters: chapters
            .iter()
            .map(|(chapter, verse_count)| RawChapter {
                chapter: *chapter,
                verses: (1..=*verse_count)
                    .map(|verse| RawVerse {
                        verse,
                        text: format!("{name} {chapter}:{verse}"),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Unweighted links from (source, target) pairs
pub fn create_test_links(pairs: &[(&str, &str)]) -> Vec<RawLink> {
    pairs
        .iter()
        .map(|(source, target)| RawLink::new(*source, *target))
        .collect()
}

pub fn create_test_index(pairs: &[(&str, &str)]) -> CrossRefIndex {
    init_logging();
    CrossRefIndex::build(&create_test_links(pairs))
}

/// A small corpus spanning both testaments, with abbreviated book names in both feeds
pub fn create_test_corpus() -> Corpus {
    init_logging();
    let text = TextCorpus::new(vec![
        create_test_book("Genesis", &[(1, 31), (2, 25)]),
        create_test_book("Exod", &[(20, 26)]),
        create_test_book("1 Sam", &[(16, 23)]),
        create_test_book("Matthew", &[(1, 25)]),
        create_test_book("John", &[(1, 51)]),
    ]);
    let links = LinkCorpus::new(vec![
        RawLink::new("Gen.1.1", "John.1.1"),
        RawLink::new("Gen.1.1", "Heb.11.3"),
        RawLink::new("Gen.1.2", "John.1.5"),
        RawLink::new("Gen.1.3", "Matt.1.1"),
        RawLink::weighted("Gen.1.27", "Matt.19.4", 3),
        RawLink::new("Gen.2.2", "Exod.20.11"),
        RawLink::new("1Sam16v7", "John7v24"),
    ]);
    Corpus::new(text, links)
}
