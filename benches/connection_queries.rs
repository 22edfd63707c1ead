//! Performance benchmarks for index builds and queries
//!
//! The corpus is generated: every canonical book gets the same chapter/verse shape, and each
//! verse links to a few verses elsewhere in the canon. Measures:
//! - Index construction from the raw feeds
//! - Chapter-mode and verse-mode connection queries
//! - Text lookup by reference identifier
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scripture_xref::{
    canon::CANONICAL_BOOKS,
    corpus::Corpus,
    query::Mode,
    text::{RawBook, RawChapter, RawVerse, TextCorpus},
    xref::{CrossRefIndex, LinkCorpus, RawLink},
};

const CHAPTERS: u32 = 20;
const VERSES: u32 = 30;
const LINKS_PER_VERSE: usize = 3;

fn generate_text() -> TextCorpus {
    TextCorpus::new(
        CANONICAL_BOOKS
            .iter()
            .map(|name| RawBook {
                name: name.to_string(),
                chapters: (1..=CHAPTERS)
                    .map(|chapter| RawChapter {
                        chapter,
                        verses: (1..=VERSES)
                            .map(|verse| RawVerse {
                                verse,
                                text: format!("{name} {chapter}:{verse}"),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    )
}

// Deterministic spread of targets across the canon
fn generate_links() -> LinkCorpus {
    let mut links = Vec::new();
    for (book_idx, name) in CANONICAL_BOOKS.iter().enumerate() {
        let stem = name.replace(' ', "");
        for chapter in 1..=CHAPTERS {
            for verse in 1..=VERSES {
                for hop in 1..=LINKS_PER_VERSE {
                    let target_book = CANONICAL_BOOKS[(book_idx + hop * 7) % CANONICAL_BOOKS.len()]
                        .replace(' ', "");
                    let target_chapter = (chapter + hop as u32) % CHAPTERS + 1;
                    let target_verse = (verse * hop as u32) % VERSES + 1;
                    links.push(RawLink::new(
                        format!("{stem}.{chapter}.{verse}"),
                        format!("{target_book}.{target_chapter}.{target_verse}"),
                    ));
                }
            }
        }
    }
    LinkCorpus::new(links)
}

fn bench_index_build(c: &mut Criterion) {
    let links = generate_links();
    c.bench_function("cross_reference_index_build", |b| {
        b.iter(|| CrossRefIndex::build(black_box(&links.links)).len());
    });
}

fn bench_connection_queries(c: &mut Criterion) {
    let corpus = Corpus::new(generate_text(), generate_links());
    corpus.xref_index();

    c.bench_function("connections_chapter_mode", |b| {
        b.iter(|| {
            corpus
                .get_connections(black_box(Some("Gen")), black_box(Some(1)), Mode::Chapter)
                .map(|connections| connections.links.len())
        });
    });

    c.bench_function("connections_verse_mode", |b| {
        b.iter(|| {
            corpus
                .get_connections(black_box(Some("Psalms")), black_box(Some(12)), Mode::Verse)
                .map(|connections| connections.nodes.len())
        });
    });
}

fn bench_text_lookup(c: &mut Criterion) {
    let corpus = Corpus::new(generate_text(), generate_links());
    corpus.text_index();

    c.bench_function("text_verse_lookup", |b| {
        b.iter(|| corpus.get_text(black_box("1 Sam.16.7")).is_ok());
    });

    c.bench_function("text_chapter_lookup", |b| {
        b.iter(|| corpus.get_text(black_box("SongofSolomon2")).map(|text| text.len()));
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_connection_queries,
    bench_text_lookup
);
criterion_main!(benches);
