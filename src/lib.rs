//! # scripture-xref
//!
//! A Rust library for indexing a scripture text corpus and a cross-reference corpus, and for
//! answering reference lookups and connection queries over them at interactive latency.
//!
//! ## Overview
//!
//! Two raw feeds are loaded once: the **text feed** (books → chapters → verses) and the
//! **link feed** (verse-level `source → target` cross-references with an optional weight).
//! Each is turned into an immutable index the first time it is needed. Every later query hits
//! only the indices.
//!
//! ### Key Features
//!
//! - **Forgiving identifiers**: `1 Sam.16.7`, `1Samuel16v7`, `Genesis1:1` and `SongofSolomon2`
//!   all parse, and any spelling of a book converges on one canonical name
//! - **Canonical ordering**: results follow the 66-book Protestant order, unknown books last
//! - **Chapter aggregation**: verse-level links collapse into weighted chapter-to-chapter links
//! - **Error tolerance**: malformed feed records are skipped and reported, not fatal
//! - **Data-quality audit**: book names that miss the alias tables are surfaced
//!
//! ## Architecture
//!
//! - **[`canon`]**: the canonical order table
//! - **[`reference`]**: the reference identifier parser ([`reference::ParsedReference`])
//! - **[`names`]**: book name normalization ([`names::to_display_name`], [`names::to_id_prefix`])
//! - **[`text`]**: the text feed and [`text::TextIndex`]
//! - **[`xref`]**: the link feed and [`xref::CrossRefIndex`]
//! - **[`query`]**: connection queries ([`query::query`], [`query::Mode`])
//! - **[`corpus`]**: [`corpus::Corpus`], owning both feeds and their once-built indices
//!
//! ## Quick Start
//!
//! ```rust
//! use scripture_xref::{
//!     corpus::Corpus,
//!     query::Mode,
//!     text::TextCorpus,
//!     xref::{LinkCorpus, RawLink},
//! };
//!
//! let text = TextCorpus::from_json_str(
//!     r#"[{"name": "Genesis", "chapters": [
//!         {"chapter": 1, "verses": [{"verse": 1, "text": "In the beginning God created the heaven and the earth."}]}
//!     ]}]"#,
//! )?;
//! let links = LinkCorpus::new(vec![
//!     RawLink::new("Gen.1.1", "John.1.1"),
//!     RawLink::new("Gen.1.1", "Heb.11.3"),
//! ]);
//! let corpus = Corpus::new(text, links);
//!
//! assert!(corpus.get_text("Genesis1:1").unwrap().starts_with("In the beginning"));
//!
//! let connections = corpus
//!     .get_connections(Some("Genesis"), Some(1), Mode::Chapter)
//!     .expect("a book and chapter were selected");
//! let ids: Vec<_> = connections.nodes.iter().map(|node| node.id.as_str()).collect();
//! assert_eq!(ids, ["Genesis1", "John1", "Hebrews11"]);
//! # Ok::<(), scripture_xref::ScriptureError>(())
//! ```
//!
//! ## Misses Are Values
//!
//! Nothing on the query path fails with an error:
//!
//! - [`reference::parse`] returns `None` for an unrecognized identifier
//! - [`text::TextIndex::lookup`] returns a [`text::TextNotFound`] naming the missing book,
//!   chapter or verse
//! - [`query::query`] returns `None` when no selection was made and an empty
//!   [`query::Connections`] when the selection has no links
//!
//! [`ScriptureError`] is reserved for loading problems: unreadable files, feeds whose top level
//! is not a list, and bad configuration.
//!
//! ## Features
//!
//! - **default**: the library
//! - **bin**: the `xref` command-line tool

pub mod canon;
pub mod config;
pub mod corpus;
pub mod error;
pub mod feed;
pub mod names;
pub mod query;
pub mod reference;
pub mod text;
pub mod xref;

#[cfg(test)]
mod tests;

pub use error::*;
