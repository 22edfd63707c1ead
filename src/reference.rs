//! [crate::reference] turns reference identifier strings into [ParsedReference]s and back.
//!
//! Accepted surface syntaxes:
//!
//! | Syntax        | Example          |
//! |---------------|------------------|
//! | dotted        | `1 Sam.16.7`, `Gen.1` |
//! | verse marker  | `1Samuel16v7`    |
//! | colon         | `Genesis1:1`, `John 3:16` |
//! | compact       | `SongofSolomon2` |
//!
//! A book token may open with a numeral (`1Samuel`) but is otherwise letters, so the numeral
//! is never read as the chapter. Mixed forms such as `Gen 1.1` match neither syntax.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    names::{id_stem, resolve_id_prefix, BookName},
    ScriptureError,
};

static DOTTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<book>[1-3]?\s*\p{L}[\p{L}\s']*?)\s*\.\s*(?P<chapter>\d+)(?:\s*\.\s*(?P<verse>\d+))?$",
    )
    .expect("dotted reference pattern is valid")
});

static CONCATENATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<book>[1-3]?\s*\p{L}[\p{L}\s.']*?)\s*(?P<chapter>\d+)(?:\s*(?P<sep>[v:])\s*(?P<verse>\d+))?$",
    )
    .expect("concatenated reference pattern is valid")
});

/// The surface syntax an identifier was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefSyntax {
    /// `Book.chapter.verse` or `Book.chapter`
    Dotted,
    /// `Bookchapter` + `v` + `verse`
    VerseMarker,
    /// `Bookchapter` + `:` + `verse`
    Colon,
    /// `Bookchapter`, no verse
    Compact,
}

/// A structured (book, chapter, verse?) triple. `book` is kept exactly as written; use
/// [ParsedReference::book_name] for the normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParsedReference {
    pub book: String,
    pub chapter: u32,
    /// `None` denotes chapter granularity.
    pub verse: Option<u32>,
}

/// Parse an identifier in any accepted syntax. Returns `None` when nothing matches, or when
/// the chapter or verse is zero or out of range.
pub fn parse(raw: &str) -> Option<ParsedReference> {
    parse_with_syntax(raw).map(|(reference, _)| reference)
}

/// Like [parse], also reporting which syntax matched.
pub fn parse_with_syntax(raw: &str) -> Option<(ParsedReference, RefSyntax)> {
    let trimmed = raw.trim();
    if let Some(caps) = DOTTED.captures(trimmed) {
        return from_captures(&caps).map(|reference| (reference, RefSyntax::Dotted));
    }
    let caps = CONCATENATED.captures(trimmed)?;
    let syntax = match caps.name("sep").map(|sep| sep.as_str()) {
        Some("v") => RefSyntax::VerseMarker,
        Some(_) => RefSyntax::Colon,
        None => RefSyntax::Compact,
    };
    from_captures(&caps).map(|reference| (reference, syntax))
}

fn from_captures(caps: &Captures<'_>) -> Option<ParsedReference> {
    let book = caps.name("book")?.as_str().trim();
    let chapter = positive(caps.name("chapter")?.as_str())?;
    let verse = match caps.name("verse") {
        Some(verse) => Some(positive(verse.as_str())?),
        None => None,
    };
    Some(ParsedReference {
        book: book.to_string(),
        chapter,
        verse,
    })
}

fn positive(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n >= 1)
}

impl ParsedReference {
    pub fn new<S: Into<String>>(book: S, chapter: u32, verse: Option<u32>) -> ParsedReference {
        ParsedReference {
            book: book.into(),
            chapter,
            verse,
        }
    }

    /// Normalized book name (see [crate::names::resolve_id_prefix]).
    pub fn book_name(&self) -> BookName {
        resolve_id_prefix(&self.book)
    }

    /// The same reference at chapter granularity.
    pub fn to_chapter(&self) -> ParsedReference {
        ParsedReference {
            book: self.book.clone(),
            chapter: self.chapter,
            verse: None,
        }
    }

    /// Re-serialize using the raw book token.
    ///
    /// `render` inverts [parse_with_syntax] for identifiers written without interior spacing
    /// around the chapter. A `Colon` or `VerseMarker` syntax applied to a chapter-level
    /// reference renders as `Compact`.
    pub fn render(&self, syntax: RefSyntax) -> String {
        match (syntax, self.verse) {
            (RefSyntax::Dotted, Some(verse)) => format!("{}.{}.{}", self.book, self.chapter, verse),
            (RefSyntax::Dotted, None) => format!("{}.{}", self.book, self.chapter),
            (RefSyntax::VerseMarker, Some(verse)) => {
                format!("{}{}v{}", self.book, self.chapter, verse)
            }
            (RefSyntax::Colon, Some(verse)) => format!("{}{}:{}", self.book, self.chapter, verse),
            (_, _) => format!("{}{}", self.book, self.chapter),
        }
    }

    /// Canonical chapter identifier built from the normalized name, e.g. `1Samuel16`.
    pub fn chapter_id(&self) -> String {
        format!("{}{}", id_stem(self.book_name().as_str()), self.chapter)
    }

    /// Canonical identifier at this reference's own granularity, e.g. `1Samuel16v7`.
    pub fn canonical_id(&self) -> String {
        match self.verse {
            Some(verse) => format!("{}v{}", self.chapter_id(), verse),
            None => self.chapter_id(),
        }
    }

    /// Human-readable label, e.g. `1 Samuel 16:7`.
    pub fn label(&self) -> String {
        let book = self.book_name();
        match self.verse {
            Some(verse) => format!("{} {}:{}", book, self.chapter, verse),
            None => format!("{} {}", book, self.chapter),
        }
    }
}

impl Display for ParsedReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(RefSyntax::VerseMarker))
    }
}

impl FromStr for ParsedReference {
    type Err = ScriptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).ok_or_else(|| {
            ScriptureError::Serialization(format!("unrecognized reference identifier '{s}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(book: &str, chapter: u32, verse: Option<u32>) -> ParsedReference {
        ParsedReference::new(book, chapter, verse)
    }

    #[test]
    fn test_parse_dotted() {
        assert_eq!(parse("1 Sam.16.7"), Some(reference("1 Sam", 16, Some(7))));
        assert_eq!(parse("Gen.1.1"), Some(reference("Gen", 1, Some(1))));
        assert_eq!(parse("Gen.1"), Some(reference("Gen", 1, None)));
    }

    #[test]
    fn test_parse_verse_marker_and_colon() {
        assert_eq!(parse("1Samuel16v7"), Some(reference("1Samuel", 16, Some(7))));
        assert_eq!(parse("Genesis1:1"), Some(reference("Genesis", 1, Some(1))));
        assert_eq!(parse("Rev22v21"), Some(reference("Rev", 22, Some(21))));
        assert_eq!(parse("John 3:16"), Some(reference("John", 3, Some(16))));
    }

    #[test]
    fn test_parse_compact_chapter() {
        assert_eq!(parse("SongofSolomon2"), Some(reference("SongofSolomon", 2, None)));
        assert_eq!(parse("1John3"), Some(reference("1John", 3, None)));
        assert_eq!(parse("Song of Solomon 2"), Some(reference("Song of Solomon", 2, None)));
    }

    #[test]
    fn test_leading_numeral_is_part_of_book() {
        let parsed = parse("2Kings5v14").unwrap();
        assert_eq!(parsed.book, "2Kings");
        assert_eq!(parsed.chapter, 5);
        assert_eq!(parsed.verse, Some(14));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse("  Genesis1:1\n"), parse("Genesis1:1"));
    }

    #[test]
    fn test_parse_failures() {
        let failures = [
            "", "   ", "Genesis", "12", "1.2.3", "Genesis0", "Genesis1v0", "Gen.x", "Gen 1.1",
            "1 Sam 16.7",
        ];
        for raw in failures {
            assert_eq!(parse(raw), None, "'{raw}' should not parse");
        }
        assert_eq!(parse("Genesis99999999999"), None);
    }

    #[test]
    fn test_round_trip_per_syntax() {
        let cases = [
            ("1 Sam.16.7", RefSyntax::Dotted),
            ("Gen.1", RefSyntax::Dotted),
            ("1Samuel16v7", RefSyntax::VerseMarker),
            ("Genesis1:1", RefSyntax::Colon),
            ("SongofSolomon2", RefSyntax::Compact),
        ];
        for (raw, expected_syntax) in cases {
            let (parsed, syntax) = parse_with_syntax(raw).unwrap();
            assert_eq!(syntax, expected_syntax, "syntax of '{raw}'");
            assert_eq!(parsed.render(syntax), raw);
        }
    }

    #[test]
    fn test_canonical_ids_and_labels() {
        let parsed = parse("1 Sam.16.7").unwrap();
        assert_eq!(parsed.chapter_id(), "1Samuel16");
        assert_eq!(parsed.canonical_id(), "1Samuel16v7");
        assert_eq!(parsed.label(), "1 Samuel 16:7");
        assert_eq!(parsed.to_chapter().label(), "1 Samuel 16");

        let song = parse("Song.2").unwrap();
        assert_eq!(song.canonical_id(), "SongofSolomon2");
    }

    #[test]
    fn test_from_str() {
        let parsed: ParsedReference = "Matt1v1".parse().unwrap();
        assert_eq!(parsed.book_name().as_str(), "Matthew");
        assert!("not a reference".parse::<ParsedReference>().is_err());
    }
}
