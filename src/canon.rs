//! The 66-book Protestant canon, in order, and the name → position lookup used as the universal
//! sort key for books.

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

/// Sort position assigned to any name that is not one of [`CANONICAL_BOOKS`].
///
/// This is a "sort last" marker, not an error.
pub const UNKNOWN_BOOK_INDEX: usize = 999;

pub const CANONICAL_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

static CANON_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    CANONICAL_BOOKS
        .iter()
        .enumerate()
        .map(|(idx, name)| (*name, idx))
        .collect()
});

/// Position of `name` in canonical order (0 for Genesis through 65 for Revelation).
///
/// Matching is exact. Anything else, including a non-normalized spelling such as `"Gen"`,
/// yields [`UNKNOWN_BOOK_INDEX`].
pub fn index_of(name: &str) -> usize {
    CANON_INDEX
        .get(name)
        .copied()
        .unwrap_or(UNKNOWN_BOOK_INDEX)
}

/// Deduplicate `names` and order them canonically. Names outside the canon are kept and sort
/// after Revelation, alphabetically among themselves.
pub fn sort_canonically<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect::<BTreeSet<String>>();
    let mut sorted = unique.into_iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| index_of(a).cmp(&index_of(b)).then_with(|| a.cmp(b)));
    sorted
}
