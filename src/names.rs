//! Book name normalization.
//!
//! Every book token that flows into an index key, a sort key or a result node passes through
//! one of two normalizers:
//!
//! - [`to_display_name`] maps free-form spellings and abbreviations (`gen`, `1 Sam.`, `Song`,
//!   `rev`) to the canonical display form (`Genesis`, `1 Samuel`, `Song of Solomon`,
//!   `Revelation`).
//! - [`to_id_prefix`] maps the compact form used inside machine identifiers (`1samuel`,
//!   `songofsolomon`) to the same canonical display form, delegating to [`to_display_name`]
//!   when it has no entry of its own. Both normalizers therefore land in one name space.
//!
//! Both lookups are keyed by [`compact_key`], so case, whitespace, punctuation and diacritics
//! never matter. A token neither table knows is title-cased and returned as a
//! [`BookName::Fallback`]; downstream it sorts last (see [`crate::canon::UNKNOWN_BOOK_INDEX`]).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};
use unicode_normalization::UnicodeNormalization;

use crate::canon::CANONICAL_BOOKS;

/// Display-name aliases: canonical name → compact spellings that denote it.
pub const DISPLAY_ALIASES: &[(&str, &[&str])] = &[
    ("Genesis", &["genesis", "gen", "ge", "gn"]),
    ("Exodus", &["exodus", "exod", "exo", "ex"]),
    ("Leviticus", &["leviticus", "lev", "le", "lv"]),
    ("Numbers", &["numbers", "num", "nu", "nm", "nb"]),
    ("Deuteronomy", &["deuteronomy", "deut", "deu", "de", "dt"]),
    ("Joshua", &["joshua", "josh", "jos", "jsh"]),
    ("Judges", &["judges", "judg", "jdg", "jdgs", "jg"]),
    ("Ruth", &["ruth", "rth", "ru"]),
    ("1 Samuel", &["1samuel", "1sam", "1sa", "1sm", "1s"]),
    ("2 Samuel", &["2samuel", "2sam", "2sa", "2sm", "2s"]),
    ("1 Kings", &["1kings", "1kgs", "1ki", "1kg", "1k"]),
    ("2 Kings", &["2kings", "2kgs", "2ki", "2kg", "2k"]),
    ("1 Chronicles", &["1chronicles", "1chron", "1chr", "1ch"]),
    ("2 Chronicles", &["2chronicles", "2chron", "2chr", "2ch"]),
    ("Ezra", &["ezra", "ezr"]),
    ("Nehemiah", &["nehemiah", "neh", "ne"]),
    ("Esther", &["esther", "esth", "est", "es"]),
    ("Job", &["job", "jb"]),
    ("Psalms", &["psalms", "psalm", "psa", "pss", "psm", "ps"]),
    ("Proverbs", &["proverbs", "prov", "pro", "prv", "pr"]),
    ("Ecclesiastes", &["ecclesiastes", "eccles", "eccl", "ecc", "ec", "qoh"]),
    (
        "Song of Solomon",
        &["songofsolomon", "songofsongs", "song", "sos", "sng", "canticles", "cant"],
    ),
    ("Isaiah", &["isaiah", "isa", "is"]),
    ("Jeremiah", &["jeremiah", "jer", "je", "jr"]),
    ("Lamentations", &["lamentations", "lam", "la"]),
    ("Ezekiel", &["ezekiel", "ezek", "eze", "ezk"]),
    ("Daniel", &["daniel", "dan", "da", "dn"]),
    ("Hosea", &["hosea", "hos", "ho"]),
    ("Joel", &["joel", "jl"]),
    ("Amos", &["amos", "am"]),
    ("Obadiah", &["obadiah", "obad", "ob"]),
    ("Jonah", &["jonah", "jon", "jnh"]),
    ("Micah", &["micah", "mic", "mc"]),
    ("Nahum", &["nahum", "nah", "na"]),
    ("Habakkuk", &["habakkuk", "hab", "hb"]),
    ("Zephaniah", &["zephaniah", "zeph", "zep", "zp"]),
    ("Haggai", &["haggai", "hag", "hg"]),
    ("Zechariah", &["zechariah", "zech", "zec", "zc"]),
    ("Malachi", &["malachi", "mal", "ml"]),
    ("Matthew", &["matthew", "matt", "mat", "mt"]),
    ("Mark", &["mark", "mrk", "mar", "mk", "mr"]),
    ("Luke", &["luke", "luk", "lk"]),
    ("John", &["john", "joh", "jhn", "jn"]),
    ("Acts", &["acts", "act", "ac"]),
    ("Romans", &["romans", "rom", "ro", "rm"]),
    ("1 Corinthians", &["1corinthians", "1cor", "1co"]),
    ("2 Corinthians", &["2corinthians", "2cor", "2co"]),
    ("Galatians", &["galatians", "gal", "ga"]),
    ("Ephesians", &["ephesians", "ephes", "eph"]),
    ("Philippians", &["philippians", "phil", "php", "pp"]),
    ("Colossians", &["colossians", "col"]),
    ("1 Thessalonians", &["1thessalonians", "1thess", "1thes", "1th"]),
    ("2 Thessalonians", &["2thessalonians", "2thess", "2thes", "2th"]),
    ("1 Timothy", &["1timothy", "1tim", "1ti"]),
    ("2 Timothy", &["2timothy", "2tim", "2ti"]),
    ("Titus", &["titus", "tit", "ti"]),
    ("Philemon", &["philemon", "philem", "phlm", "phm", "pm"]),
    ("Hebrews", &["hebrews", "heb"]),
    ("James", &["james", "jas", "jm"]),
    ("1 Peter", &["1peter", "1pet", "1pe", "1pt", "1p"]),
    ("2 Peter", &["2peter", "2pet", "2pe", "2pt", "2p"]),
    ("1 John", &["1john", "1jhn", "1jn", "1jo", "1j"]),
    ("2 John", &["2john", "2jhn", "2jn", "2jo", "2j"]),
    ("3 John", &["3john", "3jhn", "3jn", "3jo", "3j"]),
    ("Jude", &["jude", "jud", "jd"]),
    ("Revelation", &["revelation", "revelations", "rev", "rv"]),
];

/// Compact machine-identifier prefixes: prefix → canonical name.
pub const ID_PREFIXES: &[(&str, &str)] = &[
    ("genesis", "Genesis"),
    ("exodus", "Exodus"),
    ("leviticus", "Leviticus"),
    ("numbers", "Numbers"),
    ("deuteronomy", "Deuteronomy"),
    ("joshua", "Joshua"),
    ("judges", "Judges"),
    ("ruth", "Ruth"),
    ("1samuel", "1 Samuel"),
    ("2samuel", "2 Samuel"),
    ("1kings", "1 Kings"),
    ("2kings", "2 Kings"),
    ("1chronicles", "1 Chronicles"),
    ("2chronicles", "2 Chronicles"),
    ("ezra", "Ezra"),
    ("nehemiah", "Nehemiah"),
    ("esther", "Esther"),
    ("job", "Job"),
    ("psalms", "Psalms"),
    ("proverbs", "Proverbs"),
    ("ecclesiastes", "Ecclesiastes"),
    ("songofsolomon", "Song of Solomon"),
    ("isaiah", "Isaiah"),
    ("jeremiah", "Jeremiah"),
    ("lamentations", "Lamentations"),
    ("ezekiel", "Ezekiel"),
    ("daniel", "Daniel"),
    ("hosea", "Hosea"),
    ("joel", "Joel"),
    ("amos", "Amos"),
    ("obadiah", "Obadiah"),
    ("jonah", "Jonah"),
    ("micah", "Micah"),
    ("nahum", "Nahum"),
    ("habakkuk", "Habakkuk"),
    ("zephaniah", "Zephaniah"),
    ("haggai", "Haggai"),
    ("zechariah", "Zechariah"),
    ("malachi", "Malachi"),
    ("matthew", "Matthew"),
    ("mark", "Mark"),
    ("luke", "Luke"),
    ("john", "John"),
    ("acts", "Acts"),
    ("romans", "Romans"),
    ("1corinthians", "1 Corinthians"),
    ("2corinthians", "2 Corinthians"),
    ("galatians", "Galatians"),
    ("ephesians", "Ephesians"),
    ("philippians", "Philippians"),
    ("colossians", "Colossians"),
    ("1thessalonians", "1 Thessalonians"),
    ("2thessalonians", "2 Thessalonians"),
    ("1timothy", "1 Timothy"),
    ("2timothy", "2 Timothy"),
    ("titus", "Titus"),
    ("philemon", "Philemon"),
    ("hebrews", "Hebrews"),
    ("james", "James"),
    ("1peter", "1 Peter"),
    ("2peter", "2 Peter"),
    ("1john", "1 John"),
    ("2john", "2 John"),
    ("3john", "3 John"),
    ("jude", "Jude"),
    ("revelation", "Revelation"),
];

static DISPLAY_LOOKUP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for (name, aliases) in DISPLAY_ALIASES {
        for alias in aliases.iter() {
            if let Some(existing) = lookup.insert(*alias, *name) {
                tracing::warn!(
                    "[names] alias '{}' maps to both '{}' and '{}'; keeping '{}'",
                    alias,
                    existing,
                    name,
                    name
                );
            }
        }
    }
    lookup
});

static ID_PREFIX_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ID_PREFIXES.iter().copied().collect());

/// The outcome of normalizing a book token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BookName {
    /// One of the 66 canonical names.
    Canonical(&'static str),
    /// No table entry matched; holds the title-cased input.
    Fallback(String),
}

impl BookName {
    pub fn as_str(&self) -> &str {
        match self {
            BookName::Canonical(name) => *name,
            BookName::Fallback(name) => name.as_str(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, BookName::Canonical(_))
    }

    pub fn into_string(self) -> String {
        match self {
            BookName::Canonical(name) => name.to_string(),
            BookName::Fallback(name) => name,
        }
    }
}

impl Display for BookName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower-cased, diacritic-free, alphanumeric-only form of a book token. A leading ordinal word
/// separated by whitespace (`I`, `II`, `1st`, `Second`, ...) is folded into its digit, so
/// `"II Kings"` and `"2 Kings"` share the key `2kings`.
pub fn compact_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let (ordinal, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => match ordinal_digit(first) {
            Some(digit) => (Some(digit), rest),
            None => (None, trimmed),
        },
        None => (None, trimmed),
    };
    let mut key = ordinal.map(String::from).unwrap_or_default();
    key.extend(
        rest.nfkd()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase()),
    );
    key
}

fn ordinal_digit(word: &str) -> Option<&'static str> {
    match word.to_lowercase().trim_end_matches('.') {
        "i" | "1st" | "first" => Some("1"),
        "ii" | "2nd" | "second" => Some("2"),
        "iii" | "3rd" | "third" => Some("3"),
        _ => None,
    }
}

/// Machine identifier stem of a book name: the name with whitespace removed (`Song of Solomon`
/// → `SongofSolomon`). Canonical chapter and verse identifiers start with this stem.
pub fn id_stem(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Resolve a free-form book token against the display alias table.
pub fn resolve(raw: &str) -> BookName {
    let key = compact_key(raw);
    match DISPLAY_LOOKUP.get(key.as_str()) {
        Some(name) => BookName::Canonical(*name),
        None => {
            let fallback = titlecase::titlecase(raw.trim());
            tracing::debug!(
                "[names::resolve] no alias entry for '{}' (key '{}'), falling back to '{}'",
                raw,
                key,
                fallback
            );
            BookName::Fallback(fallback)
        }
    }
}

/// Resolve a compact identifier prefix, delegating to [`resolve`] when the prefix table has no
/// entry.
pub fn resolve_id_prefix(raw: &str) -> BookName {
    match ID_PREFIX_LOOKUP.get(compact_key(raw).as_str()) {
        Some(name) => BookName::Canonical(*name),
        None => resolve(raw),
    }
}

pub fn to_display_name(raw: &str) -> String {
    resolve(raw).into_string()
}

pub fn to_id_prefix(raw: &str) -> String {
    resolve_id_prefix(raw).into_string()
}

/// Which alias table an audit finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTable {
    Display,
    IdPrefix,
}

/// Canonical names that lack at least one entry in either alias table. Empty for a complete
/// table set.
pub fn missing_alias_entries() -> Vec<(&'static str, AliasTable)> {
    let mut missing = Vec::new();
    for name in CANONICAL_BOOKS {
        if !DISPLAY_LOOKUP.values().any(|mapped| *mapped == name) {
            missing.push((name, AliasTable::Display));
        }
        if !ID_PREFIX_LOOKUP.values().any(|mapped| *mapped == name) {
            missing.push((name, AliasTable::IdPrefix));
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::{index_of, UNKNOWN_BOOK_INDEX};
    use std::collections::HashSet;
    use test_log::test;

    #[test]
    fn test_tables_cover_every_canonical_name() {
        let missing = missing_alias_entries();
        assert!(missing.is_empty(), "missing alias entries: {missing:?}");
    }

    #[test]
    fn test_alias_keys_are_unique_and_compact() {
        let mut seen = HashSet::new();
        for (name, aliases) in DISPLAY_ALIASES {
            assert!(index_of(name) != UNKNOWN_BOOK_INDEX, "{name} is not canonical");
            for alias in aliases.iter() {
                assert!(seen.insert(*alias), "duplicate alias '{alias}'");
                assert_eq!(compact_key(alias), *alias, "alias '{alias}' is not compact");
            }
        }
        for (prefix, name) in ID_PREFIXES {
            assert_eq!(compact_key(prefix), *prefix);
            assert_eq!(compact_key(name), *prefix);
        }
    }

    #[test]
    fn test_display_name_convergence() {
        let groups: &[(&str, &[&str])] = &[
            ("Genesis", &["Gen", "gen", "GENESIS", "Gn", "  genesis "]),
            ("1 Samuel", &["1Sam", "1 Sam.", "1samuel", "I Samuel", "First Samuel"]),
            ("Song of Solomon", &["Song", "SongofSolomon", "Song of Songs", "sos"]),
            ("Revelation", &["rev", "Rev.", "Revelations"]),
            ("Psalms", &["Ps", "Psalm", "psa"]),
            ("2 Kings", &["2Kgs", "II Kings", "2nd Kings"]),
        ];
        for (expected, spellings) in groups {
            for spelling in spellings.iter() {
                assert_eq!(to_display_name(spelling), *expected, "spelling '{spelling}'");
            }
        }
    }

    #[test]
    fn test_ordinal_folding_does_not_touch_isaiah() {
        assert_eq!(to_display_name("Isaiah"), "Isaiah");
        assert_eq!(to_display_name("is"), "Isaiah");
        assert_eq!(compact_key("I Samuel"), "1samuel");
    }

    #[test]
    fn test_id_prefix_converges_with_display() {
        for name in CANONICAL_BOOKS {
            let prefix = compact_key(name);
            assert_eq!(to_id_prefix(&prefix), name);
            assert_eq!(to_id_prefix(&prefix), to_display_name(&prefix));
        }
        // Delegates to the display table for abbreviations
        assert_eq!(to_id_prefix("Matt"), "Matthew");
    }

    #[test]
    fn test_unknown_name_falls_back_to_title_case() {
        let resolved = resolve("tobit");
        assert_eq!(resolved, BookName::Fallback("Tobit".to_string()));
        assert!(!resolved.is_canonical());
        assert_eq!(index_of(resolved.as_str()), UNKNOWN_BOOK_INDEX);
    }

    #[test]
    fn test_diacritics_are_ignored() {
        assert_eq!(compact_key("Génesis"), "genesis");
        assert_eq!(to_display_name("Génesis"), "Genesis");
    }

    #[test]
    fn test_id_stem() {
        assert_eq!(id_stem("Song of Solomon"), "SongofSolomon");
        assert_eq!(id_stem("1 Samuel"), "1Samuel");
    }
}
