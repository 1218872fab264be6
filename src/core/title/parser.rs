use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::utils::Error;

use super::types::{Kind, TitleParts};

// Trailing "(2006)", "(2006/II)" or the "(????)" placeholder for an
// unknown year. Any four-digit year is accepted; the catalog reaches
// back into the 1890s.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\((?P<year>\d{4}|\?\?\?\?)(?:/(?P<index>[IVXLCDM]+))?\)\s*$"#).unwrap()
});

/// Leading articles moved to the end of a canonical title, lowercase.
/// Entries ending in an apostrophe re-attach without a space.
pub(crate) const ARTICLES: &[&str] = &[
    "the", "a", "an", "le", "la", "les", "l'", "il", "lo", "i", "gli", "der", "die", "das", "el",
    "los", "las", "un", "une", "una", "uno", "des", "du", "de", "den", "het", "een",
];

/// Move a leading article to the end: "The Matrix" -> "Matrix, The",
/// "L'Avventura" -> "Avventura, L'". Titles without a known leading
/// article pass through unchanged.
pub fn canonical_title(title: &str) -> String {
    for article in ARTICLES {
        let Some(rest) = strip_article(title, article) else {
            continue;
        };
        let head = &title[..title.len() - rest.len()];
        if article.ends_with('\'') {
            if !rest.trim_start().is_empty() {
                return format!("{}, {}", rest.trim_start(), head);
            }
        } else if let Some(tail) = rest.strip_prefix(' ') {
            if !tail.trim_start().is_empty() {
                return format!("{}, {}", tail.trim_start(), head);
            }
        }
    }
    title.to_string()
}

/// Case-insensitive match of `article` at the start of `title`,
/// char by char, returning the remainder. A title char whose lowercase
/// form expands to more than one char (e.g. the dotted capital 'İ')
/// never matches an article letter.
fn strip_article<'a>(title: &'a str, article: &str) -> Option<&'a str> {
    let mut chars = title.char_indices();
    for want in article.chars() {
        let (_, have) = chars.next()?;
        let mut lower = have.to_lowercase();
        if lower.next() != Some(want) || lower.next().is_some() {
            return None;
        }
    }
    Some(chars.as_str())
}

/// Decompose a raw title string into structured parts.
///
/// Recognized grammar, innermost first: trailing kind markers
/// `(TV)`/`(V)`/`(VG)`/`(mini)`, a trailing year parenthetical
/// `(2006)`/`(2006/II)`/`(????)`, and a fully double-quoted title marking
/// a TV series. With `canonical = true` the base title gets its leading
/// article moved to the end.
///
/// The input is NFC-normalized first so that records built from
/// composed and decomposed text compare equal downstream. An empty
/// title (or one reduced to nothing by marker stripping) is the only
/// parse failure and it is reported to the caller.
pub fn analyze_title(raw: &str, canonical: bool) -> Result<TitleParts, Error> {
    let nfc: String = raw.nfc().collect();
    let mut work: &str = nfc.trim();
    if work.is_empty() {
        return Err(Error::TitleParse(raw.to_string()));
    }

    let mut kind = Kind::Movie;
    loop {
        let next = if let Some(s) = work.strip_suffix("(TV)") {
            kind = Kind::TvMovie;
            s
        } else if let Some(s) = work.strip_suffix("(V)") {
            kind = Kind::Video;
            s
        } else if let Some(s) = work.strip_suffix("(VG)") {
            kind = Kind::VideoGame;
            s
        } else if let Some(s) = work.strip_suffix("(mini)") {
            kind = Kind::TvMiniSeries;
            s
        } else {
            break;
        };
        work = next.trim_end();
    }

    let mut year: Option<u16> = None;
    let mut imdb_index: Option<String> = None;
    if let Some(caps) = YEAR_RE.captures(work) {
        let whole = caps.get(0).unwrap();
        year = caps.name("year").and_then(|m| match m.as_str() {
            "????" => None,
            y => y.parse::<u16>().ok(),
        });
        imdb_index = caps.name("index").map(|m| m.as_str().to_string());
        work = work[..whole.start()].trim_end();
    }

    // A fully quoted title marks a TV series (unless a marker already
    // said mini series).
    if work.len() >= 2 && work.starts_with('"') && work.ends_with('"') {
        work = work[1..work.len() - 1].trim();
        if kind == Kind::Movie {
            kind = Kind::TvSeries;
        }
    }

    if work.is_empty() {
        return Err(Error::TitleParse(raw.to_string()));
    }

    let title = if canonical {
        canonical_title(work)
    } else {
        work.to_string()
    };
    tracing::trace!(raw, %title, ?year, ?kind, "analyzed title");

    Ok(TitleParts {
        title,
        year,
        imdb_index,
        kind,
    })
}
