//! Pattern heuristics that flag addresses which are syntactically fine but
//! unlikely to belong to a real person.
//!
//! Five independent rules are OR-ed together by [`is_unlikely`]:
//! 1. a curated literal fragment occurs anywhere in the address,
//! 2. a semantic word (`fake`, `spam`, ...) occurs as a standalone token,
//! 3. the local part mirrors the domain (`gmail.com@gmail.com`),
//! 4. the local part has two or more consecutive symbols,
//! 5. the local part repeats one character too many times in a row.
//!
//! Rules 1 and 2 are separate families on purpose. `spamtrap` is a literal
//! fragment and matches inside longer tokens, while `spam` only matches when
//! bounded by a non-alphanumeric character or the ends of the address.

use super::lists::CuratedList;
use super::syntax::{extract_domain, extract_local_part};
use once_cell::sync::Lazy;
use regex::Regex;

/// Words that only count when they stand alone.
pub const BOUNDARY_PATTERNS: [&str; 7] = [
    "fake", "invalid", "spam", "junk", "nothanks", "notreal", "scam",
];

/// Default for the longest tolerated run of one character in the local part.
pub const DEFAULT_MAX_REPETITION: usize = 5;

static BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    let alternation = BOUNDARY_PATTERNS.join("|");
    Regex::new(&format!(
        r"(?i)(^|[^a-zA-Z0-9])({})([^a-zA-Z0-9]|$)",
        alternation
    ))
    .expect("boundary pattern is valid")
});

static CONSECUTIVE_SYMBOLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]{2,}").expect("symbol run pattern is valid"));

/// Case-insensitive substring match against the curated fragment list.
pub fn matches_unlikely_fragment(address: &str, fragments: &CuratedList) -> bool {
    fragments.any_within(&address.to_lowercase())
}

/// Case-insensitive match of a [`BOUNDARY_PATTERNS`] word bounded by a
/// non-alphanumeric character or the start/end of the address.
pub fn matches_boundary_pattern(address: &str) -> bool {
    BOUNDARY.is_match(address)
}

/// True when the alphanumeric skeletons of local part and domain are equal and
/// both are at least three characters long.
pub fn local_part_mirrors_domain(address: &str) -> bool {
    let skeleton = |part: &str| -> String {
        part.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };

    let local = skeleton(extract_local_part(address));
    let domain = skeleton(extract_domain(address));

    local.len() >= 3 && domain.len() >= 3 && local == domain
}

/// True when two or more non-alphanumeric characters follow each other in the
/// local part. Input without `@` never matches.
pub fn has_consecutive_symbols(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, _)) => CONSECUTIVE_SYMBOLS.is_match(local),
        None => false,
    }
}

/// True when some character appears `max_repetition` or more times in a row
/// in the local part, ignoring case. Thresholds below one behave as one.
pub fn has_excessive_repetition(address: &str, max_repetition: usize) -> bool {
    let Some((local, _)) = address.split_once('@') else {
        return false;
    };
    let threshold = max_repetition.max(1);

    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in local.chars().flat_map(char::to_lowercase) {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= threshold {
            return true;
        }
    }

    false
}

/// Returns true if any heuristic rule flags the address.
///
/// # Examples
/// ```
/// use email_list_cleaner::handlers::validation::heuristics::is_unlikely;
/// use email_list_cleaner::handlers::validation::lists::CuratedLists;
///
/// let lists = CuratedLists::builtin().unwrap();
/// assert!(is_unlikely("xxx@xxx.com", &lists.unlikely_patterns, 5));
/// assert!(!is_unlikely("jane.doe@acme-corp.com", &lists.unlikely_patterns, 5));
/// ```
pub fn is_unlikely(address: &str, fragments: &CuratedList, max_repetition: usize) -> bool {
    matches_unlikely_fragment(address, fragments)
        || matches_boundary_pattern(address)
        || local_part_mirrors_domain(address)
        || has_consecutive_symbols(address)
        || has_excessive_repetition(address, max_repetition)
}
