//! Name normalization and similarity scoring between odds-feed names and
//! roster names.

use super::roster::RosterEntry;


/// A fuzzy candidate must score strictly above this to be accepted.
pub const MATCH_THRESHOLD: f64 = 0.8;

/// Lower-case, drop `.` `,` and quote characters, collapse whitespace.
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '\'' | '"' | '‘' | '’' | '“' | '”' | '`'))
        .flat_map(char::to_lowercase)
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole-name edit ratio in `0.0..=1.0`.
///
/// No shared-prefix bonus, so "kevin love" does not ride on "kevin durant".
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Single-token similarity in `0.0..=1.0`, forgiving of initials.
pub fn token_similarity(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// Score two already-normalized names.
///
/// The whole-string ratio, or, when both names have at least two tokens, the
/// mean of first-token and last-token similarity if that is higher. The
/// part-wise score lets "l james" reach "lebron james".
pub fn score_names(query: &str, candidate: &str) -> f64 {
    let whole = similarity(query, candidate);

    let q: Vec<&str> = query.split(' ').collect();
    let c: Vec<&str> = candidate.split(' ').collect();
    if q.len() < 2 || c.len() < 2 {
        return whole;
    }

    let first = token_similarity(q[0], c[0]);
    let last = token_similarity(q[q.len() - 1], c[c.len() - 1]);
    whole.max((first + last) / 2.0)
}

/// Best candidate for a name, with its confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub entry: &'a RosterEntry,
    pub confidence: f64,
}

/// Highest-scoring item, kept only if it beats [`MATCH_THRESHOLD`].
///
/// Ties keep the earlier item.
pub fn select_best<T>(scored: impl IntoIterator<Item = (T, f64)>) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (item, score) in scored {
        if best.as_ref().map_or(true, |(_, top)| score > *top) {
            best = Some((item, score));
        }
    }
    best.filter(|(_, score)| *score > MATCH_THRESHOLD)
}

/// Find the roster entry matching `query`.
///
/// A normalized exact match wins immediately with confidence 1.0.
pub fn best_match<'a>(query: &str, candidates: &'a [RosterEntry]) -> Option<FuzzyMatch<'a>> {
    let query = normalize_name(query);
    if query.is_empty() {
        return None;
    }

    let mut scored = Vec::with_capacity(candidates.len());
    for entry in candidates {
        let name = normalize_name(&entry.name);
        if name == query {
            return Some(FuzzyMatch {
                entry,
                confidence: 1.0,
            });
        }
        scored.push((entry, score_names(&query, &name)));
    }

    select_best(scored).map(|(entry, confidence)| FuzzyMatch { entry, confidence })
}
