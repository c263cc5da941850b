//! Accent-insensitive text normalization and fuzzy card lookup.
//!
//! Matching works on a folded form of both the query and the candidates:
//! NFKD decomposition with combining marks stripped, then lowercased, so
//! "Évoli" and "evoli" compare equal. Lookup scans a candidate pool and keeps
//! the best-scoring entry, preferring the earliest on ties.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a string for matching: NFKD-decompose, drop combining marks, lowercase.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity in `[0.0, 1.0]` between two already-folded strings.
///
/// Full-string edit similarity alone punishes short queries against long card
/// names, so a discounted Jaro-Winkler score and a flat substring bonus are
/// taken into account and the best of the three wins.
fn weighted_ratio(needle: &str, candidate: &str) -> f64 {
    let full = strsim::normalized_levenshtein(needle, candidate);
    let jw = strsim::jaro_winkler(needle, candidate) * 0.95;
    let contained = !needle.is_empty() && (candidate.contains(needle) || needle.contains(candidate));
    let containment = if contained { 0.9 } else { 0.0 };

    full.max(jw).max(containment)
}

/// Picks the pool entry most similar to `query`.
///
/// Returns `None` only when the pool is empty or the query folds to an empty
/// string; there is no score cutoff, so any non-empty pool yields a match.
/// Ties keep the earliest entry in pool order.
pub fn approximate_match<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<&'a str> = None;
    let mut best_score = 0.0_f64;

    for candidate in candidates {
        let score = weighted_ratio(&needle, &normalize(candidate));
        if best.is_none() || score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("Évoli"), "evoli");
        assert_eq!(normalize("ÉVOLI"), normalize("evoli"));
        assert_eq!(normalize("Mélodelfe"), "melodelfe");
        assert_eq!(normalize("Pikachu"), "pikachu");
    }

    #[test]
    fn normalize_handles_combining_marks() {
        // U+0301 combining acute on a plain "e"
        assert_eq!(normalize("e\u{301}voli"), "evoli");
    }

    #[test]
    fn weighted_ratio_prefers_the_closer_candidate() {
        assert_eq!(weighted_ratio("pikachu", "pikachu"), 1.0);
        let vmax = weighted_ratio("pikachu", "pikachu vmax");
        let raichu = weighted_ratio("pikachu", "raichu");
        assert!(vmax > raichu, "expected {vmax} > {raichu}");
    }

    #[test]
    fn approximate_match_finds_close_card_name() {
        let pool = ["Pikachu VMAX", "Raichu", "Eevee"];
        assert_eq!(approximate_match("pikachu", pool), Some("Pikachu VMAX"));
    }

    #[test]
    fn approximate_match_is_accent_insensitive() {
        let pool = ["Évoli", "Salamèche", "Carapuce"];
        assert_eq!(approximate_match("evoli", pool), Some("Évoli"));
    }

    #[test]
    fn approximate_match_empty_pool_or_query() {
        let empty: [&str; 0] = [];
        assert_eq!(approximate_match("pikachu", empty), None);
        assert_eq!(approximate_match("", ["Pikachu VMAX"]), None);
    }

    #[test]
    fn approximate_match_keeps_first_on_tie() {
        // Both candidates contain the query, so both land on the containment
        // score; the earlier pool entry must win.
        let pool = ["Eevee V", "Eevee VMAX"];
        assert_eq!(approximate_match("eevee", pool), Some("Eevee V"));
    }

    #[test]
    fn approximate_match_always_yields_a_candidate() {
        let pool = ["Ronflex", "Métamorph"];
        assert!(approximate_match("zzzzzz", pool).is_some());
    }
}
