//! Relevance scoring of candidate pages against an expanded term set.
//!
//! Two heuristics: [`score_text`] weighs term hits in the title and snippet
//! (titles count more, whole-word hits count more than substrings), and
//! [`score_url`] rewards terms appearing in the URL slug. Scores are
//! non-negative with no upper bound; they rank candidates, nothing more.

use crate::keywords::TermSet;

/// Outer weight applied to title hits.
const TITLE_WEIGHT: f64 = 2.2;
/// Substring / whole-word weights inside the title.
const TITLE_CONTAINS: f64 = 1.0;
const TITLE_WORD: f64 = 1.6;
/// Outer weight applied to snippet hits.
const SNIPPET_WEIGHT: f64 = 1.0;
/// Substring / whole-word weights inside the snippet.
const SNIPPET_CONTAINS: f64 = 0.6;
const SNIPPET_WORD: f64 = 1.1;
/// URL slug weights: substring of the slug / exact slug-token match.
const URL_CONTAINS: f64 = 1.2;
const URL_TOKEN: f64 = 0.8;

/// Score a (title, snippet) pair against the term set.
///
/// For every term, a substring hit and a whole-word hit each add their weight
/// independently — a whole-word occurrence scores both. Matching is
/// case-insensitive; terms are already lowercase.
pub fn score_text(title: &str, snippet: &str, terms: &TermSet) -> f64 {
    let title = title.to_lowercase();
    let snippet = snippet.to_lowercase();

    TITLE_WEIGHT * term_hits(&title, terms, TITLE_CONTAINS, TITLE_WORD)
        + SNIPPET_WEIGHT * term_hits(&snippet, terms, SNIPPET_CONTAINS, SNIPPET_WORD)
}

/// Score a URL against the term set.
///
/// The scheme is dropped; the remaining host+path "slug" is split on `-`, `/`
/// and `_`. Multi-word terms are hyphen-joined before matching, since that is
/// how they appear in URL slugs.
pub fn score_url(url: &str, terms: &TermSet) -> f64 {
    let url = url.to_lowercase();
    let slug = match url.split_once("//") {
        Some((_, rest)) => rest,
        None => url.as_str(),
    };
    let tokens: Vec<&str> = slug
        .split(|c: char| matches!(c, '-' | '/' | '_'))
        .filter(|t| !t.is_empty())
        .collect();

    let mut score = 0.0;
    for term in terms {
        let slugged = term.replace(' ', "-");
        if slug.contains(slugged.as_str()) {
            score += URL_CONTAINS;
        }
        if tokens.iter().any(|t| *t == slugged) {
            score += URL_TOKEN;
        }
    }
    score
}

/// Sum substring and whole-word hits for every term in lowercase `text`.
fn term_hits(text: &str, terms: &TermSet, weight_contains: f64, weight_word: f64) -> f64 {
    let mut score = 0.0;
    for term in terms {
        if text.contains(term.as_str()) {
            score += weight_contains;
        }
        if contains_whole_word(text, term) {
            score += weight_word;
        }
    }
    score
}

/// Whether `term` occurs in `text` bounded by non-word characters (or the
/// string edges). Word characters are alphanumerics and `_`.
fn contains_whole_word(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(term) {
        let start = search_from + offset;
        let end = start + term.len();
        let boundary_before = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let boundary_after = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
        if boundary_before && boundary_after {
            return true;
        }
        // Advance one char past the match start to allow overlapping retries.
        search_from = start
            + text[start..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn terms(items: &[&str]) -> TermSet {
        items.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()
    }

    #[test]
    fn whole_word_beats_substring_only_beats_no_match() {
        // The expansion of "roof repair" (no mapped tokens).
        let set = terms(&["roof repair", "roof-repair", "roof", "repair"]);
        let word = score_text("Complete Roof Repair Guide", "", &set);
        let substring = score_text("Roofrepairtips", "", &set);
        let none = score_text("Kitchen Remodel", "", &set);

        assert!(word > substring, "{word} should beat {substring}");
        assert!(substring > none, "{substring} should beat {none}");
        assert!((none - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn whole_word_also_counts_as_substring() {
        let set = terms(&["roof"]);
        // Both the contains and the word weight apply: 2.2 * (1.0 + 1.6).
        let score = score_text("Roof", "", &set);
        assert!((score - 2.2 * (1.0 + 1.6)).abs() < 1e-9);
    }

    #[test]
    fn substring_without_word_boundary() {
        let set = terms(&["roof"]);
        // "roofs" contains "roof" but not as a whole word: 2.2 * 1.0.
        let score = score_text("Manyroofsword", "", &set);
        assert!((score - 2.2).abs() < 1e-9);
    }

    #[test]
    fn snippet_weighted_lower_than_title() {
        let set = terms(&["repair"]);
        let in_title = score_text("repair", "", &set);
        let in_snippet = score_text("", "repair", &set);
        assert!(in_title > in_snippet);
        assert!((in_snippet - (0.6 + 1.1)).abs() < 1e-9);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let set = terms(&["roof repair"]);
        let upper = score_text("ROOF REPAIR", "", &set);
        let lower = score_text("roof repair", "", &set);
        assert!((upper - lower).abs() < f64::EPSILON);
    }

    #[test]
    fn multiple_terms_accumulate() {
        let both = terms(&["roof", "repair"]);
        let one = terms(&["roof"]);
        let title = "Roof Repair Guide";
        assert!(score_text(title, "", &both) > score_text(title, "", &one));
    }

    #[test]
    fn empty_text_scores_zero() {
        let set = terms(&["roof"]);
        assert!((score_text("", "", &set) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn url_substring_hit() {
        let set = terms(&["roof"]);
        let score = score_url("https://example.com/roofing-tips", &set);
        // "roof" is a substring of the slug but not a whole token.
        assert!((score - 1.2).abs() < 1e-9);
    }

    #[test]
    fn url_token_hit_adds_both_weights() {
        let set = terms(&["roof"]);
        let score = score_url("https://example.com/roof-repair-tips", &set);
        assert!((score - (1.2 + 0.8)).abs() < 1e-9);
    }

    #[test]
    fn url_multiword_term_matched_hyphenated() {
        let set = terms(&["roof repair"]);
        let score = score_url("https://example.com/roof-repair-guide", &set);
        assert!(score > 0.0);
    }

    #[test]
    fn url_without_scheme_still_scored() {
        let set = terms(&["roof"]);
        assert!(score_url("example.com/roof/guide", &set) > 0.0);
    }

    #[test]
    fn url_no_match_scores_zero() {
        let set = terms(&["roof"]);
        let score = score_url("https://example.com/kitchen-remodel", &set);
        assert!((score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn whole_word_at_string_edges() {
        assert!(contains_whole_word("roof repair", "roof"));
        assert!(contains_whole_word("roof repair", "repair"));
        assert!(contains_whole_word("a roof here", "roof"));
    }

    #[test]
    fn underscore_is_a_word_char() {
        assert!(!contains_whole_word("roof_repair", "roof"));
    }

    #[test]
    fn punctuation_is_a_boundary() {
        assert!(contains_whole_word("best roof, repaired", "roof"));
        assert!(contains_whole_word("(roof)", "roof"));
    }

    #[test]
    fn overlapping_candidates_found() {
        // First occurrence fails the boundary check, second succeeds.
        assert!(contains_whole_word("xroof roof", "roof"));
    }
}
