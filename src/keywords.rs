//! Keyword expansion into a set of matchable term variants.
//!
//! A keyword like "car paint" expands into its synonyms ("auto", "vehicle",
//! "coating", …), hyphenated variants, a singular form, and pairwise
//! combinations of the first two tokens' synonym sets. The expanded set is
//! computed once per run and shared read-only across all workers.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Synonym lists for common niche tokens. Tokens without an entry expand to
/// themselves only.
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("car", &["car", "auto", "automotive", "vehicle"]),
    (
        "paint",
        &[
            "paint",
            "painting",
            "repaint",
            "spray paint",
            "color",
            "coating",
            "touch up",
            "touch-up",
        ],
    ),
    ("design", &["design", "styling", "aesthetic", "look"]),
    (
        "outdoor",
        &[
            "outdoor",
            "exterior",
            "outside",
            "garden",
            "landscape",
            "patio",
            "yard",
        ],
    ),
    ("polish", &["polish", "buff", "compound"]),
    ("detailing", &["detailing", "detail", "paint correction"]),
    ("ceramic", &["ceramic", "ceramic coating", "nano coating"]),
    ("body", &["bodywork", "body work", "body shop", "panel"]),
];

/// Immutable token → synonyms mapping, built once per process.
///
/// Lookup is case-insensitive (keys and query tokens are lowercase).
/// Never mutated after construction; share by reference.
#[derive(Debug)]
pub struct SynonymTable {
    entries: HashMap<&'static str, &'static [&'static str]>,
}

impl SynonymTable {
    /// The built-in table, initialised lazily on first access.
    pub fn builtin() -> &'static SynonymTable {
        static TABLE: OnceLock<SynonymTable> = OnceLock::new();
        TABLE.get_or_init(|| SynonymTable {
            entries: BUILTIN_SYNONYMS.iter().copied().collect(),
        })
    }

    /// Synonyms for a lowercase token, falling back to the token itself.
    fn synonyms(&self, token: &str) -> Vec<String> {
        match self.entries.get(token) {
            Some(syns) => syns.iter().map(|s| s.to_string()).collect(),
            None => vec![token.to_string()],
        }
    }
}

/// The set of lowercase term variants a keyword expands to.
pub type TermSet = BTreeSet<String>;

/// A keyword together with its expanded term set, shared across workers.
#[derive(Debug, Clone)]
pub struct ExpandedKeyword {
    keyword: String,
    terms: TermSet,
}

impl ExpandedKeyword {
    /// Expand `keyword` against `table`. The raw keyword is kept for the
    /// search-endpoint queries; the term set drives scoring.
    pub fn new(keyword: &str, table: &SynonymTable) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            terms: expand(keyword, table),
        }
    }

    /// The trimmed input keyword, as sent to search endpoints.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The expanded term set used for scoring.
    pub fn terms(&self) -> &TermSet {
        &self.terms
    }
}

/// Expand a keyword into its term set.
///
/// The result contains (all lowercase):
/// - the trimmed keyword, plus its hyphenated form when it has spaces
/// - the singular form when the keyword ends in `s`
/// - every synonym of every token (tokens split on whitespace, `-`, `_`, `/`),
///   plus hyphenated forms of multi-word synonyms
/// - when there are at least two tokens, the cross product of the first two
///   tokens' synonym sets, joined by space and by hyphen
///
/// Empty strings never appear. An empty keyword yields an empty set; config
/// validation rejects that case before any run.
pub fn expand(keyword: &str, table: &SynonymTable) -> TermSet {
    let kw = keyword.trim().to_lowercase();
    let mut terms = TermSet::new();
    if kw.is_empty() {
        return terms;
    }

    terms.insert(kw.clone());
    if kw.contains(' ') {
        terms.insert(kw.replace(' ', "-"));
    }
    if let Some(singular) = kw.strip_suffix('s') {
        if !singular.is_empty() {
            terms.insert(singular.to_string());
        }
    }

    let tokens: Vec<&str> = kw
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/'))
        .filter(|t| !t.is_empty())
        .collect();

    let token_synonyms: Vec<Vec<String>> =
        tokens.iter().map(|t| table.synonyms(t)).collect();

    for synonyms in &token_synonyms {
        for syn in synonyms {
            terms.insert(syn.clone());
            if syn.contains(' ') {
                terms.insert(syn.replace(' ', "-"));
            }
        }
    }

    if token_synonyms.len() >= 2 {
        for a in &token_synonyms[0] {
            for b in &token_synonyms[1] {
                let pair = format!("{a} {b}");
                terms.insert(pair.replace(' ', "-"));
                terms.insert(pair);
            }
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_builtin(keyword: &str) -> TermSet {
        expand(keyword, SynonymTable::builtin())
    }

    #[test]
    fn contains_keyword_itself() {
        let terms = expand_builtin("roof repair");
        assert!(terms.contains("roof repair"));
    }

    #[test]
    fn hyphenated_variant_added() {
        let terms = expand_builtin("roof repair");
        assert!(terms.contains("roof-repair"));
    }

    #[test]
    fn singular_form_added() {
        let terms = expand_builtin("gutters");
        assert!(terms.contains("gutter"));
        assert!(terms.contains("gutters"));
    }

    #[test]
    fn mapped_token_brings_synonyms() {
        let terms = expand_builtin("car paint");
        assert!(terms.contains("auto"));
        assert!(terms.contains("vehicle"));
        assert!(terms.contains("touch up"));
        assert!(terms.contains("touch-up"));
        assert!(terms.contains("coating"));
    }

    #[test]
    fn cross_combinations_of_first_two_tokens() {
        let terms = expand_builtin("car paint");
        assert!(terms.contains("auto paint"));
        assert!(terms.contains("auto-paint"));
        assert!(terms.contains("vehicle coating"));
        assert!(terms.contains("vehicle-coating"));
    }

    #[test]
    fn unmapped_token_maps_to_itself() {
        let terms = expand_builtin("roof");
        assert!(terms.contains("roof"));
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn multiword_synonym_gets_hyphen_form() {
        let terms = expand_builtin("ceramic");
        assert!(terms.contains("ceramic coating"));
        assert!(terms.contains("ceramic-coating"));
        assert!(terms.contains("nano coating"));
        assert!(terms.contains("nano-coating"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let terms = expand_builtin("CAR Paint");
        assert!(terms.contains("auto"));
        assert!(terms.contains("car paint"));
    }

    #[test]
    fn tokens_split_on_delimiters() {
        for input in ["car-paint", "car_paint", "car/paint"] {
            let terms = expand_builtin(input);
            assert!(terms.contains("auto"), "failed for {input}");
            assert!(terms.contains("auto paint"), "failed for {input}");
        }
    }

    #[test]
    fn empty_keyword_yields_empty_set() {
        assert!(expand_builtin("").is_empty());
        assert!(expand_builtin("   ").is_empty());
    }

    #[test]
    fn no_empty_terms() {
        let terms = expand_builtin("cars ");
        assert!(terms.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn expanded_keyword_keeps_raw_keyword() {
        let query = ExpandedKeyword::new("  roof repair ", SynonymTable::builtin());
        assert_eq!(query.keyword(), "roof repair");
        assert!(query.terms().contains("roof-repair"));
    }
}
