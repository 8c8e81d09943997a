//! Tiered fuzzy matching shared by command search and sub-command search.
//!
//! A query is scored against a target in four tiers, checked in order:
//! exact match, prefix, substring, and finally an in-order subsequence.
//! Lower tiers rank first.

/// How well a query matched a target. Ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// The target equals the query (case-insensitive).
    Exact = 0,
    /// The target starts with the query.
    Prefix = 1,
    /// The target contains the query as a contiguous substring.
    Contains = 2,
    /// Every query character appears in the target, in order.
    Fuzzy = 3,
}

impl MatchTier {
    /// Numeric score of this tier (0 is best).
    pub fn score(self) -> u8 {
        self as u8
    }
}

/// Score `target` against `query`.
///
/// Both sides are compared case-insensitively. Returns `None` when the
/// query does not match at all.
pub fn match_score(target: &str, query: &str) -> Option<MatchTier> {
    let target = target.to_lowercase();
    let query = query.trim().to_lowercase();

    if target == query {
        Some(MatchTier::Exact)
    } else if target.starts_with(&query) {
        Some(MatchTier::Prefix)
    } else if target.contains(&query) {
        Some(MatchTier::Contains)
    } else if fuzzy_match(&target, &query) {
        Some(MatchTier::Fuzzy)
    } else {
        None
    }
}

/// Check whether every character of `query` appears in `target` in order.
///
/// Single forward scan over the target: each query character consumes the
/// target up to and including its first remaining occurrence.
pub fn fuzzy_match(target: &str, query: &str) -> bool {
    let mut remaining = target.chars();
    query.chars().all(|qc| remaining.any(|tc| tc == qc))
}

/// Best (lowest) tier of `query` across several candidate names.
pub fn best_score<'a>(
    names: impl IntoIterator<Item = &'a str>,
    query: &str,
) -> Option<MatchTier> {
    names
        .into_iter()
        .filter_map(|name| match_score(name, query))
        .min()
}
