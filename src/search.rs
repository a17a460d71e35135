use std::cmp::Ordering;

use crate::error::{Result, StoreError};
use crate::similarity;
use crate::store::MovieStore;

/// Minimum similarity score for a title to be offered as a suggestion.
pub const SIMILARITY_CUTOFF: f64 = 0.6;
/// Suggestions are capped to keep the fallback from getting noisy.
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Case-insensitive substring hits, in the store's natural order.
    Exact(Vec<(String, f64)>),
    /// Fuzzy fallback: (title, similarity score), best first, at most
    /// [`MAX_SUGGESTIONS`].
    Suggestions(Vec<(String, f64)>),
    NoMatches,
}

impl MovieStore {
    /// Two-phase search: any substring hit is authoritative and skips the
    /// fuzzy phase entirely; fuzzy matching is a recovery aid on total miss.
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(StoreError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }

        let needle = query.to_lowercase();
        let exact: Vec<(String, f64)> = self
            .entries()
            .filter(|(title, _)| title.to_lowercase().contains(&needle))
            .map(|(title, rating)| (title.to_string(), rating))
            .collect();
        if !exact.is_empty() {
            return Ok(SearchOutcome::Exact(exact));
        }

        let mut scored: Vec<(String, f64)> = self
            .entries()
            .filter_map(|(title, _)| {
                let score = similarity::title_score(title, query);
                (score >= SIMILARITY_CUTOFF).then(|| (title.to_string(), score))
            })
            .collect();
        // stable sort keeps natural order for equal scores
        scored.sort_by(|left, right| {
            right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal)
        });
        scored.truncate(MAX_SUGGESTIONS);

        if scored.is_empty() {
            Ok(SearchOutcome::NoMatches)
        } else {
            Ok(SearchOutcome::Suggestions(scored))
        }
    }
}
