use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Seed set loaded at startup. Titles are unique, case-sensitive keys.
pub const DEFAULT_MOVIES: [(&str, f64); 10] = [
    ("The Shawshank Redemption", 9.5),
    ("Pulp Fiction", 8.8),
    ("The Room", 3.6),
    ("The Godfather", 9.2),
    ("The Godfather: Part II", 9.0),
    ("The Dark Knight", 9.0),
    ("12 Angry Men", 8.9),
    ("Everything Everywhere All At Once", 8.9),
    ("Forrest Gump", 8.8),
    ("Star Wars: Episode V", 8.7),
];

#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    entries: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    pub best: Vec<String>,
    pub worst: Vec<String>,
}

/// Boundary validation for user-supplied rating strings. Core mutations only
/// ever receive numbers that came through here (or are otherwise finite).
pub fn parse_rating(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        StoreError::InvalidInput(format!("invalid rating {trimmed:?}: expected a number"))
    })?;
    if !value.is_finite() {
        return Err(StoreError::InvalidInput(format!(
            "invalid rating {trimmed:?}: must be a finite number"
        )));
    }
    Ok(value)
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let entries = DEFAULT_MOVIES
            .iter()
            .map(|&(title, rating)| (title.to_string(), rating))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in natural order (ascending by title).
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(title, &rating)| (title.as_str(), rating))
    }

    pub fn rating(&self, title: &str) -> Option<f64> {
        self.entries.get(title).copied()
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.entries.values().copied().collect()
    }

    /// Insert or overwrite. Re-adding an existing title is intentional upsert
    /// semantics, not an error.
    pub fn add(&mut self, title: &str, rating: f64) -> Result<()> {
        let title = validate_title(title)?;
        if !rating.is_finite() {
            return Err(StoreError::InvalidInput(format!(
                "invalid rating {rating}: must be a finite number"
            )));
        }
        debug!(title, rating, "add movie");
        self.entries.insert(title.to_string(), rating);
        Ok(())
    }

    pub fn delete(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if self.entries.remove(title).is_none() {
            return Err(StoreError::NotFound(title.to_string()));
        }
        debug!(title, "delete movie");
        Ok(())
    }

    pub fn update(&mut self, title: &str, rating: f64) -> Result<()> {
        let title = title.trim();
        if !self.entries.contains_key(title) {
            return Err(StoreError::NotFound(title.to_string()));
        }
        self.add(title, rating)
    }

    pub fn stats(&self) -> Result<Stats> {
        if self.entries.is_empty() {
            return Err(StoreError::EmptyStore);
        }

        let mut ratings = self.ratings();
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        ratings.sort_by(f64::total_cmp);
        let median = median_of_sorted(&ratings);
        let max = ratings[ratings.len() - 1];
        let min = ratings[0];

        let titles_at = |target: f64| {
            self.entries()
                .filter(|&(_, rating)| rating == target)
                .map(|(title, _)| title.to_string())
                .collect::<Vec<_>>()
        };

        Ok(Stats {
            mean,
            median,
            max,
            min,
            best: titles_at(max),
            worst: titles_at(min),
        })
    }

    pub fn random_pick<R: Rng>(&self, rng: &mut R) -> Result<(&str, f64)> {
        if self.entries.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        let index = rng.gen_range(0..self.entries.len());
        let (title, &rating) = self
            .entries
            .iter()
            .nth(index)
            .ok_or(StoreError::EmptyStore)?;
        Ok((title.as_str(), rating))
    }

    /// All entries by rating descending, ties by lowercased title ascending.
    /// Titles are unique, so the order is total and reproducible.
    pub fn sorted_by_rating(&self) -> Result<Vec<(String, f64)>> {
        if self.entries.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        let mut sorted: Vec<(String, f64)> = self
            .entries()
            .map(|(title, rating)| (title.to_string(), rating))
            .collect();
        sorted.sort_by(|left, right| {
            right
                .1
                .total_cmp(&left.1)
                .then_with(|| left.0.to_lowercase().cmp(&right.0.to_lowercase()))
        });
        Ok(sorted)
    }
}

fn validate_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput(
            "movie title cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
