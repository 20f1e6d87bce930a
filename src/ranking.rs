//! # Recipe Ranking Module
//!
//! Candidate model and the deterministic ranking comparator.
//!
//! Candidates are ordered by descending overlap score (used-ingredient count
//! minus missed-ingredient count), with ties broken by cuisine match. The
//! sort is stable: equal-ranked candidates keep their input order, which
//! reflects the external catalog's own relevance ordering.

use serde::{Deserialize, Serialize};

use crate::catalog::RecipeRecord;

/// Placeholder source URL when the detail lookup fails or carries none
pub const SOURCE_URL_PLACEHOLDER: &str = "#";

/// A candidate recipe flowing through the search pipeline
///
/// Constructed from one catalog search record, mutated once to attach
/// `source_url`, then ranked and frozen into the cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub cuisines: Vec<String>,
    pub ready_in_minutes: u32,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
    pub matches_cuisine: bool,
    pub source_url: Option<String>,
}

impl RecipeCandidate {
    /// Build a candidate from a raw catalog record
    ///
    /// `matches_cuisine` is true when the requested cuisine list is empty or
    /// any of the record's cuisines intersects it, case-insensitively. The
    /// record's own cuisine field is the only input here; the richer detail
    /// response is deliberately not consulted.
    pub fn from_record(record: RecipeRecord, wanted_cuisines: &[String]) -> Self {
        let matches_cuisine = wanted_cuisines.is_empty()
            || record
                .cuisines
                .iter()
                .any(|c| wanted_cuisines.iter().any(|w| w.eq_ignore_ascii_case(c)));

        Self {
            id: record.id,
            title: record.title,
            image: record.image,
            cuisines: record.cuisines,
            ready_in_minutes: record.ready_in_minutes,
            used_ingredients: record.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: record
                .missed_ingredients
                .into_iter()
                .map(|i| i.name)
                .collect(),
            matches_cuisine,
            source_url: None,
        }
    }

    /// Overlap score: used-ingredient count minus missed-ingredient count
    pub fn overlap_score(&self) -> i64 {
        self.used_ingredients.len() as i64 - self.missed_ingredients.len() as i64
    }
}

/// Order candidates by the ranking comparator
///
/// Descending overlap score, then `matches_cuisine` true-before-false,
/// remaining ties keep input order. Pure, no I/O.
pub fn rank(mut candidates: Vec<RecipeCandidate>) -> Vec<RecipeCandidate> {
    // sort_by is a stable sort
    candidates.sort_by(|a, b| {
        b.overlap_score()
            .cmp(&a.overlap_score())
            .then_with(|| b.matches_cuisine.cmp(&a.matches_cuisine))
    });
    candidates
}
