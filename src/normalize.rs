//! # Ingredient Normalization Module
//!
//! This module canonicalizes raw ingredient text into stable keys, parses
//! comma-separated ingredient input into a deduplicated set, merges the fixed
//! pantry staples, and derives the cache key for a search request.
//!
//! ## Features
//!
//! - Case/punctuation/whitespace-insensitive ingredient keys
//! - Set-based deduplication of comma-separated input
//! - Pantry staple augmentation ("salt" and "oil" are assumed on hand)
//! - Deterministic cache keys for semantically equivalent requests
//!
//! ## Usage
//!
//! ```rust
//! use leftovers::normalize::{normalize_ingredient, parse_ingredient_set};
//!
//! assert_eq!(normalize_ingredient("  Garlic, fresh! "), "garlic fresh");
//!
//! let set = parse_ingredient_set("Eggs, eggs, Milk");
//! assert_eq!(set.len(), 2);
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;

/// Pantry staples merged into every search, regardless of user input.
///
/// Including them is a deliberate scoring bias: downstream overlap scores
/// count the staples as "used" ingredients even when the user never typed
/// them.
pub const PANTRY_STAPLES: [&str; 2] = ["salt", "oil"];

// Lazy static regexes to avoid recompilation per request
lazy_static! {
    static ref NON_ALPHA: Regex = Regex::new(r"[^a-z ]").expect("character class should be valid");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("whitespace pattern should be valid");
}

/// A set of normalized ingredient keys. Insertion order is irrelevant;
/// iteration is lexicographic, which makes derived cache keys deterministic.
pub type IngredientSet = BTreeSet<String>;

/// Canonicalize raw ingredient text into a stable key
///
/// Steps, in order: lowercase, strip every character outside `[a-z ]`,
/// collapse whitespace runs to a single space, trim. Total over any input;
/// an empty result is the caller's cue to discard the token, not an error.
///
/// # Examples
///
/// ```rust
/// use leftovers::normalize::normalize_ingredient;
///
/// assert_eq!(normalize_ingredient("Garlic, fresh!"), "garlic fresh");
/// assert_eq!(normalize_ingredient("  2% Milk "), "milk");
/// assert_eq!(normalize_ingredient("!!!"), "");
/// ```
pub fn normalize_ingredient(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = strip_non_alpha(&lowered);
    let collapsed = collapse_whitespace(&stripped);
    collapsed.trim().to_string()
}

/// Remove every character that is not a lowercase letter or a space
fn strip_non_alpha(text: &str) -> String {
    NON_ALPHA.replace_all(text, "").into_owned()
}

/// Collapse runs of whitespace into a single space
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Parse comma-separated ingredient input into a deduplicated set
///
/// Each token is normalized via [`normalize_ingredient`]; tokens that
/// normalize to the empty string are dropped.
pub fn parse_ingredient_set(raw: &str) -> IngredientSet {
    let set: IngredientSet = raw
        .split(',')
        .map(normalize_ingredient)
        .filter(|key| !key.is_empty())
        .collect();

    debug!("Parsed {} unique ingredient keys from input", set.len());
    set
}

/// Merge the fixed pantry staples into an ingredient set
///
/// Pure and idempotent: augmenting an already-augmented set yields the same
/// set.
pub fn augment_with_pantry(mut set: IngredientSet) -> IngredientSet {
    for staple in PANTRY_STAPLES {
        set.insert(staple.to_string());
    }
    set
}

/// Derive the cache key for a search request
///
/// Two requests with the same semantic inputs produce the same key regardless
/// of the original ingredient ordering or casing: the set iterates in sorted
/// order and cuisines are lowercased before joining.
pub fn search_cache_key(set: &IngredientSet, count: usize, cuisines: &[String]) -> String {
    let ingredients = set.iter().cloned().collect::<Vec<_>>().join(",");
    let cuisines = cuisines
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(",");
    format!("{ingredients}|{count}|{cuisines}")
}
