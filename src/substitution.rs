//! # Substitution Resolver Module
//!
//! Resolves a single ingredient to candidate substitutes through a
//! three-tier lookup: cache, then a static dictionary of common ingredients,
//! then the external catalog. The first tier that answers wins; tiers are
//! never merged.
//!
//! Resolution never fails: every error path degrades to a sentinel
//! one-element list. Raw catalog results are cached as-is; the cleaning
//! pipeline runs on whatever list a tier produced, just before it is
//! returned, so callers always see cleaned, deduplicated, non-empty lists.

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cache::CacheService;
use crate::catalog::RecipeCatalog;

/// Sentinel returned when the catalog call itself fails
pub const FETCH_FAILURE_SENTINEL: &str = "Could not fetch substitutes.";

lazy_static! {
    /// Curated substitutes for common ingredients, keyed by lowercase name.
    ///
    /// Dictionary hits are served directly and never written to the cache;
    /// the table is already an O(1) static lookup.
    static ref SUBSTITUTION_TABLE: HashMap<&'static str, &'static [&'static str]> = {
        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        map.insert("butter", &["margarine", "coconut oil", "olive oil"]);
        map.insert("milk", &["oat milk", "almond milk", "soy milk"]);
        map.insert("egg", &["applesauce", "mashed banana", "ground flaxseed"]);
        map.insert("eggs", &["applesauce", "mashed banana", "ground flaxseed"]);
        map.insert("buttermilk", &["milk with lemon juice", "plain yogurt"]);
        map.insert("sour cream", &["plain yogurt", "creme fraiche"]);
        map.insert("heavy cream", &["evaporated milk", "coconut cream"]);
        map.insert("yogurt", &["sour cream", "buttermilk"]);
        map.insert("honey", &["maple syrup", "agave nectar"]);
        map.insert("sugar", &["honey", "maple syrup"]);
        map.insert("brown sugar", &["white sugar with molasses", "coconut sugar"]);
        map.insert("baking powder", &["baking soda with cream of tartar"]);
        map.insert("baking soda", &["baking powder"]);
        map.insert("cornstarch", &["arrowroot powder", "potato starch", "flour"]);
        map.insert("flour", &["almond flour", "oat flour"]);
        map.insert("bread crumbs", &["crushed crackers", "rolled oats"]);
        map.insert("garlic", &["garlic powder", "shallots"]);
        map.insert("onion", &["shallots", "leeks", "onion powder"]);
        map.insert("tomato sauce", &["tomato paste with water", "crushed tomatoes"]);
        map.insert("lemon juice", &["lime juice", "white vinegar"]);
        map.insert("vinegar", &["lemon juice", "lime juice"]);
        map.insert("wine", &["chicken broth", "grape juice"]);
        map.insert("soy sauce", &["tamari", "worcestershire sauce"]);
        map.insert("worcestershire sauce", &["soy sauce with a dash of vinegar"]);
        map.insert("mayonnaise", &["greek yogurt", "sour cream"]);
        map.insert("cream cheese", &["ricotta", "greek yogurt"]);
        map.insert("ricotta", &["cottage cheese", "cream cheese"]);
        map.insert("parmesan", &["pecorino romano", "grana padano"]);
        map.insert("basil", &["oregano", "thyme"]);
        map.insert("oregano", &["basil", "marjoram"]);
        map.insert("cilantro", &["parsley", "basil"]);
        map.insert("ginger", &["ground ginger", "allspice"]);
        map
    };

    /// "<label> = " style metadata prefix on catalog substitute strings,
    /// e.g. "1 cup = 1 cup soy milk"
    static ref LABEL_PREFIX: Regex =
        Regex::new(r"^[^=]*=\s*").expect("label prefix pattern should be valid");

    /// Quantity + unit tokens to strip from substitute strings
    static ref QUANTITY_UNIT: Regex = Regex::new(
        r"(?i)\b\d+(?:[./]\d+)?\s*(?:cups?|tbsp\.?|tsp\.?|oz\.?|grams?|ml|tablespoons?|teaspoons?)\b\.?"
    )
    .expect("quantity pattern should be valid");
}

/// Sentinel list for an ingredient with no known substitutes
fn no_substitutes_sentinel(ingredient: &str) -> Vec<String> {
    vec![format!("No known substitutes for {ingredient}")]
}

/// Strip a leading "<label> = " metadata prefix
fn strip_label_prefix(text: &str) -> String {
    LABEL_PREFIX.replace(text, "").into_owned()
}

/// Strip quantity + unit tokens ("2 cups", "1 tbsp", "250 ml")
fn strip_quantity_tokens(text: &str) -> String {
    QUANTITY_UNIT.replace_all(text, "").into_owned()
}

/// Clean raw substitute strings for display
///
/// Ordered pipeline per entry: strip the label prefix, strip quantity+unit
/// tokens, collapse whitespace, trim. Empty results are dropped and
/// duplicates removed preserving first-seen order. A list that cleans down
/// to nothing is replaced by the no-substitutes sentinel.
pub fn clean_substitutes(raw: &[String], ingredient: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    for entry in raw {
        let step = strip_label_prefix(entry);
        let step = strip_quantity_tokens(&step);
        let step = step.split_whitespace().collect::<Vec<_>>().join(" ");
        if step.is_empty() {
            continue;
        }
        if seen.insert(step.to_lowercase()) {
            cleaned.push(step);
        }
    }

    if cleaned.is_empty() {
        return no_substitutes_sentinel(ingredient);
    }
    cleaned
}

/// Three-tier substitution resolver
pub struct SubstitutionResolver {
    catalog: Arc<dyn RecipeCatalog>,
    cache: CacheService<Vec<String>>,
}

impl SubstitutionResolver {
    pub fn new(catalog: Arc<dyn RecipeCatalog>, cache: CacheService<Vec<String>>) -> Self {
        Self { catalog, cache }
    }

    /// Resolve an ingredient to a cleaned substitute list
    ///
    /// Tier order: cache, static dictionary, external catalog. Never fails;
    /// catalog errors and no-data responses degrade to sentinel lists. Only
    /// successful catalog responses are cached, keyed by the lowercase
    /// ingredient and storing the raw (uncleaned) list.
    pub async fn resolve(&self, ingredient: &str) -> Vec<String> {
        let key = ingredient.trim().to_lowercase();

        if let Some(hit) = self.cache.get(&key) {
            debug!("Substitution cache hit for '{key}'");
            return clean_substitutes(&hit, ingredient);
        }

        if let Some(entry) = SUBSTITUTION_TABLE.get(key.as_str()) {
            debug!("Substitution dictionary hit for '{key}'");
            let list: Vec<String> = entry.iter().map(|s| s.to_string()).collect();
            return clean_substitutes(&list, ingredient);
        }

        match self.catalog.ingredient_substitutes(ingredient).await {
            Ok(record) => {
                if !record.has_substitutes() {
                    debug!("Catalog has no substitute data for '{key}'");
                    return no_substitutes_sentinel(ingredient);
                }
                let raw = record.substitutes.unwrap_or_default();
                self.cache.set(&key, raw.clone());
                clean_substitutes(&raw, ingredient)
            }
            Err(e) => {
                warn!("Substitute lookup failed for '{key}': {e}");
                vec![FETCH_FAILURE_SENTINEL.to_string()]
            }
        }
    }
}
