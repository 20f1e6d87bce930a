//! # Recipe Search Orchestrator Module
//!
//! Composes normalization, pantry augmentation, caching, the external
//! catalog, and ranking into the search operation.
//!
//! Only two failure points may fail the whole operation: blank input and the
//! primary catalog search. Per-candidate detail lookups are isolated; a
//! failed lookup degrades that candidate's `source_url` to a placeholder.

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::cache::CacheService;
use crate::catalog::{CatalogError, RecipeCatalog};
use crate::normalize::{augment_with_pantry, parse_ingredient_set, search_cache_key};
use crate::ranking::{rank, RecipeCandidate, SOURCE_URL_PLACEHOLDER};

/// Errors that fail a whole search request
#[derive(Debug)]
pub enum SearchError {
    /// Ingredient input was empty or blank after normalization
    EmptyIngredients,
    /// The primary catalog search failed
    UpstreamFetch(CatalogError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::EmptyIngredients => write!(f, "No ingredients provided"),
            SearchError::UpstreamFetch(e) => write!(f, "Could not fetch recipes: {e}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Recipe search service
///
/// Shared across concurrent requests; the cache is safe for concurrent
/// read/write and a hit is authoritative for the process lifetime.
pub struct RecipeSearchService {
    catalog: Arc<dyn RecipeCatalog>,
    cache: CacheService<Vec<RecipeCandidate>>,
}

impl RecipeSearchService {
    pub fn new(
        catalog: Arc<dyn RecipeCatalog>,
        cache: CacheService<Vec<RecipeCandidate>>,
    ) -> Self {
        Self { catalog, cache }
    }

    /// Search recipes matching the given comma-separated ingredient input
    ///
    /// Pipeline: validate, normalize and dedupe, augment with pantry staples,
    /// check the cache, query the catalog, enrich each candidate with its
    /// source URL, rank, truncate to `count`, populate the cache.
    ///
    /// Cuisine names in `cuisines` filter the `matches_cuisine` tiebreak;
    /// they do not exclude candidates.
    pub async fn search(
        &self,
        raw_ingredients: &str,
        count: usize,
        cuisines: &[String],
    ) -> Result<Vec<RecipeCandidate>, SearchError> {
        let ingredients = parse_ingredient_set(raw_ingredients);
        if ingredients.is_empty() {
            return Err(SearchError::EmptyIngredients);
        }
        let ingredients = augment_with_pantry(ingredients);

        let cache_key = search_cache_key(&ingredients, count, cuisines);
        if let Some(hit) = self.cache.get(&cache_key) {
            info!("Search cache hit for key '{cache_key}'");
            return Ok(hit);
        }
        debug!("Search cache miss for key '{cache_key}'");

        let joined = ingredients.iter().cloned().collect::<Vec<_>>().join(",");
        let records = self
            .catalog
            .find_by_ingredients(&joined, count)
            .await
            .map_err(SearchError::UpstreamFetch)?;

        info!("Catalog returned {} candidate recipes", records.len());

        let wanted: Vec<String> = cuisines.iter().map(|c| c.trim().to_lowercase()).collect();
        let candidates: Vec<RecipeCandidate> = records
            .into_iter()
            .map(|record| RecipeCandidate::from_record(record, &wanted))
            .collect();

        let candidates = self.attach_source_urls(candidates).await;

        let mut ranked = rank(candidates);
        ranked.truncate(count);

        self.cache.set(&cache_key, ranked.clone());
        Ok(ranked)
    }

    /// Resolve `source_url` for every candidate via parallel detail lookups
    ///
    /// Lookups are independent and failures are isolated per candidate: a
    /// failed or URL-less lookup leaves that candidate with the placeholder.
    /// All lookups complete before ranking.
    async fn attach_source_urls(
        &self,
        mut candidates: Vec<RecipeCandidate>,
    ) -> Vec<RecipeCandidate> {
        // Start from the placeholder so an unjoined task degrades safely
        for candidate in &mut candidates {
            candidate.source_url = Some(SOURCE_URL_PLACEHOLDER.to_string());
        }

        let mut lookups = JoinSet::new();
        for (idx, candidate) in candidates.iter().enumerate() {
            let catalog = Arc::clone(&self.catalog);
            let id = candidate.id;
            lookups.spawn(async move { (idx, catalog.recipe_information(id).await) });
        }

        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((idx, Ok(info))) => {
                    if let Some(url) = info.source_url {
                        candidates[idx].source_url = Some(url);
                    }
                }
                Ok((idx, Err(e))) => {
                    warn!(
                        "Detail lookup failed for recipe {}: {e}",
                        candidates[idx].id
                    );
                }
                Err(e) => {
                    warn!("Detail lookup task failed to join: {e}");
                }
            }
        }

        candidates
    }
}
