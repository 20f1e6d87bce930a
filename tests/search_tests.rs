//! # Search Orchestrator Tests
//!
//! End-to-end tests for the recipe search pipeline against a stub catalog,
//! covering input validation, caching, ranking, truncation, and per-candidate
//! failure isolation.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use leftovers::cache::CacheService;
use leftovers::catalog::{
    CatalogError, IngredientRef, RecipeCatalog, RecipeInformation, RecipeRecord, SubstitutesRecord,
};
use leftovers::search::{RecipeSearchService, SearchError};

/// Catalog stub returning canned records and counting calls
struct StubCatalog {
    records: Vec<RecipeRecord>,
    fail_search: bool,
    fail_detail_ids: Vec<i64>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StubCatalog {
    fn with_records(records: Vec<RecipeRecord>) -> Self {
        Self {
            records,
            fail_search: false,
            fail_detail_ids: vec![],
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        let mut stub = Self::with_records(vec![]);
        stub.fail_search = true;
        stub
    }
}

#[async_trait]
impl RecipeCatalog for StubCatalog {
    async fn find_by_ingredients(
        &self,
        _ingredients: &str,
        _number: usize,
    ) -> Result<Vec<RecipeRecord>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(CatalogError::Status(500));
        }
        Ok(self.records.clone())
    }

    async fn recipe_information(&self, id: i64) -> Result<RecipeInformation, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_detail_ids.contains(&id) {
            return Err(CatalogError::Transport("connection reset".to_string()));
        }
        Ok(RecipeInformation {
            source_url: Some(format!("https://example.com/recipes/{id}")),
            cuisines: vec![],
        })
    }

    async fn ingredient_substitutes(
        &self,
        _ingredient: &str,
    ) -> Result<SubstitutesRecord, CatalogError> {
        unreachable!("search tests never resolve substitutes")
    }
}

fn record(id: i64, used: usize, missed: usize, cuisines: Vec<&str>) -> RecipeRecord {
    RecipeRecord {
        id,
        title: format!("Recipe {id}"),
        image: format!("recipe{id}.jpg"),
        cuisines: cuisines.into_iter().map(String::from).collect(),
        dish_types: vec![],
        ready_in_minutes: 20,
        used_ingredients: (0..used)
            .map(|i| IngredientRef {
                name: format!("used{i}"),
            })
            .collect(),
        missed_ingredients: (0..missed)
            .map(|i| IngredientRef {
                name: format!("missed{i}"),
            })
            .collect(),
    }
}

fn service(catalog: Arc<StubCatalog>) -> RecipeSearchService {
    RecipeSearchService::new(catalog, CacheService::in_memory())
}

#[tokio::test]
async fn test_empty_ingredients_fails_without_external_calls() {
    let catalog = Arc::new(StubCatalog::with_records(vec![record(1, 2, 0, vec![])]));
    let service = service(catalog.clone());

    let result = service.search("", 3, &[]).await;
    assert!(matches!(result, Err(SearchError::EmptyIngredients)));

    // Input that is blank after normalization is rejected the same way
    let result = service.search("123, !!!, ,", 3, &[]).await;
    assert!(matches!(result, Err(SearchError::EmptyIngredients)));

    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 0);
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_search_ranks_and_attaches_source_urls() {
    let catalog = Arc::new(StubCatalog::with_records(vec![
        record(1, 1, 0, vec![]),
        record(2, 4, 0, vec![]),
        record(3, 2, 0, vec![]),
    ]));
    let service = service(catalog.clone());

    let results = service.search("eggs, milk", 3, &[]).await.unwrap();

    let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    for result in &results {
        assert_eq!(
            result.source_url.as_deref(),
            Some(format!("https://example.com/recipes/{}", result.id).as_str())
        );
    }
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_cuisine_tiebreak_follows_literal_comparator() {
    // All three score 2; B and C match the cuisine, so they rank before A
    // in their input order.
    let catalog = Arc::new(StubCatalog::with_records(vec![
        record(1, 3, 1, vec![]),        // A
        record(2, 2, 0, vec!["Thai"]),  // B
        record(3, 3, 1, vec!["Thai"]),  // C
    ]));
    let service = service(catalog);

    let results = service
        .search("noodles", 3, &["thai".to_string()])
        .await
        .unwrap();
    let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_cache_hit_on_equivalent_input() {
    let catalog = Arc::new(StubCatalog::with_records(vec![record(1, 2, 0, vec![])]));
    let service = service(catalog.clone());

    let first = service.search("Eggs, Milk", 3, &["Italian".to_string()]).await.unwrap();
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 1);

    // Reordered and recased input must hit the same cache entry
    let second = service.search("milk, eggs", 3, &["italian".to_string()]).await.unwrap();
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_different_count_misses_cache() {
    let catalog = Arc::new(StubCatalog::with_records(vec![record(1, 2, 0, vec![])]));
    let service = service(catalog.clone());

    service.search("eggs", 3, &[]).await.unwrap();
    service.search("eggs", 5, &[]).await.unwrap();
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_detail_failure_is_isolated_per_candidate() {
    let mut stub = StubCatalog::with_records(vec![
        record(1, 3, 0, vec![]),
        record(2, 2, 0, vec![]),
        record(3, 1, 0, vec![]),
    ]);
    stub.fail_detail_ids = vec![2];
    let catalog = Arc::new(stub);
    let service = service(catalog);

    let results = service.search("eggs", 3, &[]).await.unwrap();
    assert_eq!(results.len(), 3);

    for result in &results {
        if result.id == 2 {
            assert_eq!(result.source_url.as_deref(), Some("#"));
        } else {
            assert_eq!(
                result.source_url.as_deref(),
                Some(format!("https://example.com/recipes/{}", result.id).as_str())
            );
        }
    }
}

#[tokio::test]
async fn test_primary_search_failure_fails_the_request() {
    let catalog = Arc::new(StubCatalog::failing());
    let service = service(catalog.clone());

    let result = service.search("eggs", 3, &[]).await;
    assert!(matches!(result, Err(SearchError::UpstreamFetch(_))));

    // The failure is not cached: a retry reaches the catalog again
    let _ = service.search("eggs", 3, &[]).await;
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_results_truncated_to_requested_count() {
    let catalog = Arc::new(StubCatalog::with_records(vec![
        record(1, 1, 0, vec![]),
        record(2, 5, 0, vec![]),
        record(3, 3, 0, vec![]),
        record(4, 4, 0, vec![]),
        record(5, 2, 0, vec![]),
    ]));
    let service = service(catalog);

    let results = service.search("eggs", 2, &[]).await.unwrap();
    let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 4]);
}
