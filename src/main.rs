use anyhow::Result;
use axum::routing::get;
use axum::Router;
use log::info;
use std::sync::Arc;

use leftovers::api::{self, AppState};
use leftovers::cache::CacheService;
use leftovers::catalog::SpoonacularCatalog;
use leftovers::config::Config;
use leftovers::search::RecipeSearchService;
use leftovers::substitution::SubstitutionResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting leftover recipe search service");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    info!("Using recipe catalog at: {}", config.base_url);

    // Shared catalog client and process-lifetime caches
    let catalog = Arc::new(SpoonacularCatalog::new(&config)?);
    let state = Arc::new(AppState {
        search: RecipeSearchService::new(catalog.clone(), CacheService::in_memory()),
        substitutions: SubstitutionResolver::new(catalog, CacheService::in_memory()),
    });

    let app = Router::new()
        .route("/recipes/search", get(api::search_recipes))
        .route("/ingredients/substitutes", get(api::ingredient_substitutes))
        .with_state(state);

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
