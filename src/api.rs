//! # HTTP API Module
//!
//! Axum handlers for the inbound surface consumed by the presentation layer:
//! recipe search and ingredient substitution. Handlers validate input, call
//! the service layer, and map the error taxonomy onto HTTP statuses.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::DEFAULT_RECIPE_COUNT;
use crate::ranking::RecipeCandidate;
use crate::search::{RecipeSearchService, SearchError};
use crate::substitution::SubstitutionResolver;

/// Shared application state for all handlers
pub struct AppState {
    pub search: RecipeSearchService,
    pub substitutions: SubstitutionResolver,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub ingredients: Option<String>,
    pub number: Option<usize>,
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubstituteParams {
    pub ingredient: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SubstituteResponse {
    pub ingredient: String,
    pub substitutes: Vec<String>,
}

/// Split a comma-separated cuisine parameter into individual names
fn parse_cuisine_list(cuisine: Option<&str>) -> Vec<String> {
    cuisine
        .unwrap_or_default()
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// `GET /recipes/search` — ranked, truncated recipe candidates
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeCandidate>>, (StatusCode, Json<ErrorBody>)> {
    let Some(ingredients) = params.ingredients else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Missing required parameter: ingredients".to_string(),
            }),
        ));
    };

    let count = params.number.unwrap_or(DEFAULT_RECIPE_COUNT);
    let cuisines = parse_cuisine_list(params.cuisine.as_deref());

    match state.search.search(&ingredients, count, &cuisines).await {
        Ok(recipes) => Ok(Json(recipes)),
        Err(SearchError::EmptyIngredients) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "No ingredients provided".to_string(),
            }),
        )),
        Err(e @ SearchError::UpstreamFetch(_)) => {
            error!("Recipe search failed: {e}");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: "Could not fetch recipes.".to_string(),
                }),
            ))
        }
    }
}

/// `GET /ingredients/substitutes` — substitute list for one ingredient
///
/// A missing `ingredient` parameter yields a 400 with a sentinel substitute
/// list rather than an empty body.
pub async fn ingredient_substitutes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubstituteParams>,
) -> (StatusCode, Json<SubstituteResponse>) {
    let ingredient = params.ingredient.unwrap_or_default();
    if ingredient.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SubstituteResponse {
                ingredient,
                substitutes: vec!["No ingredient provided.".to_string()],
            }),
        );
    }

    let substitutes = state.substitutions.resolve(&ingredient).await;
    (
        StatusCode::OK,
        Json(SubstituteResponse {
            ingredient,
            substitutes,
        }),
    )
}
