//! # External Recipe Catalog Module
//!
//! Boundary contract with the external recipe/substitution catalog and its
//! Spoonacular-backed implementation. The rest of the service only talks to
//! the [`RecipeCatalog`] trait, so tests inject stub catalogs and count
//! calls.
//!
//! Every outbound call carries an explicit timeout; a timeout surfaces as a
//! [`CatalogError`] and follows the normal upstream-failure paths. Nothing is
//! retried: one attempt per call, failure is terminal for that call.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;

/// Errors from the external catalog boundary
#[derive(Debug)]
pub enum CatalogError {
    /// Network/transport failure, including timeouts
    Transport(String),
    /// The catalog answered with a non-success HTTP status
    Status(u16),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Transport(msg) => write!(f, "Transport error: {msg}"),
            CatalogError::Status(code) => write!(f, "Catalog returned status {code}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

/// One ingredient reference inside a recipe search record
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRef {
    pub name: String,
}

/// Raw recipe record from the find-by-ingredients endpoint
///
/// Optional fields default to empty/zero so a sparse catalog response still
/// maps cleanly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub used_ingredients: Vec<IngredientRef>,
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientRef>,
}

/// Raw detail record from the recipe-information endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
}

/// Raw response from the ingredient-substitutes endpoint
///
/// `status == "failure"` or a missing `substitutes` list both mean the
/// catalog has no data for the ingredient.
#[derive(Debug, Clone, Deserialize)]
pub struct SubstitutesRecord {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub substitutes: Option<Vec<String>>,
}

impl SubstitutesRecord {
    /// Whether the record actually carries substitute data
    pub fn has_substitutes(&self) -> bool {
        if self.status.as_deref() == Some("failure") {
            return false;
        }
        self.substitutes
            .as_ref()
            .map(|subs| !subs.is_empty())
            .unwrap_or(false)
    }
}

/// External recipe catalog boundary
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Search recipes by a comma-joined ingredient list
    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: usize,
    ) -> Result<Vec<RecipeRecord>, CatalogError>;

    /// Fetch the detail record for a single recipe
    async fn recipe_information(&self, id: i64) -> Result<RecipeInformation, CatalogError>;

    /// Fetch candidate substitutes for a single ingredient
    async fn ingredient_substitutes(
        &self,
        ingredient: &str,
    ) -> Result<SubstitutesRecord, CatalogError>;
}

/// Spoonacular-backed catalog client
pub struct SpoonacularCatalog {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularCatalog {
    /// Build a catalog client from the service configuration
    ///
    /// The per-request timeout is baked into the underlying `reqwest::Client`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl RecipeCatalog for SpoonacularCatalog {
    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: usize,
    ) -> Result<Vec<RecipeRecord>, CatalogError> {
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        debug!("Catalog search for ingredients: {ingredients}");

        let number = number.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ingredients", ingredients),
                ("number", number.as_str()),
                // 1 = maximize used ingredients
                ("ranking", "1"),
                ("ignorePantry", "true"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn recipe_information(&self, id: i64) -> Result<RecipeInformation, CatalogError> {
        let url = format!("{}/recipes/{id}/information", self.base_url);
        debug!("Catalog detail lookup for recipe {id}");

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn ingredient_substitutes(
        &self,
        ingredient: &str,
    ) -> Result<SubstitutesRecord, CatalogError> {
        let url = format!("{}/food/ingredients/substitutes", self.base_url);
        debug!("Catalog substitute lookup for ingredient: {ingredient}");

        let response = self
            .client
            .get(&url)
            .query(&[("ingredientName", ingredient), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}
