//! Remote recipe catalog client
//!
//! Wraps TheMealDB-style read endpoints behind the [`CatalogSource`] trait so
//! the resolver and session can be exercised against a mock, and routes every
//! request through the [`Gateway`] for last-good offline fallback.

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    db::{CacheKey, Gateway},
    error::{AppError, AppResult},
    models::{
        ApiArea, ApiIngredient, ApiMeal, ApiMealDetail, Ingredient, MealsEnvelope, Recipe,
        RecipeDetails,
    },
};

/// Read operations against the remote recipe catalog
///
/// Filtering supports one dimension per query; combined (area, ingredient)
/// criteria are resolved client-side by intersecting two single-dimension
/// results (see the resolver).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Lists culinary areas in the order the catalog returns them
    async fn list_areas(&self) -> AppResult<Vec<String>>;

    /// Lists selectable ingredients
    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>>;

    /// Recipes belonging to a culinary area
    async fn recipes_by_area(&self, area: &str) -> AppResult<Vec<Recipe>>;

    /// Recipes containing a main ingredient
    async fn recipes_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<Recipe>>;

    /// Full detail for one recipe; `None` when the id is unknown upstream
    async fn recipe_detail(&self, id: &str) -> AppResult<Option<RecipeDetails>>;
}

/// TheMealDB-backed implementation of [`CatalogSource`]
#[derive(Clone)]
pub struct MealDbClient {
    http_client: HttpClient,
    base_url: String,
    gateway: Gateway,
}

impl MealDbClient {
    pub fn new(gateway: Gateway, base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
            gateway,
        }
    }

    pub fn from_config(config: &Config, gateway: Gateway) -> Self {
        Self::new(gateway, config.catalog_api_url.clone())
    }

    /// Issues one catalog GET and decodes the `{"meals": ...}` envelope
    async fn get_meals<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<MealsEnvelope<T>> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogSource for MealDbClient {
    async fn list_areas(&self) -> AppResult<Vec<String>> {
        self.gateway
            .fetch_with_fallback(&CacheKey::Areas, || async {
                let envelope: MealsEnvelope<ApiArea> =
                    self.get_meals("list.php", &[("a", "list")]).await?;
                let areas: Vec<String> =
                    envelope.into_items().into_iter().map(|a| a.area).collect();

                tracing::info!(areas = areas.len(), "Area list fetched");

                Ok(areas)
            })
            .await
    }

    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        self.gateway
            .fetch_with_fallback(&CacheKey::Ingredients, || async {
                let envelope: MealsEnvelope<ApiIngredient> =
                    self.get_meals("list.php", &[("i", "list")]).await?;
                let ingredients: Vec<Ingredient> = envelope
                    .into_items()
                    .into_iter()
                    .map(Ingredient::from)
                    .collect();

                tracing::info!(ingredients = ingredients.len(), "Ingredient list fetched");

                Ok(ingredients)
            })
            .await
    }

    async fn recipes_by_area(&self, area: &str) -> AppResult<Vec<Recipe>> {
        if area.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Area filter cannot be empty".to_string(),
            ));
        }

        let key = CacheKey::RecipeFilter {
            area: Some(area.to_string()),
            ingredient: None,
        };

        self.gateway
            .fetch_with_fallback(&key, || async {
                let envelope: MealsEnvelope<ApiMeal> =
                    self.get_meals("filter.php", &[("a", area)]).await?;
                let recipes: Vec<Recipe> =
                    envelope.into_items().into_iter().map(Recipe::from).collect();

                tracing::info!(area = %area, results = recipes.len(), "Recipes filtered by area");

                Ok(recipes)
            })
            .await
    }

    async fn recipes_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<Recipe>> {
        if ingredient.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Ingredient filter cannot be empty".to_string(),
            ));
        }

        let key = CacheKey::RecipeFilter {
            area: None,
            ingredient: Some(ingredient.to_string()),
        };

        self.gateway
            .fetch_with_fallback(&key, || async {
                let envelope: MealsEnvelope<ApiMeal> =
                    self.get_meals("filter.php", &[("i", ingredient)]).await?;
                let recipes: Vec<Recipe> =
                    envelope.into_items().into_iter().map(Recipe::from).collect();

                tracing::info!(
                    ingredient = %ingredient,
                    results = recipes.len(),
                    "Recipes filtered by ingredient"
                );

                Ok(recipes)
            })
            .await
    }

    async fn recipe_detail(&self, id: &str) -> AppResult<Option<RecipeDetails>> {
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Recipe id cannot be empty".to_string(),
            ));
        }

        let key = CacheKey::RecipeDetail(id.to_string());

        self.gateway
            .fetch_with_fallback(&key, || async {
                let envelope: MealsEnvelope<ApiMealDetail> =
                    self.get_meals("lookup.php", &[("i", id)]).await?;
                let detail = envelope
                    .into_items()
                    .into_iter()
                    .next()
                    .map(RecipeDetails::from);

                tracing::info!(id = %id, found = detail.is_some(), "Recipe detail fetched");

                Ok(detail)
            })
            .await
    }
}
