use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight recipe identity as returned by catalog filter queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
}

/// Full recipe detail, loaded lazily for the currently presented candidate
///
/// Always supersedes a [`Recipe`] with the same id for display purposes once
/// loaded; it is decoded atomically or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub source_url: Option<String>,
    pub tags: Option<String>,
}

/// A selectable main ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// The (area, ingredient) pair constraining candidate selection
///
/// An empty string means "unconstrained on this dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub area: String,
    pub ingredient: String,
}

impl FilterCriteria {
    pub fn new(area: impl Into<String>, ingredient: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            ingredient: ingredient.into(),
        }
    }

    /// True when neither dimension constrains the selection
    pub fn is_unconstrained(&self) -> bool {
        self.area.is_empty() && self.ingredient.is_empty()
    }

    /// True when both dimensions are supplied and intersection is required
    pub fn is_combined(&self) -> bool {
        !self.area.is_empty() && !self.ingredient.is_empty()
    }
}

/// One recorded user vote, immutable once created
///
/// The recipe fields are flattened so the persisted JSON keeps them at the
/// top level of each entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub saved_at: DateTime<Utc>,
    pub liked: bool,
    pub criteria: FilterCriteria,
}

// ============================================================================
// Upstream Catalog API Types
// ============================================================================

/// Response envelope shared by every catalog endpoint
///
/// The upstream service reports "no results" as `{"meals": null}` rather than
/// an empty array.
#[derive(Debug, Clone, Deserialize)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// Area entry from `list.php?a=list`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiArea {
    #[serde(rename = "strArea")]
    pub area: String,
}

/// Ingredient entry from `list.php?i=list`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIngredient {
    #[serde(rename = "idIngredient")]
    pub id: String,
    #[serde(rename = "strIngredient")]
    pub name: String,
    #[serde(rename = "strDescription", default)]
    pub description: Option<String>,
}

impl From<ApiIngredient> for Ingredient {
    fn from(api: ApiIngredient) -> Self {
        Ingredient {
            id: api.id,
            name: api.name,
            description: api.description,
        }
    }
}

/// Recipe summary from `filter.php`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: String,
}

impl From<ApiMeal> for Recipe {
    fn from(api: ApiMeal) -> Self {
        Recipe {
            id: api.id,
            name: api.name,
            thumbnail_url: api.thumbnail,
        }
    }
}

/// Full recipe record from `lookup.php?i={id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMealDetail {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: String,
    #[serde(rename = "strCategory")]
    pub category: String,
    #[serde(rename = "strArea")]
    pub area: String,
    #[serde(rename = "strInstructions")]
    pub instructions: String,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
}

impl From<ApiMealDetail> for RecipeDetails {
    fn from(api: ApiMealDetail) -> Self {
        RecipeDetails {
            id: api.id,
            name: api.name,
            thumbnail_url: api.thumbnail,
            category: api.category,
            area: api.area,
            instructions: api.instructions,
            source_url: api.source,
            tags: api.tags,
        }
    }
}
