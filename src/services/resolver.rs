use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{FilterCriteria, Recipe},
    services::catalog::CatalogSource,
};

/// Resolves filter criteria into an ordered candidate set
///
/// The upstream catalog cannot filter on both dimensions in one query, so a
/// combined criteria pair is resolved by fetching both single-dimension lists
/// concurrently and intersecting on recipe id. The area list's relative order
/// is preserved; the ingredient list is used only for membership testing.
/// Either fetch failing fails the whole resolution; no partial intersection
/// is produced from one successful side.
///
/// The intersection is strict: an empty intersection yields an empty set
/// rather than falling back to area-only matches.
pub async fn resolve_candidates(
    source: &dyn CatalogSource,
    criteria: &FilterCriteria,
) -> AppResult<Vec<Recipe>> {
    if criteria.is_unconstrained() {
        return Ok(Vec::new());
    }

    if !criteria.is_combined() {
        let recipes = if criteria.area.is_empty() {
            source.recipes_by_ingredient(&criteria.ingredient).await?
        } else {
            source.recipes_by_area(&criteria.area).await?
        };
        return Ok(dedup_by_id(recipes));
    }

    let (by_area, by_ingredient) = tokio::try_join!(
        source.recipes_by_area(&criteria.area),
        source.recipes_by_ingredient(&criteria.ingredient)
    )?;

    let ingredient_ids: HashSet<&str> = by_ingredient.iter().map(|r| r.id.as_str()).collect();
    let matches: Vec<Recipe> = by_area
        .into_iter()
        .filter(|r| ingredient_ids.contains(r.id.as_str()))
        .collect();
    let matches = dedup_by_id(matches);

    tracing::info!(
        area = %criteria.area,
        ingredient = %criteria.ingredient,
        matches = matches.len(),
        "Criteria resolved"
    );

    Ok(matches)
}

/// Drops duplicate ids, keeping the first occurrence
fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}
