use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use recipelab::{
    models::{FilterCriteria, Ingredient, Recipe, RecipeDetails},
    AppError, AppResult, CatalogSource, DiscoverySession, MemoryStorage,
};

/// Catalog stand-in with fixed data and a switchable outage
struct FakeSource {
    areas: Vec<String>,
    by_area: HashMap<String, Vec<Recipe>>,
    by_ingredient: HashMap<String, Vec<Recipe>>,
    details: HashMap<String, RecipeDetails>,
    offline: AtomicBool,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            areas: vec!["Italian".to_string(), "Mexican".to_string()],
            by_area: HashMap::new(),
            by_ingredient: HashMap::new(),
            details: HashMap::new(),
            offline: AtomicBool::new(false),
        }
    }

    fn with_area(mut self, area: &str, ids: &[&str]) -> Self {
        self.by_area
            .insert(area.to_string(), ids.iter().map(|id| recipe(id)).collect());
        self
    }

    fn with_ingredient(mut self, ingredient: &str, ids: &[&str]) -> Self {
        self.by_ingredient.insert(
            ingredient.to_string(),
            ids.iter().map(|id| recipe(id)).collect(),
        );
        self
    }

    fn with_details(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self.details.insert(id.to_string(), details(id));
        }
        self
    }

    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AppError::ExternalApi("catalog unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FakeSource {
    async fn list_areas(&self) -> AppResult<Vec<String>> {
        self.check_online()?;
        Ok(self.areas.clone())
    }

    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        self.check_online()?;
        Ok(self
            .by_ingredient
            .keys()
            .map(|name| Ingredient {
                id: name.clone(),
                name: name.clone(),
                description: Some(format!("All about {}", name)),
            })
            .collect())
    }

    async fn recipes_by_area(&self, area: &str) -> AppResult<Vec<Recipe>> {
        self.check_online()?;
        Ok(self.by_area.get(area).cloned().unwrap_or_default())
    }

    async fn recipes_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<Recipe>> {
        self.check_online()?;
        Ok(self.by_ingredient.get(ingredient).cloned().unwrap_or_default())
    }

    async fn recipe_detail(&self, id: &str) -> AppResult<Option<RecipeDetails>> {
        self.check_online()?;
        Ok(self.details.get(id).cloned())
    }
}

fn recipe(id: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: format!("Recipe {}", id),
        thumbnail_url: format!("https://example.test/{}.jpg", id),
    }
}

fn details(id: &str) -> RecipeDetails {
    RecipeDetails {
        id: id.to_string(),
        name: format!("Recipe {}", id),
        thumbnail_url: format!("https://example.test/{}.jpg", id),
        category: "Pasta".to_string(),
        area: "Italian".to_string(),
        instructions: "Boil water. Add pasta.".to_string(),
        source_url: None,
        tags: None,
    }
}

async fn create_session(source: FakeSource) -> DiscoverySession {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    DiscoverySession::with_rng(
        Arc::new(source),
        Arc::new(MemoryStorage::new()),
        StdRng::seed_from_u64(42),
    )
    .await
}

#[tokio::test]
async fn test_combined_criteria_resolve_to_ordered_intersection() {
    let source = FakeSource::new()
        .with_area("Italian", &["1", "2", "3", "4"])
        .with_ingredient("Tomato", &["4", "2", "9"]);
    let mut session = create_session(source).await;

    let count = session.set_criteria("Italian", "Tomato", false).await.unwrap();
    assert_eq!(count, 2);

    // Area order wins
    assert_eq!(session.current().unwrap().recipe.id, "2");
    session.advance();
    assert_eq!(session.current().unwrap().recipe.id, "4");
    // Wrap-around
    session.advance();
    assert_eq!(session.current().unwrap().recipe.id, "2");
}

#[tokio::test]
async fn test_empty_intersection_yields_no_candidates() {
    // The earlier presentation layer padded empty intersections with
    // area-only matches; the session contract is strict intersection.
    let source = FakeSource::new()
        .with_area("Italian", &["1", "2"])
        .with_ingredient("Tofu", &["8", "9"]);
    let mut session = create_session(source).await;

    let count = session.set_criteria("Italian", "Tofu", false).await.unwrap();
    assert_eq!(count, 0);
    assert!(session.current().is_none());
    assert!(session.advance().is_none());
}

#[tokio::test]
async fn test_presentation_order_is_stable_between_seeds() {
    let ids: Vec<String> = (0..12).map(|i| i.to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    let source = FakeSource::new()
        .with_area("Italian", &id_refs)
        .with_ingredient("Tomato", &id_refs);
    let mut session = create_session(source).await;

    session.set_criteria("Italian", "Tomato", true).await.unwrap();

    // Repeated reads without a re-seed never reshuffle
    let first_read = session.current().unwrap().recipe.id.clone();
    for _ in 0..5 {
        assert_eq!(session.current().unwrap().recipe.id, first_read);
    }

    let mut seen = Vec::new();
    for _ in 0..12 {
        seen.push(session.current().unwrap().recipe.id.clone());
        session.advance();
    }

    // Shuffle never changes the candidate multiset
    let mut sorted = seen.clone();
    sorted.sort();
    let mut expected = ids.clone();
    expected.sort();
    assert_eq!(sorted, expected);
}

#[tokio::test]
async fn test_identical_seeds_produce_identical_permutations() {
    let build = || {
        FakeSource::new()
            .with_area("Italian", &["1", "2", "3", "4", "5", "6", "7", "8"])
            .with_ingredient("Tomato", &["1", "2", "3", "4", "5", "6", "7", "8"])
    };

    let mut first = create_session(build()).await;
    let mut second = create_session(build()).await;

    first.set_criteria("Italian", "Tomato", true).await.unwrap();
    second.set_criteria("Italian", "Tomato", true).await.unwrap();

    for _ in 0..8 {
        assert_eq!(
            first.current().unwrap().recipe.id,
            second.current().unwrap().recipe.id
        );
        first.advance();
        second.advance();
    }
}

#[tokio::test]
async fn test_vote_flow_lands_in_history_with_criteria() {
    let source = FakeSource::new()
        .with_area("Italian", &["1", "2"])
        .with_ingredient("Tomato", &["1", "2"]);
    let mut session = create_session(source).await;

    session.set_criteria("Italian", "Tomato", false).await.unwrap();
    assert!(session.record_vote(true).await.unwrap());
    session.advance();
    assert!(session.record_vote(false).await.unwrap());

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].recipe.id, "2");
    assert!(!history[0].liked);
    assert_eq!(history[1].recipe.id, "1");
    assert!(history[1].liked);
    assert_eq!(
        history[0].criteria,
        FilterCriteria::new("Italian", "Tomato")
    );

    session.clear_history().await.unwrap();
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_history_keeps_only_twenty_most_recent_votes() {
    let ids: Vec<String> = (0..25).map(|i| i.to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    let source = FakeSource::new()
        .with_area("Italian", &id_refs)
        .with_ingredient("Tomato", &id_refs);
    let mut session = create_session(source).await;

    session.set_criteria("Italian", "Tomato", false).await.unwrap();
    for _ in 0..25 {
        session.record_vote(true).await.unwrap();
        session.advance();
    }

    let history = session.history();
    assert_eq!(history.len(), 20);
    assert_eq!(history[0].recipe.id, "24");
    assert_eq!(history[19].recipe.id, "5");
}

#[tokio::test]
async fn test_vote_without_candidate_is_a_noop() {
    let source = FakeSource::new();
    let mut session = create_session(source).await;

    assert!(!session.record_vote(true).await.unwrap());
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_detail_shown_only_while_its_candidate_is_current() {
    let source = FakeSource::new()
        .with_area("Italian", &["1", "2"])
        .with_ingredient("Tomato", &["1", "2"])
        .with_details(&["1", "2"]);
    let mut session = create_session(source).await;

    session.set_criteria("Italian", "Tomato", false).await.unwrap();
    session.load_current_detail().await.unwrap();

    let view = session.current().unwrap();
    assert_eq!(view.detail.unwrap().id, "1");
    assert!(!view.detail_loading);

    // After advancing, the held detail belongs to candidate 1 and must not
    // leak onto candidate 2; the caller falls back to the lightweight fields
    session.advance();
    let view = session.current().unwrap();
    assert_eq!(view.recipe.id, "2");
    assert!(view.detail.is_none());

    // Wrapping back makes the still-valid detail visible again
    session.advance();
    let view = session.current().unwrap();
    assert_eq!(view.recipe.id, "1");
    assert_eq!(view.detail.unwrap().id, "1");
}

#[tokio::test]
async fn test_unknown_detail_id_is_not_an_error() {
    let source = FakeSource::new()
        .with_area("Italian", &["1"])
        .with_ingredient("Tomato", &["1"]);
    let mut session = create_session(source).await;

    session.set_criteria("Italian", "Tomato", false).await.unwrap();
    session.load_current_detail().await.unwrap();

    let view = session.current().unwrap();
    assert!(view.detail.is_none());
    assert!(!view.detail_loading);
}

#[tokio::test]
async fn test_resolution_failure_leaves_previous_candidates_in_place() {
    let source = Arc::new(
        FakeSource::new()
            .with_area("Italian", &["1", "2"])
            .with_ingredient("Tomato", &["1", "2"]),
    );
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let mut session = DiscoverySession::with_rng(
        source.clone(),
        Arc::new(MemoryStorage::new()),
        StdRng::seed_from_u64(42),
    )
    .await;

    session.set_criteria("Italian", "Tomato", false).await.unwrap();
    assert_eq!(session.candidate_count(), 2);

    source.set_offline(true);
    let result = session.set_criteria("Mexican", "Beef", false).await;
    assert!(matches!(result, Err(AppError::ExternalApi(_))));

    // The failed resolution did not clobber the browsing state
    assert_eq!(session.candidate_count(), 2);
    assert_eq!(session.criteria(), &FilterCriteria::new("Italian", "Tomato"));
}

#[tokio::test]
async fn test_failed_detail_fetch_keeps_last_good_detail() {
    let source = Arc::new(
        FakeSource::new()
            .with_area("Italian", &["1"])
            .with_ingredient("Tomato", &["1"])
            .with_details(&["1"]),
    );
    let mut session = DiscoverySession::with_rng(
        source.clone(),
        Arc::new(MemoryStorage::new()),
        StdRng::seed_from_u64(42),
    )
    .await;

    session.set_criteria("Italian", "Tomato", false).await.unwrap();
    session.load_current_detail().await.unwrap();
    assert!(session.current().unwrap().detail.is_some());

    source.set_offline(true);
    let result = session.load_current_detail().await;
    assert!(matches!(result, Err(AppError::ExternalApi(_))));

    let view = session.current().unwrap();
    assert_eq!(view.detail.unwrap().id, "1");
    assert!(!view.detail_loading);
}

#[tokio::test]
async fn test_history_survives_session_restart() {
    let storage = Arc::new(MemoryStorage::new());
    let build = || {
        Arc::new(
            FakeSource::new()
                .with_area("Italian", &["1"])
                .with_ingredient("Tomato", &["1"]),
        )
    };

    {
        let mut session = DiscoverySession::with_rng(
            build(),
            storage.clone(),
            StdRng::seed_from_u64(1),
        )
        .await;
        session.set_criteria("Italian", "Tomato", false).await.unwrap();
        session.record_vote(true).await.unwrap();
    }

    let session =
        DiscoverySession::with_rng(build(), storage, StdRng::seed_from_u64(2)).await;
    let history = session.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].recipe.id, "1");
    assert!(history[0].liked);
}
