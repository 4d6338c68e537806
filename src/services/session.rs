use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    db::Storage,
    error::AppResult,
    models::{FilterCriteria, HistoryEntry, Recipe, RecipeDetails},
    services::{
        catalog::CatalogSource, cycler::Cycler, enricher::DetailEnricher, history::HistoryStore,
        resolver,
    },
};

/// Read model for the currently presented candidate
#[derive(Debug)]
pub struct CandidateView<'a> {
    pub recipe: &'a Recipe,
    /// Full detail, present only when a loaded detail matches this candidate
    pub detail: Option<&'a RecipeDetails>,
    pub detail_loading: bool,
}

/// Caller-facing facade over resolution, cycling, enrichment and history
///
/// The presentation layer supplies criteria and votes; the session owns the
/// candidate cursor, the progressive detail state and the interaction log.
pub struct DiscoverySession {
    source: Arc<dyn CatalogSource>,
    history: HistoryStore,
    cycler: Cycler,
    enricher: DetailEnricher,
    criteria: FilterCriteria,
    rng: StdRng,
}

impl DiscoverySession {
    pub async fn new(source: Arc<dyn CatalogSource>, storage: Arc<dyn Storage>) -> Self {
        Self::with_rng(source, storage, StdRng::from_entropy()).await
    }

    /// Construction with a caller-supplied generator, making presentation
    /// order reproducible for a known seed
    pub async fn with_rng(
        source: Arc<dyn CatalogSource>,
        storage: Arc<dyn Storage>,
        rng: StdRng,
    ) -> Self {
        let history = HistoryStore::load(storage).await;
        Self {
            source,
            history,
            cycler: Cycler::new(),
            enricher: DetailEnricher::new(),
            criteria: FilterCriteria::default(),
            rng,
        }
    }

    /// Resolves new criteria into a candidate set and re-seeds the cycle
    ///
    /// Returns the number of candidates. Every call recomputes the
    /// presentation order; reads between calls never reshuffle.
    pub async fn set_criteria(
        &mut self,
        area: &str,
        ingredient: &str,
        randomize: bool,
    ) -> AppResult<usize> {
        let criteria = FilterCriteria::new(area, ingredient);
        let candidates = resolver::resolve_candidates(self.source.as_ref(), &criteria).await?;

        self.criteria = criteria;
        self.cycler.seed(candidates, randomize, &mut self.rng);

        Ok(self.cycler.len())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn candidate_count(&self) -> usize {
        self.cycler.len()
    }

    /// The candidate at the cursor with whatever detail is valid for it
    pub fn current(&self) -> Option<CandidateView<'_>> {
        self.cycler.current().map(|recipe| CandidateView {
            recipe,
            detail: self.enricher.detail_for(recipe),
            detail_loading: self.enricher.is_loading(),
        })
    }

    /// Moves to the next candidate, wrapping after the last
    pub fn advance(&mut self) -> Option<&Recipe> {
        self.cycler.advance();
        self.cycler.current()
    }

    /// Fetches full detail for the current candidate
    ///
    /// The result is applied only if the candidate is still current when the
    /// fetch completes; a failed fetch keeps the last good detail.
    pub async fn load_current_detail(&mut self) -> AppResult<()> {
        let Some(current) = self.cycler.current() else {
            return Ok(());
        };

        let request = self.enricher.begin(&current.id);
        let candidate_id = request.candidate_id().to_string();

        match self.source.recipe_detail(&candidate_id).await {
            Ok(fetched) => {
                let current_id = self.cycler.current().map(|r| r.id.clone());
                self.enricher.complete(request, fetched, current_id.as_deref());
                Ok(())
            }
            Err(e) => {
                self.enricher.fail(request);
                Err(e)
            }
        }
    }

    /// Records a vote for the current candidate under the active criteria
    ///
    /// Returns `false` without touching the log when no candidate is
    /// presented.
    pub async fn record_vote(&mut self, liked: bool) -> AppResult<bool> {
        let Some(recipe) = self.cycler.current().cloned() else {
            return Ok(false);
        };

        self.history.record(&recipe, liked, &self.criteria).await?;
        Ok(true)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub async fn clear_history(&mut self) -> AppResult<()> {
        self.history.clear().await
    }
}
