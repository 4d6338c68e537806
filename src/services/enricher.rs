use crate::models::{Recipe, RecipeDetails};

/// Progressive detail loader for the currently presented candidate
///
/// Keeps the last successfully loaded detail alongside a loading flag, so
/// the caller never flickers back to placeholder state while a detail
/// reloads for the same candidate, and never shows a stale detail for a
/// different one. The transport offers no cancellation; each request is
/// tagged with a generation and late results for superseded requests are
/// discarded on arrival by candidate-id match.
#[derive(Debug, Default)]
pub struct DetailEnricher {
    detail: Option<RecipeDetails>,
    loading: bool,
    generation: u64,
}

/// Tag for one in-flight detail fetch
#[derive(Debug)]
pub struct DetailRequest {
    candidate_id: String,
    generation: u64,
}

impl DetailRequest {
    pub fn candidate_id(&self) -> &str {
        &self.candidate_id
    }
}

impl DetailEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a detail fetch for `candidate_id`, superseding any in-flight
    /// request for a previous candidate
    pub fn begin(&mut self, candidate_id: &str) -> DetailRequest {
        self.generation += 1;
        self.loading = true;
        DetailRequest {
            candidate_id: candidate_id.to_string(),
            generation: self.generation,
        }
    }

    /// Applies a finished fetch
    ///
    /// The fetched detail is kept only when the request's candidate is still
    /// the current one; results for superseded requests are discarded. An
    /// upstream not-found (`None`) leaves the last good detail in place.
    pub fn complete(
        &mut self,
        request: DetailRequest,
        fetched: Option<RecipeDetails>,
        current_id: Option<&str>,
    ) {
        if request.generation == self.generation {
            self.loading = false;
        }

        let Some(detail) = fetched else { return };

        if current_id == Some(request.candidate_id.as_str()) && detail.id == request.candidate_id {
            self.detail = Some(detail);
        } else {
            tracing::debug!(
                candidate_id = %request.candidate_id,
                "Discarding detail for superseded candidate"
            );
        }
    }

    /// Marks a failed fetch; the last good detail survives
    pub fn fail(&mut self, request: DetailRequest) {
        if request.generation == self.generation {
            self.loading = false;
        }
    }

    /// Display rule: the held detail, but only when it belongs to `candidate`
    ///
    /// Callers fall back to the lightweight [`Recipe`] fields on `None`.
    pub fn detail_for<'a>(&'a self, candidate: &Recipe) -> Option<&'a RecipeDetails> {
        self.detail.as_ref().filter(|d| d.id == candidate.id)
    }
}
