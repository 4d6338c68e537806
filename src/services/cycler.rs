use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Recipe;

/// Cyclic presenter over a resolved candidate set
///
/// Holds the fixed presentation order and the cursor; the order is decided
/// once at seed time and never changes until the next seed, so repeated
/// reads of the same criteria never reshuffle. Empty until seeded with a
/// non-empty candidate set.
#[derive(Debug, Default)]
pub struct Cycler {
    candidates: Vec<Recipe>,
    cursor: usize,
}

impl Cycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new candidate set and resets the cursor
    ///
    /// With `randomize`, the presentation order is a Fisher-Yates permutation
    /// drawn from the supplied generator; otherwise the input order is kept.
    pub fn seed<R: Rng>(&mut self, mut candidates: Vec<Recipe>, randomize: bool, rng: &mut R) {
        if randomize {
            candidates.shuffle(rng);
        }
        self.candidates = candidates;
        self.cursor = 0;
    }

    /// The candidate at the cursor, or `None` when empty
    pub fn current(&self) -> Option<&Recipe> {
        self.candidates.get(self.cursor)
    }

    /// Moves the cursor forward, wrapping to the first candidate after the
    /// last; no-op when empty
    pub fn advance(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.candidates.len();
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The full candidate set in presentation order
    pub fn candidates(&self) -> &[Recipe] {
        &self.candidates
    }
}
