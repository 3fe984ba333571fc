use crate::boost::{EvaluationCache, EvaluationStats};
use crate::errors::GameError;
use crate::scoring::{self, EvaluateAll};
use crate::slot::{Score, Slot};

/// Scoring strategy, selected when a column is built.
///
/// Both strategies return identical scores for every input.
#[derive(Debug, Clone, Default)]
pub enum Evaluator {
    #[default]
    Reference,
    Boosted(EvaluationCache),
}

impl Evaluator {
    /// Boosted evaluator with `capacity` entries per cache; 0 disables caching.
    pub fn boosted(capacity: usize) -> Self {
        Evaluator::Boosted(EvaluationCache::new(capacity))
    }

    pub fn is_boosted(&self) -> bool {
        matches!(self, Evaluator::Boosted(_))
    }

    pub fn score(&mut self, slot: Slot, results: &[u8]) -> Result<Score, GameError> {
        match self {
            Evaluator::Reference => scoring::evaluate(slot, results),
            Evaluator::Boosted(cache) => cache.score(slot, results),
        }
    }

    pub fn evaluate_all(&mut self, results: &[u8]) -> Result<EvaluateAll, GameError> {
        match self {
            Evaluator::Reference => scoring::evaluate_all(results),
            Evaluator::Boosted(cache) => Ok(EvaluateAll::boosted(cache.histogram(results)?)),
        }
    }

    pub fn resolve_slot(&mut self, name: &str) -> Result<Slot, GameError> {
        match self {
            Evaluator::Reference => name.parse(),
            Evaluator::Boosted(cache) => cache.resolve_slot(name),
        }
    }

    /// Cache statistics of a boosted evaluator.
    pub fn stats(&self) -> Option<EvaluationStats> {
        match self {
            Evaluator::Reference => None,
            Evaluator::Boosted(cache) => Some(cache.stats()),
        }
    }
}

