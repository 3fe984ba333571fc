//! Exhaustive dice outcomes and per-multiset score tables.

use rustc_hash::FxHashMap;

use crate::errors::GameError;
use crate::evaluator::Evaluator;
use crate::slot::{Score, Slot};

/// Every non-decreasing sequence of `n` faces: C(n + 5, 5) entries, 252 for five dice.
pub fn sorted_multisets(n: usize) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut current = vec![1u8; n];
    loop {
        out.push(current.clone());
        // rightmost position that can still grow
        let Some(i) = current.iter().rposition(|&f| f < 6) else {
            return out;
        };
        let next = current[i] + 1;
        for f in &mut current[i..] {
            *f = next;
        }
    }
}

/// Every ordered outcome of rolling `n` dice: 6^n entries in lexicographic order.
pub fn all_rolls(n: usize) -> impl Iterator<Item = Vec<u8>> {
    let mut current = Some(vec![1u8; n]);
    std::iter::from_fn(move || {
        let roll = current.take()?;
        let mut next = roll.clone();
        if let Some(i) = next.iter().rposition(|&f| f < 6) {
            next[i] += 1;
            for f in &mut next[i + 1..] {
                *f = 1;
            }
            current = Some(next);
        }
        Some(roll)
    })
}

/// Scores of the 13 fillable slots for every sorted multiset of `n` dice.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    dice: usize,
    rows: Vec<(Vec<u8>, [Score; 13])>,
    index: FxHashMap<Vec<u8>, usize>,
}

impl ScoreTable {
    pub fn build(dice: usize, evaluator: &mut Evaluator) -> Result<Self, GameError> {
        let multisets = sorted_multisets(dice);
        let mut rows = Vec::with_capacity(multisets.len());
        let mut index = FxHashMap::default();
        for results in multisets {
            let mut scores = [0; 13];
            for (i, &slot) in Slot::FILLABLE.iter().enumerate() {
                scores[i] = evaluator.score(slot, &results)?;
            }
            index.insert(results.clone(), rows.len());
            rows.push((results, scores));
        }
        Ok(Self { dice, rows, index })
    }

    pub fn dice(&self) -> usize {
        self.dice
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&[u8], &[Score; 13])> {
        self.rows.iter().map(|(r, s)| (r.as_slice(), s))
    }

    /// Looks up results in any order.
    pub fn get(&self, results: &[u8]) -> Option<&[Score; 13]> {
        let mut sorted = results.to_vec();
        sorted.sort_unstable();
        self.index.get(&sorted).map(|&i| &self.rows[i].1)
    }

    pub fn score(&self, results: &[u8], slot: Slot) -> Option<Score> {
        let column = Slot::FILLABLE.iter().position(|&s| s == slot)?;
        self.get(results).map(|row| row[column])
    }
}
