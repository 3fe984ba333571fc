use serde::{Deserialize, Serialize};

use crate::slot::{Score, Slot, SlotSet, SLOT_COUNT};

/// Scores of one column, indexed by [`Slot`], with a parallel filled bitset.
///
/// Unfilled slots hold `0` in the score array; `filled` is the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreCard {
    scores: [Score; SLOT_COUNT],
    filled: SlotSet,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<Score> {
        if self.filled.contains(slot) {
            Some(self.scores[slot.index()])
        } else {
            None
        }
    }

    pub fn is_filled(&self, slot: Slot) -> bool {
        self.filled.contains(slot)
    }

    pub fn filled(&self) -> SlotSet {
        self.filled
    }

    /// Unfilled fillable slots, computed as a single mask operation.
    pub fn unfilled_fillable(&self) -> SlotSet {
        SlotSet::FILLABLE.difference(self.filled)
    }

    pub fn is_full(&self, fillable_only: bool) -> bool {
        let required = if fillable_only {
            SlotSet::FILLABLE
        } else {
            SlotSet::ALL
        };
        self.filled.is_superset(required)
    }

    /// Raw numeric buffer; unfilled entries read as `0`.
    pub fn raw(&self) -> &[Score; SLOT_COUNT] {
        &self.scores
    }

    /// Sum of the filled scores among `slots`.
    pub fn sum_of(&self, slots: SlotSet) -> Score {
        slots
            .intersection(self.filled)
            .iter()
            .map(|s| self.scores[s.index()])
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<Score>)> + '_ {
        Slot::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    pub(crate) fn set(&mut self, slot: Slot, score: Score) {
        self.scores[slot.index()] = score;
        self.filled.insert(slot);
    }
}
