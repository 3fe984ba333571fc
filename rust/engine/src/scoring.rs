//! Reference scoring evaluator.
//!
//! Raw dice results are first normalised into [`CountedResults`], from which
//! every fillable slot is scored by [`score_counted`]. The boosted evaluator in
//! [`crate::boost`] must agree with these functions on every input.

use tracing::trace;

use crate::errors::GameError;
use crate::scorecard::ScoreCard;
use crate::slot::{Score, Slot, SlotSet};

/// Bonus added to the numbers subtotal once it reaches [`NUMBERS_BONUS_THRESHOLD`].
pub const NUMBERS_BONUS: Score = 30;
pub const NUMBERS_BONUS_THRESHOLD: Score = 60;

/// Normalised dice results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountedResults {
    // ascending distinct faces
    faces: Vec<u8>,
    // (face, count), count descending then face descending
    groups: Vec<(u8, u32)>,
}

impl CountedResults {
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }

    pub fn groups(&self) -> &[(u8, u32)] {
        &self.groups
    }

    pub fn count_of(&self, face: u8) -> u32 {
        self.groups
            .iter()
            .find(|(f, _)| *f == face)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// Counts results into distinct faces and `(face, count)` groups.
///
/// Results are assumed valid; see [`ensure_results`].
///
/// # Panics
///
/// Panics if a result is greater than 6.
pub fn count_results(results: &[u8]) -> CountedResults {
    let mut counts = [0u32; 7];
    for &r in results {
        counts[r as usize] += 1;
    }
    let faces: Vec<u8> = (1..=6u8).filter(|&f| counts[f as usize] > 0).collect();
    let mut groups: Vec<(u8, u32)> = faces.iter().map(|&f| (f, counts[f as usize])).collect();
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    CountedResults { faces, groups }
}

/// Checks that every result is a face of a die.
pub fn ensure_results(results: &[u8]) -> Result<(), GameError> {
    match results.iter().find(|&&r| !(1..=6).contains(&r)) {
        Some(&value) => Err(GameError::InvalidResult { value }),
        None => Ok(()),
    }
}

/// Scores normalised results for a fillable slot.
pub fn score_counted(slot: Slot, counted: &CountedResults) -> Result<Score, GameError> {
    let groups = &counted.groups;
    let top = groups.first().copied();
    let second = groups.get(1).copied();
    let score = match slot {
        Slot::One | Slot::Two | Slot::Three | Slot::Four | Slot::Five | Slot::Six => {
            let face = slot as u8;
            counted.count_of(face) as Score * face as Score
        }
        Slot::Max | Slot::Min => groups.iter().map(|&(f, c)| f as Score * c as Score).sum(),
        Slot::TwoPairs => match (top, second) {
            (Some((fa, ca)), Some((fb, cb))) if ca >= 2 && cb >= 2 => {
                2 * (fa as Score + fb as Score) + 10
            }
            _ => 0,
        },
        Slot::Straight => straight_score(&counted.faces),
        Slot::FullHouse => match (top, second) {
            (Some((fa, ca)), Some((fb, cb))) if ca >= 3 && cb >= 2 => {
                3 * fa as Score + 2 * fb as Score + 30
            }
            _ => 0,
        },
        Slot::Carriage => match top {
            Some((f, c)) if c >= 4 => 4 * f as Score + 40,
            _ => 0,
        },
        Slot::Yamb => match top {
            Some((f, c)) if c >= 5 => 5 * f as Score + 50,
            _ => 0,
        },
        Slot::Total | Slot::NumbersSum | Slot::SumsDifference | Slot::CollectionsSum => {
            return Err(GameError::NotFillable { slot });
        }
    };
    Ok(score)
}

// Five consecutive faces: four consecutive steps in the ascending distinct faces.
fn straight_score(faces: &[u8]) -> Score {
    let mut run = 0usize;
    for i in 1..faces.len() {
        if faces[i] - faces[i - 1] == 1 {
            run += 1;
            if run >= 4 {
                return 10 * faces[i - run] as Score + 25;
            }
        } else {
            run = 0;
        }
    }
    0
}

/// Scores raw results for a fillable slot.
pub fn evaluate(slot: Slot, results: &[u8]) -> Result<Score, GameError> {
    ensure_results(results)?;
    score_counted(slot, &count_results(results))
}

/// Scores raw results for every fillable slot.
pub fn evaluate_all(results: &[u8]) -> Result<EvaluateAll, GameError> {
    ensure_results(results)?;
    Ok(EvaluateAll::reference(count_results(results)))
}

#[derive(Debug, Clone)]
enum Normalised {
    Counted(CountedResults),
    Histogram(crate::boost::Histogram),
}

/// Lazy iterator of `(slot, score)` over the fillable slots, in ordinal order.
///
/// Normalisation happens once at construction; clone the iterator to restart it.
#[derive(Debug, Clone)]
pub struct EvaluateAll {
    input: Normalised,
    next: usize,
}

impl EvaluateAll {
    pub(crate) fn reference(counted: CountedResults) -> Self {
        Self {
            input: Normalised::Counted(counted),
            next: 0,
        }
    }

    pub(crate) fn boosted(histogram: crate::boost::Histogram) -> Self {
        Self {
            input: Normalised::Histogram(histogram),
            next: 0,
        }
    }
}

impl Iterator for EvaluateAll {
    type Item = (Slot, Score);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = *Slot::FILLABLE.get(self.next)?;
        self.next += 1;
        let score = match &self.input {
            Normalised::Counted(c) => score_counted(slot, c).unwrap_or(0),
            Normalised::Histogram(h) => h.score(slot).unwrap_or(0),
        };
        Some((slot, score))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = Slot::FILLABLE.len() - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for EvaluateAll {}

/// Fills every auto slot whose inputs are complete and which is still empty.
///
/// Returns the slots filled by this call; calling again without an
/// intervening fill returns an empty set and leaves the card untouched.
pub fn update_auto_slots(card: &mut ScoreCard) -> SlotSet {
    let mut updated = SlotSet::EMPTY;
    let filled = card.filled();

    if !filled.contains(Slot::NumbersSum) && filled.is_superset(SlotSet::NUMBERS) {
        let mut sum = card.sum_of(SlotSet::NUMBERS);
        if sum >= NUMBERS_BONUS_THRESHOLD {
            sum += NUMBERS_BONUS;
        }
        card.set(Slot::NumbersSum, sum);
        updated.insert(Slot::NumbersSum);
    }

    let difference_inputs = SlotSet::SUMS.union([Slot::One].into_iter().collect());
    if !filled.contains(Slot::SumsDifference) && filled.is_superset(difference_inputs) {
        let one = card.get(Slot::One).unwrap_or(0);
        let max = card.get(Slot::Max).unwrap_or(0);
        let min = card.get(Slot::Min).unwrap_or(0);
        card.set(Slot::SumsDifference, one * (max - min));
        updated.insert(Slot::SumsDifference);
    }

    if !filled.contains(Slot::CollectionsSum) && filled.is_superset(SlotSet::COLLECTIONS) {
        let sum = card.sum_of(SlotSet::COLLECTIONS);
        card.set(Slot::CollectionsSum, sum);
        updated.insert(Slot::CollectionsSum);
    }

    // the subtotals above may have just been filled, so re-read the card
    if !card.is_filled(Slot::Total) && card.filled().is_superset(SlotSet::FILLABLE) {
        let partials = [Slot::NumbersSum, Slot::SumsDifference, Slot::CollectionsSum];
        if partials.iter().all(|&s| card.is_filled(s)) {
            let total = partials.iter().filter_map(|&s| card.get(s)).sum();
            card.set(Slot::Total, total);
            updated.insert(Slot::Total);
        }
    }

    if !updated.is_empty() {
        trace!(slots = ?updated.iter().collect::<Vec<_>>(), "auto slots updated");
    }
    updated
}
