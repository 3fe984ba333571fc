//! Property-based tests for scoring and column invariants.

use proptest::prelude::*;

use yamb_engine::column::Column;
use yamb_engine::evaluator::Evaluator;
use yamb_engine::scoring::evaluate;
use yamb_engine::slot::Slot;

fn dice_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1..=6u8, 5)
}

fn slot_strategy() -> impl Strategy<Value = Slot> {
    (0..17i64).prop_map(|i| Slot::from_index(i).unwrap())
}

fn fillable_strategy() -> impl Strategy<Value = Slot> {
    prop::sample::select(Slot::FILLABLE.to_vec())
}

proptest! {
    #[test]
    fn score_ignores_dice_order(
        dice in dice_strategy().prop_shuffle(),
        slot in fillable_strategy(),
    ) {
        let mut sorted = dice.clone();
        sorted.sort_unstable();
        prop_assert_eq!(evaluate(slot, &dice), evaluate(slot, &sorted));
    }

    #[test]
    fn boosted_agrees_with_reference(
        dice in prop::collection::vec(1..=6u8, 0..9),
        slot in slot_strategy(),
        capacity in 0..6usize,
    ) {
        let mut boosted = Evaluator::boosted(capacity);
        // twice, so the second lookup may come from the cache
        prop_assert_eq!(boosted.score(slot, &dice), evaluate(slot, &dice));
        prop_assert_eq!(boosted.score(slot, &dice), evaluate(slot, &dice));
    }

    #[test]
    fn fillable_scores_are_non_negative(dice in dice_strategy(), slot in fillable_strategy()) {
        let score = evaluate(slot, &dice).unwrap();
        prop_assert!(score >= 0, "score={score} for dice={dice:?} slot={slot}");
    }

    #[test]
    fn filled_slot_leaves_free_column(dice in dice_strategy(), slot in fillable_strategy()) {
        let mut column = Column::free();
        column.fill_slot(slot, &dice).unwrap();
        prop_assert!(!column.is_slot_available(slot));
        prop_assert!(!column.next_available_slots().contains(&slot));
        prop_assert_eq!(column.available_slots().len(), 12);
    }

    #[test]
    fn auto_update_is_idempotent(rolls in prop::collection::vec(dice_strategy(), 13)) {
        let mut column = Column::free();
        for (slot, dice) in Slot::FILLABLE.iter().zip(&rolls) {
            column.fill_slot(*slot, dice).unwrap();
        }
        column.update_auto_slots();
        let once = column.scores().clone();
        prop_assert!(column.update_auto_slots().is_empty());
        prop_assert_eq!(column.scores(), &once);
        prop_assert!(column.is_full(false));
    }
}
