mod common;

use common::ScriptedDie;
use yamb_engine::column::{
    Column, Direction, PostFillingAction, PostFillingRequirement, PreFillingAction,
    PreFillingRequirement,
};
use yamb_engine::errors::{ErrorKind, GameError};
use yamb_engine::game::{GameSettings, Yamb};
use yamb_engine::slot::Slot;

fn scripted(script: &[u8]) -> Yamb<ScriptedDie> {
    scripted_with(script, GameSettings::default())
}

fn scripted_with(script: &[u8], settings: GameSettings) -> Yamb<ScriptedDie> {
    let columns = vec![
        Column::ordered(Direction::Down),
        Column::ordered(Direction::Up),
        Column::free(),
        Column::announced(1, false).expect("valid"),
    ];
    Yamb::new(columns, ScriptedDie::new(script), settings).expect("game")
}

#[test]
fn standard_game_has_four_columns() {
    let game = Yamb::standard(Some(1));
    let names: Vec<_> = game.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["down", "up", "free", "announced"]);
    assert_eq!(game.roll_index(), 0);
    assert_eq!(game.results(), &[0; 5]);
    assert!(game.can_roll());
}

#[test]
fn invalid_settings_are_rejected() {
    let zero_dice = GameSettings {
        dice_count: 0,
        ..GameSettings::default()
    };
    assert!(Yamb::new(vec![Column::free()], ScriptedDie::new(&[]), zero_dice).is_err());
    let zero_rolls = GameSettings {
        roll_budget: 0,
        ..GameSettings::default()
    };
    assert!(Yamb::new(vec![Column::free()], ScriptedDie::new(&[]), zero_rolls).is_err());
    let err = Yamb::new(Vec::new(), ScriptedDie::new(&[]), GameSettings::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn replacements_keep_unselected_dice() {
    let mut game = scripted(&[1, 2, 3, 4, 5, 6, 6]);
    game.start_turn().expect("start");
    assert_eq!(game.roll_dice(None).expect("roll"), &[1, 2, 3, 4, 5]);
    let mask = [true, false, false, false, true];
    assert_eq!(game.roll_dice(Some(&mask)).expect("roll"), &[6, 2, 3, 4, 6]);
    assert_eq!(game.roll_index(), 2);
    assert_eq!(game.dice().remaining(), 0);
}

#[test]
fn no_mask_rerolls_everything() {
    let mut game = scripted(&[1, 1, 1, 1, 1, 2, 3, 4, 5, 6]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    assert_eq!(game.roll_dice(None).expect("roll"), &[2, 3, 4, 5, 6]);
}

#[test]
fn results_are_sorted_when_requested() {
    let settings = GameSettings {
        sort_results: true,
        ..GameSettings::default()
    };
    let mut game = scripted_with(&[5, 3, 1, 4, 2, 1], settings);
    game.start_turn().expect("start");
    assert_eq!(game.roll_dice(None).expect("roll"), &[1, 2, 3, 4, 5]);
    game.roll_dice(Some(&[false, false, false, false, true]))
        .expect("roll");
    assert_eq!(game.results(), &[1, 1, 2, 3, 4]);
}

#[test]
fn roll_budget_is_enforced() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    for _ in 0..3 {
        game.roll_dice(None).expect("roll");
    }
    assert!(!game.can_roll());
    let err = game.roll_dice(None).unwrap_err();
    assert_eq!(err, GameError::RollBudgetExhausted { budget: 3 });
    assert_eq!(err.kind(), ErrorKind::IllegalState);
}

#[test]
fn first_roll_refuses_a_mask() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    let err = game.roll_dice(Some(&[true; 5])).unwrap_err();
    assert_eq!(err, GameError::ReplacementOnFirstRoll);
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn mask_length_must_match_dice() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    let err = game.roll_dice(Some(&[true, false])).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidReplacementMask {
            expected: 5,
            actual: 2
        }
    );
}

#[test]
fn turn_cannot_end_before_a_roll() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    assert_eq!(game.end_turn(2, Slot::One), Err(GameError::NoRollYet));
}

#[test]
fn end_turn_fills_and_resets() {
    let mut game = scripted(&[6, 6, 6, 2, 2]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    assert_eq!(game.end_turn(0, Slot::One), Ok(0));
    assert_eq!(game.roll_index(), 0);
    assert_eq!(game.locked_column(), None);
    assert_eq!(game.columns()[0].score(Slot::One), Some(0));
    assert_eq!(game.end_turn(1, Slot::Yamb), Err(GameError::NoRollYet));
}

#[test]
fn column_index_out_of_range() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    assert_eq!(
        game.end_turn(4, Slot::One),
        Err(GameError::InvalidColumnIndex { index: 4, len: 4 })
    );
    assert!(game.get_pre_filling_requirements(9).is_err());
}

#[test]
fn announcement_locks_the_game() {
    let mut game = scripted(&[3, 3, 3, 3, 1, 3]);
    game.start_turn().expect("start");
    assert_eq!(game.get_all_pre_filling_requirements(), vec![None; 4]);
    game.roll_dice(None).expect("roll");
    assert_eq!(
        game.get_all_pre_filling_requirements(),
        vec![None, None, None, Some(PreFillingRequirement::Announcement)]
    );
    game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::Yamb))
        .expect("announce");
    assert_eq!(game.locked_column(), Some(3));
    assert_eq!(game.get_all_pre_filling_requirements(), vec![None; 4]);

    let err = game.end_turn(2, Slot::Yamb).unwrap_err();
    assert_eq!(
        err,
        GameError::ColumnLocked {
            locked: 3,
            requested: 2
        }
    );

    game.roll_dice(Some(&[false, false, false, false, true]))
        .expect("roll");
    assert_eq!(game.end_turn(3, Slot::Yamb), Ok(65));
    assert_eq!(game.locked_column(), Some(3));
    assert_eq!(
        game.get_post_filling_requirements(3),
        Ok(Some(PostFillingRequirement::Suppress))
    );
    assert_eq!(
        game.get_post_filling_requirements(0),
        Err(GameError::ColumnLocked {
            locked: 3,
            requested: 0
        })
    );
    game.make_post_filling_action(3, PostFillingAction::Suppress)
        .expect("suppress");
    assert_eq!(game.locked_column(), None);
    game.start_turn().expect("next turn");
}

#[test]
fn skipped_post_filling_action_blocks_next_turn() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::One))
        .expect("announce");
    game.end_turn(3, Slot::One).expect("fill");
    assert_eq!(
        game.start_turn(),
        Err(GameError::PostFillingActionPending { column: 3 })
    );
}

#[test]
fn post_filling_only_between_turns() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    assert_eq!(
        game.get_post_filling_requirements(2),
        Err(GameError::TurnInProgress)
    );
    assert_eq!(
        game.make_post_filling_action(2, PostFillingAction::Suppress),
        Err(GameError::TurnInProgress)
    );
}

#[test]
fn immediately_filled_announcement_stops_rolling() {
    let columns = vec![
        Column::free(),
        Column::announced(1, true).expect("valid"),
    ];
    let mut game =
        Yamb::new(columns, ScriptedDie::new(&[]), GameSettings::default()).expect("game");
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.make_pre_filling_action(1, PreFillingAction::Announce(Slot::Max))
        .expect("announce");
    assert!(!game.can_roll());
    assert_eq!(
        game.roll_dice(None).unwrap_err(),
        GameError::RollingDisallowed { column: 1 }
    );
    assert_eq!(game.end_turn(1, Slot::Max), Ok(5));
}

#[test]
fn announcement_at_the_wrong_roll() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.roll_dice(None).expect("roll");
    assert_eq!(
        game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::One)),
        Err(GameError::NoPreFillingAction { roll: 2 })
    );
}

#[test]
fn total_score_skips_unfilled_columns() {
    let mut game = scripted(&[2, 2, 2, 2, 2, 4, 4, 4, 4, 4]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.end_turn(2, Slot::Max).expect("fill");
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.end_turn(1, Slot::Yamb).expect("fill");
    assert_eq!(game.get_total_score(Slot::Max), 10);
    assert_eq!(game.get_total_score(Slot::Yamb), 70);
    assert_eq!(game.get_total_score(Slot::Total), 0);
    assert!(!game.is_full(true));
}

#[test]
fn unchecked_game_ignores_first_roll_mask() {
    let settings = GameSettings {
        strict_checking: false,
        ..GameSettings::default()
    };
    let mut game = scripted_with(&[4, 4, 4, 4, 4], settings);
    game.start_turn().expect("start");
    let mask = [true, false, false, false, false];
    assert_eq!(game.roll_dice(Some(&mask)).expect("roll"), &[4; 5]);
}

#[test]
fn pending_post_filling_action_blocks_rolling() {
    let mut game = scripted(&[]);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::Yamb))
        .expect("announce");
    assert_eq!(game.end_turn(3, Slot::Yamb), Ok(55));

    let err = game.roll_dice(None).unwrap_err();
    assert_eq!(err, GameError::PostFillingActionPending { column: 3 });
    assert_eq!(err.kind(), ErrorKind::IllegalState);
    assert_eq!(game.roll_index(), 0);
    assert_eq!(
        game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::One)),
        Err(GameError::PostFillingActionPending { column: 3 })
    );

    // the pending action can still be made and play goes on
    game.make_post_filling_action(3, PostFillingAction::Suppress)
        .expect("suppress");
    game.start_turn().expect("next turn");
    game.roll_dice(None).expect("roll");
}

#[test]
fn only_one_column_locks_per_turn() {
    let columns = vec![
        Column::announced(1, false).expect("valid"),
        Column::announced(1, false).expect("valid"),
    ];
    let mut game =
        Yamb::new(columns, ScriptedDie::new(&[]), GameSettings::default()).expect("game");
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.make_pre_filling_action(0, PreFillingAction::Announce(Slot::Yamb))
        .expect("announce");
    let err = game
        .make_pre_filling_action(1, PreFillingAction::Announce(Slot::Yamb))
        .unwrap_err();
    assert_eq!(
        err,
        GameError::ColumnLocked {
            locked: 0,
            requested: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::IllegalState);
    assert!(!game.columns()[1].is_announced());
    assert_eq!(game.locked_column(), Some(0));
}

#[test]
fn unchecked_start_turn_suppresses_skipped_announcement() {
    let settings = GameSettings {
        strict_checking: false,
        ..GameSettings::default()
    };
    let mut game = scripted_with(&[], settings);
    game.start_turn().expect("start");
    game.roll_dice(None).expect("roll");
    game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::One))
        .expect("announce");
    game.end_turn(3, Slot::One).expect("fill");

    game.start_turn().expect("next turn");
    assert_eq!(game.locked_column(), None);
    assert!(!game.columns()[3].is_locked());
    assert_eq!(game.columns()[3].announcement(), None);
    game.roll_dice(None).expect("roll");
    game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::Two))
        .expect("announce again");
    assert_eq!(game.columns()[3].announcement(), Some(Slot::Two));
    assert_eq!(game.locked_column(), Some(3));
}

#[test]
fn game_strictness_applies_to_every_column() {
    let unchecked = GameSettings {
        strict_checking: false,
        ..GameSettings::default()
    };
    let game = Yamb::new(vec![Column::free()], ScriptedDie::new(&[]), unchecked).expect("game");
    assert!(game.columns().iter().all(|c| !c.is_strict()));

    let columns = vec![Column::free().with_strict(false)];
    let game = Yamb::new(columns, ScriptedDie::new(&[]), GameSettings::default()).expect("game");
    assert!(game.columns()[0].is_strict());
    assert!(Yamb::standard(Some(1)).columns().iter().all(|c| c.is_strict()));
}
