use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::column::{
    PostFillingAction, PostFillingRequirement, PreFillingAction, PreFillingRequirement,
};
use crate::dice::{Die, Roll};
use crate::errors::GameError;
use crate::game::Yamb;
use crate::slot::{Score, Slot};

/// What to do with the dice after a roll.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RollDecision {
    /// Keep the results and proceed to filling
    Stop,
    /// Reroll every die
    RerollAll,
    /// Reroll the positions marked `true`
    Replace(Vec<bool>),
}

/// Decision maker driven by [`play`].
///
/// Every method receives the game in its current state; the player never
/// mutates it directly.
pub trait Player<D: Roll = Die> {
    fn observe_roll_results(&mut self, _game: &Yamb<D>) {}

    /// Picks the column to act on among those with a requirement, if any.
    fn choose_pre_filling_action_column(
        &mut self,
        game: &Yamb<D>,
        requirements: &[Option<PreFillingRequirement>],
    ) -> Option<usize>;

    fn set_pre_filling_requirements(
        &mut self,
        game: &Yamb<D>,
        column: usize,
        requirement: PreFillingRequirement,
    ) -> PreFillingAction;

    /// Called after a roll whenever another roll is still allowed.
    fn choose_replacements(&mut self, game: &Yamb<D>) -> RollDecision;

    /// Only called when no column is locked.
    fn choose_column_to_fill(&mut self, game: &Yamb<D>) -> usize;

    fn choose_slot_to_fill(&mut self, game: &Yamb<D>, column: usize) -> Slot;

    fn set_post_filling_requirements(
        &mut self,
        _game: &Yamb<D>,
        _column: usize,
        _slot: Slot,
        requirement: PostFillingRequirement,
    ) -> PostFillingAction {
        match requirement {
            PostFillingRequirement::Suppress => PostFillingAction::Suppress,
        }
    }

    fn observe_turn_end(&mut self, _game: &Yamb<D>, _column: usize, _slot: Slot, _score: Score) {}
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayOptions {
    /// Update auto slots after every n-th turn; 0 never updates them
    pub update_auto_slots_every: usize,
}

/// Plays turns until every fillable slot is filled; returns the number of turns.
///
/// # Errors
///
/// The first [`GameError`] raised by the game ends play; the game is left in
/// the state of the failed call.
pub fn play<D, P>(
    game: &mut Yamb<D>,
    player: &mut P,
    options: PlayOptions,
) -> Result<usize, GameError>
where
    D: Roll,
    P: Player<D> + ?Sized,
{
    let mut turns = 0;
    while !game.is_full(true) {
        game.start_turn()?;
        turns += 1;
        play_rolls(game, player)?;

        let column = match game.locked_column() {
            Some(c) => c,
            None => player.choose_column_to_fill(game),
        };
        let slot = player.choose_slot_to_fill(game, column);
        let score = game.end_turn(column, slot)?;

        if let Some(requirement) = game.get_post_filling_requirements(column)? {
            let action = player.set_post_filling_requirements(game, column, slot, requirement);
            game.make_post_filling_action(column, action)?;
        }

        let every = options.update_auto_slots_every;
        if every > 0 && turns % every == 0 {
            game.update_auto_slots();
        }

        player.observe_turn_end(game, column, slot, score);
    }
    debug!(turns, total = game.get_total_score(Slot::Total), "game finished");
    Ok(turns)
}

fn play_rolls<D, P>(game: &mut Yamb<D>, player: &mut P) -> Result<(), GameError>
where
    D: Roll,
    P: Player<D> + ?Sized,
{
    loop {
        player.observe_roll_results(game);

        if game.locked_column().is_none() {
            let requirements = game.get_all_pre_filling_requirements();
            if requirements.iter().any(Option::is_some) {
                let chosen = player.choose_pre_filling_action_column(game, &requirements);
                if let Some((column, requirement)) =
                    chosen.and_then(|c| requirements.get(c).copied().flatten().map(|r| (c, r)))
                {
                    let action = player.set_pre_filling_requirements(game, column, requirement);
                    game.make_pre_filling_action(column, action)?;
                }
            }
        }

        if !game.can_roll() {
            return Ok(());
        }
        if game.roll_index() == 0 {
            game.roll_dice(None)?;
            continue;
        }
        match player.choose_replacements(game) {
            RollDecision::Stop => return Ok(()),
            RollDecision::RerollAll => {
                game.roll_dice(None)?;
            }
            RollDecision::Replace(mask) => {
                game.roll_dice(Some(mask.as_slice()))?;
            }
        }
    }
}
