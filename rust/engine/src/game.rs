use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::column::{
    Column, ColumnKind, Direction, PostFillingAction, PostFillingRequirement, PreFillingAction,
    PreFillingRequirement,
};
use crate::dice::{Die, Roll};
use crate::errors::GameError;
use crate::rules::{ensure_column, ensure_replacements, replace_results};
use crate::slot::{Score, Slot, SlotSet};

/// Construction-time settings of a [`Yamb`] game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of dice rolled each turn
    pub dice_count: usize,
    /// Rolls allowed per turn
    pub roll_budget: usize,
    /// Sort the results after every roll
    pub sort_results: bool,
    /// Validate every call; when off, illegal calls may panic or corrupt state
    pub strict_checking: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            dice_count: 5,
            roll_budget: 3,
            sort_results: false,
            strict_checking: true,
        }
    }
}

/// Turn orchestrator over a fixed set of columns.
///
/// A turn is `start_turn`, one to `roll_budget` calls of `roll_dice` with
/// optional pre-filling actions in between, then `end_turn`. A column that
/// requires a post-filling action stays locked until
/// [`make_post_filling_action`](Yamb::make_post_filling_action) is called.
///
/// # Examples
///
/// ```
/// use yamb_engine::game::Yamb;
/// use yamb_engine::slot::Slot;
///
/// let mut game = Yamb::standard(Some(7));
/// game.start_turn().unwrap();
/// game.roll_dice(None).unwrap();
/// // the free column accepts any fillable slot
/// let score = game.end_turn(2, Slot::Max).unwrap();
/// assert_eq!(score, game.results().iter().map(|&r| r as i32).sum::<i32>());
/// assert_eq!(game.get_total_score(Slot::Max), score);
/// ```
#[derive(Debug, Clone)]
pub struct Yamb<D: Roll = Die> {
    columns: Vec<Column>,
    dice: D,
    settings: GameSettings,
    roll_index: usize,
    results: Vec<u8>,
    locked: Option<usize>,
    awaiting_post: Option<usize>,
}

impl Yamb<Die> {
    /// Default game: down, up, free and announced columns with a ChaCha20 die.
    pub fn standard(seed: Option<u64>) -> Self {
        let columns = vec![
            Column::ordered(Direction::Down),
            Column::ordered(Direction::Up),
            Column::free(),
            Column::new(ColumnKind::Announced(Default::default())),
        ];
        let settings = GameSettings::default();
        Self::assemble(columns, Die::new(seed), settings)
    }
}

impl<D: Roll> Yamb<D> {
    /// Builds a game; every column is switched to `settings.strict_checking`.
    pub fn new(columns: Vec<Column>, dice: D, settings: GameSettings) -> Result<Self, GameError> {
        if columns.is_empty() {
            return Err(GameError::InvalidConfig(
                "a game needs at least one column".to_string(),
            ));
        }
        if settings.dice_count == 0 {
            return Err(GameError::InvalidConfig(
                "dice count must be greater than 0".to_string(),
            ));
        }
        if settings.roll_budget == 0 {
            return Err(GameError::InvalidConfig(
                "roll budget must be greater than 0".to_string(),
            ));
        }
        Ok(Self::assemble(columns, dice, settings))
    }

    fn assemble(columns: Vec<Column>, dice: D, settings: GameSettings) -> Self {
        let columns = columns
            .into_iter()
            .map(|c| c.with_strict(settings.strict_checking))
            .collect();
        Self {
            columns,
            dice,
            settings,
            roll_index: 0,
            results: vec![0; settings.dice_count],
            locked: None,
            awaiting_post: None,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn dice(&self) -> &D {
        &self.dice
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Rolls made in the current turn; 0 before the first roll.
    pub fn roll_index(&self) -> usize {
        self.roll_index
    }

    pub fn results(&self) -> &[u8] {
        &self.results
    }

    pub fn locked_column(&self) -> Option<usize> {
        self.locked
    }

    pub fn can_roll(&self) -> bool {
        self.roll_index < self.settings.roll_budget
            && self.locked.map_or(true, |c| self.columns[c].can_roll())
    }

    fn check_lock(&self, requested: usize) -> Result<(), GameError> {
        match self.locked {
            Some(locked) if locked != requested => {
                Err(GameError::ColumnLocked { locked, requested })
            }
            _ => Ok(()),
        }
    }

    fn check_no_pending_post(&self) -> Result<(), GameError> {
        match self.awaiting_post {
            Some(column) => Err(GameError::PostFillingActionPending { column }),
            None => Ok(()),
        }
    }

    /// Starts a new turn.
    ///
    /// An unchecked game drops a skipped post-filling action by suppressing
    /// the column's announcement.
    pub fn start_turn(&mut self) -> Result<(), GameError> {
        if self.settings.strict_checking {
            self.check_no_pending_post()?;
        }
        if let Some(column) = self.awaiting_post.take() {
            if self.columns[column].is_announced() {
                self.columns[column].suppress()?;
            }
        }
        self.locked = None;
        self.roll_index = 0;
        self.results.fill(0);
        Ok(())
    }

    /// Rolls the dice; on later rolls `replace` selects the positions to reroll.
    ///
    /// `None` rerolls every die. Non-strict games ignore a mask on the first roll.
    pub fn roll_dice(&mut self, replace: Option<&[bool]>) -> Result<&[u8], GameError> {
        if self.settings.strict_checking {
            self.check_no_pending_post()?;
            ensure_replacements(self.roll_index, self.settings.dice_count, replace)?;
            if self.roll_index >= self.settings.roll_budget {
                return Err(GameError::RollBudgetExhausted {
                    budget: self.settings.roll_budget,
                });
            }
            if let Some(column) = self.locked.filter(|&c| !self.columns[c].can_roll()) {
                return Err(GameError::RollingDisallowed { column });
            }
        }
        match replace {
            Some(mask) if self.roll_index > 0 => {
                let n = mask.iter().filter(|&&r| r).count();
                let drawn = self.dice.roll(n);
                replace_results(&mut self.results, mask, &drawn);
            }
            _ => self.dice.roll_into(&mut self.results),
        }
        if self.settings.sort_results {
            self.results.sort_unstable();
        }
        self.roll_index += 1;
        debug!(roll = self.roll_index, results = ?self.results, "dice rolled");
        Ok(&self.results)
    }

    pub fn get_pre_filling_requirements(
        &self,
        column: usize,
    ) -> Result<Option<PreFillingRequirement>, GameError> {
        if self.settings.strict_checking {
            ensure_column(column, self.columns.len())?;
        }
        Ok(self.columns[column].requires_pre_filling_action(self.roll_index))
    }

    /// Requirements of every column at the current roll; `None` for the locked column.
    pub fn get_all_pre_filling_requirements(&self) -> Vec<Option<PreFillingRequirement>> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if self.locked == Some(i) {
                    None
                } else {
                    c.requires_pre_filling_action(self.roll_index)
                }
            })
            .collect()
    }

    pub fn make_pre_filling_action(
        &mut self,
        column: usize,
        action: PreFillingAction,
    ) -> Result<(), GameError> {
        if self.settings.strict_checking {
            self.check_no_pending_post()?;
            ensure_column(column, self.columns.len())?;
            self.check_lock(column)?;
        }
        self.columns[column].make_pre_filling_action(self.roll_index, action)?;
        if self.columns[column].is_locked() {
            self.locked = Some(column);
            debug!(column, roll = self.roll_index, ?action, "column locked");
        }
        Ok(())
    }

    /// Fills `slot` of `column` with the current results and ends the turn.
    pub fn end_turn(&mut self, column: usize, slot: Slot) -> Result<Score, GameError> {
        if self.settings.strict_checking {
            if self.roll_index == 0 {
                return Err(GameError::NoRollYet);
            }
            ensure_column(column, self.columns.len())?;
            self.check_lock(column)?;
        }
        let score = self.columns[column].fill_slot(slot, &self.results)?;
        self.roll_index = 0;
        if self.columns[column].requires_post_filling_action().is_some() {
            self.locked = Some(column);
            self.awaiting_post = Some(column);
        } else {
            self.locked = None;
        }
        debug!(column, %slot, score, "turn ended");
        Ok(score)
    }

    fn check_between_turns(&self, column: usize) -> Result<(), GameError> {
        if self.roll_index != 0 {
            return Err(GameError::TurnInProgress);
        }
        ensure_column(column, self.columns.len())?;
        self.check_lock(column)
    }

    pub fn get_post_filling_requirements(
        &self,
        column: usize,
    ) -> Result<Option<PostFillingRequirement>, GameError> {
        if self.settings.strict_checking {
            self.check_between_turns(column)?;
        }
        Ok(self.columns[column].requires_post_filling_action())
    }

    pub fn make_post_filling_action(
        &mut self,
        column: usize,
        action: PostFillingAction,
    ) -> Result<(), GameError> {
        if self.settings.strict_checking {
            self.check_between_turns(column)?;
        }
        self.columns[column].make_post_filling_action(action)?;
        self.locked = None;
        self.awaiting_post = None;
        debug!(column, ?action, "post-filling action made");
        Ok(())
    }

    /// Updates the auto slots of every column; returns the slots filled per column.
    pub fn update_auto_slots(&mut self) -> Vec<SlotSet> {
        self.columns
            .iter_mut()
            .map(|c| c.update_auto_slots())
            .collect()
    }

    pub fn is_full(&self, fillable_only: bool) -> bool {
        self.columns.iter().all(|c| c.is_full(fillable_only))
    }

    /// Sum of `slot` over the columns where it is filled.
    pub fn get_total_score(&self, slot: Slot) -> Score {
        self.columns.iter().filter_map(|c| c.score(slot)).sum()
    }
}
