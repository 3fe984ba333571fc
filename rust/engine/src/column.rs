use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::GameError;
use crate::evaluator::Evaluator;
use crate::scorecard::ScoreCard;
use crate::scoring::{update_auto_slots, EvaluateAll};
use crate::slot::{Score, Slot, SlotSet};

/// Fill order of an ordered column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lowest unfilled slot first
    Down,
    /// Highest unfilled slot first
    Up,
    /// Either end
    Mixed,
}

/// State of an announced column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Announcement {
    after_roll: usize,
    immediately_fill: bool,
    announced: Option<Slot>,
}

impl Announcement {
    /// `after_roll` is the roll index at which the announcement is made; with
    /// `immediately_fill` rolling stops once a slot is announced.
    pub fn new(after_roll: usize, immediately_fill: bool) -> Result<Self, GameError> {
        if immediately_fill && after_roll == 0 {
            return Err(GameError::InvalidConfig(
                "an immediately filled announcement before the first roll leaves no roll"
                    .to_string(),
            ));
        }
        Ok(Self {
            after_roll,
            immediately_fill,
            announced: None,
        })
    }

    pub fn after_roll(&self) -> usize {
        self.after_roll
    }

    pub fn immediately_fill(&self) -> bool {
        self.immediately_fill
    }

    pub fn announced(&self) -> Option<Slot> {
        self.announced
    }
}

impl Default for Announcement {
    fn default() -> Self {
        Self {
            after_roll: 1,
            immediately_fill: false,
            announced: None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColumnKind {
    Ordered(Direction),
    Free,
    Announced(Announcement),
}

impl ColumnKind {
    pub fn default_name(&self) -> &'static str {
        match self {
            ColumnKind::Ordered(Direction::Down) => "down",
            ColumnKind::Ordered(Direction::Up) => "up",
            ColumnKind::Ordered(Direction::Mixed) => "mixed",
            ColumnKind::Free => "free",
            ColumnKind::Announced(_) => "announced",
        }
    }
}

/// Argument a column needs before it can be filled this turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PreFillingRequirement {
    /// A target slot to announce
    Announcement,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PreFillingAction {
    Announce(Slot),
}

/// Step a column needs after it is filled, before the next turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PostFillingRequirement {
    Suppress,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PostFillingAction {
    Suppress,
}

/// One column of 17 slots with its fill-order rules.
///
/// With strict checking off, legality is not validated: filling an
/// unavailable slot overwrites it and an auto slot fails in the evaluator.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    card: ScoreCard,
    locked: bool,
    rollable: bool,
    strict: bool,
    evaluator: Evaluator,
    available: OnceCell<Vec<Slot>>,
    next_available: OnceCell<Vec<Slot>>,
}

impl Column {
    pub fn new(kind: ColumnKind) -> Self {
        Self {
            name: kind.default_name().to_string(),
            kind,
            card: ScoreCard::new(),
            locked: false,
            rollable: true,
            strict: true,
            evaluator: Evaluator::Reference,
            available: OnceCell::new(),
            next_available: OnceCell::new(),
        }
    }

    pub fn ordered(direction: Direction) -> Self {
        Self::new(ColumnKind::Ordered(direction))
    }

    pub fn free() -> Self {
        Self::new(ColumnKind::Free)
    }

    pub fn announced(after_roll: usize, immediately_fill: bool) -> Result<Self, GameError> {
        Ok(Self::new(ColumnKind::Announced(Announcement::new(
            after_roll,
            immediately_fill,
        )?)))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn can_roll(&self) -> bool {
        self.rollable
    }

    pub fn scores(&self) -> &ScoreCard {
        &self.card
    }

    pub fn score(&self, slot: Slot) -> Option<Score> {
        self.card.get(slot)
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut Evaluator {
        &mut self.evaluator
    }

    /// Resolves a slot name through this column's evaluator.
    pub fn resolve_slot(&mut self, name: &str) -> Result<Slot, GameError> {
        self.evaluator.resolve_slot(name)
    }

    /// Currently announced slot, if this is an announced column.
    pub fn announcement(&self) -> Option<Slot> {
        match &self.kind {
            ColumnKind::Announced(a) => a.announced,
            _ => None,
        }
    }

    pub fn is_announced(&self) -> bool {
        self.announcement().is_some()
    }

    /// Unfilled fillable slots in fill order.
    pub fn available_slots(&self) -> &[Slot] {
        self.available
            .get_or_init(|| self.card.unfilled_fillable().iter().collect())
    }

    /// Slots that may be filled this turn.
    pub fn next_available_slots(&self) -> &[Slot] {
        self.next_available.get_or_init(|| {
            let unfilled = self.card.unfilled_fillable();
            match &self.kind {
                ColumnKind::Free => unfilled.iter().collect(),
                ColumnKind::Ordered(direction) => {
                    let mut next = SlotSet::EMPTY;
                    if matches!(direction, Direction::Down | Direction::Mixed) {
                        next.extend(unfilled.first());
                    }
                    if matches!(direction, Direction::Up | Direction::Mixed) {
                        next.extend(unfilled.last());
                    }
                    next.iter().collect()
                }
                // nothing may be filled before an announcement
                ColumnKind::Announced(a) => a
                    .announced
                    .filter(|&s| unfilled.contains(s))
                    .into_iter()
                    .collect(),
            }
        })
    }

    pub fn is_slot_available(&self, slot: Slot) -> bool {
        self.card.unfilled_fillable().contains(slot)
    }

    pub fn is_slot_next_available(&self, slot: Slot) -> bool {
        self.next_available_slots().contains(&slot)
    }

    fn invalidate(&mut self) {
        self.available.take();
        self.next_available.take();
    }

    pub fn requires_pre_filling_action(&self, roll: usize) -> Option<PreFillingRequirement> {
        match &self.kind {
            ColumnKind::Announced(a) if a.after_roll == roll => {
                Some(PreFillingRequirement::Announcement)
            }
            _ => None,
        }
    }

    pub fn make_pre_filling_action(
        &mut self,
        roll: usize,
        action: PreFillingAction,
    ) -> Result<(), GameError> {
        if self.strict && self.requires_pre_filling_action(roll).is_none() {
            return Err(GameError::NoPreFillingAction { roll });
        }
        match action {
            PreFillingAction::Announce(slot) => self.announce(slot),
        }
    }

    /// Announces the slot to fill, locking the column.
    pub fn announce(&mut self, slot: Slot) -> Result<(), GameError> {
        let strict = self.strict;
        let filled = self.card.is_filled(slot);
        let ColumnKind::Announced(a) = &mut self.kind else {
            return Err(GameError::NotAnnounceable {
                column: self.name.clone(),
            });
        };
        if let Some(announced) = a.announced {
            return Err(GameError::AlreadyAnnounced { slot: announced });
        }
        if strict {
            if !slot.is_fillable() {
                return Err(GameError::NotFillable { slot });
            }
            if filled {
                return Err(GameError::SlotAlreadyFilled { slot });
            }
        }
        a.announced = Some(slot);
        if a.immediately_fill {
            self.rollable = false;
        }
        self.locked = true;
        self.invalidate();
        trace!(column = %self.name, %slot, "announced");
        Ok(())
    }

    /// Clears the announcement, unlocking the column.
    pub fn suppress(&mut self) -> Result<(), GameError> {
        let ColumnKind::Announced(a) = &mut self.kind else {
            return Err(GameError::NotAnnounceable {
                column: self.name.clone(),
            });
        };
        if a.announced.take().is_none() {
            return Err(GameError::NotAnnounced);
        }
        self.locked = false;
        self.rollable = true;
        self.invalidate();
        Ok(())
    }

    pub fn requires_post_filling_action(&self) -> Option<PostFillingRequirement> {
        match &self.kind {
            ColumnKind::Announced(_) => Some(PostFillingRequirement::Suppress),
            _ => None,
        }
    }

    pub fn make_post_filling_action(&mut self, action: PostFillingAction) -> Result<(), GameError> {
        match action {
            PostFillingAction::Suppress => self.suppress(),
        }
    }

    pub fn evaluate(&mut self, slot: Slot, results: &[u8]) -> Result<Score, GameError> {
        self.evaluator.score(slot, results)
    }

    pub fn evaluate_all(&mut self, results: &[u8]) -> Result<EvaluateAll, GameError> {
        self.evaluator.evaluate_all(results)
    }

    /// Scores `results` into `slot` and returns the stored score.
    pub fn fill_slot(&mut self, slot: Slot, results: &[u8]) -> Result<Score, GameError> {
        if self.strict {
            if !slot.is_fillable() {
                return Err(GameError::NotFillable { slot });
            }
            if self.card.is_filled(slot) {
                return Err(GameError::SlotAlreadyFilled { slot });
            }
            if !self.is_slot_next_available(slot) {
                return Err(GameError::SlotUnavailable { slot });
            }
        }
        let score = self.evaluator.score(slot, results)?;
        self.card.set(slot, score);
        self.invalidate();
        trace!(column = %self.name, %slot, score, "slot filled");
        Ok(score)
    }

    /// Fills the auto slots whose inputs are complete; returns the slots filled.
    pub fn update_auto_slots(&mut self) -> SlotSet {
        update_auto_slots(&mut self.card)
    }

    pub fn is_full(&self, fillable_only: bool) -> bool {
        self.card.is_full(fillable_only)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (slot, score) in self.card.iter() {
            match score {
                Some(s) => write!(f, " {slot}={s}")?,
                None => write!(f, " {slot}=-")?,
            }
        }
        Ok(())
    }
}
