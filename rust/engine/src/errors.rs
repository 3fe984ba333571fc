use thiserror::Error;

use crate::slot::Slot;

/// Coarse classification of a [`GameError`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Wrong shape or range for a slot, roll index, column index or mask
    InvalidArgument,
    /// The call is well-formed but not legal in the current game state
    IllegalState,
    /// A slot name or index outside the fixed 17-slot domain
    UnknownSlot,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Dice result {value} is out of range [1..6]")]
    InvalidResult { value: u8 },
    #[error("Column index {index} is out of range [0, {len})")]
    InvalidColumnIndex { index: usize, len: usize },
    #[error("Replacement mask has {actual} entries, expected {expected}")]
    InvalidReplacementMask { expected: usize, actual: usize },
    #[error("Replacements are not allowed in the first roll")]
    ReplacementOnFirstRoll,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Slot {slot} is auto-filled")]
    NotFillable { slot: Slot },
    #[error("Slot {slot} is already filled")]
    SlotAlreadyFilled { slot: Slot },
    #[error("Slot {slot} is unavailable")]
    SlotUnavailable { slot: Slot },
    #[error("Roll budget of {budget} is exhausted, proceed to filling")]
    RollBudgetExhausted { budget: usize },
    #[error("Locked column {column} disallows further rolls")]
    RollingDisallowed { column: usize },
    #[error("Cannot end turn before rolling the dice at least once")]
    NoRollYet,
    #[error("Cannot perform a post-filling step before the end of the turn")]
    TurnInProgress,
    #[error("Column {locked} is locked, cannot act on column {requested}")]
    ColumnLocked { locked: usize, requested: usize },
    #[error("No pre-filling action is required after roll {roll}")]
    NoPreFillingAction { roll: usize },
    #[error("Slot {slot} is already announced")]
    AlreadyAnnounced { slot: Slot },
    #[error("No slot is announced yet")]
    NotAnnounced,
    #[error("Column {column} does not support announcements")]
    NotAnnounceable { column: String },
    #[error("Column {column} still requires its post-filling action")]
    PostFillingActionPending { column: usize },

    #[error("Unknown slot name {0:?}")]
    UnknownSlotName(String),
    #[error("Unknown slot index {0}")]
    UnknownSlotIndex(i64),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            InvalidResult { .. }
            | InvalidColumnIndex { .. }
            | InvalidReplacementMask { .. }
            | ReplacementOnFirstRoll
            | InvalidConfig(_) => ErrorKind::InvalidArgument,
            UnknownSlotName(_) | UnknownSlotIndex(_) => ErrorKind::UnknownSlot,
            _ => ErrorKind::IllegalState,
        }
    }
}
