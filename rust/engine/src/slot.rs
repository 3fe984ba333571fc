use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// A score written into a slot. Signed because the sums difference may be negative.
pub type Score = i32;

/// Number of slots in every column.
pub const SLOT_COUNT: usize = 17;

/// One of the 17 scoring cells of a yamb column.
///
/// Ordinals are fixed: the grand total comes first so that `ONE` through `SIX`
/// land on indices 1 through 6, followed by the numbers subtotal, the two sums
/// and their difference, the five collections and their subtotal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Slot {
    /// Grand total (auto)
    Total = 0,
    /// Ones
    One = 1,
    /// Twos
    Two,
    /// Threes
    Three,
    /// Fours
    Four,
    /// Fives
    Five,
    /// Sixes
    Six,
    /// Sum of the number slots, +30 bonus at 60 or above (auto)
    NumbersSum,
    /// Maximum sum
    Max,
    /// Minimum sum
    Min,
    /// `ONE * (MAX - MIN)` (auto)
    SumsDifference,
    /// Two pairs
    TwoPairs,
    /// Five consecutive faces
    Straight,
    /// Three of a kind plus a pair
    FullHouse,
    /// Four of a kind
    Carriage,
    /// Five of a kind
    Yamb,
    /// Sum of the collection slots (auto)
    CollectionsSum,
}

/// Category a slot belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SlotCategory {
    Number,
    Sum,
    Collection,
    Auto,
}

impl Slot {
    /// All slots in ordinal order.
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::Total,
        Slot::One,
        Slot::Two,
        Slot::Three,
        Slot::Four,
        Slot::Five,
        Slot::Six,
        Slot::NumbersSum,
        Slot::Max,
        Slot::Min,
        Slot::SumsDifference,
        Slot::TwoPairs,
        Slot::Straight,
        Slot::FullHouse,
        Slot::Carriage,
        Slot::Yamb,
        Slot::CollectionsSum,
    ];

    /// Fillable slots in the fixed fill order used by ordered columns.
    pub const FILLABLE: [Slot; 13] = [
        Slot::One,
        Slot::Two,
        Slot::Three,
        Slot::Four,
        Slot::Five,
        Slot::Six,
        Slot::Max,
        Slot::Min,
        Slot::TwoPairs,
        Slot::Straight,
        Slot::FullHouse,
        Slot::Carriage,
        Slot::Yamb,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolves a slot index; negative values count from the end (`-1` is
    /// `COLLECTIONS_SUM`).
    pub fn from_index(index: i64) -> Result<Slot, GameError> {
        let resolved = if index < 0 {
            index + SLOT_COUNT as i64
        } else {
            index
        };
        if (0..SLOT_COUNT as i64).contains(&resolved) {
            Ok(Slot::ALL[resolved as usize])
        } else {
            Err(GameError::UnknownSlotIndex(index))
        }
    }

    /// Face counted by a number slot.
    pub fn face(self) -> Option<u8> {
        match self {
            Slot::One | Slot::Two | Slot::Three | Slot::Four | Slot::Five | Slot::Six => {
                Some(self as u8)
            }
            _ => None,
        }
    }

    pub fn category(self) -> SlotCategory {
        match self {
            Slot::One | Slot::Two | Slot::Three | Slot::Four | Slot::Five | Slot::Six => {
                SlotCategory::Number
            }
            Slot::Max | Slot::Min => SlotCategory::Sum,
            Slot::TwoPairs | Slot::Straight | Slot::FullHouse | Slot::Carriage | Slot::Yamb => {
                SlotCategory::Collection
            }
            Slot::Total | Slot::NumbersSum | Slot::SumsDifference | Slot::CollectionsSum => {
                SlotCategory::Auto
            }
        }
    }

    pub fn is_fillable(self) -> bool {
        self.category() != SlotCategory::Auto
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::Total => "TOTAL",
            Slot::One => "ONE",
            Slot::Two => "TWO",
            Slot::Three => "THREE",
            Slot::Four => "FOUR",
            Slot::Five => "FIVE",
            Slot::Six => "SIX",
            Slot::NumbersSum => "NUMBERS_SUM",
            Slot::Max => "MAX",
            Slot::Min => "MIN",
            Slot::SumsDifference => "SUMS_DIFFERENCE",
            Slot::TwoPairs => "TWO_PAIRS",
            Slot::Straight => "STRAIGHT",
            Slot::FullHouse => "FULL_HOUSE",
            Slot::Carriage => "CARRIAGE",
            Slot::Yamb => "YAMB",
            Slot::CollectionsSum => "COLLECTIONS_SUM",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = GameError;

    /// Case-insensitive lookup by slot name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Slot::ALL
            .iter()
            .copied()
            .find(|slot| slot.name() == upper)
            .ok_or_else(|| GameError::UnknownSlotName(s.to_string()))
    }
}

/// A set of slots packed into the low 17 bits of a `u32`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SlotSet(u32);

impl SlotSet {
    pub const EMPTY: SlotSet = SlotSet(0);
    pub const ALL: SlotSet = SlotSet((1 << SLOT_COUNT) - 1);
    pub const NUMBERS: SlotSet = SlotSet(0b111_1110);
    pub const SUMS: SlotSet = SlotSet((1 << 8) | (1 << 9));
    pub const COLLECTIONS: SlotSet = SlotSet(0b1_1111 << 11);
    pub const AUTO: SlotSet = SlotSet(1 | (1 << 7) | (1 << 10) | (1 << 16));
    pub const FILLABLE: SlotSet =
        SlotSet(Self::NUMBERS.0 | Self::SUMS.0 | Self::COLLECTIONS.0);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, slot: Slot) -> bool {
        self.0 & (1 << slot.index()) != 0
    }

    pub fn insert(&mut self, slot: Slot) {
        self.0 |= 1 << slot.index();
    }

    pub fn remove(&mut self, slot: Slot) {
        self.0 &= !(1 << slot.index());
    }

    pub fn union(self, other: SlotSet) -> SlotSet {
        SlotSet(self.0 | other.0)
    }

    pub fn intersection(self, other: SlotSet) -> SlotSet {
        SlotSet(self.0 & other.0)
    }

    pub fn difference(self, other: SlotSet) -> SlotSet {
        SlotSet(self.0 & !other.0)
    }

    pub fn is_superset(self, other: SlotSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Lowest slot by ordinal.
    pub fn first(self) -> Option<Slot> {
        if self.0 == 0 {
            None
        } else {
            Some(Slot::ALL[self.0.trailing_zeros() as usize])
        }
    }

    /// Highest slot by ordinal.
    pub fn last(self) -> Option<Slot> {
        if self.0 == 0 {
            None
        } else {
            Some(Slot::ALL[31 - self.0.leading_zeros() as usize])
        }
    }

    pub fn iter(self) -> SlotSetIter {
        SlotSetIter(self.0)
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut set = SlotSet::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Slot> for SlotSet {
    fn extend<I: IntoIterator<Item = Slot>>(&mut self, iter: I) {
        for slot in iter {
            self.insert(slot);
        }
    }
}

impl IntoIterator for SlotSet {
    type Item = Slot;
    type IntoIter = SlotSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`SlotSet`].
#[derive(Debug, Clone)]
pub struct SlotSetIter(u32);

impl Iterator for SlotSetIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Slot::ALL[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SlotSetIter {}
