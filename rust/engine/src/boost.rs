//! Boosted evaluation: a histogram scorer and owned, bounded memoization.
//!
//! The histogram path scores from face counts and a presence bitmask, without
//! sorting. [`EvaluationCache`] memoizes slot-name resolution, results
//! counting and slot scoring in fixed-capacity LRU caches. Every output must
//! equal the reference evaluator in [`crate::scoring`].

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::errors::GameError;
use crate::scoring::ensure_results;
use crate::slot::{Score, Slot};

/// Capacity of each cache in [`EvaluationCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

// faces 1..=5 and 2..=6 in the presence mask
const LOW_STRAIGHT: u8 = 0b0011_1110;
const HIGH_STRAIGHT: u8 = 0b0111_1100;

/// Face counts (index 1..=6) plus a bitmask of the faces present.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Histogram {
    counts: [u16; 7],
    mask: u8,
}

impl Histogram {
    /// Builds the histogram of already validated results.
    ///
    /// # Panics
    ///
    /// Panics if a result is greater than 6.
    pub fn from_results(results: &[u8]) -> Self {
        let mut h = Histogram::default();
        for &r in results {
            h.counts[r as usize] += 1;
            h.mask |= 1 << r;
        }
        h
    }

    pub fn count(&self, face: u8) -> u16 {
        self.counts[face as usize]
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    fn pip_sum(&self) -> Score {
        (1..=6)
            .map(|f| f as Score * self.counts[f] as Score)
            .sum()
    }

    // Largest two groups, count descending then face descending.
    fn top_two(&self) -> ((u8, u16), (u8, u16)) {
        let mut first = (0u8, 0u16);
        let mut second = (0u8, 0u16);
        for face in (1..=6u8).rev() {
            let c = self.counts[face as usize];
            if c > first.1 {
                second = first;
                first = (face, c);
            } else if c > second.1 {
                second = (face, c);
            }
        }
        (first, second)
    }

    /// Scores this histogram for a fillable slot.
    pub fn score(&self, slot: Slot) -> Result<Score, GameError> {
        if let Some(face) = slot.face() {
            return Ok(self.count(face) as Score * face as Score);
        }
        let ((fa, ca), (fb, cb)) = self.top_two();
        let score = match slot {
            Slot::Max | Slot::Min => self.pip_sum(),
            Slot::TwoPairs if ca >= 2 && cb >= 2 => 2 * (fa as Score + fb as Score) + 10,
            Slot::Straight if self.mask & LOW_STRAIGHT == LOW_STRAIGHT => 35,
            Slot::Straight if self.mask & HIGH_STRAIGHT == HIGH_STRAIGHT => 45,
            Slot::FullHouse if ca >= 3 && cb >= 2 => 3 * fa as Score + 2 * fb as Score + 30,
            Slot::Carriage if ca >= 4 => 4 * fa as Score + 40,
            Slot::Yamb if ca >= 5 => 5 * fa as Score + 50,
            Slot::TwoPairs | Slot::Straight | Slot::FullHouse | Slot::Carriage | Slot::Yamb => 0,
            _ => return Err(GameError::NotFillable { slot }),
        };
        Ok(score)
    }
}

/// Hit and miss counters of one cache.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Fixed-capacity map evicting the least recently used entry.
///
/// Capacity 0 stores nothing and every lookup is a miss.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    entries: FxHashMap<K, (V, u64)>,
    capacity: usize,
    tick: u64,
    stats: CacheStats,
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity,
            tick: 0,
            stats: CacheStats {
                capacity,
                ..CacheStats::default()
            },
        }
    }

    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tick += 1;
        match self.entries.get_mut(key) {
            Some((value, used)) => {
                *used = self.tick;
                self.stats.hits += 1;
                Some(value.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, (_, used))| *used)
                .map(|(k, _)| k.clone());
            if let Some(k) = oldest {
                self.entries.remove(&k);
                self.stats.evictions += 1;
            }
        }
        self.tick += 1;
        self.entries.insert(key, (value, self.tick));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.entries.len(),
            ..self.stats
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.tick = 0;
        self.stats = CacheStats {
            capacity: self.capacity,
            ..CacheStats::default()
        };
    }
}

/// Statistics of all three caches of an [`EvaluationCache`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub slot_names: CacheStats,
    pub counts: CacheStats,
    pub scores: CacheStats,
}

/// Memoization owned by one boosted evaluator.
#[derive(Debug, Clone)]
pub struct EvaluationCache {
    slot_names: LruCache<String, Slot>,
    counts: LruCache<Vec<u8>, Histogram>,
    scores: LruCache<(Slot, Histogram), Score>,
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl EvaluationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slot_names: LruCache::new(capacity),
            counts: LruCache::new(capacity),
            scores: LruCache::new(capacity),
        }
    }

    pub fn resolve_slot(&mut self, name: &str) -> Result<Slot, GameError> {
        if let Some(slot) = self.slot_names.get(name) {
            return Ok(slot);
        }
        let slot: Slot = name.parse()?;
        self.slot_names.insert(name.to_string(), slot);
        Ok(slot)
    }

    /// Validates and counts results, memoized on the raw results.
    pub fn histogram(&mut self, results: &[u8]) -> Result<Histogram, GameError> {
        if let Some(h) = self.counts.get(results) {
            return Ok(h);
        }
        ensure_results(results)?;
        let h = Histogram::from_results(results);
        self.counts.insert(results.to_vec(), h);
        Ok(h)
    }

    pub fn score(&mut self, slot: Slot, results: &[u8]) -> Result<Score, GameError> {
        let h = self.histogram(results)?;
        self.score_histogram(slot, h)
    }

    pub fn score_histogram(&mut self, slot: Slot, h: Histogram) -> Result<Score, GameError> {
        if let Some(score) = self.scores.get(&(slot, h)) {
            return Ok(score);
        }
        let score = h.score(slot)?;
        let evictions = self.scores.stats().evictions;
        self.scores.insert((slot, h), score);
        if self.scores.stats().evictions > evictions {
            trace!(cache = "scores", "evicted least recently used entry");
        }
        Ok(score)
    }

    pub fn stats(&self) -> EvaluationStats {
        EvaluationStats {
            slot_names: self.slot_names.stats(),
            counts: self.counts.stats(),
            scores: self.scores.stats(),
        }
    }

    pub fn clear(&mut self) {
        self.slot_names.clear();
        self.counts.clear();
        self.scores.clear();
    }
}
