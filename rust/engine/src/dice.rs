use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Faces of a standard die.
pub const SIDES: [u8; 6] = [1, 2, 3, 4, 5, 6];

/// Default buffer size of a [`FiniteDie`]: 52 turns of 3 rolls with 5 dice.
pub const DEFAULT_FINITE_SIZE: usize = 780;

/// A source of die results in `1..=6`.
///
/// Multiple results may be read as rolling one die several times or rolling
/// several dice at once; they are independent and need not be distinct.
pub trait Roll {
    fn roll_one(&mut self) -> u8;

    fn roll_into(&mut self, out: &mut [u8]) {
        for r in out.iter_mut() {
            *r = self.roll_one();
        }
    }

    fn roll(&mut self, n: usize) -> Vec<u8> {
        let mut v = vec![0; n];
        self.roll_into(&mut v);
        v
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    }
}

/// A six-sided die backed by a ChaCha20 RNG.
#[derive(Debug, Clone)]
pub struct Die {
    rng: ChaCha20Rng,
}

impl Die {
    /// Seeded die; `None` seeds from the thread RNG.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_rng(seeded_rng(seed))
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        Self { rng }
    }
}

impl Roll for Die {
    fn roll_one(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

/// A die that pre-generates `size` results and serves them through a cursor.
///
/// The die never detects exhaustion on its own: keep an eye on
/// [`remaining`](FiniteDie::remaining) and call [`reset`](FiniteDie::reset)
/// when needed.
#[derive(Debug, Clone)]
pub struct FiniteDie {
    rng: ChaCha20Rng,
    results: Vec<u8>,
    position: usize,
}

impl FiniteDie {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        Self::from_rng(size, seeded_rng(seed))
    }

    pub fn from_rng(size: usize, rng: ChaCha20Rng) -> Self {
        let mut die = Self {
            rng,
            results: vec![0; size],
            position: 0,
        };
        die.reset();
        die
    }

    /// Regenerates the whole buffer and rewinds the cursor.
    pub fn reset(&mut self) {
        for r in self.results.iter_mut() {
            *r = self.rng.random_range(1..=6);
        }
        self.position = 0;
    }

    /// Serves the next `n` buffered results without copying.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` results remain.
    pub fn roll_slice(&mut self, n: usize) -> &[u8] {
        let start = self.position;
        self.position += n;
        &self.results[start..self.position]
    }

    pub fn size(&self) -> usize {
        self.results.len()
    }

    pub fn remaining(&self) -> usize {
        self.results.len().saturating_sub(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl Roll for FiniteDie {
    /// # Panics
    ///
    /// Panics when the buffer is used up.
    fn roll_one(&mut self) -> u8 {
        let r = self.results[self.position];
        self.position += 1;
        r
    }

    fn roll_into(&mut self, out: &mut [u8]) {
        let src = self.roll_slice(out.len());
        out.copy_from_slice(src);
    }
}

/// Die selected at runtime, e.g. from configuration.
#[derive(Debug, Clone)]
pub enum Dice {
    Standard(Die),
    Finite(FiniteDie),
}

impl Roll for Dice {
    fn roll_one(&mut self) -> u8 {
        match self {
            Dice::Standard(d) => d.roll_one(),
            Dice::Finite(d) => d.roll_one(),
        }
    }

    fn roll_into(&mut self, out: &mut [u8]) {
        match self {
            Dice::Standard(d) => d.roll_into(out),
            Dice::Finite(d) => d.roll_into(out),
        }
    }
}

impl<R: Roll + ?Sized> Roll for &mut R {
    fn roll_one(&mut self) -> u8 {
        (**self).roll_one()
    }

    fn roll_into(&mut self, out: &mut [u8]) {
        (**self).roll_into(out)
    }
}
