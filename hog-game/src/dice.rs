//! Dice sources: seeded fair dice for play and scripted dice for tests.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{FOUR_SIDED, MAX_DIE_SIDES, MIN_DIE_SIDES, SIX_SIDED, SIX_SIDED_STREAM};
use crate::error::{HogError, HogResult};

/// A source of die outcomes, one per call.
pub trait Dice {
    /// Roll once and return the outcome.
    fn roll(&mut self) -> u32;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> u32 {
        (**self).roll()
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> u32 {
        (**self).roll()
    }
}

/// The two die shapes a game can hand to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieSides {
    Four,
    Six,
}

impl DieSides {
    #[must_use]
    pub const fn count(self) -> u32 {
        match self {
            Self::Four => FOUR_SIDED,
            Self::Six => SIX_SIDED,
        }
    }
}

/// Reject dice outside `MIN_DIE_SIDES..=MAX_DIE_SIDES`.
pub(crate) fn check_sides(sides: u32) -> HogResult<()> {
    if sides < MIN_DIE_SIDES || sides > MAX_DIE_SIDES {
        return Err(HogError::InvalidSides {
            sides,
            min: MIN_DIE_SIDES,
            max: MAX_DIE_SIDES,
        });
    }
    Ok(())
}

/// A fair die drawing uniformly from `1..=sides`.
#[derive(Debug, Clone)]
pub struct FairDice<R = ChaCha20Rng> {
    sides: u32,
    rng: R,
}

impl<R: Rng> FairDice<R> {
    /// Build a die over `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`HogError::InvalidSides`] unless `2 <= sides <= 100`.
    pub fn new(sides: u32, rng: R) -> HogResult<Self> {
        check_sides(sides)?;
        Ok(Self { sides, rng })
    }

    #[must_use]
    pub const fn sides(&self) -> u32 {
        self.sides
    }
}

impl FairDice<ChaCha20Rng> {
    /// Build a reproducible die from a seed.
    ///
    /// # Errors
    ///
    /// Returns [`HogError::InvalidSides`] unless `2 <= sides <= 100`.
    pub fn seeded(sides: u32, seed: u64) -> HogResult<Self> {
        Self::new(sides, ChaCha20Rng::seed_from_u64(seed))
    }

    fn standard(sides: DieSides, seed: u64) -> Self {
        Self {
            sides: sides.count(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Dice for FairDice<R> {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=self.sides)
    }
}

/// Scripted dice replaying a fixed sequence, wrapping back to the first
/// outcome after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDice {
    outcomes: Vec<u32>,
    cursor: usize,
}

impl TestDice {
    /// # Errors
    ///
    /// Returns [`HogError::EmptyScript`] when no outcomes are given and
    /// [`HogError::InvalidOutcome`] for any outcome below 1.
    pub fn new(outcomes: impl IntoIterator<Item = u32>) -> HogResult<Self> {
        let outcomes: Vec<u32> = outcomes.into_iter().collect();
        if outcomes.is_empty() {
            return Err(HogError::EmptyScript);
        }
        if let Some(&outcome) = outcomes.iter().find(|&&o| o == 0) {
            return Err(HogError::InvalidOutcome { outcome });
        }
        Ok(Self {
            outcomes,
            cursor: 0,
        })
    }

    /// A die that always shows `value`.
    ///
    /// # Errors
    ///
    /// Returns [`HogError::InvalidOutcome`] when `value` is 0.
    pub fn fixed(value: u32) -> HogResult<Self> {
        Self::new([value])
    }

    /// Number of outcomes consumed since the last wrap.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl Dice for TestDice {
    fn roll(&mut self) -> u32 {
        let outcome = self.outcomes.get(self.cursor).copied().unwrap_or(0);
        self.cursor = (self.cursor + 1) % self.outcomes.len();
        outcome
    }
}

/// The four-sided and six-sided die available during one game.
#[derive(Debug, Clone)]
pub struct DicePair<F, S> {
    four: F,
    six: S,
}

/// Dice pair backed by two independent `ChaCha` streams.
pub type SeededDice = DicePair<FairDice, FairDice>;

impl<F: Dice, S: Dice> DicePair<F, S> {
    pub const fn new(four: F, six: S) -> Self {
        Self { four, six }
    }

    /// Die to use for a turn of the given shape.
    pub fn select(&mut self, sides: DieSides) -> &mut dyn Dice {
        match sides {
            DieSides::Four => &mut self.four,
            DieSides::Six => &mut self.six,
        }
    }
}

impl SeededDice {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            FairDice::standard(DieSides::Four, seed),
            FairDice::standard(DieSides::Six, seed ^ SIX_SIDED_STREAM),
        )
    }
}

impl DicePair<TestDice, TestDice> {
    /// Both shapes replay the same script independently.
    #[must_use]
    pub fn scripted(dice: &TestDice) -> Self {
        Self::new(dice.clone(), dice.clone())
    }
}
