//! Exact turn-score probabilities for a roll of `n` fair dice.
//!
//! Distributions are built by convolution over the faces that do not pig
//! out; whatever mass is left over belongs to the pig-out score. The
//! touchdown bonus is applied to the final table so every helper here
//! reports what a turn actually scores.
use serde::Serialize;

use crate::constants::{
    MAX_DIE_SIDES, MAX_NUM_ROLLS, MIN_DIE_SIDES, MIN_NUM_ROLLS, PIG_OUT_SCORE,
};
use crate::dice::check_sides;
use crate::error::{HogError, HogResult};
use crate::numbers::{u32_to_f64, u32_to_usize, usize_to_f64, usize_to_u32};
use crate::turn::touchdown;

/// Probability of each turn score, indexed by score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDistribution {
    probabilities: Vec<f64>,
}

impl ScoreDistribution {
    /// Probability of scoring exactly `score`.
    #[must_use]
    pub fn probability(&self, score: u32) -> f64 {
        self.probabilities
            .get(u32_to_usize(score))
            .copied()
            .unwrap_or(0.0)
    }

    /// Probability of scoring `score` or more.
    #[must_use]
    pub fn at_least(&self, score: u32) -> f64 {
        self.probabilities
            .iter()
            .skip(u32_to_usize(score))
            .sum()
    }

    #[must_use]
    pub fn expected(&self) -> f64 {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(score, p)| usize_to_f64(score) * p)
            .sum()
    }

    /// Highest score with non-zero probability.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.probabilities
            .iter()
            .rposition(|p| *p > 0.0)
            .map_or(0, usize_to_u32)
    }

    /// `(score, probability)` pairs with non-zero probability.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > 0.0)
            .map(|(score, p)| (usize_to_u32(score), *p))
    }
}

fn validate(num_rolls: u32, sides: u32) -> HogResult<()> {
    if !(MIN_NUM_ROLLS..=MAX_NUM_ROLLS).contains(&num_rolls) {
        return Err(HogError::InvalidRollCount {
            num_rolls,
            min: MIN_NUM_ROLLS,
            max: MAX_NUM_ROLLS,
        });
    }
    check_sides(sides)
}

/// Exact distribution of a turn of `num_rolls` dice with `sides` faces.
///
/// # Errors
///
/// Returns [`HogError::InvalidRollCount`] unless `1 <= num_rolls <= 10` and
/// [`HogError::InvalidSides`] unless `2 <= sides <= 100`.
pub fn turn_score_distribution(
    num_rolls: u32,
    sides: u32,
    pig_out_exempt: bool,
) -> HogResult<ScoreDistribution> {
    validate(num_rolls, sides)?;

    let lowest_face = if pig_out_exempt { 1 } else { 2 };
    let face_probability = 1.0 / u32_to_f64(sides);
    let max_sum = num_rolls
        .checked_mul(sides)
        .map(u32_to_usize)
        .ok_or(HogError::InvalidSides {
            sides,
            min: MIN_DIE_SIDES,
            max: MAX_DIE_SIDES,
        })?;

    // sums[s] = probability that the dice rolled so far total s without a pig out
    let mut sums = vec![0.0_f64; max_sum + 1];
    sums[0] = 1.0;
    for _ in 0..num_rolls {
        let mut next = vec![0.0_f64; max_sum + 1];
        for (total, p) in sums.iter().enumerate().filter(|(_, p)| **p > 0.0) {
            for face in lowest_face..=sides {
                next[total + u32_to_usize(face)] += p * face_probability;
            }
        }
        sums = next;
    }

    let pig_out = 1.0 - sums.iter().sum::<f64>();
    // touchdown never adds more than a sixth
    let mut probabilities = vec![0.0_f64; max_sum + max_sum / 6 + 1];
    for (total, p) in sums.iter().enumerate().filter(|(_, p)| **p > 0.0) {
        probabilities[u32_to_usize(touchdown(usize_to_u32(total)))] += p;
    }
    if !pig_out_exempt {
        probabilities[u32_to_usize(PIG_OUT_SCORE)] += pig_out.max(0.0);
    }
    Ok(ScoreDistribution { probabilities })
}

/// Mean score of a turn of `num_rolls` dice.
///
/// # Errors
///
/// See [`turn_score_distribution`].
pub fn expected_turn_score(num_rolls: u32, sides: u32, pig_out_exempt: bool) -> HogResult<f64> {
    Ok(turn_score_distribution(num_rolls, sides, pig_out_exempt)?.expected())
}

/// Probability that a turn scores exactly `score`.
///
/// # Errors
///
/// See [`turn_score_distribution`].
pub fn chance_of_exact(score: u32, num_rolls: u32, sides: u32) -> HogResult<f64> {
    Ok(turn_score_distribution(num_rolls, sides, false)?.probability(score))
}

/// Probability that a turn scores at least `score`.
///
/// # Errors
///
/// See [`turn_score_distribution`].
pub fn chance_of_at_least(score: u32, num_rolls: u32, sides: u32) -> HogResult<f64> {
    Ok(turn_score_distribution(num_rolls, sides, false)?.at_least(score))
}

/// Largest score a turn of `num_rolls` dice can produce.
///
/// # Errors
///
/// See [`turn_score_distribution`].
pub fn max_turn_score(num_rolls: u32, sides: u32) -> HogResult<u32> {
    Ok(turn_score_distribution(num_rolls, sides, false)?.max_score())
}

/// Roll count with the highest expected turn score. Ties keep the lower count.
///
/// # Errors
///
/// Returns [`HogError::InvalidSides`] unless `2 <= sides <= 100`.
pub fn best_roll_count(sides: u32) -> HogResult<u32> {
    let mut best: Option<(u32, f64)> = None;
    for num_rolls in MIN_NUM_ROLLS..=MAX_NUM_ROLLS {
        let expected = expected_turn_score(num_rolls, sides, false)?;
        log::debug!("{num_rolls} rolls of d{sides} expect {expected:.4}");
        if best.is_none_or(|(_, best_expected)| expected > best_expected) {
            best = Some((num_rolls, expected));
        }
    }
    Ok(best.map_or(MIN_NUM_ROLLS, |(num_rolls, _)| num_rolls))
}
