//! Turn scoring: pig out, Free Bacon, touchdown and the 49ers exemption.
use crate::commentary::{Commentary, Silent};
use crate::constants::{
    MAX_NUM_ROLLS, MIN_NUM_ROLLS, PIG_OUT_FACE, PIG_OUT_SCORE, TOUCHDOWN_DIVISOR,
};
use crate::dice::Dice;
use crate::error::{HogError, HogResult};
use crate::player::Player;

/// Score from rolling `num_rolls` dice.
///
/// A 1 collapses the turn to a single point unless `pig_out_exempt` is set,
/// in which case ones are scored at face value.
///
/// # Errors
///
/// Returns [`HogError::InvalidRollCount`] unless `1 <= num_rolls <= 10`.
pub fn roll_dice(num_rolls: u32, dice: &mut dyn Dice, pig_out_exempt: bool) -> HogResult<u32> {
    roll_dice_with(num_rolls, dice, pig_out_exempt, Player::Zero, &mut Silent)
}

/// [`roll_dice`] reporting each outcome to `commentary`.
///
/// # Errors
///
/// Returns [`HogError::InvalidRollCount`] unless `1 <= num_rolls <= 10`.
pub fn roll_dice_with(
    num_rolls: u32,
    dice: &mut dyn Dice,
    pig_out_exempt: bool,
    who: Player,
    commentary: &mut dyn Commentary,
) -> HogResult<u32> {
    if !(MIN_NUM_ROLLS..=MAX_NUM_ROLLS).contains(&num_rolls) {
        return Err(HogError::InvalidRollCount {
            num_rolls,
            min: MIN_NUM_ROLLS,
            max: MAX_NUM_ROLLS,
        });
    }

    let mut score = 0_u32;
    let mut pigged_out = false;
    for _ in 0..num_rolls {
        let outcome = dice.roll();
        commentary.rolled(who, outcome);
        if outcome == PIG_OUT_FACE && !pig_out_exempt {
            pigged_out = true;
        } else {
            score += outcome;
        }
    }

    if pigged_out {
        commentary.pigged_out(who);
        return Ok(PIG_OUT_SCORE);
    }
    Ok(score)
}

/// Score for a turn of `num_rolls` dice, zero meaning Free Bacon.
///
/// # Errors
///
/// Returns [`HogError::InvalidRollCount`] when more than ten dice are requested.
pub fn take_turn(
    num_rolls: u32,
    opponent_score: u32,
    dice: &mut dyn Dice,
    pig_out_exempt: bool,
) -> HogResult<u32> {
    take_turn_with(
        num_rolls,
        opponent_score,
        dice,
        pig_out_exempt,
        Player::Zero,
        &mut Silent,
    )
}

/// [`take_turn`] reporting the turn to `commentary`.
///
/// # Errors
///
/// Returns [`HogError::InvalidRollCount`] when more than ten dice are requested.
pub fn take_turn_with(
    num_rolls: u32,
    opponent_score: u32,
    dice: &mut dyn Dice,
    pig_out_exempt: bool,
    who: Player,
    commentary: &mut dyn Commentary,
) -> HogResult<u32> {
    commentary.turn_started(who, num_rolls);

    let base = if num_rolls == 0 {
        free_bacon(opponent_score)
    } else {
        roll_dice_with(num_rolls, dice, pig_out_exempt, who, commentary)?
    };

    let score = touchdown(base);
    if score > base {
        commentary.touchdown(who, score - base);
    }
    commentary.turn_scored(who, score);
    Ok(score)
}

/// One plus the tens digit of the opponent's score.
#[must_use]
pub const fn free_bacon(opponent_score: u32) -> u32 {
    1 + opponent_score / 10
}

/// Adds `score / 6` to positive multiples of six.
#[must_use]
pub const fn touchdown(score: u32) -> u32 {
    if score > 0 && score % TOUCHDOWN_DIVISOR == 0 {
        score + score / TOUCHDOWN_DIVISOR
    } else {
        score
    }
}

/// Free Bacon value after the touchdown bonus.
#[must_use]
pub const fn free_bacon_turn(opponent_score: u32) -> u32 {
    touchdown(free_bacon(opponent_score))
}
