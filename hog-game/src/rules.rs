//! Rule configuration and the per-turn constraints derived from both scores.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GOAL, HOG_TIED_DIGIT, HOG_TIED_MAX_DICE, HOG_WILD_DIVISOR, MAX_NUM_ROLLS,
    MIN_NUM_ROLLS,
};
use crate::dice::DieSides;
use crate::error::{HogError, HogResult};

/// Named game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default = "RuleSet::default_goal")]
    pub goal: u32,
    #[serde(default = "RuleSet::default_max_dice")]
    pub max_dice: u32,
}

impl RuleSet {
    const fn default_goal() -> u32 {
        DEFAULT_GOAL
    }

    const fn default_max_dice() -> u32 {
        MAX_NUM_ROLLS
    }

    /// Parse a rule set from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// # Errors
    ///
    /// Returns [`HogError::InvalidRules`] when the goal is zero or the dice cap
    /// falls outside what the scoring engine accepts.
    pub const fn validate(&self) -> HogResult<()> {
        if self.goal == 0 {
            return Err(HogError::InvalidRules {
                field: "goal",
                min: 1,
                max: u32::MAX,
                value: self.goal,
            });
        }
        if self.max_dice < MIN_NUM_ROLLS || self.max_dice > MAX_NUM_ROLLS {
            return Err(HogError::InvalidRules {
                field: "max_dice",
                min: MIN_NUM_ROLLS,
                max: MAX_NUM_ROLLS,
                value: self.max_dice,
            });
        }
        Ok(())
    }

    /// Maximum dice the active player may roll this turn.
    #[must_use]
    pub const fn num_allowed_dice(&self, score: u32, opponent_score: u32) -> u32 {
        if is_hog_tied(score + opponent_score) {
            HOG_TIED_MAX_DICE
        } else {
            self.max_dice
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            goal: Self::default_goal(),
            max_dice: Self::default_max_dice(),
        }
    }
}

/// Combined score ends in 7.
#[must_use]
pub const fn is_hog_tied(total: u32) -> bool {
    total % 10 == HOG_TIED_DIGIT
}

/// Combined score is a multiple of 7 (zero included).
#[must_use]
pub const fn is_hog_wild(total: u32) -> bool {
    total % HOG_WILD_DIVISOR == 0
}

/// Maximum dice under the default rule set.
#[must_use]
pub const fn num_allowed_dice(score: u32, opponent_score: u32) -> u32 {
    if is_hog_tied(score + opponent_score) {
        HOG_TIED_MAX_DICE
    } else {
        MAX_NUM_ROLLS
    }
}

/// Die shape for the turn: four-sided under Hog Wild, six-sided otherwise.
#[must_use]
pub const fn select_dice(score: u32, opponent_score: u32) -> DieSides {
    if is_hog_wild(score + opponent_score) {
        DieSides::Four
    } else {
        DieSides::Six
    }
}
