//! Centralized rule constants for the Hog engine.
//!
//! The goal and dice cap are the defaults of [`crate::rules::RuleSet`]; the
//! remaining values are fixed parts of the game and are only referenced
//! through this module.

// Game shape ---------------------------------------------------------------
pub const DEFAULT_GOAL: u32 = 100;
pub const MAX_NUM_ROLLS: u32 = 10;
pub const MIN_NUM_ROLLS: u32 = 1;

// Dice ---------------------------------------------------------------------
pub const FOUR_SIDED: u32 = 4;
pub const SIX_SIDED: u32 = 6;
pub(crate) const MIN_DIE_SIDES: u32 = 2;
pub const MAX_DIE_SIDES: u32 = 100;
pub(crate) const PIG_OUT_FACE: u32 = 1;
pub(crate) const PIG_OUT_SCORE: u32 = 1;

// Special rules ------------------------------------------------------------
pub(crate) const TOUCHDOWN_DIVISOR: u32 = 6;
pub(crate) const HOG_TIED_DIGIT: u32 = 7;
pub(crate) const HOG_TIED_MAX_DICE: u32 = 1;
pub(crate) const HOG_WILD_DIVISOR: u32 = 7;
pub const FORTY_NINERS_SCORE: u32 = 49;

// Strategy tuning ----------------------------------------------------------
pub(crate) const DEFAULT_STRATEGY_ROLLS: u32 = 5;
pub(crate) const FINAL_COMEBACK_MARGIN: u32 = 10;
pub(crate) const FINAL_COMEBACK_ROLLS: u32 = 6;
pub(crate) const FINAL_HOG_WILD_ROLLS: u32 = 4;
pub(crate) const FINAL_OPPONENT_SAFE_GAP: u32 = 5;
pub(crate) const FINAL_OPPONENT_NEAR_GOAL: u32 = 10;
pub(crate) const FINAL_DESPERATE_DEFICIT: i64 = 42;
pub(crate) const FINAL_BACON_BOTH_THRESHOLD: u32 = 3;
pub(crate) const FINAL_BACON_TIED_THRESHOLD: u32 = 4;
pub(crate) const FINAL_BACON_WILD_THRESHOLD: u32 = 5;

// Experiments --------------------------------------------------------------
pub const DEFAULT_SAMPLES: u32 = 100;
pub const DEFAULT_EXPERIMENT_SEED: u64 = 1337;
pub(crate) const SIX_SIDED_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;
