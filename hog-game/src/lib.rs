//! Hog Game Engine
//!
//! Rules, dice, strategies and Monte Carlo experiments for Hog, the
//! two-player race to 100 points. The crate has no I/O; drivers attach a
//! [`Commentary`] observer to watch games unfold.

pub mod commentary;
pub mod constants;
pub mod dice;
pub mod error;
pub mod experiment;
pub mod game;
pub mod numbers;
pub mod player;
pub mod rules;
pub mod stats;
pub mod strategy;
pub mod turn;

// Re-export commonly used types
pub use commentary::{Commentary, CommentaryEvent, LogCommentary, Silent, Transcript};
pub use dice::{Dice, DicePair, DieSides, FairDice, SeededDice, TestDice};
pub use error::{HogError, HogResult};
pub use experiment::{
    Experiment, ExperimentConfig, ExperimentRecord, SweepOutcome, SweepTrial, estimate_average,
    sweep_by, try_estimate_average,
};
pub use game::{GameOutcome, GameSession, TurnRecord, play, play_with};
pub use player::Player;
pub use rules::{RuleSet, is_hog_tied, is_hog_wild, num_allowed_dice, select_dice};
pub use stats::{
    ScoreDistribution, best_roll_count, chance_of_at_least, chance_of_exact, expected_turn_score,
    max_turn_score, turn_score_distribution,
};
pub use strategy::{
    AlwaysRoll, Comeback, FinalStrategy, FnStrategy, Mean, Strategy, StrategyKind,
};
pub use turn::{free_bacon, roll_dice, roll_dice_with, take_turn, take_turn_with, touchdown};
