use anyhow::{Context, Result};
use hog_game::{AlwaysRoll, Commentary, Player, RuleSet, SeededDice, Strategy, play_with};
use serde::{Deserialize, Serialize};

/// Roll counts of the two demo players.
pub const DEMO_ROLLS: [u32; 2] = [5, 6];

/// Summary of one demo game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub players: [String; 2],
    pub winner: Player,
    pub scores: [u32; 2],
    pub turns: u32,
}

impl GameRecord {
    /// Human-readable verdict naming the winning strategy.
    pub fn verdict(&self) -> String {
        format!(
            "{}, who plays {}, won.",
            self.winner.name(),
            self.players[self.winner.index()]
        )
    }
}

/// Play `strategy0` against `strategy1` on dice seeded from `seed`.
pub fn play_seeded(
    strategy0: &dyn Strategy,
    strategy1: &dyn Strategy,
    rules: &RuleSet,
    seed: u64,
    commentary: &mut dyn Commentary,
) -> Result<GameRecord> {
    let mut dice = SeededDice::seeded(seed);
    let outcome = play_with(strategy0, strategy1, &mut dice, rules, commentary)
        .with_context(|| format!("game failed for seed {seed}"))?;
    Ok(GameRecord {
        seed,
        players: [strategy0.label(), strategy1.label()],
        winner: outcome.winner,
        scores: outcome.scores,
        turns: outcome.turns,
    })
}

/// Always-roll-5 against always-roll-6 on each seed.
pub fn play_basic(
    rules: &RuleSet,
    seeds: &[u64],
    commentary: &mut dyn Commentary,
) -> Result<Vec<GameRecord>> {
    let first = AlwaysRoll(DEMO_ROLLS[0]);
    let second = AlwaysRoll(DEMO_ROLLS[1]);
    seeds
        .iter()
        .map(|&seed| play_seeded(&first, &second, rules, seed, commentary))
        .collect()
}
