//! Strategy library: closed-form heuristics choosing how many dice to roll.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    DEFAULT_STRATEGY_ROLLS, FINAL_BACON_BOTH_THRESHOLD, FINAL_BACON_TIED_THRESHOLD,
    FINAL_BACON_WILD_THRESHOLD, FINAL_COMEBACK_MARGIN, FINAL_COMEBACK_ROLLS,
    FINAL_DESPERATE_DEFICIT, FINAL_HOG_WILD_ROLLS, FINAL_OPPONENT_NEAR_GOAL,
    FINAL_OPPONENT_SAFE_GAP, FORTY_NINERS_SCORE,
};
use crate::rules::{RuleSet, is_hog_tied, is_hog_wild};
use crate::turn::free_bacon_turn;

/// Chooses a roll count from the active player's score and the opponent's.
///
/// Implementations hold only immutable configuration, so the same inputs
/// always produce the same answer.
pub trait Strategy {
    /// Label used in logs and reports.
    fn label(&self) -> String;

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32;
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn label(&self) -> String {
        (**self).label()
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        (**self).num_rolls(score, opponent_score)
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn label(&self) -> String {
        (**self).label()
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        (**self).num_rolls(score, opponent_score)
    }
}

/// Adapts a plain function or closure into a [`Strategy`].
#[derive(Clone, Copy)]
pub struct FnStrategy<F> {
    label: &'static str,
    choose: F,
}

impl<F: Fn(u32, u32) -> u32> FnStrategy<F> {
    pub const fn new(label: &'static str, choose: F) -> Self {
        Self { label, choose }
    }
}

impl<F> fmt::Debug for FnStrategy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStrategy")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<F: Fn(u32, u32) -> u32> Strategy for FnStrategy<F> {
    fn label(&self) -> String {
        self.label.to_string()
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        (self.choose)(score, opponent_score)
    }
}

/// Always rolls the same number of dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlwaysRoll(pub u32);

impl Strategy for AlwaysRoll {
    fn label(&self) -> String {
        format!("always_roll({})", self.0)
    }

    fn num_rolls(&self, _score: u32, _opponent_score: u32) -> u32 {
        self.0
    }
}

/// Rolls one extra die when trailing by at least `margin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comeback {
    pub margin: u32,
    pub num_rolls: u32,
}

impl Comeback {
    #[must_use]
    pub const fn new(margin: u32) -> Self {
        Self {
            margin,
            num_rolls: DEFAULT_STRATEGY_ROLLS,
        }
    }

    #[must_use]
    pub const fn with_num_rolls(mut self, num_rolls: u32) -> Self {
        self.num_rolls = num_rolls;
        self
    }
}

impl Strategy for Comeback {
    fn label(&self) -> String {
        format!("comeback(margin {}, rolls {})", self.margin, self.num_rolls)
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        if i64::from(opponent_score) - i64::from(score) >= i64::from(self.margin) {
            self.num_rolls + 1
        } else {
            self.num_rolls
        }
    }
}

/// Takes Free Bacon when it is worth at least `min_points` and leaves the
/// opponent Hog Tied or Hog Wild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mean {
    pub min_points: u32,
    pub num_rolls: u32,
}

impl Mean {
    #[must_use]
    pub const fn new(min_points: u32) -> Self {
        Self {
            min_points,
            num_rolls: DEFAULT_STRATEGY_ROLLS,
        }
    }

    #[must_use]
    pub const fn with_num_rolls(mut self, num_rolls: u32) -> Self {
        self.num_rolls = num_rolls;
        self
    }
}

impl Strategy for Mean {
    fn label(&self) -> String {
        format!("mean(min {}, rolls {})", self.min_points, self.num_rolls)
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        let bacon = free_bacon_turn(opponent_score);
        if bacon >= self.min_points {
            let next_total = score + opponent_score + bacon;
            if is_hog_wild(next_total) || is_hog_tied(next_total) {
                return 0;
            }
        }
        self.num_rolls
    }
}

/// Composite strategy weighing every special rule in priority order.
///
/// 1. Sitting on 49 is immune to pig out, so roll the maximum.
/// 2. Take Free Bacon when it wins, lands on 49, traps the opponent in Hog
///    Tied or Hog Wild, or beats the expected roll while we are constrained.
/// 3. Under Hog Wild roll four of the four-sided dice.
/// 4. Roll the maximum when the opponent is about to win and we are far
///    behind, or when a pig out would land us on 49.
/// 5. Otherwise roll 6 when trailing by 10 or more, else 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStrategy {
    pub goal: u32,
    pub max_dice: u32,
}

impl FinalStrategy {
    #[must_use]
    pub const fn new(rules: &RuleSet) -> Self {
        Self {
            goal: rules.goal,
            max_dice: rules.max_dice,
        }
    }

    fn free_bacon_is_advantageous(&self, score: u32, opponent_score: u32) -> bool {
        let bacon = free_bacon_turn(opponent_score);
        let future_score = score + bacon;
        if future_score >= self.goal {
            return true;
        }
        if self.goal.saturating_sub(opponent_score) < FINAL_OPPONENT_SAFE_GAP {
            return false;
        }
        if future_score == FORTY_NINERS_SCORE {
            return true;
        }

        let future_total = future_score + opponent_score;
        if is_hog_tied(future_total) || is_nonzero_hog_wild(future_total) {
            return true;
        }

        let total = score + opponent_score;
        match (is_hog_tied(total), is_nonzero_hog_wild(total)) {
            (true, true) => bacon >= FINAL_BACON_BOTH_THRESHOLD,
            (true, false) => bacon >= FINAL_BACON_TIED_THRESHOLD,
            (false, true) => bacon >= FINAL_BACON_WILD_THRESHOLD,
            (false, false) => false,
        }
    }

    fn needs_max_dice(&self, score: u32, opponent_score: u32) -> bool {
        let deficit = i64::from(opponent_score) - i64::from(score);
        let opponent_near_goal =
            self.goal.saturating_sub(opponent_score) <= FINAL_OPPONENT_NEAR_GOAL;
        (opponent_near_goal && deficit >= FINAL_DESPERATE_DEFICIT)
            || score + 1 == FORTY_NINERS_SCORE
    }
}

impl Default for FinalStrategy {
    fn default() -> Self {
        Self::new(&RuleSet::default())
    }
}

impl Strategy for FinalStrategy {
    fn label(&self) -> String {
        "final_strategy".to_string()
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        if score == FORTY_NINERS_SCORE {
            return self.max_dice;
        }
        if self.free_bacon_is_advantageous(score, opponent_score) {
            return 0;
        }
        if is_nonzero_hog_wild(score + opponent_score) {
            return FINAL_HOG_WILD_ROLLS;
        }
        if self.needs_max_dice(score, opponent_score) {
            return self.max_dice;
        }
        let comeback = Comeback::new(FINAL_COMEBACK_MARGIN);
        if comeback.num_rolls(score, opponent_score) == comeback.num_rolls {
            DEFAULT_STRATEGY_ROLLS
        } else {
            FINAL_COMEBACK_ROLLS
        }
    }
}

// The strategy never treats the opening 0-0 position as Hog Wild.
const fn is_nonzero_hog_wild(total: u32) -> bool {
    total != 0 && is_hog_wild(total)
}

/// Strategy families available to experiments and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    AlwaysRoll,
    Comeback,
    Mean,
    Final,
}

impl StrategyKind {
    pub const ALL: [Self; 4] = [Self::AlwaysRoll, Self::Comeback, Self::Mean, Self::Final];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AlwaysRoll => "always-roll",
            Self::Comeback => "comeback",
            Self::Mean => "mean",
            Self::Final => "final",
        }
    }

    /// Parameter range swept by the standard experiments, if the family has one.
    #[must_use]
    pub const fn sweep_range(self) -> Option<(u32, u32)> {
        match self {
            Self::AlwaysRoll | Self::Mean => Some((1, 10)),
            Self::Comeback => Some((5, 15)),
            Self::Final => None,
        }
    }

    /// Build a member of the family. The parameter is the roll count,
    /// comeback margin or mean threshold; the composite strategy ignores it.
    #[must_use]
    pub fn build(self, parameter: u32, rules: &RuleSet) -> Box<dyn Strategy + Send + Sync> {
        match self {
            Self::AlwaysRoll => Box::new(AlwaysRoll(parameter)),
            Self::Comeback => Box::new(Comeback::new(parameter)),
            Self::Mean => Box::new(Mean::new(parameter)),
            Self::Final => Box::new(FinalStrategy::new(rules)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_roll_ignores_scores() {
        let strategy = AlwaysRoll(5);
        assert_eq!(strategy.num_rolls(0, 0), 5);
        assert_eq!(strategy.num_rolls(99, 99), 5);
    }

    #[test]
    fn comeback_adds_a_die_when_trailing() {
        let strategy = Comeback::new(8);
        assert_eq!(strategy.num_rolls(10, 17), 5);
        assert_eq!(strategy.num_rolls(10, 18), 6);
        assert_eq!(strategy.num_rolls(40, 10), 5);
        assert_eq!(Comeback::new(0).with_num_rolls(3).num_rolls(20, 20), 4);
    }

    #[test]
    fn mean_traps_opponent_when_bacon_is_big_enough() {
        // Bacon off 34 is 4; 10 + 34 + 4 = 48, neither trap.
        assert_eq!(Mean::new(1).num_rolls(10, 34), 5);
        // Bacon off 34 is 4; 11 + 34 + 4 = 49 is Hog Wild.
        assert_eq!(Mean::new(4).num_rolls(11, 34), 0);
        assert_eq!(Mean::new(5).num_rolls(11, 34), 5);
        // Bacon off 20 is 3; 14 + 20 + 3 = 37 ends in 7.
        assert_eq!(Mean::new(3).num_rolls(14, 20), 0);
        // Bacon off 50 is 6 with touchdown 7; 0 + 50 + 7 = 57 ends in 7.
        assert_eq!(Mean::new(7).num_rolls(0, 50), 0);
    }

    #[test]
    fn final_strategy_rolls_max_on_forty_nine() {
        let strategy = FinalStrategy::default();
        assert_eq!(strategy.num_rolls(49, 0), 10);
        assert_eq!(strategy.num_rolls(49, 95), 10);
    }

    #[test]
    fn final_strategy_takes_winning_bacon() {
        let strategy = FinalStrategy::default();
        // Bacon off 96 is 10; 92 + 10 wins even with the opponent near goal.
        assert_eq!(strategy.num_rolls(92, 96), 0);
    }

    #[test]
    fn final_strategy_takes_bacon_to_forty_nine() {
        let strategy = FinalStrategy::default();
        // Bacon off 20 is 3; 46 + 3 = 49.
        assert_eq!(strategy.num_rolls(46, 20), 0);
    }

    #[test]
    fn final_strategy_traps_opponent_with_bacon() {
        let strategy = FinalStrategy::default();
        // Bacon off 10 is 2; 15 + 2 + 10 = 27 leaves the opponent Hog Tied.
        assert_eq!(strategy.num_rolls(15, 10), 0);
        // Bacon off 10 is 2; 16 + 2 + 10 = 28 leaves the opponent Hog Wild.
        assert_eq!(strategy.num_rolls(16, 10), 0);
    }

    #[test]
    fn final_strategy_skips_traps_when_opponent_nearly_won() {
        let strategy = FinalStrategy::default();
        // Bacon off 96 is 10; 11 + 10 + 96 = 117 ends in 7 but the opponent is
        // within 5 of the goal. Current total 107 is neither tied nor wild.
        assert_eq!(strategy.num_rolls(11, 96), 10);
    }

    #[test]
    fn final_strategy_compares_bacon_with_constrained_roll() {
        let strategy = FinalStrategy::default();
        // Total 37 is Hog Tied; bacon off 30 is 4 which meets the threshold.
        assert_eq!(strategy.num_rolls(7, 30), 0);
        // Total 27 is Hog Tied; bacon off 20 is 3, below the threshold.
        // 7 + 3 + 20 = 30 sets no trap, so fall through to the comeback rule.
        assert_eq!(strategy.num_rolls(7, 20), 6);
    }

    #[test]
    fn final_strategy_rolls_four_under_hog_wild() {
        let strategy = FinalStrategy::default();
        // Total 21 is Hog Wild; bacon off 11 is 2 -> 10 + 2 + 11 = 23, no trap.
        assert_eq!(strategy.num_rolls(10, 11), 4);
    }

    #[test]
    fn final_strategy_opening_roll_is_default() {
        // 0-0 is not treated as Hog Wild; bacon 1 gives total 1, no trap.
        assert_eq!(FinalStrategy::default().num_rolls(0, 0), 5);
    }

    #[test]
    fn final_strategy_goes_big_when_desperate() {
        let strategy = FinalStrategy::default();
        // Opponent on 92 and 50 ahead; total 134 has no constraint.
        assert_eq!(strategy.num_rolls(42, 92), 10);
        // A pig out from 48 lands on 49. Bacon off 10 is 2 -> total 60, no trap.
        assert_eq!(strategy.num_rolls(48, 10), 10);
        // From 48 against 3, bacon of 1 lands on 49 and wins priority.
        assert_eq!(strategy.num_rolls(48, 3), 0);
    }

    #[test]
    fn final_strategy_falls_back_to_comeback() {
        let strategy = FinalStrategy::default();
        // 31 + 10 = 41; bacon off 10 is 2 -> 43, no trap; not behind -> 5.
        assert_eq!(strategy.num_rolls(31, 10), 5);
        // 10 + 31 = 41; bacon off 31 is 4 -> 45, no trap; behind by 21 -> 6.
        assert_eq!(strategy.num_rolls(10, 31), 6);
    }

    #[test]
    fn kinds_build_matching_strategies() {
        let rules = RuleSet::default();
        assert_eq!(StrategyKind::AlwaysRoll.build(7, &rules).num_rolls(3, 4), 7);
        assert_eq!(StrategyKind::Comeback.build(5, &rules).num_rolls(0, 5), 6);
        assert_eq!(StrategyKind::Final.build(0, &rules).num_rolls(49, 0), 10);
        assert_eq!(StrategyKind::Final.sweep_range(), None);
        assert_eq!(StrategyKind::Comeback.sweep_range(), Some((5, 15)));
    }

    #[test]
    fn closures_act_as_strategies() {
        let greedy = FnStrategy::new("greedy", |score, opponent| {
            if score < opponent { 8 } else { 2 }
        });
        assert_eq!(greedy.num_rolls(0, 10), 8);
        assert_eq!(greedy.num_rolls(10, 0), 2);
        assert_eq!(greedy.label(), "greedy");
    }
}
