//! Full-game simulation: strict alternation until one player reaches the goal.
use serde::{Deserialize, Serialize};

use crate::commentary::{Commentary, Silent};
use crate::constants::FORTY_NINERS_SCORE;
use crate::dice::{Dice, DicePair, DieSides};
use crate::error::HogResult;
use crate::player::Player;
use crate::rules::{RuleSet, select_dice};
use crate::strategy::Strategy;
use crate::turn::take_turn_with;

/// Final state of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Player,
    pub scores: [u32; 2],
    pub turns: u32,
}

impl GameOutcome {
    #[must_use]
    pub const fn winning_score(&self) -> u32 {
        self.scores[self.winner.index()]
    }

    #[must_use]
    pub const fn losing_score(&self) -> u32 {
        self.scores[self.winner.other().index()]
    }
}

/// Snapshot of one resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub who: Player,
    pub score_before: u32,
    pub opponent_score: u32,
    pub requested_rolls: u32,
    pub num_rolls: u32,
    pub dice: DieSides,
    pub pig_out_exempt: bool,
    pub points: u32,
}

/// A game in progress over a borrowed pair of dice.
#[derive(Debug)]
pub struct GameSession<'d, F, S> {
    rules: RuleSet,
    dice: &'d mut DicePair<F, S>,
    scores: [u32; 2],
    active: Player,
    turns: u32,
}

impl<'d, F: Dice, S: Dice> GameSession<'d, F, S> {
    /// # Errors
    ///
    /// Returns [`crate::HogError::InvalidRules`] when `rules` fail validation.
    pub fn new(rules: RuleSet, dice: &'d mut DicePair<F, S>) -> HogResult<Self> {
        rules.validate()?;
        Ok(Self {
            rules,
            dice,
            scores: [0, 0],
            active: Player::Zero,
            turns: 0,
        })
    }

    #[must_use]
    pub const fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Player about to move.
    #[must_use]
    pub const fn active(&self) -> Player {
        self.active
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.scores[0] >= self.rules.goal || self.scores[1] >= self.rules.goal
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_over() {
            return None;
        }
        Some(GameOutcome {
            winner: self.active.other(),
            scores: self.scores,
            turns: self.turns,
        })
    }

    /// Play one turn for the active player. Returns `None` once the game is
    /// over.
    ///
    /// # Errors
    ///
    /// Propagates turn resolution errors.
    pub fn advance(
        &mut self,
        strategy: &dyn Strategy,
        commentary: &mut dyn Commentary,
    ) -> HogResult<Option<TurnRecord>> {
        if self.is_over() {
            return Ok(None);
        }

        let who = self.active;
        let score = self.scores[who.index()];
        let opponent_score = self.scores[who.other().index()];

        let max_allowed = self.rules.num_allowed_dice(score, opponent_score);
        let sides = select_dice(score, opponent_score);
        let requested_rolls = strategy.num_rolls(score, opponent_score);
        let num_rolls = requested_rolls.min(max_allowed);
        let pig_out_exempt = score == FORTY_NINERS_SCORE;

        let points = take_turn_with(
            num_rolls,
            opponent_score,
            self.dice.select(sides),
            pig_out_exempt,
            who,
            commentary,
        )?;

        self.scores[who.index()] = score + points;
        self.turns += 1;
        self.active = who.other();

        Ok(Some(TurnRecord {
            turn: self.turns,
            who,
            score_before: score,
            opponent_score,
            requested_rolls,
            num_rolls,
            dice: sides,
            pig_out_exempt,
            points,
        }))
    }

    /// Play to completion, alternating from the current active player.
    ///
    /// # Errors
    ///
    /// Propagates turn resolution errors.
    pub fn run(
        &mut self,
        strategy0: &dyn Strategy,
        strategy1: &dyn Strategy,
        commentary: &mut dyn Commentary,
    ) -> HogResult<GameOutcome> {
        loop {
            if let Some(outcome) = self.outcome() {
                commentary.game_over(outcome.winner, outcome.scores);
                return Ok(outcome);
            }
            let strategy = match self.active {
                Player::Zero => strategy0,
                Player::One => strategy1,
            };
            self.advance(strategy, commentary)?;
        }
    }
}

/// Simulate a game and report the winner. Player zero moves first.
///
/// # Errors
///
/// Returns [`crate::HogError::InvalidRules`] for an invalid rule set.
pub fn play<F: Dice, S: Dice>(
    strategy0: &dyn Strategy,
    strategy1: &dyn Strategy,
    dice: &mut DicePair<F, S>,
    rules: &RuleSet,
) -> HogResult<GameOutcome> {
    play_with(strategy0, strategy1, dice, rules, &mut Silent)
}

/// [`play`] reporting every turn to `commentary`.
///
/// # Errors
///
/// Returns [`crate::HogError::InvalidRules`] for an invalid rule set.
pub fn play_with<F: Dice, S: Dice>(
    strategy0: &dyn Strategy,
    strategy1: &dyn Strategy,
    dice: &mut DicePair<F, S>,
    rules: &RuleSet,
    commentary: &mut dyn Commentary,
) -> HogResult<GameOutcome> {
    GameSession::new(*rules, dice)?.run(strategy0, strategy1, commentary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{CommentaryEvent, Transcript};
    use crate::dice::{SeededDice, TestDice};
    use crate::error::HogError;
    use crate::strategy::{AlwaysRoll, FnStrategy};
    use std::cell::RefCell;

    #[test]
    fn first_player_wins_a_race_of_sixes() {
        let mut dice = DicePair::new(TestDice::fixed(4).unwrap(), TestDice::fixed(6).unwrap());
        let outcome = play(&AlwaysRoll(10), &AlwaysRoll(10), &mut dice, &RuleSet::default())
            .unwrap();
        assert_eq!(outcome.winner, Player::Zero);
        assert!(outcome.winning_score() >= 100);
        assert!(outcome.losing_score() < 100);
    }

    #[test]
    fn opening_turn_uses_four_sided_dice() {
        // 0 + 0 is a multiple of 7, so the opening roll uses the four-sided die.
        let mut dice = DicePair::new(TestDice::fixed(4).unwrap(), TestDice::fixed(6).unwrap());
        let mut session = GameSession::new(RuleSet::default(), &mut dice).unwrap();
        let record = session
            .advance(&AlwaysRoll(2), &mut Silent)
            .unwrap()
            .unwrap();
        assert_eq!(record.dice, DieSides::Four);
        assert_eq!(record.points, 8);
        assert_eq!(session.scores(), [8, 0]);
        assert_eq!(session.active(), Player::One);
    }

    #[test]
    fn hog_tied_clamps_requested_rolls() {
        let mut dice = DicePair::scripted(&TestDice::fixed(5).unwrap());
        let mut session = GameSession::new(RuleSet::default(), &mut dice).unwrap();
        // Free Bacon for 1, a single five, then Free Bacon again: 2 + 5 = 7.
        session.advance(&AlwaysRoll(0), &mut Silent).unwrap();
        session.advance(&AlwaysRoll(1), &mut Silent).unwrap();
        session.advance(&AlwaysRoll(0), &mut Silent).unwrap();
        assert_eq!(session.scores(), [2, 5]);
        let record = session
            .advance(&AlwaysRoll(10), &mut Silent)
            .unwrap()
            .unwrap();
        assert_eq!(record.requested_rolls, 10);
        assert_eq!(record.num_rolls, 1);
        assert_eq!(record.points, 5);
    }

    #[test]
    fn strategies_see_their_own_score_first() {
        let seen0 = RefCell::new(Vec::new());
        let seen1 = RefCell::new(Vec::new());
        let first = FnStrategy::new("three", |score, opponent| {
            seen0.borrow_mut().push((score, opponent));
            3
        });
        let second = FnStrategy::new("two", |score, opponent| {
            seen1.borrow_mut().push((score, opponent));
            2
        });
        let mut dice = DicePair::scripted(&TestDice::fixed(5).unwrap());
        play(&first, &second, &mut dice, &RuleSet::default()).unwrap();

        // Player 0 opens with three fives for 15, player 1 answers with 10.
        assert_eq!(seen0.borrow()[..2], [(0, 0), (15, 10)]);
        assert_eq!(seen1.borrow()[..2], [(0, 15), (10, 30)]);
    }

    #[test]
    fn oversized_requests_are_clamped_not_rejected() {
        let mut dice = SeededDice::seeded(9);
        let wild = FnStrategy::new("forty-nine", |_, _| 49);
        let outcome = play(&wild, &AlwaysRoll(5), &mut dice, &RuleSet::default()).unwrap();
        assert!(outcome.winning_score() >= 100);
    }

    #[test]
    fn forty_niner_is_exempt_from_pig_out() {
        let mut dice = DicePair::scripted(&TestDice::fixed(1).unwrap());
        let mut session = GameSession::new(RuleSet::default(), &mut dice).unwrap();
        session.scores = [49, 10];
        let record = session
            .advance(&AlwaysRoll(3), &mut Silent)
            .unwrap()
            .unwrap();
        assert!(record.pig_out_exempt);
        assert_eq!(record.points, 3);
        assert_eq!(session.scores(), [52, 10]);
    }

    #[test]
    fn winner_is_last_mover_and_loop_stops() {
        let mut dice = DicePair::scripted(&TestDice::fixed(6).unwrap());
        let mut session = GameSession::new(RuleSet::default(), &mut dice).unwrap();
        session.scores = [95, 98];
        session.active = Player::One;
        let outcome = session
            .run(&AlwaysRoll(1), &AlwaysRoll(1), &mut Silent)
            .unwrap();
        assert_eq!(outcome.winner, Player::One);
        assert_eq!(outcome.scores, [95, 105]);
        assert!(session.advance(&AlwaysRoll(1), &mut Silent).unwrap().is_none());
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let mut dice = SeededDice::seeded(1);
        let rules = RuleSet {
            goal: 100,
            max_dice: 0,
        };
        let result = play(&AlwaysRoll(5), &AlwaysRoll(5), &mut dice, &rules);
        assert!(matches!(result, Err(HogError::InvalidRules { .. })));
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let rules = RuleSet::default();
        let first = play(
            &AlwaysRoll(5),
            &AlwaysRoll(6),
            &mut SeededDice::seeded(77),
            &rules,
        )
        .unwrap();
        let second = play(
            &AlwaysRoll(5),
            &AlwaysRoll(6),
            &mut SeededDice::seeded(77),
            &rules,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn commentary_announces_the_winner() {
        let mut dice = SeededDice::seeded(3);
        let mut transcript = Transcript::default();
        let outcome = play_with(
            &AlwaysRoll(4),
            &AlwaysRoll(4),
            &mut dice,
            &RuleSet::default(),
            &mut transcript,
        )
        .unwrap();
        assert_eq!(
            transcript.events.last(),
            Some(&CommentaryEvent::GameOver {
                winner: outcome.winner,
                scores: outcome.scores
            })
        );
    }
}
