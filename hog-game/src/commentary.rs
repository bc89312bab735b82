//! Commentary observers notified as turns are played.
//!
//! The engine behaves identically whichever observer is attached; observers
//! only see events and never influence scoring.
use crate::player::Player;

/// Hooks invoked by the turn engine and game simulator. All default to no-ops.
pub trait Commentary {
    fn turn_started(&mut self, _who: Player, _num_rolls: u32) {}

    fn rolled(&mut self, _who: Player, _outcome: u32) {}

    fn pigged_out(&mut self, _who: Player) {}

    fn touchdown(&mut self, _who: Player, _bonus: u32) {}

    fn turn_scored(&mut self, _who: Player, _points: u32) {}

    fn game_over(&mut self, _winner: Player, _scores: [u32; 2]) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Commentary for Silent {}

/// Observer that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCommentary;

impl Commentary for LogCommentary {
    fn turn_started(&mut self, who: Player, num_rolls: u32) {
        log::info!("{who} is going to roll {num_rolls} dice");
    }

    fn rolled(&mut self, who: Player, outcome: u32) {
        log::debug!("{who} rolled a {outcome}");
    }

    fn pigged_out(&mut self, who: Player) {
        log::info!("{who} rolled a 1 and pigs out!");
    }

    fn touchdown(&mut self, who: Player, bonus: u32) {
        log::info!("Touchdown! {who}'s score is a multiple of 6. +{bonus} extra points!");
    }

    fn turn_scored(&mut self, who: Player, points: u32) {
        log::info!("{who} scored {points} points this turn.");
    }

    fn game_over(&mut self, winner: Player, scores: [u32; 2]) {
        log::info!(
            "{winner} wins {} to {}",
            scores[winner.index()],
            scores[winner.other().index()]
        );
    }
}

/// Observer that records every event, handy for asserting on a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub events: Vec<CommentaryEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryEvent {
    TurnStarted { who: Player, num_rolls: u32 },
    Rolled { who: Player, outcome: u32 },
    PiggedOut { who: Player },
    Touchdown { who: Player, bonus: u32 },
    TurnScored { who: Player, points: u32 },
    GameOver { winner: Player, scores: [u32; 2] },
}

impl Transcript {
    /// Outcomes rolled so far, in order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CommentaryEvent::Rolled { outcome, .. } => Some(*outcome),
                _ => None,
            })
            .collect()
    }
}

impl Commentary for Transcript {
    fn turn_started(&mut self, who: Player, num_rolls: u32) {
        self.events
            .push(CommentaryEvent::TurnStarted { who, num_rolls });
    }

    fn rolled(&mut self, who: Player, outcome: u32) {
        self.events.push(CommentaryEvent::Rolled { who, outcome });
    }

    fn pigged_out(&mut self, who: Player) {
        self.events.push(CommentaryEvent::PiggedOut { who });
    }

    fn touchdown(&mut self, who: Player, bonus: u32) {
        self.events.push(CommentaryEvent::Touchdown { who, bonus });
    }

    fn turn_scored(&mut self, who: Player, points: u32) {
        self.events.push(CommentaryEvent::TurnScored { who, points });
    }

    fn game_over(&mut self, winner: Player, scores: [u32; 2]) {
        self.events.push(CommentaryEvent::GameOver { winner, scores });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::TestDice;
    use crate::turn::take_turn_with;

    #[test]
    fn observers_do_not_change_scores() {
        let mut silent_dice = TestDice::new([3, 3, 6]).unwrap();
        let mut logged_dice = silent_dice.clone();
        let silent = take_turn_with(3, 0, &mut silent_dice, false, Player::Zero, &mut Silent);
        let logged =
            take_turn_with(3, 0, &mut logged_dice, false, Player::Zero, &mut LogCommentary);
        assert_eq!(silent, Ok(14));
        assert_eq!(silent, logged);
    }

    #[test]
    fn transcript_records_events_in_order() {
        let mut dice = TestDice::new([2, 4]).unwrap();
        let mut transcript = Transcript::default();
        take_turn_with(2, 0, &mut dice, false, Player::One, &mut transcript).unwrap();
        assert_eq!(
            transcript.events,
            vec![
                CommentaryEvent::TurnStarted {
                    who: Player::One,
                    num_rolls: 2
                },
                CommentaryEvent::Rolled {
                    who: Player::One,
                    outcome: 2
                },
                CommentaryEvent::Rolled {
                    who: Player::One,
                    outcome: 4
                },
                CommentaryEvent::Touchdown {
                    who: Player::One,
                    bonus: 1
                },
                CommentaryEvent::TurnScored {
                    who: Player::One,
                    points: 7
                },
            ]
        );
    }
}
