use colored::Colorize;
use hog_game::constants::MAX_NUM_ROLLS;
use hog_game::{Commentary, Player, Strategy};
use std::cell::RefCell;
use std::io::{BufRead, Write};

/// Coloured play-by-play written to any sink.
pub struct ConsoleCommentary<W: Write> {
    out: W,
}

impl<W: Write> ConsoleCommentary<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

// Commentary is best-effort; a closed pipe must not abort the game.
impl<W: Write> Commentary for ConsoleCommentary<W> {
    fn turn_started(&mut self, who: Player, num_rolls: u32) {
        let _ = if num_rolls == 0 {
            writeln!(self.out, "{} takes Free Bacon", who.name().bold())
        } else {
            writeln!(
                self.out,
                "{} is going to roll {num_rolls} dice",
                who.name().bold()
            )
        };
    }

    fn rolled(&mut self, who: Player, outcome: u32) {
        let _ = writeln!(self.out, "  {who} rolled a {}", outcome.to_string().cyan());
    }

    fn pigged_out(&mut self, who: Player) {
        let _ = writeln!(self.out, "  {}", format!("{who} rolled a 1 and pigs out!").red());
    }

    fn touchdown(&mut self, who: Player, bonus: u32) {
        let _ = writeln!(
            self.out,
            "  {} {who} earns +{bonus} extra points",
            "Touchdown!".bright_green().bold()
        );
    }

    fn turn_scored(&mut self, who: Player, points: u32) {
        let _ = writeln!(self.out, "  {who} scored {points} points this turn.");
    }

    fn game_over(&mut self, winner: Player, scores: [u32; 2]) {
        let _ = writeln!(
            self.out,
            "{} {} to {}",
            format!("{winner} wins").bright_yellow().bold(),
            scores[winner.index()],
            scores[winner.other().index()]
        );
    }
}

/// Asks a human for each move, re-prompting until the answer is a roll count
/// between 0 and the dice cap.
pub struct InteractiveStrategy<R: BufRead, W: Write> {
    io: RefCell<(R, W)>,
}

impl<R: BufRead, W: Write> InteractiveStrategy<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            io: RefCell::new((input, output)),
        }
    }
}

/// Parse a roll count, or explain why the line is not one.
fn validate_response(response: &str) -> Result<u32, String> {
    let Ok(value) = response.trim().parse::<i64>() else {
        return Err("Please enter a positive number".to_string());
    };
    if value < 0 {
        return Err("Please enter a non-negative number".to_string());
    }
    match u32::try_from(value) {
        Ok(rolls) if rolls <= MAX_NUM_ROLLS => Ok(rolls),
        _ => Err(format!("Please enter a number that does not exceed {MAX_NUM_ROLLS}")),
    }
}

impl<R: BufRead, W: Write> Strategy for InteractiveStrategy<R, W> {
    fn label(&self) -> String {
        "interactive".to_string()
    }

    fn num_rolls(&self, score: u32, opponent_score: u32) -> u32 {
        let mut io = self.io.borrow_mut();
        let (input, output) = &mut *io;
        let _ = writeln!(output, "Current score: {score} to {opponent_score}");
        loop {
            let _ = write!(output, "How many dice will you roll? ");
            let _ = output.flush();
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    log::warn!("input closed; taking Free Bacon");
                    return 0;
                }
                Ok(_) => {}
            }
            match validate_response(&line) {
                Ok(rolls) => return rolls,
                Err(message) => {
                    let _ = writeln!(output, "{}", message.yellow());
                }
            }
        }
    }
}
