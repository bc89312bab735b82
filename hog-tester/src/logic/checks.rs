use colored::Colorize;
use hog_game::{
    AlwaysRoll, DicePair, FinalStrategy, GameSession, HogResult, RuleSet, Silent, Strategy,
    TestDice, roll_dice, take_turn,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub checks_run: usize,
    pub failures: Vec<String>,
    #[serde(with = "crate::util::duration_serde")]
    pub duration: Duration,
}

/// One assertion within a scenario.
struct Expectation {
    label: &'static str,
    expected: u32,
    actual: u32,
}

impl Expectation {
    const fn new(label: &'static str, expected: u32, actual: u32) -> Self {
        Self {
            label,
            expected,
            actual,
        }
    }
}

type ScenarioFn = fn() -> HogResult<Vec<Expectation>>;

/// Named rule scenarios, all driven by scripted dice.
fn scenarios() -> Vec<(&'static str, ScenarioFn)> {
    vec![
        ("pig-out", pig_out_scenario as ScenarioFn),
        ("free-bacon", free_bacon_scenario as ScenarioFn),
        ("touchdown", touchdown_scenario as ScenarioFn),
        ("forty-niners", forty_niners_scenario as ScenarioFn),
        ("hog-tied", hog_tied_scenario as ScenarioFn),
        ("final-strategy", final_strategy_scenario as ScenarioFn),
    ]
}

pub fn scenario_names() -> Vec<&'static str> {
    scenarios().into_iter().map(|(name, _)| name).collect()
}

fn pig_out_scenario() -> HogResult<Vec<Expectation>> {
    let mut first = TestDice::new([4, 6, 1])?;
    let mut second = TestDice::new([4, 6, 1])?;
    let mut third = TestDice::new([1, 2, 3])?;
    let mut fourth = TestDice::new([4, 6, 1])?;
    let mut fifth = TestDice::new([4, 6, 1])?;
    Ok(vec![
        Expectation::new("First two rolls total 10", 10, roll_dice(2, &mut first, false)?),
        Expectation::new("Third roll is a 1", 1, roll_dice(3, &mut second, false)?),
        Expectation::new("First roll is a 1", 1, roll_dice(3, &mut third, false)?),
        Expectation::new("Turn of two rolls totals 10", 10, take_turn(2, 0, &mut fourth, false)?),
        Expectation::new("Turn pigs out on a 1", 1, take_turn(3, 20, &mut fifth, false)?),
    ])
}

fn free_bacon_scenario() -> HogResult<Vec<Expectation>> {
    let mut dice = TestDice::fixed(6)?;
    Ok(vec![
        Expectation::new("Opponent tens digit is 3", 4, take_turn(0, 34, &mut dice, false)?),
        Expectation::new("Opponent tens digit is 7", 8, take_turn(0, 71, &mut dice, false)?),
        Expectation::new("Opponent tens digit is 0", 1, take_turn(0, 7, &mut dice, false)?),
    ])
}

fn touchdown_scenario() -> HogResult<Vec<Expectation>> {
    let mut dice = TestDice::fixed(6)?;
    Ok(vec![
        Expectation::new("Six touches down to 7", 7, take_turn(1, 0, &mut dice, false)?),
        Expectation::new("Twelve touches down to 14", 14, take_turn(2, 0, &mut dice, false)?),
        Expectation::new("Free Bacon of 6", 7, take_turn(0, 50, &mut dice, false)?),
    ])
}

fn forty_niners_scenario() -> HogResult<Vec<Expectation>> {
    let mut dice = TestDice::fixed(1)?;
    Ok(vec![
        Expectation::new("Exempt ones are scored", 3, roll_dice(3, &mut dice, true)?),
        Expectation::new("Ten exempt ones", 10, take_turn(10, 0, &mut dice, true)?),
        Expectation::new("Exemption and touchdown", 7, take_turn(6, 0, &mut dice, true)?),
    ])
}

fn hog_tied_scenario() -> HogResult<Vec<Expectation>> {
    let mut dice = DicePair::scripted(&TestDice::fixed(5)?);
    let mut session = GameSession::new(RuleSet::default(), &mut dice)?;
    session.advance(&AlwaysRoll(0), &mut Silent)?;
    session.advance(&AlwaysRoll(1), &mut Silent)?;
    session.advance(&AlwaysRoll(0), &mut Silent)?;
    let scores = session.scores();
    let rolled = session
        .advance(&AlwaysRoll(10), &mut Silent)?
        .map_or(0, |record| record.num_rolls);
    Ok(vec![
        Expectation::new("Scores total 7", 7, scores[0] + scores[1]),
        Expectation::new("Only one die allowed", 1, rolled),
    ])
}

fn final_strategy_scenario() -> HogResult<Vec<Expectation>> {
    let strategy = FinalStrategy::default();
    Ok(vec![
        Expectation::new("Free Bacon wins the game", 0, strategy.num_rolls(97, 40)),
        Expectation::new("Free Bacon reaches the 49ers", 0, strategy.num_rolls(48, 3)),
        Expectation::new("Roll big one short of the 49ers", 10, strategy.num_rolls(48, 10)),
    ])
}

pub struct CheckRunner {
    verbose: bool,
}

impl CheckRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run every named scenario, or only those listed in `names`.
    pub fn run(&self, names: &[String]) -> Vec<ScenarioResult> {
        scenarios()
            .into_iter()
            .filter(|(name, _)| names.is_empty() || names.iter().any(|n| n == name))
            .map(|(name, scenario)| self.run_scenario(name, scenario))
            .collect()
    }

    fn run_scenario(&self, name: &str, scenario: ScenarioFn) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Checking scenario: {}", name.bright_white());
        }

        let start = Instant::now();
        let (checks_run, failures) = match scenario() {
            Ok(expectations) => {
                let failures = expectations
                    .iter()
                    .filter(|e| e.expected != e.actual)
                    .map(|e| format!("{}: expected {} got {}", e.label, e.expected, e.actual))
                    .collect::<Vec<_>>();
                (expectations.len(), failures)
            }
            Err(err) => (0, vec![format!("scenario aborted: {err}")]),
        };
        let duration = start.elapsed();

        if !failures.is_empty() {
            log::warn!("scenario {name} failed {} checks", failures.len());
        }

        ScenarioResult {
            scenario_name: name.to_string(),
            passed: failures.is_empty(),
            checks_run,
            failures,
            duration,
        }
    }
}
