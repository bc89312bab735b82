mod interactive;
mod logic;
mod util;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use hog_game::constants::{DEFAULT_EXPERIMENT_SEED, DEFAULT_SAMPLES};
use hog_game::{AlwaysRoll, Player, RuleSet};
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use interactive::{ConsoleCommentary, InteractiveStrategy};
use logic::{
    CheckRunner, ExperimentRunner, GameRecord, ScenarioResult, SeedRun, play_basic, play_seeded,
    resolve_seed_inputs, scenario_names,
};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Scripted rule scenarios (fast, deterministic)
    Checks,
    /// One commentated game per seed: always roll 5 vs always roll 6
    Basic,
    /// Play against always-roll-5 from the terminal
    Interactive,
    /// Sweep every strategy family against the baseline
    Experiments,
    /// Composite strategy win rate against the baseline
    Final,
}

#[derive(Debug, Parser)]
#[command(name = "hog-tester", version = "0.1.0")]
#[command(about = "Rule checks, demo games and strategy experiments for the Hog dice game")]
struct Args {
    /// What to run
    #[arg(long, value_enum, default_value_t = Mode::Checks)]
    mode: Mode,

    /// Rule scenarios to check (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all rule scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated, decimal or 0x-hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Games simulated per seat orientation in experiments
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: u32,

    /// JSON file overriding the goal and dice cap
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Results of whichever mode ran.
#[derive(Debug)]
enum RunOutcome {
    Checks(Vec<ScenarioResult>),
    Games(Vec<GameRecord>),
    Experiments(Vec<SeedRun>),
}

impl RunOutcome {
    fn has_failures(&self) -> bool {
        match self {
            Self::Checks(results) => results.iter().any(|r| !r.passed),
            Self::Games(_) | Self::Experiments(_) => false,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let rules = load_rules(args.rules.as_deref())?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let outcome = run_mode(&args, &rules, &seeds)?;

    write_reports(&args, &outcome, start_time)?;

    if outcome.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for name in scenario_names() {
        writeln!(output_target.writer(), "  {name}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🐷 Hog Tester".bright_cyan().bold());
    println!("{}", "=============".cyan());
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules from {}", path.display()))?;
    let rules = RuleSet::from_json(&raw)
        .with_context(|| format!("failed to parse rules in {}", path.display()))?;
    rules
        .validate()
        .with_context(|| format!("invalid rules in {}", path.display()))?;
    Ok(rules)
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        return Vec::new();
    }
    scenarios
}

fn run_mode(args: &Args, rules: &RuleSet, seeds: &[u64]) -> Result<RunOutcome> {
    match args.mode {
        Mode::Checks => {
            println!("{}", "🧠 Running Rule Checks".bright_yellow().bold());
            println!("{}", "-".repeat(30).yellow());
            let runner = CheckRunner::new(args.verbose);
            Ok(RunOutcome::Checks(
                runner.run(&expand_scenarios(&args.scenarios)),
            ))
        }
        Mode::Basic => {
            let mut commentary = ConsoleCommentary::new(stdout());
            let games = play_basic(rules, seeds, &mut commentary)?;
            for game in &games {
                println!("{}", game.verdict().bright_white());
            }
            Ok(RunOutcome::Games(games))
        }
        Mode::Interactive => {
            let seed = seeds.first().copied().unwrap_or(DEFAULT_EXPERIMENT_SEED);
            Ok(RunOutcome::Games(vec![play_interactively(rules, seed)?]))
        }
        Mode::Experiments => {
            ensure!(args.samples > 0, "--samples must be at least 1");
            println!("{}", "🔬 Running Experiments".bright_yellow().bold());
            println!("{}", "-".repeat(30).yellow());
            let runner = ExperimentRunner::new(*rules, args.samples, args.verbose);
            Ok(RunOutcome::Experiments(runner.run_suite(seeds)?))
        }
        Mode::Final => {
            ensure!(args.samples > 0, "--samples must be at least 1");
            println!("{}", "🏆 Testing Final Strategy".bright_yellow().bold());
            println!("{}", "-".repeat(30).yellow());
            let runner = ExperimentRunner::new(*rules, args.samples, args.verbose);
            Ok(RunOutcome::Experiments(runner.run_final(seeds)?))
        }
    }
}

fn play_interactively(rules: &RuleSet, seed: u64) -> Result<GameRecord> {
    println!("Shall we play a game?");
    let human = InteractiveStrategy::new(stdin().lock(), stdout());
    let computer = AlwaysRoll(5);
    let mut commentary = ConsoleCommentary::new(stdout());
    let record = play_seeded(&human, &computer, rules, seed, &mut commentary)?;
    if record.winner == Player::Zero {
        println!("{}", "You win!".bright_green().bold());
    } else {
        println!("{}", "The computer won.".red());
    }
    Ok(record)
}

fn write_reports(args: &Args, outcome: &RunOutcome, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let out = output_target.writer();

    match (args.report.as_str(), outcome) {
        ("json", RunOutcome::Checks(results)) => logic::reports::generate_json_report(out, results)?,
        ("json", RunOutcome::Games(games)) => logic::reports::generate_json_report(out, games)?,
        ("json", RunOutcome::Experiments(runs)) => logic::reports::generate_json_report(out, runs)?,
        ("markdown", RunOutcome::Checks(results)) => {
            if results.is_empty() {
                writeln!(out, "# Hog Rule Check Results\n\n_No scenarios executed._")?;
            } else {
                logic::reports::generate_markdown_check_report(out, results)?;
            }
        }
        ("markdown", RunOutcome::Games(games)) => {
            logic::reports::generate_markdown_game_report(out, games)?;
        }
        ("markdown", RunOutcome::Experiments(runs)) => {
            logic::reports::generate_markdown_experiment_report(out, runs)?;
        }
        (_, RunOutcome::Checks(results)) => {
            if results.is_empty() {
                writeln!(out, "No rule scenarios executed.")?;
            } else {
                logic::reports::generate_console_check_report(out, results, start_time.elapsed())?;
            }
        }
        (_, RunOutcome::Games(games)) => logic::reports::generate_console_game_report(out, games)?,
        (_, RunOutcome::Experiments(runs)) => {
            logic::reports::generate_console_experiment_report(out, runs)?;
        }
    }

    if args.report == "console" {
        let duration = start_time.elapsed();
        writeln!(out)?;
        writeln!(out, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            mode: Mode::Checks,
            scenarios: "all".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            samples: 4,
            rules: None,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hog-tester-{}-{name}", std::process::id()))
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "pig-out".to_string(),
            passed,
            checks_run: 5,
            failures: if passed {
                Vec::new()
            } else {
                vec!["failure".to_string()]
            },
            duration: Duration::from_micros(10),
        }
    }

    #[test]
    fn expands_all_scenarios_keyword() {
        assert!(expand_scenarios("all").is_empty());
        assert!(expand_scenarios("touchdown,all").is_empty());
        assert_eq!(
            expand_scenarios("touchdown, pig-out"),
            vec!["touchdown".to_string(), "pig-out".to_string()]
        );
    }

    #[test]
    fn has_failures_only_for_failed_checks() {
        assert!(RunOutcome::Checks(vec![sample_result(false)]).has_failures());
        assert!(!RunOutcome::Checks(vec![sample_result(true)]).has_failures());
        assert!(!RunOutcome::Games(Vec::new()).has_failures());
    }

    #[test]
    fn load_rules_defaults_without_path() {
        assert_eq!(load_rules(None).unwrap(), RuleSet::default());
    }

    #[test]
    fn load_rules_reads_partial_json() {
        let path = temp_file("rules.json");
        std::fs::write(&path, r#"{ "goal": 50 }"#).unwrap();
        let rules = load_rules(Some(&path)).unwrap();
        assert_eq!(rules.goal, 50);
        assert_eq!(rules.max_dice, 10);
    }

    #[test]
    fn load_rules_rejects_invalid_values() {
        let path = temp_file("bad-rules.json");
        std::fs::write(&path, r#"{ "max_dice": 12 }"#).unwrap();
        let err = load_rules(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid rules"));
    }

    #[test]
    fn load_rules_reports_missing_file() {
        let err = load_rules(Some(Path::new("/nonexistent/hog-rules.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read rules"));
    }

    #[test]
    fn run_mode_checks_pass() {
        let outcome = run_mode(&base_args(), &RuleSet::default(), &[1]).unwrap();
        assert!(!outcome.has_failures());
    }

    #[test]
    fn run_mode_final_rejects_zero_samples() {
        let args = Args {
            mode: Mode::Final,
            samples: 0,
            ..base_args()
        };
        assert!(run_mode(&args, &RuleSet::default(), &[1]).is_err());
    }

    #[test]
    fn write_reports_emits_json_for_results() {
        let path = temp_file("report.json");
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        let outcome = RunOutcome::Checks(vec![sample_result(true)]);
        write_reports(&args, &outcome, Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["scenario_name"], "pig-out");
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let path = temp_file("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(path.clone()),
            ..base_args()
        };
        write_reports(&args, &RunOutcome::Checks(Vec::new()), Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("No scenarios executed"));
    }

    #[test]
    fn write_reports_console_appends_total_time() {
        let path = temp_file("report.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(path.clone()),
            ..base_args()
        };
        let outcome = RunOutcome::Experiments(Vec::new());
        write_reports(&args, &outcome, Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Total time"));
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let path = temp_file("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(path.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("forty-niners"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
