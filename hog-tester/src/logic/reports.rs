use anyhow::Result;
use colored::Colorize;
use hog_game::numbers::usize_to_f64;
use std::io::Write;
use std::time::Duration;

use super::{GameRecord, ScenarioResult, SeedRun};

fn pass_rate(results: &[ScenarioResult]) -> f64 {
    let total = results.len();
    if total == 0 {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    usize_to_f64(passed) / usize_to_f64(total) * 100.0
}

pub fn generate_console_check_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Rule Check Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", pass_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(out, "   Checks: {}", result.checks_run)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }
    Ok(())
}

pub fn generate_markdown_check_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
) -> Result<()> {
    writeln!(out, "# Hog Rule Check Results\n")?;
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {}", results.len())?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", results.len() - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", pass_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {}\n", result.scenario_name)?;
        writeln!(out, "- **Checks**: {}", result.checks_run)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_console_game_report(out: &mut dyn Write, games: &[GameRecord]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🎲 Game Results".bright_cyan().bold())?;
    writeln!(out, "{}", "===============".cyan())?;
    for game in games {
        writeln!(
            out,
            "seed {}: {} ({} to {} in {} turns)",
            game.seed,
            game.verdict().green(),
            game.scores[game.winner.index()],
            game.scores[game.winner.other().index()],
            game.turns
        )?;
    }
    Ok(())
}

pub fn generate_markdown_game_report(out: &mut dyn Write, games: &[GameRecord]) -> Result<()> {
    writeln!(out, "# Hog Game Results\n")?;
    writeln!(out, "| Seed | Player 0 | Player 1 | Winner | Score | Turns |")?;
    writeln!(out, "|---:|---|---|---|---|---:|")?;
    for game in games {
        writeln!(
            out,
            "| {} | {} | {} | {} | {}-{} | {} |",
            game.seed,
            game.players[0],
            game.players[1],
            game.winner,
            game.scores[0],
            game.scores[1],
            game.turns
        )?;
    }
    Ok(())
}

pub fn generate_console_experiment_report(out: &mut dyn Write, runs: &[SeedRun]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🐷 Strategy Experiments".bright_cyan().bold())?;
    writeln!(out, "{}", "=======================".cyan())?;
    for run in runs {
        writeln!(
            out,
            "{} (samples {}, {:?})",
            format!("Seed {}", run.seed).bold(),
            run.samples,
            run.duration
        )?;
        for record in &run.records {
            let best = record
                .best_value
                .map_or_else(String::new, |value| format!(" best {value}"));
            writeln!(
                out,
                "   {:<12}{best} win rate {}",
                record.strategy.label(),
                format!("{:.3}", record.win_rate).green()
            )?;
            for trial in &record.trials {
                writeln!(out, "      {:>3}: {:.3}", trial.value, trial.win_rate)?;
            }
        }
    }
    Ok(())
}

pub fn generate_markdown_experiment_report(out: &mut dyn Write, runs: &[SeedRun]) -> Result<()> {
    writeln!(out, "# Hog Strategy Experiments\n")?;
    writeln!(out, "| Seed | Samples | Strategy | Best value | Win rate |")?;
    writeln!(out, "|---:|---:|---|---:|---:|")?;
    for run in runs {
        for record in &run.records {
            let best = record
                .best_value
                .map_or_else(|| "-".to_string(), |value| value.to_string());
            writeln!(
                out,
                "| {} | {} | {} | {best} | {:.3} |",
                run.seed,
                run.samples,
                record.strategy.label(),
                record.win_rate
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report<T: serde::Serialize + ?Sized>(
    out: &mut dyn Write,
    value: &T,
) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hog_game::{ExperimentRecord, Player, StrategyKind, SweepTrial};

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "touchdown".to_string(),
            passed,
            checks_run: 3,
            failures: if passed {
                Vec::new()
            } else {
                vec!["Six touches down to 7: expected 7 got 6".to_string()]
            },
            duration: Duration::from_micros(40),
        }
    }

    fn sample_run() -> SeedRun {
        SeedRun {
            seed: 7,
            samples: 10,
            records: vec![ExperimentRecord {
                strategy: StrategyKind::AlwaysRoll,
                seed: 7,
                samples: 10,
                best_value: Some(6),
                win_rate: 0.525,
                trials: vec![SweepTrial {
                    value: 6,
                    win_rate: 0.525,
                }],
            }],
            duration: Duration::from_millis(3),
        }
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn pass_rate_handles_empty_and_mixed() {
        assert!(pass_rate(&[]).abs() < f64::EPSILON);
        let rate = pass_rate(&[sample_result(true), sample_result(false)]);
        assert!((rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn markdown_check_report_lists_failures() {
        let text = render(|out| generate_markdown_check_report(out, &[sample_result(false)]));
        assert!(text.contains("# Hog Rule Check Results"));
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("expected 7 got 6"));
    }

    #[test]
    fn console_check_report_counts_passes() {
        colored::control::set_override(false);
        let text = render(|out| {
            generate_console_check_report(out, &[sample_result(true)], Duration::from_millis(1))
        });
        assert!(text.contains("Total scenarios: 1"));
        assert!(text.contains("PASS touchdown"));
    }

    #[test]
    fn experiment_reports_include_win_rates() {
        let markdown = render(|out| generate_markdown_experiment_report(out, &[sample_run()]));
        assert!(markdown.contains("| 7 | 10 | always-roll | 6 | 0.525 |"));
        let json = render(|out| generate_json_report(out, &[sample_run()]));
        assert!(json.contains("\"strategy\": \"always-roll\""));
        assert!(json.contains("\"best_value\": 6"));
    }

    #[test]
    fn game_reports_name_the_winner() {
        let game = GameRecord {
            seed: 3,
            players: ["always_roll(5)".to_string(), "always_roll(6)".to_string()],
            winner: Player::Zero,
            scores: [104, 77],
            turns: 31,
        };
        let markdown = render(|out| generate_markdown_game_report(out, std::slice::from_ref(&game)));
        assert!(markdown.contains("| 3 | always_roll(5) | always_roll(6) | Player 0 | 104-77 | 31 |"));
        colored::control::set_override(false);
        let console = render(|out| generate_console_game_report(out, &[game]));
        assert!(console.contains("104 to 77 in 31 turns"));
    }
}
