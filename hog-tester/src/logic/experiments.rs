use anyhow::{Context, Result};
use colored::Colorize;
use hog_game::{
    AlwaysRoll, Experiment, ExperimentConfig, ExperimentRecord, FinalStrategy, RuleSet,
    StrategyKind,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Baseline every strategy is measured against.
const BASELINE_ROLLS: u32 = 5;

/// Experiment results for a single seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRun {
    pub seed: u64,
    pub samples: u32,
    pub records: Vec<ExperimentRecord>,
    #[serde(with = "crate::util::duration_serde")]
    pub duration: Duration,
}

pub struct ExperimentRunner {
    rules: RuleSet,
    samples: u32,
    verbose: bool,
}

impl ExperimentRunner {
    pub const fn new(rules: RuleSet, samples: u32, verbose: bool) -> Self {
        Self {
            rules,
            samples,
            verbose,
        }
    }

    fn experiment(&self, seed: u64) -> Result<Experiment> {
        let config = ExperimentConfig::default()
            .with_samples(self.samples)
            .with_seed(seed);
        Experiment::new(self.rules, config)
            .with_context(|| format!("failed to configure experiment for seed {seed}"))
    }

    /// Sweep every strategy family for each seed.
    pub fn run_suite(&self, seeds: &[u64]) -> Result<Vec<SeedRun>> {
        seeds
            .iter()
            .map(|&seed| {
                self.announce("experiment suite", seed);
                let start = Instant::now();
                let records = self
                    .experiment(seed)?
                    .run_standard_experiments()
                    .with_context(|| format!("experiment suite failed for seed {seed}"))?;
                Ok(SeedRun {
                    seed,
                    samples: self.samples,
                    records,
                    duration: start.elapsed(),
                })
            })
            .collect()
    }

    /// Win rate of the composite strategy against the baseline for each seed.
    pub fn run_final(&self, seeds: &[u64]) -> Result<Vec<SeedRun>> {
        let strategy = FinalStrategy::new(&self.rules);
        let baseline = AlwaysRoll(BASELINE_ROLLS);
        seeds
            .iter()
            .map(|&seed| {
                self.announce("final strategy", seed);
                let start = Instant::now();
                let win_rate = self
                    .experiment(seed)?
                    .compare_strategies(&strategy, &baseline)
                    .with_context(|| format!("final strategy comparison failed for seed {seed}"))?;
                log::info!("seed {seed}: final strategy win rate {win_rate:.3}");
                Ok(SeedRun {
                    seed,
                    samples: self.samples,
                    records: vec![ExperimentRecord {
                        strategy: StrategyKind::Final,
                        seed,
                        samples: self.samples,
                        best_value: None,
                        win_rate,
                        trials: Vec::new(),
                    }],
                    duration: start.elapsed(),
                })
            })
            .collect()
    }

    fn announce(&self, what: &str, seed: u64) {
        if self.verbose {
            println!(
                "🐷 Running {} (seed {}, {} samples)",
                what.bright_white(),
                seed,
                self.samples
            );
        }
    }
}
