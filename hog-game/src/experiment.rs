//! Monte Carlo experiments: averaging, head-to-head win rates and parameter
//! sweeps against a baseline strategy.
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXPERIMENT_SEED, DEFAULT_SAMPLES, DEFAULT_STRATEGY_ROLLS};
use crate::dice::SeededDice;
use crate::error::{HogError, HogResult};
use crate::game::play;
use crate::numbers::{u32_to_f64, u32_to_usize, usize_to_u32};
use crate::rules::RuleSet;
use crate::strategy::{AlwaysRoll, Strategy, StrategyKind};

/// Mean of `num_samples` calls to `sample`.
///
/// # Errors
///
/// Returns [`HogError::InvalidSampleCount`] when `num_samples` is zero.
pub fn estimate_average<F, T>(mut sample: F, num_samples: u32) -> HogResult<f64>
where
    F: FnMut() -> T,
    T: Into<f64>,
{
    try_estimate_average(|| Ok(sample()), num_samples)
}

/// [`estimate_average`] over a fallible sampler; the first error aborts.
///
/// # Errors
///
/// Returns [`HogError::InvalidSampleCount`] when `num_samples` is zero, or the
/// sampler's first error.
pub fn try_estimate_average<F, T>(mut sample: F, num_samples: u32) -> HogResult<f64>
where
    F: FnMut() -> HogResult<T>,
    T: Into<f64>,
{
    if num_samples == 0 {
        return Err(HogError::InvalidSampleCount);
    }
    let mut total = 0.0_f64;
    for _ in 0..num_samples {
        total += sample()?.into();
    }
    let mean = total / u32_to_f64(num_samples);
    log::debug!("estimated {mean:.4} over {num_samples} samples");
    Ok(mean)
}

/// Pick the parameter in `lower..=upper` with the strictly highest score.
/// Ties keep the lowest parameter.
///
/// # Errors
///
/// Returns [`HogError::InvalidRange`] when `lower > upper`, or the evaluator's
/// first error.
pub fn sweep_by<F>(lower: u32, upper: u32, mut evaluate: F) -> HogResult<SweepOutcome>
where
    F: FnMut(u32) -> HogResult<f64>,
{
    if lower > upper {
        return Err(HogError::InvalidRange { lower, upper });
    }

    let mut trials = Vec::with_capacity(u32_to_usize(upper - lower + 1));
    let mut best: Option<(u32, f64)> = None;
    for value in lower..=upper {
        let win_rate = evaluate(value)?;
        log::info!("Win rate against the baseline using {value} value: {win_rate:.3}");
        trials.push(SweepTrial { value, win_rate });
        if best.is_none_or(|(_, best_rate)| win_rate > best_rate) {
            best = Some((value, win_rate));
        }
    }

    let (best_value, best_win_rate) = best.unwrap_or((lower, 0.0));
    Ok(SweepOutcome {
        best_value,
        best_win_rate,
        trials,
    })
}

/// Settings shared by every experiment in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Games simulated per seat orientation.
    #[serde(default = "ExperimentConfig::default_samples")]
    pub samples: u32,
    #[serde(default = "ExperimentConfig::default_seed")]
    pub seed: u64,
}

impl ExperimentConfig {
    const fn default_samples() -> u32 {
        DEFAULT_SAMPLES
    }

    const fn default_seed() -> u64 {
        DEFAULT_EXPERIMENT_SEED
    }

    #[must_use]
    pub const fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            samples: Self::default_samples(),
            seed: Self::default_seed(),
        }
    }
}

/// Win rate observed for one parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepTrial {
    pub value: u32,
    pub win_rate: f64,
}

/// Result of sweeping a strategy parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub best_value: u32,
    pub best_win_rate: f64,
    pub trials: Vec<SweepTrial>,
}

/// One entry of the standard experiment suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub strategy: StrategyKind,
    pub seed: u64,
    pub samples: u32,
    /// Best swept parameter, absent for strategies without one.
    pub best_value: Option<u32>,
    pub win_rate: f64,
    pub trials: Vec<SweepTrial>,
}

/// Seeded experiment runner. Every simulated game draws a fresh dice seed from
/// the runner's stream, so a run is reproducible from its seed.
#[derive(Debug, Clone)]
pub struct Experiment {
    rules: RuleSet,
    config: ExperimentConfig,
    rng: ChaCha20Rng,
}

impl Experiment {
    /// # Errors
    ///
    /// Returns [`HogError::InvalidRules`] for an invalid rule set and
    /// [`HogError::InvalidSampleCount`] when no samples are requested.
    pub fn new(rules: RuleSet, config: ExperimentConfig) -> HogResult<Self> {
        rules.validate()?;
        if config.samples == 0 {
            return Err(HogError::InvalidSampleCount);
        }
        Ok(Self {
            rules,
            config,
            rng: ChaCha20Rng::seed_from_u64(config.seed),
        })
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Fraction of games won by `strategy0`'s opponent, i.e. the mean winner
    /// index.
    ///
    /// # Errors
    ///
    /// Propagates simulation errors.
    pub fn second_player_win_rate(
        &mut self,
        strategy0: &dyn Strategy,
        strategy1: &dyn Strategy,
    ) -> HogResult<f64> {
        let rules = self.rules;
        let rng = &mut self.rng;
        try_estimate_average(
            || {
                let mut dice = SeededDice::seeded(rng.next_u64());
                let outcome = play(strategy0, strategy1, &mut dice, &rules)?;
                Ok(usize_to_u32(outcome.winner.index()))
            },
            self.config.samples,
        )
    }

    /// Win rate of `strategy` against `baseline`, averaged over both seat
    /// orientations to cancel the first-player advantage.
    ///
    /// # Errors
    ///
    /// Propagates simulation errors.
    pub fn compare_strategies(
        &mut self,
        strategy: &dyn Strategy,
        baseline: &dyn Strategy,
    ) -> HogResult<f64> {
        let as_first = 1.0 - self.second_player_win_rate(strategy, baseline)?;
        let as_second = self.second_player_win_rate(baseline, strategy)?;
        let win_rate = (as_first + as_second) / 2.0;
        log::debug!(
            "{} vs {}: first {as_first:.3} second {as_second:.3}",
            strategy.label(),
            baseline.label()
        );
        Ok(win_rate)
    }

    /// Best parameter for `make_strategy` in `lower..=upper` against
    /// `baseline`.
    ///
    /// # Errors
    ///
    /// Returns [`HogError::InvalidRange`] when `lower > upper`, or a
    /// simulation error.
    pub fn sweep_parameter<F, S>(
        &mut self,
        mut make_strategy: F,
        lower: u32,
        upper: u32,
        baseline: &dyn Strategy,
    ) -> HogResult<SweepOutcome>
    where
        F: FnMut(u32) -> S,
        S: Strategy,
    {
        sweep_by(lower, upper, |value| {
            let strategy = make_strategy(value);
            self.compare_strategies(&strategy, baseline)
        })
    }

    /// Sweep every parameterised family and measure the composite strategy,
    /// all against always rolling five.
    ///
    /// # Errors
    ///
    /// Propagates simulation errors.
    pub fn run_standard_experiments(&mut self) -> HogResult<Vec<ExperimentRecord>> {
        let baseline = AlwaysRoll(DEFAULT_STRATEGY_ROLLS);
        let rules = self.rules;
        let mut records = Vec::with_capacity(StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            let record = if let Some((lower, upper)) = kind.sweep_range() {
                let sweep = self.sweep_parameter(
                    |value| kind.build(value, &rules),
                    lower,
                    upper,
                    &baseline,
                )?;
                log::info!("Best {kind} strategy: {}", sweep.best_value);
                ExperimentRecord {
                    strategy: kind,
                    seed: self.config.seed,
                    samples: self.config.samples,
                    best_value: Some(sweep.best_value),
                    win_rate: sweep.best_win_rate,
                    trials: sweep.trials,
                }
            } else {
                let strategy = kind.build(0, &rules);
                let win_rate = self.compare_strategies(&strategy, &baseline)?;
                log::info!("{kind} strategy win rate: {win_rate:.3}");
                ExperimentRecord {
                    strategy: kind,
                    seed: self.config.seed,
                    samples: self.config.samples,
                    best_value: None,
                    win_rate,
                    trials: Vec::new(),
                }
            };
            records.push(record);
        }
        Ok(records)
    }
}
