pub mod checks;
pub mod experiments;
pub mod games;
pub mod reports;
pub mod seeds;

pub use checks::{CheckRunner, ScenarioResult, scenario_names};
pub use experiments::{ExperimentRunner, SeedRun};
pub use games::{GameRecord, play_basic, play_seeded};
pub use seeds::resolve_seed_inputs;
