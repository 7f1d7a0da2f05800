pub mod autopilot;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use policy::Strategy;
pub use seeds::{resolve_seed_inputs, split_csv};
pub use simulation::{RunOptions, RunRecord, StrategySummary, run_batch, summarize};
