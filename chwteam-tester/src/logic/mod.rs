pub mod invariants;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use policy::DraftStrategy;
pub use seeds::resolve_seed_inputs;
pub use simulation::{DraftAggregate, DraftRecord, SweepPlan, aggregate_records, run_sweep};
