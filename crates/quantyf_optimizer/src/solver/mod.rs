pub mod capacity_ledger;
pub mod decider;
pub mod formulation;
pub mod network_optimizer;
pub mod optimizer_params;
pub mod solution;
pub mod termination;
