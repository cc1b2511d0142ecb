//! Use cases
//!
//! | Use case | Rounds | Ranking | Between rounds |
//! |----------|--------|---------|----------------|
//! | [`run_stage`] | up to budget | critic scores | feedback to losers |
//! | [`run_peer_evolution`] | until utility plateau | critic scores with peer context | evolve from top peers |
//! | [`run_baseline`] | one | naive: critic scores / isolated: none | none |
//! | [`run_pipeline`] | one stage per role | as `run_stage` | winner becomes next task |
//! | [`run_experiment`] | pipelines over many tasks | as `run_pipeline` | metrics over all stages |

pub mod run_baseline;
pub mod run_experiment;
pub mod run_peer_evolution;
pub mod run_pipeline;
pub mod run_stage;
pub mod shared;
