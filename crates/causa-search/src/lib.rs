//! Causa search engine.
//!
//! Independence tests feed the Fast Adjacency Search, whose skeleton the
//! pairwise orientation rules direct. Random DAGs and linear SEM
//! simulation supply ground truth, and [`batch::run_trials`] scores
//! algorithms against it.

pub mod algorithm;
pub mod batch;
pub mod comparison;
pub mod fas;
pub mod generator;
pub mod independence;
pub mod orientation;
pub mod regression;
pub mod simulation;
pub mod stats;

pub use algorithm::{execute, Algorithm, AlgorithmRegistry, HasKnowledge, TakesInitialGraph};
pub use batch::{run_configured, run_trials, BatchSummary, TrialResult};
pub use comparison::{compare, GraphComparison};
pub use fas::{Fas, FasOutput};
pub use generator::{ErdosRenyiGibson, RandomGraph};
pub use independence::{IndependenceTest, IndependenceWrapper, TestResult};
pub use orientation::{Lofs, Rule};
pub use regression::{LogisticRegression, LogisticResult};
pub use simulation::{LinearSem, Noise};
