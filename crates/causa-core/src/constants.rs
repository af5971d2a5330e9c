/// Causa version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Depth value meaning "no bound on conditioning-set size".
pub const UNBOUNDED_DEPTH: i64 = -1;

/// Default significance level for independence tests.
pub const DEFAULT_ALPHA: f64 = 0.01;

/// Default cap on node degree, in-degree and out-degree for random graphs.
pub const DEFAULT_MAX_DEGREE: i64 = 100;

/// Default fraction of the requested edge count a random graph may miss.
pub const DEFAULT_EDGE_TOLERANCE: f64 = 0.1;

/// Default number of rows per simulated dataset.
pub const DEFAULT_SAMPLE_SIZE: i64 = 1000;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "CAUSA_LOG";
