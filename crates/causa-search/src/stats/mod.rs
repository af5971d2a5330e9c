//! Numeric kernels shared by the tests, orientation rules and regression.

pub mod covariance;
pub mod moments;
pub mod negentropy;

pub use covariance::{covariance_matrix, partial_correlation};
pub use moments::{correlation, mean, skewness, standardize};
pub use negentropy::negentropy;
