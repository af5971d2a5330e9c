//! Synthetic data from linear structural equation models.

pub mod linear_sem;
pub mod noise;

pub use linear_sem::LinearSem;
pub use noise::Noise;
