//! Regression on a dataset.

pub mod logistic;

pub use logistic::{LogisticRegression, LogisticResult};
