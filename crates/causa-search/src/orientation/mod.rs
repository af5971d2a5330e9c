//! Pairwise orientation of an initial skeleton from non-Gaussianity.

pub mod lofs;
pub mod rules;

pub use lofs::Lofs;
pub use rules::Rule;
