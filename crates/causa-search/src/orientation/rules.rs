//! Pairwise direction scores on standardized columns.
//!
//! A positive score favors `x --> y`, a negative one `y --> x`.

use std::fmt;
use std::str::FromStr;

use causa_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

use crate::stats::negentropy::log_cosh;
use crate::stats::{correlation, mean, negentropy, skewness, standardize};

/// Non-Gaussianity rule used to orient one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Likelihood ratio from the negentropy approximation.
    R4,
    Skew,
    /// Skew with a robust nonlinearity.
    RSkew,
    Tanh,
}

impl Rule {
    pub const ALL: [Rule; 4] = [Rule::R4, Rule::Skew, Rule::RSkew, Rule::Tanh];

    pub fn id(self) -> &'static str {
        match self {
            Self::R4 => "r4",
            Self::Skew => "skew",
            Self::RSkew => "rskew",
            Self::Tanh => "tanh",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::R4 => "R4",
            Self::Skew => "Skew",
            Self::RSkew => "RSkew",
            Self::Tanh => "Tanh",
        }
    }

    /// Direction score for the pair. Inputs need not be standardized.
    pub fn score(self, x: &[f64], y: &[f64]) -> f64 {
        let x = standardize(x);
        let y = standardize(y);
        match self {
            Self::R4 => r4(&x, &y),
            Self::Skew => {
                let (x, y) = (skew_corrected(x), skew_corrected(y));
                correlation(&x, &y) * mean_of(&x, &y, |a, b| a * a * b - a * b * b)
            }
            Self::RSkew => {
                let (x, y) = (skew_corrected(x), skew_corrected(y));
                let g = |u: f64| log_cosh(u.max(0.0));
                correlation(&x, &y) * mean_of(&x, &y, |a, b| g(a) * b - a * g(b))
            }
            Self::Tanh => {
                correlation(&x, &y) * mean_of(&x, &y, |a, b| a * b.tanh() - a.tanh() * b)
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .into_iter()
            .find(|r| r.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownRule { name: s.to_string() })
    }
}

/// `J(x) + J(r_y|x) - J(y) - J(r_x|y)` on standardized `x`, `y`.
fn r4(x: &[f64], y: &[f64]) -> f64 {
    let rho = correlation(x, y);
    let ry: Vec<f64> = x.iter().zip(y).map(|(a, b)| b - rho * a).collect();
    let rx: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - rho * b).collect();
    negentropy(x) + negentropy(&standardize(&ry)) - negentropy(y) - negentropy(&standardize(&rx))
}

/// Flip the sign so the variable has non-negative skewness.
fn skew_corrected(mut u: Vec<f64>) -> Vec<f64> {
    if skewness(&u) < 0.0 {
        u.iter_mut().for_each(|v| *v = -*v);
    }
    u
}

fn mean_of(x: &[f64], y: &[f64], f: impl Fn(f64, f64) -> f64) -> f64 {
    let terms: Vec<f64> = x.iter().zip(y).map(|(&a, &b)| f(a, b)).collect();
    mean(&terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rand_distr::{Distribution, Exp};

    fn skewed_pair(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let e = Exp::new(1.0).unwrap();
        let x: Vec<f64> = (0..n).map(|_| e.sample(&mut rng)).collect();
        let y: Vec<f64> = x.iter().map(|v| 0.8 * v + e.sample(&mut rng)).collect();
        (x, y)
    }

    #[test]
    fn test_rule_ids_round_trip() {
        for rule in Rule::ALL {
            assert_eq!(rule.id().parse::<Rule>().unwrap(), rule);
        }
        assert_eq!("R4".parse::<Rule>().unwrap(), Rule::R4);
        assert!(matches!("lingam".parse::<Rule>(), Err(ConfigError::UnknownRule { .. })));
    }

    #[test]
    fn test_scores_are_antisymmetric() {
        let (x, y) = skewed_pair(3, 500);
        for rule in Rule::ALL {
            let forward = rule.score(&x, &y);
            let backward = rule.score(&y, &x);
            assert!((forward + backward).abs() < 1e-9, "{rule}: {forward} vs {backward}");
        }
    }

    #[test]
    fn test_skewed_causes_are_oriented_forward() {
        let (x, y) = skewed_pair(5, 3000);
        assert!(Rule::R4.score(&x, &y) > 0.0);
        assert!(Rule::Skew.score(&x, &y) > 0.0);
        assert!(Rule::RSkew.score(&x, &y) > 0.0);
    }
}
