//! Hyvärinen's negentropy approximation for standardized variables.

const K1: f64 = 79.047;
const K2: f64 = 7.4129;
const GAMMA: f64 = 0.37457;

/// `J(u) = k1 (E[log cosh u] - γ)² + k2 (E[u exp(-u²/2)])²`.
///
/// Near zero for Gaussian `u`, positive otherwise. Expects `u` standardized.
pub fn negentropy(u: &[f64]) -> f64 {
    if u.is_empty() {
        return 0.0;
    }
    let n = u.len() as f64;
    let log_cosh = u.iter().map(|&v| log_cosh(v)).sum::<f64>() / n;
    let gauss = u.iter().map(|&v| v * (-v * v / 2.0).exp()).sum::<f64>() / n;
    K1 * (log_cosh - GAMMA).powi(2) + K2 * gauss.powi(2)
}

/// Overflow-free `ln(cosh(v))`.
pub(crate) fn log_cosh(v: f64) -> f64 {
    let a = v.abs();
    a + (-2.0 * a).exp().ln_1p() - std::f64::consts::LN_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::standardize;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rand_distr::{Distribution, Exp, StandardNormal};

    #[test]
    fn test_log_cosh_matches_direct_form() {
        for v in [-3.0, -0.5, 0.0, 0.7, 5.0] {
            assert!((log_cosh(v) - f64::cosh(v).ln()).abs() < 1e-12);
        }
        assert!(log_cosh(1000.0).is_finite());
    }

    #[test]
    fn test_gaussian_is_near_zero_exponential_is_not() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let gauss: Vec<f64> = (0..20_000).map(|_| StandardNormal.sample(&mut rng)).collect();
        let exp_dist = Exp::new(1.0).unwrap();
        let skewed: Vec<f64> = (0..20_000).map(|_| exp_dist.sample(&mut rng)).collect();

        let jg = negentropy(&standardize(&gauss));
        let je = negentropy(&standardize(&skewed));
        assert!(jg < 0.01, "gaussian negentropy {jg}");
        assert!(je > 10.0 * jg.max(1e-4), "exponential negentropy {je}");
    }
}
