//! Error-term distributions for simulated data.

use causa_core::config::SimulationConfig;
use causa_core::errors::{ConfigError, StatisticsError};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Exp, Normal, Uniform};

/// Zero-mean error distribution.
#[derive(Debug, Clone, Copy)]
pub enum Noise {
    Gaussian(Normal<f64>),
    Uniform(Uniform<f64>),
    /// Exponential shifted to mean zero.
    Exponential { dist: Exp<f64>, mean: f64 },
    /// Exponential magnitude with a random sign.
    Laplace(Exp<f64>),
}

impl Noise {
    pub fn gaussian(sd: f64) -> Result<Self, StatisticsError> {
        Normal::new(0.0, sd)
            .map(Noise::Gaussian)
            .map_err(|e| invalid(format!("gaussian sd {sd}: {e}")))
    }

    /// Uniform on `[-half_width, half_width)`.
    pub fn uniform(half_width: f64) -> Result<Self, StatisticsError> {
        if !(half_width > 0.0 && half_width.is_finite()) {
            return Err(invalid(format!("uniform half width {half_width} must be positive")));
        }
        Ok(Noise::Uniform(Uniform::new(-half_width, half_width)))
    }

    pub fn exponential(mean: f64) -> Result<Self, StatisticsError> {
        if !(mean > 0.0 && mean.is_finite()) {
            return Err(invalid(format!("exponential mean {mean} must be positive")));
        }
        Exp::new(1.0 / mean)
            .map(|dist| Noise::Exponential { dist, mean })
            .map_err(|e| invalid(format!("exponential mean {mean}: {e}")))
    }

    pub fn laplace(scale: f64) -> Result<Self, StatisticsError> {
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(invalid(format!("laplace scale {scale} must be positive")));
        }
        Exp::new(1.0 / scale)
            .map(Noise::Laplace)
            .map_err(|e| invalid(format!("laplace scale {scale}: {e}")))
    }

    /// Unit-scale noise named by `simulation.noise`, Gaussian when unset.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::from_name(config.effective_noise())
    }

    /// Unit-scale noise by config name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let noise = match name {
            "gaussian" => Self::gaussian(1.0),
            "uniform" => Self::uniform(1.0),
            "exponential" => Self::exponential(1.0),
            "laplace" => Self::laplace(1.0),
            other => {
                return Err(ConfigError::ValidationFailed {
                    field: "simulation.noise".to_string(),
                    message: format!("unknown noise {other}"),
                })
            }
        };
        noise.map_err(|e| ConfigError::ValidationFailed {
            field: "simulation.noise".to_string(),
            message: e.to_string(),
        })
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        match self {
            Noise::Gaussian(d) => d.sample(rng),
            Noise::Uniform(d) => d.sample(rng),
            Noise::Exponential { dist, mean } => dist.sample(rng) - mean,
            Noise::Laplace(d) => {
                let magnitude = d.sample(rng);
                if rng.gen_bool(0.5) {
                    magnitude
                } else {
                    -magnitude
                }
            }
        }
    }

    pub fn is_gaussian(&self) -> bool {
        matches!(self, Noise::Gaussian(_))
    }
}

fn invalid(reason: String) -> StatisticsError {
    StatisticsError::InvalidDistribution { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{mean, skewness};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn draw(noise: Noise, n: usize) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        (0..n).map(|_| noise.sample(&mut rng)).collect()
    }

    #[test]
    fn test_all_named_noises_are_centered() {
        for name in ["gaussian", "uniform", "exponential", "laplace"] {
            let values = draw(Noise::from_name(name).unwrap(), 20_000);
            assert!(mean(&values).abs() < 0.05, "{name} mean {}", mean(&values));
        }
    }

    #[test]
    fn test_exponential_is_skewed() {
        let values = draw(Noise::exponential(1.0).unwrap(), 20_000);
        assert!(skewness(&values) > 1.0);
    }

    #[test]
    fn test_from_config() {
        assert!(Noise::from_config(&SimulationConfig::default()).unwrap().is_gaussian());
        let config = SimulationConfig {
            noise: Some("exponential".to_string()),
            ..Default::default()
        };
        let noise = Noise::from_config(&config).unwrap();
        assert!(matches!(noise, Noise::Exponential { .. }));
        assert!(skewness(&draw(noise, 20_000)) > 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Noise::gaussian(-1.0).is_err());
        assert!(Noise::uniform(0.0).is_err());
        assert!(Noise::exponential(f64::NAN).is_err());
        assert!(Noise::from_name("cauchy").is_err());
    }
}
