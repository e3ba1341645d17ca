//! Parameter ranges and on/off timing distributions.

use rand::Rng;
use rand::distributions::uniform::SampleUniform;
use rand_distr::{Distribution, Exp, LogNormal};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Inclusive bounds for a jittered integer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ParamRange<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Uniform integer draw in `[min, max]`.
    ///
    /// A degenerate or inverted range yields `min` and consumes no randomness;
    /// catalogs reject inverted ranges before anything is sampled.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistError {
    #[error("constant {0} s must be finite and >= 0")]
    BadConstant(f64),
    #[error("exponential mean {0} s must be finite and > 0")]
    BadMean(f64),
    #[error("log-normal parameters mu={mu} sigma={sigma} are not valid")]
    BadLogNormal { mu: f64, sigma: f64 },
}

/// Distribution of a single on or off period, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingDist {
    Constant { secs: f64 },
    Exponential { mean_secs: f64 },
    LogNormal { mu: f64, sigma: f64 },
}

impl TimingDist {
    pub fn validate(&self) -> Result<(), DistError> {
        match *self {
            TimingDist::Constant { secs } => {
                if secs.is_finite() && secs >= 0.0 {
                    Ok(())
                } else {
                    Err(DistError::BadConstant(secs))
                }
            }
            TimingDist::Exponential { mean_secs } => {
                if mean_secs.is_finite() && mean_secs > 0.0 {
                    Ok(())
                } else {
                    Err(DistError::BadMean(mean_secs))
                }
            }
            TimingDist::LogNormal { mu, sigma } => {
                if mu.is_finite() && LogNormal::new(mu, sigma).is_ok() {
                    Ok(())
                } else {
                    Err(DistError::BadLogNormal { mu, sigma })
                }
            }
        }
    }

    /// True when every draw is exactly zero seconds.
    pub fn is_always_zero(&self) -> bool {
        matches!(self, TimingDist::Constant { secs } if *secs == 0.0)
    }

    pub fn mean_secs(&self) -> f64 {
        match *self {
            TimingDist::Constant { secs } => secs,
            TimingDist::Exponential { mean_secs } => mean_secs,
            TimingDist::LogNormal { mu, sigma } => (mu + sigma * sigma / 2.0).exp(),
        }
    }

    /// Draw one period length in seconds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, DistError> {
        match *self {
            TimingDist::Constant { secs } => {
                self.validate()?;
                Ok(secs)
            }
            TimingDist::Exponential { mean_secs } => {
                self.validate()?;
                let exp = Exp::new(mean_secs.recip()).map_err(|_| DistError::BadMean(mean_secs))?;
                Ok(exp.sample(rng))
            }
            TimingDist::LogNormal { mu, sigma } => {
                self.validate()?;
                let ln =
                    LogNormal::new(mu, sigma).map_err(|_| DistError::BadLogNormal { mu, sigma })?;
                Ok(ln.sample(rng))
            }
        }
    }
}

impl fmt::Display for TimingDist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingDist::Constant { secs } => write!(f, "constant({secs}s)"),
            TimingDist::Exponential { mean_secs } => write!(f, "exponential(mean={mean_secs}s)"),
            TimingDist::LogNormal { mu, sigma } => write!(f, "lognormal(mu={mu}, sigma={sigma})"),
        }
    }
}
