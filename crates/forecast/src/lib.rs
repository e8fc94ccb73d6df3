//! Numeric Forecasting
//!
//! Everything here is synthetic: observation series are sampled from
//! seasonal distributions and forecasts are random perturbations of the
//! current reading. Every generator can be seeded for reproducible runs.

mod collector;
mod horizon;
mod indices;
mod numerical;
mod uncertainty;

pub use collector::SyntheticCollector;
pub use horizon::{Horizon, TimeStep};
pub use indices::{beaufort_level, sample_condition};
pub use numerical::{ForecastBaseline, NumericalForecaster};
pub use uncertainty::Uncertainty;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Forecast errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Unknown forecast horizon: {0}")]
    UnknownHorizon(String),
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
