//! Next-cycle forecasting for period trackers.
//!
//! Feed [`predict_next_cycle`] the logged periods (in any order, malformed
//! entries included) and it returns the next predicted period, ovulation and
//! PMS onset, or `None` when fewer than two usable logs remain.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod prediction;
pub mod stats;
pub mod validation;

pub use config::{ConfigError, PredictorConfig};
pub use error::ForecastError;
pub use models::{
    CycleDay, CyclePhase, CyclePrediction, CycleStats, FertilityWindow, NormalizedLog, PeriodLog,
};
pub use prediction::{cycle_day, fertility_window_for, predict_next_cycle, CyclePredictor};
pub use validation::{LogOutcome, Rejection};
