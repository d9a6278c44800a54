use chrono::{NaiveDate, TimeDelta};

use crate::config::{ConfigError, PredictorConfig};
use crate::models::{
    CycleDay, CyclePhase, CyclePrediction, CycleStats, FertilityWindow, NormalizedLog, PeriodLog,
};
use crate::stats;
use crate::validation::{self, days_between};

/// Forecasts the next cycle from a history of period logs.
/// Holds only its settings; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct CyclePredictor {
    config: PredictorConfig,
}

impl CyclePredictor {
    pub fn new(config: PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Predict the next period, ovulation and PMS onset.
    /// Requires at least 2 valid logs; invalid logs are dropped, never fatal.
    pub fn predict(&self, logs: &[PeriodLog]) -> Option<CyclePrediction> {
        if logs.len() < 2 {
            return None;
        }

        let sorted = validation::normalize_all(logs);
        if sorted.len() < 2 {
            log::debug!(
                "only {} of {} period logs usable, no prediction",
                sorted.len(),
                logs.len()
            );
            return None;
        }

        let cfg = &self.config;
        let gaps = cycle_gaps(&sorted);
        let cleaned_gaps = stats::remove_outliers(&gaps, cfg.outlier_threshold_days);
        let durations: Vec<f64> = sorted.iter().map(|l| l.duration).collect();
        let cleaned_durations = stats::remove_outliers(&durations, cfg.outlier_threshold_days);

        let avg_cycle =
            rounded_weighted_average(&cleaned_gaps, cfg.default_cycle_length_days, "cycle length");
        let avg_duration = rounded_weighted_average(
            &cleaned_durations,
            cfg.default_period_duration_days,
            "period duration",
        );

        let last_start = sorted.last()?.start_date();
        let predicted_start = shift(last_start, avg_cycle);
        let predicted_end = predicted_start.and_then(|d| shift(d, avg_duration));
        let predicted_ovulation = predicted_start.and_then(|d| shift(d, cfg.luteal_phase_days.checked_neg()?));
        let predicted_pms_start = predicted_start.and_then(|d| shift(d, cfg.pms_offset_days.checked_neg()?));

        // An empty cleaned gap sample has no spread: report 0, never irregular.
        let std_dev = stats::std_deviation_around(&cleaned_gaps, avg_cycle as f64).unwrap_or(0.0);

        log::trace!(
            "avg cycle {avg_cycle}d, avg period {avg_duration}d, std dev {std_dev:.2}d over {} gaps",
            cleaned_gaps.len()
        );

        Some(CyclePrediction {
            average_cycle_length: avg_cycle,
            average_period_duration: avg_duration,
            cycle_standard_deviation: std_dev.round() as i64,
            is_irregular: std_dev > cfg.irregularity_threshold_days,
            last_period_start: last_start,
            predicted_period_start: predicted_start,
            predicted_period_end: predicted_end,
            predicted_ovulation,
            predicted_pms_start,
        })
    }

    /// Estimate the fertility window around the predicted ovulation.
    pub fn fertility_window(&self, logs: &[PeriodLog]) -> Option<FertilityWindow> {
        let prediction = self.predict(logs)?;
        fertility_window_for(&prediction, &self.config)
    }

    /// Compute plain history statistics for the stats view.
    pub fn cycle_stats(&self, logs: &[PeriodLog]) -> CycleStats {
        let sorted = validation::normalize_all(logs);

        let Some(last) = sorted.last() else {
            return CycleStats {
                total_cycles: 0,
                avg_cycle_length: None,
                avg_period_duration: None,
                shortest_cycle: None,
                longest_cycle: None,
                last_period_start: None,
                last_period_end: None,
            };
        };

        let gaps = cycle_gaps(&sorted);
        let durations: Vec<f64> = sorted.iter().map(|l| l.duration).collect();
        let rounded_gaps = gaps.iter().map(|g| g.round() as i64);

        CycleStats {
            total_cycles: sorted.len(),
            avg_cycle_length: stats::mean(&gaps),
            avg_period_duration: stats::mean(&durations),
            shortest_cycle: rounded_gaps.clone().min(),
            longest_cycle: rounded_gaps.max(),
            last_period_start: Some(last.start_date()),
            last_period_end: Some(last.end_date()),
        }
    }
}

/// Predict the next cycle with the default settings.
pub fn predict_next_cycle(logs: &[PeriodLog]) -> Option<CyclePrediction> {
    CyclePredictor::default().predict(logs)
}

/// Fertile window = ovulation - `fertile_window_days` to ovulation day.
/// Peak fertility = ovulation - `peak_fertility_days` to ovulation day.
/// An out-of-range config yields `None`.
pub fn fertility_window_for(
    prediction: &CyclePrediction,
    config: &PredictorConfig,
) -> Option<FertilityWindow> {
    config.validate().ok()?;
    let ovulation_day = prediction.predicted_ovulation?;
    Some(FertilityWindow {
        fertile_start: shift(ovulation_day, config.fertile_window_days.checked_neg()?)?,
        fertile_end: ovulation_day,
        ovulation_day,
        peak_start: shift(ovulation_day, config.peak_fertility_days.checked_neg()?)?,
        peak_end: ovulation_day,
    })
}

/// Locate `on` within the cycle that began at `last_period_start`.
/// Dates outside that cycle, or an out-of-range config, give `None`.
pub fn cycle_day(
    prediction: &CyclePrediction,
    on: NaiveDate,
    config: &PredictorConfig,
) -> Option<CycleDay> {
    config.validate().ok()?;
    let next_start = prediction.predicted_period_start?;
    if on < prediction.last_period_start || on >= next_start {
        return None;
    }

    let day = (on - prediction.last_period_start).num_days();
    let window = fertility_window_for(prediction, config);

    let phase = if day < prediction.average_period_duration {
        CyclePhase::Menstrual
    } else if prediction.predicted_ovulation == Some(on) {
        CyclePhase::Ovulation
    } else if prediction.predicted_pms_start.is_some_and(|pms| on >= pms) {
        CyclePhase::Pms
    } else if window.as_ref().is_some_and(|w| w.contains(on)) {
        CyclePhase::Fertile
    } else if prediction.predicted_ovulation.is_some_and(|ov| on < ov) {
        CyclePhase::Follicular
    } else {
        CyclePhase::Luteal
    };

    let ovulation_index = prediction
        .average_cycle_length
        .checked_sub(config.luteal_phase_days)?
        .max(0);

    Some(CycleDay {
        day,
        cycle_length: prediction.average_cycle_length,
        ovulation_index,
        phase,
    })
}

/// Days between consecutive starts; non-positive gaps (shared start dates) are skipped.
fn cycle_gaps(sorted: &[NormalizedLog]) -> Vec<f64> {
    sorted
        .windows(2)
        .map(|w| days_between(w[0].from, w[1].from))
        .filter(|gap| {
            if *gap <= 0.0 {
                log::debug!("skipping non-positive cycle gap of {gap} days");
            }
            *gap > 0.0
        })
        .collect()
}

fn rounded_weighted_average(values: &[f64], default: i64, what: &str) -> i64 {
    match stats::weighted_average(values) {
        Some(avg) => avg.round() as i64,
        None => {
            log::debug!("no usable {what} samples, using default of {default} days");
            default
        }
    }
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}
