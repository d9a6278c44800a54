use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One observed period as supplied by the caller. Dates are kept as raw
/// strings so each record can be validated (and dropped) on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodLog {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl PeriodLog {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(from.format("%Y-%m-%d").to_string(), to.format("%Y-%m-%d").to_string())
    }
}

/// A period log that passed validation: both dates parsed and `to > from`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLog {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    /// Fractional days between `from` and `to`, always > 0.
    pub duration: f64,
}

impl NormalizedLog {
    pub fn start_date(&self) -> NaiveDate {
        self.from.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.to.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePrediction {
    pub average_cycle_length: i64,
    pub average_period_duration: i64,
    pub cycle_standard_deviation: i64,
    pub is_irregular: bool,
    pub last_period_start: NaiveDate,
    pub predicted_period_start: Option<NaiveDate>,
    pub predicted_period_end: Option<NaiveDate>,
    pub predicted_ovulation: Option<NaiveDate>,
    #[serde(rename = "predictedPMSStart")]
    pub predicted_pms_start: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilityWindow {
    pub fertile_start: NaiveDate,
    pub fertile_end: NaiveDate,
    pub ovulation_day: NaiveDate,
    pub peak_start: NaiveDate,
    pub peak_end: NaiveDate,
}

impl FertilityWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.fertile_start && date <= self.fertile_end
    }
}

/// Plain summary of the validated history, without outlier removal or weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    pub total_cycles: usize,
    pub avg_cycle_length: Option<f64>,
    pub avg_period_duration: Option<f64>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Fertile,
    Ovulation,
    Luteal,
    Pms,
}

/// Position of a date inside the current (predicted) cycle, as shown on the cycle ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleDay {
    /// 0-based day since the last period start.
    pub day: i64,
    pub cycle_length: i64,
    pub ovulation_index: i64,
    pub phase: CyclePhase,
}
