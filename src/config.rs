use serde::{Deserialize, Serialize};

/// Gap or duration samples further than this from their mean are dropped.
pub const OUTLIER_THRESHOLD_DAYS: f64 = 10.0;
/// Cycle-gap standard deviation above which a history counts as irregular.
pub const IRREGULARITY_THRESHOLD_DAYS: f64 = 7.0;
/// Ovulation is placed this many days before the predicted period start.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// PMS onset is placed this many days before the predicted period start.
pub const PMS_OFFSET_DAYS: i64 = 5;
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;
pub const DEFAULT_PERIOD_DURATION_DAYS: i64 = 5;
/// Fertile window = ovulation - 5 to ovulation day.
pub const FERTILE_WINDOW_DAYS: i64 = 5;
/// Peak fertility = ovulation - 2 to ovulation day.
pub const PEAK_FERTILITY_DAYS: i64 = 2;

const MAX_OFFSET_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number of days (got {value})")]
    Threshold { field: &'static str, value: f64 },
    #[error("{field} must be between {min} and 366 days (got {value})")]
    Offset {
        field: &'static str,
        min: i64,
        value: i64,
    },
}

/// Tunable parameters of the forecast. Missing fields fall back to the
/// constants above when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub outlier_threshold_days: f64,
    pub irregularity_threshold_days: f64,
    pub luteal_phase_days: i64,
    pub pms_offset_days: i64,
    pub default_cycle_length_days: i64,
    pub default_period_duration_days: i64,
    pub fertile_window_days: i64,
    pub peak_fertility_days: i64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            outlier_threshold_days: OUTLIER_THRESHOLD_DAYS,
            irregularity_threshold_days: IRREGULARITY_THRESHOLD_DAYS,
            luteal_phase_days: LUTEAL_PHASE_DAYS,
            pms_offset_days: PMS_OFFSET_DAYS,
            default_cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
            default_period_duration_days: DEFAULT_PERIOD_DURATION_DAYS,
            fertile_window_days: FERTILE_WINDOW_DAYS,
            peak_fertility_days: PEAK_FERTILITY_DAYS,
        }
    }
}

impl PredictorConfig {
    /// Parse a (possibly partial) JSON settings document and validate it.
    pub fn from_json(input: &str) -> Result<Self, crate::ForecastError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("outlier_threshold_days", self.outlier_threshold_days)?;
        check_threshold(
            "irregularity_threshold_days",
            self.irregularity_threshold_days,
        )?;
        check_offset("luteal_phase_days", 0, self.luteal_phase_days)?;
        check_offset("pms_offset_days", 0, self.pms_offset_days)?;
        check_offset("default_cycle_length_days", 1, self.default_cycle_length_days)?;
        check_offset(
            "default_period_duration_days",
            1,
            self.default_period_duration_days,
        )?;
        check_offset("fertile_window_days", 0, self.fertile_window_days)?;
        check_offset("peak_fertility_days", 0, self.peak_fertility_days)?;
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Threshold { field, value })
    }
}

fn check_offset(field: &'static str, min: i64, value: i64) -> Result<(), ConfigError> {
    if (min..=MAX_OFFSET_DAYS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Offset { field, min, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = PredictorConfig::default();
        assert_eq!(config.outlier_threshold_days, 10.0);
        assert_eq!(config.irregularity_threshold_days, 7.0);
        assert_eq!(config.luteal_phase_days, 14);
        assert_eq!(config.pms_offset_days, 5);
        assert_eq!(config.default_cycle_length_days, 28);
        assert_eq!(config.default_period_duration_days, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = PredictorConfig::from_json(r#"{"outlier_threshold_days": 4.5}"#).unwrap();
        assert_eq!(config.outlier_threshold_days, 4.5);
        assert_eq!(config.luteal_phase_days, LUTEAL_PHASE_DAYS);
    }

    #[test]
    fn negative_threshold_rejected() {
        let config = PredictorConfig {
            outlier_threshold_days: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold {
                field: "outlier_threshold_days",
                ..
            })
        ));
    }

    #[test]
    fn zero_default_cycle_rejected() {
        let result = PredictorConfig::from_json(r#"{"default_cycle_length_days": 0}"#);
        assert!(matches!(
            result,
            Err(crate::ForecastError::Config(ConfigError::Offset { .. }))
        ));
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            PredictorConfig::from_json("{"),
            Err(crate::ForecastError::Json(_))
        ));
    }
}
