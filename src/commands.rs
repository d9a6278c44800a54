use serde_json::Value;

use crate::config::PredictorConfig;
use crate::error::ForecastError;
use crate::models::{CyclePrediction, PeriodLog};
use crate::prediction::CyclePredictor;

/// Read a logs document: `null` means no history, an array is read record by
/// record. A record that is not `{from: string, to: string}` becomes an empty
/// log, which validation then drops.
pub fn parse_logs(input: &str) -> Result<Option<Vec<PeriodLog>>, ForecastError> {
    match serde_json::from_str::<Value>(input)? {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value::<PeriodLog>(item).unwrap_or_default())
                .collect(),
        )),
        _ => Err(ForecastError::NotAList),
    }
}

/// Predict from a JSON logs document with the default settings.
/// Returns the serialized prediction, or `null` when there is too little history.
pub fn predict_json(logs_json: &str) -> Result<String, ForecastError> {
    run(&CyclePredictor::default(), logs_json)
}

pub fn predict_json_with_config(
    logs_json: &str,
    config_json: &str,
) -> Result<String, ForecastError> {
    let config = PredictorConfig::from_json(config_json)?;
    run(&CyclePredictor::new(config)?, logs_json)
}

fn run(predictor: &CyclePredictor, logs_json: &str) -> Result<String, ForecastError> {
    let prediction: Option<CyclePrediction> = parse_logs(logs_json)?
        .and_then(|logs| predictor.predict(&logs));
    Ok(serde_json::to_string(&prediction)?)
}
