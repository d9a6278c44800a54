use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{NormalizedLog, PeriodLog};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Why a single period log was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("missing start date")]
    MissingFrom,
    #[error("missing end date")]
    MissingTo,
    #[error("unparseable start date {0:?}")]
    InvalidFrom(String),
    #[error("unparseable end date {0:?}")]
    InvalidTo(String),
    #[error("end {to} is not after start {from}")]
    NonPositiveDuration {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogOutcome {
    Valid(NormalizedLog),
    Rejected(Rejection),
}

impl LogOutcome {
    pub fn valid(self) -> Option<NormalizedLog> {
        match self {
            LogOutcome::Valid(log) => Some(log),
            LogOutcome::Rejected(_) => None,
        }
    }
}

/// Parse a calendar date (`YYYY-MM-DD`) or an RFC 3339 timestamp, normalized to UTC.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Fractional days from `a` to `b` (negative when `b` is earlier).
pub fn days_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    (b - a).num_milliseconds() as f64 / MILLIS_PER_DAY
}

pub fn normalize(log: &PeriodLog) -> LogOutcome {
    let from = match log.from.as_deref() {
        None => return LogOutcome::Rejected(Rejection::MissingFrom),
        Some(raw) => match parse_date(raw) {
            Some(d) => d,
            None => return LogOutcome::Rejected(Rejection::InvalidFrom(raw.to_string())),
        },
    };
    let to = match log.to.as_deref() {
        None => return LogOutcome::Rejected(Rejection::MissingTo),
        Some(raw) => match parse_date(raw) {
            Some(d) => d,
            None => return LogOutcome::Rejected(Rejection::InvalidTo(raw.to_string())),
        },
    };

    let duration = days_between(from, to);
    if duration <= 0.0 {
        return LogOutcome::Rejected(Rejection::NonPositiveDuration { from, to });
    }

    LogOutcome::Valid(NormalizedLog { from, to, duration })
}

/// Validate every log, drop the rejects and sort the rest by start
/// (ties by end, so input order never matters).
pub fn normalize_all(logs: &[PeriodLog]) -> Vec<NormalizedLog> {
    let mut valid: Vec<NormalizedLog> = logs
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match normalize(entry) {
            LogOutcome::Valid(n) => Some(n),
            LogOutcome::Rejected(reason) => {
                log::debug!("dropping period log #{i}: {reason}");
                None
            }
        })
        .collect();

    valid.sort_by(|a, b| a.from.cmp(&b.from).then(a.to.cmp(&b.to)));
    valid
}
