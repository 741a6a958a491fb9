use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use crate::error::ExportError;

lazy_static! {
    /// `/Date(<millis>-0000)/`. The capture stops three digits early, dropping the milliseconds.
    static ref EPOCH_DATE: Regex = Regex::new(r"/Date\((\d+)\d{3}-0000\)/").unwrap();
}

/// Convert the backend's `/Date(1609459200000-0000)/` into an RFC 3339 timestamp in UTC,
/// e.g. `2021-01-01T00:00:00Z`.
pub(crate) fn normalize(raw: &str) -> Result<String, ExportError> {
    let malformed = || ExportError::MalformedDate(raw.to_string());

    let captures = EPOCH_DATE.captures(raw).ok_or_else(malformed)?;
    let seconds = captures[1].parse::<i64>().map_err(|_| malformed())?;
    let date_time = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(malformed)?;

    Ok(date_time.to_rfc3339_opts(SecondsFormat::Secs, true))
}
