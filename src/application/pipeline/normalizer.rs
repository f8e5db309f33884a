// Time series normalizer: raw API records into typed readings
use crate::domain::reading::{as_number, Measurement, RawRecord, Reading, Timestamp};
use crate::error::PipelineError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DEVICE_ID_FIELD: &str = "deviceId";

/// Parse every record into a [`Reading`]. The first record with a missing or
/// unparsable timestamp or value fails the whole batch.
pub fn normalize<M: Measurement>(records: &[RawRecord]) -> Result<Vec<Reading<M>>, PipelineError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record::<M>(index, record))
        .collect()
}

fn normalize_record<M: Measurement>(index: usize, record: &RawRecord) -> Result<Reading<M>, PipelineError> {
    let field = M::TIMESTAMP_FIELD;
    let timestamp = match record.get(field) {
        Some(Value::String(raw)) => parse_timestamp(raw).ok_or_else(|| PipelineError::MalformedTimestamp {
            field,
            index,
            value: raw.clone(),
        })?,
        Some(other) => {
            return Err(PipelineError::MalformedTimestamp {
                field,
                index,
                value: other.to_string(),
            })
        }
        None => {
            return Err(PipelineError::MalformedTimestamp {
                field,
                index,
                value: "<missing>".to_string(),
            })
        }
    };

    let value = match record.get(M::VALUE_FIELD) {
        None | Some(Value::Null) => {
            return Err(PipelineError::MissingField {
                field: M::VALUE_FIELD,
                index,
            })
        }
        Some(raw) => as_number(raw).ok_or_else(|| PipelineError::InvalidNumber {
            field: M::VALUE_FIELD,
            index,
            value: raw.to_string(),
        })?,
    };

    let device_id = record
        .get(DEVICE_ID_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Ok(Reading::new(device_id, timestamp, M::from_value(value)))
}

/// Accepts RFC 3339, Postgres-style `2022-06-01 03:00:00+00`, naive
/// date-times (taken as UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    let utc = FixedOffset::east_opt(0)?;
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive.and_local_timezone(utc).single();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(utc).single())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::{DailyAveragePower, HourlyEnergy};
    use serde_json::json;

    fn records(value: Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-01-01T10:00:00Z").unwrap();
        assert_eq!(rfc.timestamp(), 1_704_103_200);

        let pg = parse_timestamp("2022-06-01 03:00:00+00").unwrap();
        assert_eq!(pg.to_rfc3339(), "2022-06-01T03:00:00+00:00");

        let offset = parse_timestamp("2024-01-31 23:00:00-03").unwrap();
        assert_eq!(offset.offset().local_minus_utc(), -3 * 3600);

        let naive = parse_timestamp("2024-01-01T10:00:00.250").unwrap();
        assert_eq!(naive.timestamp(), 1_704_103_200);

        let date = parse_timestamp("2024-05-17").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-05-17T00:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-01").is_none());
    }

    #[test]
    fn test_normalize_hourly() {
        let input = records(json!([
            {"deviceId": "d1", "hour": "2024-01-01T10:00:00Z", "energyPerHour": 5},
            {"deviceId": "d2", "hour": "2024-02-01T03:00:00Z", "energyPerHour": "1.5"}
        ]));

        let readings = normalize::<HourlyEnergy>(&input).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].device_id.as_deref(), Some("d1"));
        assert_eq!(readings[0].month.to_string(), "2024-01");
        assert_eq!(readings[1].measurement.energy_per_hour, 1.5);
        assert_eq!(readings[1].month.to_string(), "2024-02");
    }

    #[test]
    fn test_missing_timestamp_fails_batch() {
        let input = records(json!([
            {"deviceId": "d1", "hour": "2024-01-01T10:00:00Z", "energyPerHour": 5},
            {"deviceId": "d1", "energyPerHour": 2}
        ]));

        let err = normalize::<HourlyEnergy>(&input).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedTimestamp { field: "hour", index: 1, .. }
        ));
    }

    #[test]
    fn test_unparsable_timestamp_fails_batch() {
        let input = records(json!([
            {"deviceId": "d1", "date": "31/01/2024", "avgPowerPerDay": 5}
        ]));

        let err = normalize::<DailyAveragePower>(&input).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedTimestamp {
                field: "date",
                index: 0,
                value: "31/01/2024".to_string()
            }
        );
    }

    #[test]
    fn test_value_errors() {
        let missing = records(json!([{"deviceId": "d1", "hour": "2024-01-01T10:00:00Z"}]));
        assert_eq!(
            normalize::<HourlyEnergy>(&missing).unwrap_err(),
            PipelineError::MissingField {
                field: "energyPerHour",
                index: 0
            }
        );

        let invalid = records(json!([
            {"deviceId": "d1", "hour": "2024-01-01T10:00:00Z", "energyPerHour": "lots"}
        ]));
        assert!(matches!(
            normalize::<HourlyEnergy>(&invalid).unwrap_err(),
            PipelineError::InvalidNumber { field: "energyPerHour", .. }
        ));
    }

    #[test]
    fn test_device_id_is_optional_here() {
        let input = records(json!([
            {"hour": "2024-01-01T10:00:00Z", "energyPerHour": 1},
            {"deviceId": "", "hour": "2024-01-01T11:00:00Z", "energyPerHour": 1}
        ]));

        let readings = normalize::<HourlyEnergy>(&input).unwrap();
        assert!(readings.iter().all(|r| r.device_id.is_none()));
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize::<HourlyEnergy>(&[]).unwrap().is_empty());
    }
}
