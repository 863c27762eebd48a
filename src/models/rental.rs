use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::calendar::{DayPeriod, Season};
use crate::utils::constants::{DATETIME_FORMATS, DATE_FORMAT, OFFSET_DATETIME_FORMATS};

/// One row as it appears in the source table. Columns not listed here are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RawRecord {
    pub datetime: String,
    pub season: i32,
    pub weather: i32,

    #[validate(range(min = 0, max = 1))]
    pub workingday: u8,

    pub count: u32,
    pub registered: u32,
}

/// An hourly observation with every derived column populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub timestamp: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    /// 0 = Monday ... 6 = Sunday
    pub day_of_week: u32,
    pub hour_of_day: u32,
    pub season_code: i32,
    pub season: Season,
    pub day_period: DayPeriod,
    pub weather_code: i32,
    pub is_working_day: bool,
    pub rental_count: u32,
    pub registered_count: u32,
}

impl RentalRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        season_code: i32,
        weather_code: i32,
        is_working_day: bool,
        rental_count: u32,
        registered_count: u32,
    ) -> Result<Self> {
        let season = Season::from_code(season_code)?;
        let hour_of_day = timestamp.hour();
        let day_period = DayPeriod::from_hour(hour_of_day as i32)?;

        Ok(Self {
            timestamp,
            year: timestamp.year(),
            month: timestamp.month(),
            day_of_week: timestamp.weekday().num_days_from_monday(),
            hour_of_day,
            season_code,
            season,
            day_period,
            weather_code,
            is_working_day,
            rental_count,
            registered_count,
        })
    }

    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        raw.validate()?;
        let timestamp = parse_timestamp(&raw.datetime)?;

        Self::new(
            timestamp,
            raw.season,
            raw.weather,
            raw.workingday == 1,
            raw.count,
            raw.registered,
        )
    }
}

/// Parse an ISO-style timestamp. A bare date is taken as midnight. A `Z` or
/// numeric offset is accepted and the local wall-clock time is kept.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.naive_local());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(value, format) {
            return Ok(timestamp.naive_local());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp);
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ProcessingError::TimestampParse {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(datetime: &str, season: i32, workingday: u8) -> RawRecord {
        RawRecord {
            datetime: datetime.to_string(),
            season,
            weather: 1,
            workingday,
            count: 16,
            registered: 13,
        }
    }

    #[test]
    fn test_parse_timestamp_layouts() {
        let expected = NaiveDate::from_ymd_opt(2011, 1, 1)
            .unwrap()
            .and_hms_opt(5, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2011-01-01 05:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2011-01-01T05:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2011-01-01 05:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2011-01-01").unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_fractions_and_offsets() {
        let midnight = NaiveDate::from_ymd_opt(2011, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2011-01-01 00:00:00.000").unwrap(), midnight);
        assert_eq!(parse_timestamp("2011-01-01T00:00:00Z").unwrap(), midnight);
        assert_eq!(parse_timestamp("2011-01-01T00:00:00+00:00").unwrap(), midnight);
        assert_eq!(parse_timestamp("2011-01-01 00:00:00+0000").unwrap(), midnight);
        assert_eq!(
            parse_timestamp("2011-01-01T00:00:00.5").unwrap(),
            midnight.date().and_hms_milli_opt(0, 0, 0, 500).unwrap()
        );

        // Offsets keep the wall-clock hour
        let record = parse_timestamp("2011-01-01T05:00:00-05:00").unwrap();
        assert_eq!(record.hour(), 5);
        assert_eq!(record.date(), midnight.date());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("01/01/2011 5am"),
            Err(ProcessingError::TimestampParse { .. })
        ));
        assert!(parse_timestamp("2011-13-01 00:00:00").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_derived_columns() {
        let record = RentalRecord::from_raw(raw("2012-07-04 18:00:00", 3, 0)).unwrap();

        assert_eq!(record.year, 2012);
        assert_eq!(record.month, 7);
        assert_eq!(record.day_of_week, 2); // Wednesday
        assert_eq!(record.hour_of_day, 18);
        assert_eq!(record.season, Season::Fall);
        assert_eq!(record.day_period, DayPeriod::Evening);
        assert!(!record.is_working_day);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first = RentalRecord::from_raw(raw("2011-03-14 07:00:00", 1, 1)).unwrap();
        let second = RentalRecord::from_raw(raw("2011-03-14 07:00:00", 1, 1)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.day_of_week, 0);
        assert_eq!(first.day_period, DayPeriod::Morning);
    }

    #[test]
    fn test_unknown_season_is_rejected() {
        let err = RentalRecord::from_raw(raw("2011-03-14 07:00:00", 9, 1)).unwrap_err();
        assert!(matches!(err, ProcessingError::UnknownSeason { code: 9 }));
    }

    #[test]
    fn test_workingday_must_be_binary() {
        let err = RentalRecord::from_raw(raw("2011-03-14 07:00:00", 1, 2)).unwrap_err();
        assert!(matches!(err, ProcessingError::Validation(_)));
    }
}
