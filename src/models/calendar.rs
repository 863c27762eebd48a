use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::DAY_PERIOD_EDGES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            _ => Err(ProcessingError::UnknownSeason { code }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == name)
            .ok_or_else(|| ProcessingError::InvalidFormat(format!("Unknown season name: '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Night,
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
    ];

    /// Bucket an hour into [0,6) [6,12) [12,18) [18,24).
    pub fn from_hour(hour: i32) -> Result<Self> {
        DAY_PERIOD_EDGES
            .windows(2)
            .position(|edge| (edge[0]..edge[1]).contains(&hour))
            .map(|index| Self::ALL[index])
            .ok_or(ProcessingError::HourOutOfRange { hour })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Night => "night",
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Short weekday label for a Monday-based index (0 = Monday).
pub fn weekday_name(day_of_week: u32) -> &'static str {
    const NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    NAMES.get(day_of_week as usize).copied().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_mapping() {
        assert_eq!(Season::from_code(1).unwrap(), Season::Spring);
        assert_eq!(Season::from_code(2).unwrap(), Season::Summer);
        assert_eq!(Season::from_code(3).unwrap(), Season::Fall);
        assert_eq!(Season::from_code(4).unwrap(), Season::Winter);
        assert!(matches!(
            Season::from_code(5),
            Err(ProcessingError::UnknownSeason { code: 5 })
        ));
        assert!(Season::from_code(0).is_err());
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("Summer".parse::<Season>().unwrap(), Season::Summer);
        assert_eq!(" fall ".parse::<Season>().unwrap(), Season::Fall);
        assert!("autumn".parse::<Season>().is_err());
    }

    #[test]
    fn test_day_period_covers_every_hour_once() {
        for hour in 0..24 {
            let period = DayPeriod::from_hour(hour).unwrap();
            let expected = match hour {
                0..=5 => DayPeriod::Night,
                6..=11 => DayPeriod::Morning,
                12..=17 => DayPeriod::Afternoon,
                _ => DayPeriod::Evening,
            };
            assert_eq!(period, expected, "hour {}", hour);
            // deterministic
            assert_eq!(DayPeriod::from_hour(hour).unwrap(), period);
        }
    }

    #[test]
    fn test_day_period_rejects_out_of_range() {
        assert!(matches!(
            DayPeriod::from_hour(24),
            Err(ProcessingError::HourOutOfRange { hour: 24 })
        ));
        assert!(DayPeriod::from_hour(-1).is_err());
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(0), "Mon");
        assert_eq!(weekday_name(6), "Sun");
        assert_eq!(weekday_name(9), "?");
    }
}
