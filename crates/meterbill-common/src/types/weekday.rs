//! Weekday bucketing
//!
//! Readings are grouped by the weekday of their timestamp. Which weekday an
//! instant falls on depends on the zone it is viewed in, so the zone is an
//! explicit input rather than whatever the process happens to run in.
//! [`WeekdayZone::Local`] keeps the system-local behavior; nodes in different
//! zones will bucket the same readings differently when it is used.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Local, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday to Sunday
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Zone used to derive a reading's weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WeekdayZone {
    /// System-local time zone of the running process
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// Fixed offset from UTC, e.g. `+02:00`
    Fixed(FixedOffset),
}

impl WeekdayZone {
    /// Weekday of an instant viewed in this zone
    pub fn weekday_of(&self, instant: &DateTime<Utc>) -> DayOfWeek {
        let weekday = match self {
            WeekdayZone::Local => instant.with_timezone(&Local).weekday(),
            WeekdayZone::Utc => instant.weekday(),
            WeekdayZone::Fixed(offset) => instant.with_timezone(offset).weekday(),
        };
        weekday.into()
    }
}

impl fmt::Display for WeekdayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekdayZone::Local => f.write_str("local"),
            WeekdayZone::Utc => f.write_str("utc"),
            WeekdayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for WeekdayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(WeekdayZone::Local),
            "utc" | "z" => Ok(WeekdayZone::Utc),
            other => other
                .parse::<FixedOffset>()
                .map(WeekdayZone::Fixed)
                .map_err(|e| format!("Invalid weekday zone '{}': {}", s, e)),
        }
    }
}

impl TryFrom<String> for WeekdayZone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekdayZone> for String {
    fn from(zone: WeekdayZone) -> Self {
        zone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_all_days_ordered() {
        assert_eq!(DayOfWeek::ALL.len(), 7);
        assert!(DayOfWeek::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Monday);
    }

    #[test]
    fn test_fixed_offset_shifts_weekday() {
        // Sunday 23:30 UTC is already Monday at +02:00
        let instant = Utc.with_ymd_and_hms(2024, 1, 7, 23, 30, 0).unwrap();
        assert_eq!(WeekdayZone::Utc.weekday_of(&instant), DayOfWeek::Sunday);

        let zone: WeekdayZone = "+02:00".parse().unwrap();
        assert_eq!(zone.weekday_of(&instant), DayOfWeek::Monday);
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!("local".parse::<WeekdayZone>().unwrap(), WeekdayZone::Local);
        assert_eq!("UTC".parse::<WeekdayZone>().unwrap(), WeekdayZone::Utc);
        assert!("not-a-zone".parse::<WeekdayZone>().is_err());
    }

    #[test]
    fn test_day_serializes_upper_case() {
        let json = serde_json::to_string(&DayOfWeek::Wednesday).unwrap();
        assert_eq!(json, "\"WEDNESDAY\"");
    }
}
