//! Electricity readings
//!
//! A reading is one instantaneous consumption sample (kW-equivalent) taken by
//! a smart meter. Values are expected to be non-negative but this is not
//! enforced; generated readings can dip below zero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::weekday::{DayOfWeek, WeekdayZone};

/// Single timestamped consumption sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,

    /// Instantaneous consumption rate
    pub value: Decimal,
}

impl Reading {
    /// Create a new reading
    pub fn new(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self { timestamp, value }
    }

    /// Weekday the reading falls on in the given zone
    #[inline]
    pub fn weekday_in(&self, zone: WeekdayZone) -> DayOfWeek {
        zone.weekday_of(&self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weekday_in_utc() {
        // 2024-01-01 was a Monday
        let reading = Reading::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(), dec!(0.5));
        assert_eq!(reading.weekday_in(WeekdayZone::Utc), DayOfWeek::Monday);
    }

    #[test]
    fn test_serialized_value_keeps_precision() {
        let reading = Reading::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            dec!(0.1234567890123),
        );
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["value"], "0.1234567890123");
    }
}
