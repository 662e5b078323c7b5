//! Core data types for Meterbill

pub mod price_plan;
pub mod reading;
pub mod weekday;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// Total cost per price plan name
pub type CostResult = BTreeMap<String, Decimal>;

/// Cost per weekday per price plan name
pub type DailyCostResult = BTreeMap<String, BTreeMap<weekday::DayOfWeek, Decimal>>;
