//! # Meterbill Common
//!
//! Shared types and errors for smart meter cost estimation.
//!
//! ## Core Types
//!
//! - [`Reading`]: one timestamped consumption sample from a meter
//! - [`PricePlan`]: a named tariff with a unit rate
//! - [`PricePlanCatalog`]: the immutable set of plans costs are computed against
//! - [`DayOfWeek`] / [`WeekdayZone`]: weekday bucketing of readings
//! - [`CostResult`] / [`DailyCostResult`]: cost maps returned to callers

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CatalogError, MeterbillError, PricingError, Result};
pub use types::{
    price_plan::{PricePlan, PricePlanCatalog},
    reading::Reading,
    weekday::{DayOfWeek, WeekdayZone},
    CostResult, DailyCostResult,
};

/// Meterbill version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds in one hour, used to turn elapsed time into hours
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Default number of fractional digits kept by cost divisions
pub const DEFAULT_DECIMAL_SCALE: u32 = 10;

/// Significant digits the per-plan cost is rounded to before weekday scaling
pub const DAILY_COST_SIGNIFICANT_DIGITS: u32 = 2;
