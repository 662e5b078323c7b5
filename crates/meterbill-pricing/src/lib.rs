//! # Meterbill Pricing
//!
//! Reading generation and cost aggregation for smart meters.
//!
//! ## Cost Formula
//!
//! ```text
//! average       = Σ value / n
//! elapsed_hours = (max(t) - min(t)) / 3600 s
//! cost(plan)    = (average / elapsed_hours) × plan.unit_rate
//! ```
//!
//! Divisions round half-up to a fixed number of fractional digits
//! ([`CostPolicy::scale`]). Weekday breakdowns multiply each day's summed
//! readings by the plan cost rounded to two significant digits.

pub mod metering;
pub mod pricing;

pub use metering::{generate_readings, InMemoryReadingStore, ReadingGenerator, ReadingStore};
pub use pricing::{AccountDirectory, CostAggregator, CostPolicy, PlanCost};
