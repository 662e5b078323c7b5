//! Pricing module
//!
//! Provides cost estimation against a price plan catalog with:
//! - Per-plan total cost
//! - Per-plan per-weekday cost
//! - Cheapest-plan recommendations
//! - Meter to current plan lookup

pub mod accounts;
pub mod aggregator;
pub mod rounding;

pub use accounts::AccountDirectory;
pub use aggregator::{CostAggregator, CostPolicy, PlanCost};
