//! Cost aggregation over a meter's readings
//!
//! For each price plan in the catalog:
//! - average the reading values
//! - normalize by the hours between the earliest and latest reading
//! - multiply by the plan's unit rate
//!
//! The reading-dependent part is computed once per request and reused for
//! every plan. An unknown meter yields `Ok(None)`; a reading set the formula
//! cannot be applied to yields a [`PricingError`].

use std::collections::BTreeMap;
use std::sync::Arc;

use meterbill_common::{
    CostResult, DailyCostResult, DayOfWeek, PricePlanCatalog, PricingError, Reading, Result,
    WeekdayZone, DAILY_COST_SIGNIFICANT_DIGITS, DEFAULT_DECIMAL_SCALE, SECONDS_PER_HOUR,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::rounding::{divide_half_up, round_significant_half_up};
use crate::metering::ReadingStore;

type PricingResult<T> = std::result::Result<T, PricingError>;

/// Numeric policy for cost computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostPolicy {
    /// Fractional digits kept after each half-up division
    pub scale: u32,
    /// Zone used to assign readings to weekdays
    pub weekday_zone: WeekdayZone,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            scale: DEFAULT_DECIMAL_SCALE,
            weekday_zone: WeekdayZone::default(),
        }
    }
}

/// One plan's cost, as returned by recommendations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCost {
    pub plan_name: String,
    pub cost: Decimal,
}

/// Computes per-plan costs for meters against a fixed catalog
pub struct CostAggregator {
    store: Arc<dyn ReadingStore>,
    catalog: PricePlanCatalog,
    policy: CostPolicy,
}

impl CostAggregator {
    /// Create an aggregator with the default policy
    pub fn new(store: Arc<dyn ReadingStore>, catalog: PricePlanCatalog) -> Self {
        Self::with_policy(store, catalog, CostPolicy::default())
    }

    /// Create an aggregator with an explicit policy
    pub fn with_policy(
        store: Arc<dyn ReadingStore>,
        catalog: PricePlanCatalog,
        policy: CostPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            policy,
        }
    }

    pub fn catalog(&self) -> &PricePlanCatalog {
        &self.catalog
    }

    /// Total cost of the meter's readings under every plan
    #[instrument(skip(self))]
    pub fn cost_per_plan(&self, meter_id: &str) -> Result<Option<CostResult>> {
        let Some(readings) = self.store.get_readings(meter_id) else {
            debug!("Meter not found");
            return Ok(None);
        };

        let rate = averaged_rate(meter_id, &readings, self.policy.scale)?;
        let costs = self
            .catalog
            .iter()
            .map(|plan| -> PricingResult<(String, Decimal)> {
                Ok((plan.name.clone(), plan_cost(rate, plan.unit_rate)?))
            })
            .collect::<PricingResult<CostResult>>()?;

        debug!(readings = readings.len(), plans = costs.len(), "Computed plan costs");
        Ok(Some(costs))
    }

    /// Cost of the meter's readings under every plan, broken down by weekday
    #[instrument(skip(self))]
    pub fn cost_per_plan_per_day(&self, meter_id: &str) -> Result<Option<DailyCostResult>> {
        let Some(readings) = self.store.get_readings(meter_id) else {
            debug!("Meter not found");
            return Ok(None);
        };

        let rate = averaged_rate(meter_id, &readings, self.policy.scale)?;
        let totals = daily_totals(&readings, self.policy.weekday_zone)?;

        let mut result = DailyCostResult::new();
        for plan in &self.catalog {
            // The day's raw summed readings are scaled by the whole-period plan
            // cost. This is not the day's share of the total cost; the units do
            // not line up, but callers depend on these numbers as they are.
            let cost = plan_cost(rate, plan.unit_rate)?;
            let factor = round_significant_half_up(cost, DAILY_COST_SIGNIFICANT_DIGITS)
                .ok_or(PricingError::Overflow)?;

            let by_day = totals
                .iter()
                .map(|(day, total)| -> PricingResult<(DayOfWeek, Decimal)> {
                    Ok((*day, total.checked_mul(factor).ok_or(PricingError::Overflow)?))
                })
                .collect::<PricingResult<BTreeMap<_, _>>>()?;
            result.insert(plan.name.clone(), by_day);
        }

        debug!(readings = readings.len(), plans = result.len(), "Computed daily plan costs");
        Ok(Some(result))
    }

    /// Summed reading values per weekday, before any pricing is applied
    #[instrument(skip(self))]
    pub fn usage_per_day(&self, meter_id: &str) -> Result<Option<BTreeMap<DayOfWeek, Decimal>>> {
        let Some(readings) = self.store.get_readings(meter_id) else {
            return Ok(None);
        };
        Ok(Some(daily_totals(&readings, self.policy.weekday_zone)?))
    }

    /// Plans ordered from cheapest to most expensive for this meter
    ///
    /// Ties are broken by plan name. `limit` truncates the list when given.
    #[instrument(skip(self))]
    pub fn recommend(
        &self,
        meter_id: &str,
        limit: Option<usize>,
    ) -> Result<Option<Vec<PlanCost>>> {
        let Some(costs) = self.cost_per_plan(meter_id)? else {
            return Ok(None);
        };

        let mut ranked: Vec<PlanCost> = costs
            .into_iter()
            .map(|(plan_name, cost)| PlanCost { plan_name, cost })
            .collect();
        ranked.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.plan_name.cmp(&b.plan_name)));

        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        Ok(Some(ranked))
    }
}

/// Average reading value normalized by elapsed hours
fn averaged_rate(meter_id: &str, readings: &[Reading], scale: u32) -> PricingResult<Decimal> {
    let average = average_value(meter_id, readings, scale)?;
    let hours = elapsed_hours(meter_id, readings, scale)?;
    divide_half_up(average, hours, scale).ok_or(PricingError::Overflow)
}

fn plan_cost(rate: Decimal, unit_rate: Decimal) -> PricingResult<Decimal> {
    rate.checked_mul(unit_rate).ok_or(PricingError::Overflow)
}

fn average_value(meter_id: &str, readings: &[Reading], scale: u32) -> PricingResult<Decimal> {
    if readings.is_empty() {
        return Err(PricingError::EmptyReadingSet {
            meter_id: meter_id.to_string(),
        });
    }
    let sum = checked_sum(readings.iter())?;
    divide_half_up(sum, Decimal::from(readings.len()), scale).ok_or(PricingError::Overflow)
}

/// Hours between the earliest and latest reading, found by scanning
fn elapsed_hours(meter_id: &str, readings: &[Reading], scale: u32) -> PricingResult<Decimal> {
    let (Some(first), Some(last)) = (
        readings.iter().map(|r| r.timestamp).min(),
        readings.iter().map(|r| r.timestamp).max(),
    ) else {
        return Err(PricingError::EmptyReadingSet {
            meter_id: meter_id.to_string(),
        });
    };

    let seconds = (last - first).num_seconds();
    let hours = divide_half_up(Decimal::from(seconds), Decimal::from(SECONDS_PER_HOUR), scale)
        .ok_or(PricingError::Overflow)?;

    if hours.is_zero() {
        return Err(PricingError::UndefinedElapsedTime {
            meter_id: meter_id.to_string(),
        });
    }
    Ok(hours)
}

/// Summed reading values per weekday, all seven days present
fn daily_totals(readings: &[Reading], zone: WeekdayZone) -> PricingResult<BTreeMap<DayOfWeek, Decimal>> {
    let mut totals: BTreeMap<DayOfWeek, Decimal> =
        DayOfWeek::ALL.iter().map(|day| (*day, Decimal::ZERO)).collect();

    for reading in readings {
        let total = totals.entry(reading.weekday_in(zone)).or_default();
        *total = total.checked_add(reading.value).ok_or(PricingError::Overflow)?;
    }
    Ok(totals)
}

fn checked_sum<'a>(mut readings: impl Iterator<Item = &'a Reading>) -> PricingResult<Decimal> {
    readings.try_fold(Decimal::ZERO, |acc, r| {
        acc.checked_add(r.value).ok_or(PricingError::Overflow)
    })
}
