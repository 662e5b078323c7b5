//! Meter accounts
//!
//! Maps each smart meter to the price plan it is currently billed on.

use std::collections::HashMap;

use meterbill_common::{CatalogError, PricePlanCatalog};

/// Meter id to current price plan name
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    plans_by_meter: HashMap<String, String>,
}

impl AccountDirectory {
    /// Build a directory, rejecting plans the catalog does not contain
    pub fn new(
        accounts: impl IntoIterator<Item = (String, String)>,
        catalog: &PricePlanCatalog,
    ) -> Result<Self, CatalogError> {
        let mut plans_by_meter = HashMap::new();
        for (meter_id, plan_name) in accounts {
            if catalog.get(&plan_name).is_none() {
                return Err(CatalogError::UnknownPlan { name: plan_name });
            }
            plans_by_meter.insert(meter_id, plan_name);
        }
        Ok(Self { plans_by_meter })
    }

    /// Plan the meter is currently on
    pub fn plan_for(&self, meter_id: &str) -> Option<&str> {
        self.plans_by_meter.get(meter_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plans_by_meter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans_by_meter.is_empty()
    }
}
