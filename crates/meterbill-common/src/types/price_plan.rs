//! Price plans - named tariffs applied to normalized consumption
//!
//! The catalog is built once (usually at process start) and handed to the
//! cost aggregator by value. Nothing mutates it afterwards.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Named tariff with a unit rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePlan {
    /// Unique plan identifier (e.g., "price-plan-0")
    pub name: String,

    /// Price per unit of averaged consumption
    pub unit_rate: Decimal,
}

impl PricePlan {
    pub fn new(name: impl Into<String>, unit_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            unit_rate,
        }
    }
}

/// Immutable set of price plans keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PricePlanCatalog {
    plans: BTreeMap<String, PricePlan>,
}

impl PricePlanCatalog {
    /// Build a catalog, rejecting empty and duplicate plan names
    pub fn new(plans: impl IntoIterator<Item = PricePlan>) -> Result<Self, CatalogError> {
        let mut by_name = BTreeMap::new();
        for plan in plans {
            if plan.name.trim().is_empty() {
                return Err(CatalogError::EmptyPlanName);
            }
            if by_name.contains_key(&plan.name) {
                return Err(CatalogError::DuplicatePlan { name: plan.name });
            }
            by_name.insert(plan.name.clone(), plan);
        }
        Ok(Self { plans: by_name })
    }

    /// Look up a plan by name
    pub fn get(&self, name: &str) -> Option<&PricePlan> {
        self.plans.get(name)
    }

    /// Iterate over all plans
    pub fn iter(&self) -> impl Iterator<Item = &PricePlan> {
        self.plans.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl<'a> IntoIterator for &'a PricePlanCatalog {
    type Item = &'a PricePlan;
    type IntoIter = std::collections::btree_map::Values<'a, String, PricePlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.plans.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_catalog_lookup() {
        let catalog = PricePlanCatalog::new(vec![
            PricePlan::new("price-plan-0", dec!(10)),
            PricePlan::new("price-plan-1", dec!(2)),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("price-plan-1").unwrap().unit_rate, dec!(2));
        assert!(catalog.get("price-plan-9").is_none());
    }

    #[test]
    fn test_duplicate_plan_rejected() {
        let result = PricePlanCatalog::new(vec![
            PricePlan::new("price-plan-0", dec!(10)),
            PricePlan::new("price-plan-0", dec!(1)),
        ]);
        assert_eq!(
            result,
            Err(CatalogError::DuplicatePlan {
                name: "price-plan-0".to_string()
            })
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = PricePlanCatalog::new(vec![PricePlan::new("  ", dec!(1))]);
        assert!(matches!(result, Err(CatalogError::EmptyPlanName)));
    }
}
