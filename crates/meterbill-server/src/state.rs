//! Shared application state
//!
//! Built once at startup from [`ServerConfig`]; everything inside is read-only
//! for the life of the process.

use std::sync::Arc;

use meterbill_common::{PricePlanCatalog, Result};
use meterbill_pricing::{AccountDirectory, CostAggregator, InMemoryReadingStore, ReadingGenerator};
use tracing::info;

use crate::config::{SeedSettings, ServerConfig};

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryReadingStore>,
    pub aggregator: Arc<CostAggregator>,
    pub accounts: Arc<AccountDirectory>,
}

impl AppState {
    /// Wire catalog, accounts and store from configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let catalog = PricePlanCatalog::new(config.pricing.plans.clone())?;
        let accounts = AccountDirectory::new(
            config
                .pricing
                .accounts
                .iter()
                .map(|a| (a.meter_id.clone(), a.plan.clone())),
            &catalog,
        )?;

        let store = Arc::new(InMemoryReadingStore::new());
        if config.seed.enabled {
            seed_readings(&store, &config.seed);
        }

        info!(
            plans = catalog.len(),
            accounts = accounts.len(),
            meters = store.meter_count(),
            zone = %config.pricing.weekday_zone,
            "Application state ready"
        );

        let aggregator = CostAggregator::with_policy(store.clone(), catalog, config.pricing.policy());
        Ok(Self {
            store,
            aggregator: Arc::new(aggregator),
            accounts: Arc::new(accounts),
        })
    }
}

/// Fill the store with generated hourly readings for each configured meter
fn seed_readings(store: &InMemoryReadingStore, seed: &SeedSettings) {
    let mut generator = match seed.rng_seed {
        Some(value) => ReadingGenerator::seeded(value),
        None => ReadingGenerator::from_entropy(),
    };

    for meter_id in &seed.meter_ids {
        store.store_readings(meter_id.clone(), generator.generate(seed.readings_per_meter));
    }
    info!(
        meters = seed.meter_ids.len(),
        readings_per_meter = seed.readings_per_meter,
        "Seeded generated readings"
    );
}
