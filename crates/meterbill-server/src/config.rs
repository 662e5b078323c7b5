//! Meterbill server configuration
//!
//! Layering, lowest priority first:
//! 1. built-in defaults (seed catalog, accounts and meters)
//! 2. optional `meterbill.toml` in the working directory
//! 3. `METERBILL__*` environment variables, e.g. `METERBILL__PRICING__SCALE=6`
//! 4. `PORT`, which takes priority over everything for the listen port

use meterbill_common::{
    MeterbillError, PricePlan, Result, WeekdayZone, DEFAULT_DECIMAL_SCALE,
};
use meterbill_pricing::CostPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest scale rust_decimal can represent
const MAX_DECIMAL_SCALE: u32 = 28;

/// Meterbill server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Cost computation settings
    pub pricing: PricingSettings,
    /// Demo data settings
    pub seed: SeedSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            pricing: PricingSettings::default(),
            seed: SeedSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, file and environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let defaults = config::Config::try_from(&Self::default()).map_err(config_error)?;
        let mut cfg: Self = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("meterbill").required(false))
            .add_source(
                config::Environment::with_prefix("METERBILL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;

        // Platform-assigned PORT wins over file and prefixed env
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check settings that deserialization alone cannot
    pub fn validate(&self) -> Result<()> {
        if self.pricing.scale > MAX_DECIMAL_SCALE {
            return Err(MeterbillError::Config(format!(
                "pricing.scale must be at most {}, got {}",
                MAX_DECIMAL_SCALE, self.pricing.scale
            )));
        }
        if self.pricing.plans.is_empty() {
            return Err(MeterbillError::Config(
                "pricing.plans must contain at least one plan".to_string(),
            ));
        }
        Ok(())
    }

    /// Listen address as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn config_error(err: config::ConfigError) -> MeterbillError {
    MeterbillError::Config(err.to_string())
}

/// Cost computation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Fractional digits kept after half-up divisions
    pub scale: u32,
    /// `local`, `utc` or a fixed offset such as `+01:00`
    pub weekday_zone: WeekdayZone,
    /// Price plan catalog
    pub plans: Vec<PricePlan>,
    /// Meter to current plan assignments
    pub accounts: Vec<AccountSetting>,
}

impl PricingSettings {
    pub fn policy(&self) -> CostPolicy {
        CostPolicy {
            scale: self.scale,
            weekday_zone: self.weekday_zone,
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_DECIMAL_SCALE,
            weekday_zone: WeekdayZone::Local,
            plans: vec![
                PricePlan::new("price-plan-0", Decimal::from(10)),
                PricePlan::new("price-plan-1", Decimal::from(2)),
                PricePlan::new("price-plan-2", Decimal::from(1)),
            ],
            accounts: vec![
                AccountSetting::new("smart-meter-0", "price-plan-0"),
                AccountSetting::new("smart-meter-1", "price-plan-1"),
                AccountSetting::new("smart-meter-2", "price-plan-0"),
                AccountSetting::new("smart-meter-3", "price-plan-2"),
                AccountSetting::new("smart-meter-4", "price-plan-1"),
            ],
        }
    }
}

/// One meter's plan assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSetting {
    pub meter_id: String,
    pub plan: String,
}

impl AccountSetting {
    pub fn new(meter_id: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            meter_id: meter_id.into(),
            plan: plan.into(),
        }
    }
}

/// Generated demo readings loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Whether to generate readings at startup
    pub enabled: bool,
    /// Meters that receive generated readings
    pub meter_ids: Vec<String>,
    /// Hourly readings generated per meter
    pub readings_per_meter: usize,
    /// Fixed RNG seed for reproducible demo data
    pub rng_seed: Option<u64>,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            meter_ids: (0..5).map(|i| format!("smart-meter-{}", i)).collect(),
            readings_per_meter: 20,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = ServerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.pricing.plans.len(), 3);
        assert_eq!(cfg.seed.meter_ids.len(), 5);
        assert_eq!(cfg.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_scale_out_of_range() {
        let mut cfg = ServerConfig::default();
        cfg.pricing.scale = 29;
        assert!(matches!(cfg.validate(), Err(MeterbillError::Config(_))));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let mut cfg = ServerConfig::default();
        cfg.pricing.plans.clear();
        assert!(matches!(cfg.validate(), Err(MeterbillError::Config(_))));
    }

    #[test]
    fn test_policy_from_settings() {
        let mut settings = PricingSettings::default();
        settings.scale = 4;
        settings.weekday_zone = WeekdayZone::Utc;

        let policy = settings.policy();
        assert_eq!(policy.scale, 4);
        assert_eq!(policy.weekday_zone, WeekdayZone::Utc);
    }
}
