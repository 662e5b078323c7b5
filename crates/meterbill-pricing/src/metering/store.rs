//! Reading storage
//!
//! The cost aggregator only needs a lookup of readings by meter id. An
//! unknown meter is reported as `None`, never as an empty list.

use std::collections::HashMap;

use dashmap::DashMap;
use meterbill_common::Reading;
use tracing::debug;

/// Lookup of readings by meter id
pub trait ReadingStore: Send + Sync {
    /// Readings for a meter, or `None` if the meter is unknown
    fn get_readings(&self, meter_id: &str) -> Option<Vec<Reading>>;
}

impl ReadingStore for HashMap<String, Vec<Reading>> {
    fn get_readings(&self, meter_id: &str) -> Option<Vec<Reading>> {
        self.get(meter_id).cloned()
    }
}

/// In-memory reading store
///
/// Uses DashMap so request handlers can read concurrently.
#[derive(Debug, Default)]
pub struct InMemoryReadingStore {
    readings: DashMap<String, Vec<Reading>>,
}

impl InMemoryReadingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append readings for a meter, registering it if unseen
    pub fn store_readings(&self, meter_id: impl Into<String>, readings: Vec<Reading>) {
        let meter_id = meter_id.into();
        let added = readings.len();
        self.readings
            .entry(meter_id.clone())
            .or_default()
            .extend(readings);
        debug!(meter_id = %meter_id, added, "Stored readings");
    }

    /// Known meter ids, sorted
    pub fn meter_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.readings.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Number of known meters
    pub fn meter_count(&self) -> usize {
        self.readings.len()
    }
}

impl ReadingStore for InMemoryReadingStore {
    fn get_readings(&self, meter_id: &str) -> Option<Vec<Reading>> {
        self.readings.get(meter_id).map(|r| r.clone())
    }
}

impl FromIterator<(String, Vec<Reading>)> for InMemoryReadingStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Reading>)>>(iter: I) -> Self {
        let store = Self::new();
        for (meter_id, readings) in iter {
            store.store_readings(meter_id, readings);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unknown_meter_is_none() {
        let store = InMemoryReadingStore::new();
        assert!(store.get_readings("smart-meter-404").is_none());
    }

    #[test]
    fn test_store_appends() {
        let store = InMemoryReadingStore::new();
        store.store_readings("smart-meter-0", vec![Reading::new(Utc::now(), dec!(0.5))]);
        store.store_readings("smart-meter-0", vec![Reading::new(Utc::now(), dec!(0.7))]);

        let readings = store.get_readings("smart-meter-0").unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].value, dec!(0.7));
    }

    #[test]
    fn test_present_but_empty_is_some() {
        let store = InMemoryReadingStore::new();
        store.store_readings("smart-meter-1", Vec::new());
        assert_eq!(store.get_readings("smart-meter-1"), Some(Vec::new()));
    }

    #[test]
    fn test_meter_ids_sorted() {
        let store: InMemoryReadingStore = vec![
            ("smart-meter-2".to_string(), Vec::new()),
            ("smart-meter-0".to_string(), Vec::new()),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.meter_ids(), vec!["smart-meter-0", "smart-meter-2"]);
        assert_eq!(store.meter_count(), 2);
    }
}
