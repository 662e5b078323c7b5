//! Synthetic reading generator
//!
//! Produces one reading per hour going back from an anchor instant. Values are
//! `(g + 1) / 2` for a standard-normal draw `g`, so they center on 0.5 but are
//! not clamped: negative values and values above 1 do occur.
//!
//! The default source is seeded from OS entropy, so two generators never
//! produce the same sequence. Use [`ReadingGenerator::seeded`] or
//! [`ReadingGenerator::new`] with your own RNG for reproducible output.

use chrono::{DateTime, Duration, Utc};
use meterbill_common::Reading;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use rust_decimal::Decimal;
use tracing::debug;

/// Generate `count` readings ending now, using a fresh entropy-seeded source
pub fn generate_readings(count: usize) -> Vec<Reading> {
    ReadingGenerator::from_entropy().generate(count)
}

/// Hourly reading generator over an owned random source
#[derive(Debug, Clone)]
pub struct ReadingGenerator<R = StdRng> {
    rng: R,
}

impl ReadingGenerator<StdRng> {
    /// Generator seeded from OS entropy (non-reproducible)
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Generator with a fixed seed (reproducible)
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for ReadingGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> ReadingGenerator<R> {
    /// Create a generator drawing from the given source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `count` readings, the newest stamped with the current time
    pub fn generate(&mut self, count: usize) -> Vec<Reading> {
        self.generate_at(Utc::now(), count)
    }

    /// Generate `count` readings at `anchor`, `anchor - 1h`, `anchor - 2h`, ...
    pub fn generate_at(&mut self, anchor: DateTime<Utc>, count: usize) -> Vec<Reading> {
        let readings: Vec<Reading> = (0..count)
            .map(|i| {
                let timestamp = anchor - Duration::hours(i as i64);
                Reading::new(timestamp, self.next_value())
            })
            .collect();

        debug!(count = readings.len(), anchor = %anchor, "Generated readings");
        readings
    }

    fn next_value(&mut self) -> Decimal {
        let gaussian: f64 = self.rng.sample(StandardNormal);
        Decimal::try_from((gaussian + 1.0) / 2.0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generates_exact_count() {
        let mut generator = ReadingGenerator::seeded(7);
        assert_eq!(generator.generate(5).len(), 5);
        assert_eq!(generator.generate(1).len(), 1);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate_readings(0).is_empty());
    }

    #[test]
    fn test_hourly_descending_timestamps() {
        let anchor = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let readings = ReadingGenerator::seeded(42).generate_at(anchor, 5);

        assert_eq!(readings[0].timestamp, anchor);
        for pair in readings.windows(2) {
            assert_eq!(pair[0].timestamp - pair[1].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let anchor = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let first = ReadingGenerator::seeded(1234).generate_at(anchor, 20);
        let second = ReadingGenerator::seeded(1234).generate_at(anchor, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_values_center_on_half() {
        let readings = ReadingGenerator::seeded(99).generate(2000);
        let sum: Decimal = readings.iter().map(|r| r.value).sum();
        let mean = sum / Decimal::from(readings.len());

        // Standard error of the mean is 0.5 / sqrt(2000) ≈ 0.011
        assert!(mean > Decimal::new(45, 2) && mean < Decimal::new(55, 2), "mean was {}", mean);
    }
}
