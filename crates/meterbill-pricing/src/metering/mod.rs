//! Metering module
//!
//! Provides the reading side of cost estimation:
//! - ReadingGenerator: Synthetic hourly readings for demos and seeding
//! - ReadingStore: Lookup of readings by meter id

pub mod generator;
pub mod store;

pub use generator::{generate_readings, ReadingGenerator};
pub use store::{InMemoryReadingStore, ReadingStore};
