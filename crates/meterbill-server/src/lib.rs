//! # Meterbill Server
//!
//! REST service comparing a smart meter's electricity cost across price plans.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 api::router                  │
//! │  readings │ compare-all │ by-day │ recommend │
//! └─────┬─────────────────┬──────────────────────┘
//!       │                 │
//! ┌─────┴──────────┐ ┌────┴───────────────────────┐
//! │ InMemory       │ │ CostAggregator             │
//! │ ReadingStore   │◄┤ (catalog + cost policy)    │
//! └────────────────┘ └────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod state;

pub use api::router;
pub use config::ServerConfig;
pub use state::AppState;
