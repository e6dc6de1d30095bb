//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages the runtime behavior:
//! - Logger cache (deduplicated severity-bound handles)
//! - Channel logger (rendering/serialization and emission)
//! - Accumulation throttle (every-Nth suppression)
//! - Background emission worker
//! - Domain facades and config consumption
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod cache;
pub mod config;
pub mod facade;
pub mod logger;
pub mod metrics;
pub mod ports;
pub mod throttle;

#[cfg(feature = "async")]
pub mod worker;
