//! Bot service wiring for the Marginalia reading diary.
//!
//! Owns configuration loading, the delivery channel seam, and the dispatch
//! path tying inbound interactions to the dialogue state machine. The
//! dialogue layer never sees a concrete chat platform; implementations of
//! [`DeliveryChannel`] adapt one.

#![warn(missing_docs)]

mod channel;
mod config;
mod service;
mod telemetry;

pub use channel::DeliveryChannel;
pub use config::{BotConfig, DATABASE_URL_VAR, DatabaseConfig, SessionConfig};
pub use service::BotService;
pub use telemetry::init_tracing;
