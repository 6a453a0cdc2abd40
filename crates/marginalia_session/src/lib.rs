//! In-flight dialogue session storage.
//!
//! Holds partially-constructed drafts between dialogue steps, keyed by the
//! correlation token of the workflow that opened them. Sessions expire
//! after a configurable TTL so that abandoned workflows do not accumulate
//! for the lifetime of the process; expired entries are dropped
//! opportunistically on store access.

#![warn(missing_docs)]

mod store;

pub use store::{Session, SessionStore, SessionStoreConfig};
