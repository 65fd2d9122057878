//! Content-store lookup client for delivery records.
//!
//! Wraps the store's HTTP query API with bearer authentication, a fixed
//! six-field projection, and a fail-soft policy: every lookup failure is
//! logged and degrades to an empty result set, so a store outage reads as
//! "no delivery found" rather than an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{LookupClient, StoreConfig};
pub use error::{LookupError, Result};
