#![doc(test(attr(deny(warnings))))]

//! Car Cost Core compares what a vehicle costs per month when it is leased
//! through an employer, leased privately or bought outright, and keeps a small
//! JSON-backed garage of vehicles whose running totals it can project.

pub mod cli;
pub mod config;
pub mod core;
pub mod cost;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Car Cost Core tracing initialized.");
    });
}
