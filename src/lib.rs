//! Sound level metering over a fixed-size sample buffer.
//!
//! [`VolumeMeter`] computes an instantaneous RMS level and a slowly decaying
//! average of it. The `soundmeter-wasm` crate exposes it to JavaScript.

pub mod config;
pub mod error;
pub mod meter;
pub mod schedule;
pub mod types;

pub use config::MeterConfig;
pub use error::{MeterError, Result};
pub use meter::VolumeMeter;
pub use schedule::UpdateSchedule;
pub use types::MeterReading;
