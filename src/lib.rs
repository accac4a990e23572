//! DHT11 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! Instead of timing each bit with a microsecond delay, the driver samples the
//! data line as fast as the pin allows, records the raw trace, and decodes it
//! afterwards. Pulse widths are measured in samples and split into 0 and 1
//! against the midpoint of the shortest and longest pulse of the same
//! reading, so the decoder works at any sampling rate fast enough to resolve
//! the pulses.
//!
//! # Pipeline
//! - [`signal`]: sample collection until the line goes idle
//! - [`pulse`]: segmentation of the trace into one width per data bit
//! - [`frame`]: thresholding, bit packing, and checksum validation
//! - [`dht11`]: start request, driver, [`decode_frame`] and [`decode_trace`]
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments with an allocator
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access
//! - [`DelayNs`] for the start request timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs decode failures
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod dht11;
pub mod error;
pub mod frame;
pub mod pulse;
pub mod signal;

pub use dht11::{Dht11, Reading, decode_frame, decode_trace};
pub use error::DhtError;
pub use frame::Frame;
pub use signal::{CollectConfig, Level};
