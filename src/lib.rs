// src/lib.rs

//! Protocol core for the Sensirion SPS30 particulate matter sensor.
//!
//! The sensor speaks a command/response protocol in which every 16-bit word
//! is followed by a CRC-8. This crate builds the command frames, strips and
//! checks the CRCs, decodes measurements, and runs the bounded data-ready
//! polling loop. The byte transport and the delay source are supplied by the
//! caller through [`Sps30Transport`] and [`Sps30Timer`].
//!
//! ```ignore
//! use sps30::{Sps30, HalDelay, HalTransport};
//!
//! let mut sensor = Sps30::new(HalTransport::new(i2c), HalDelay(delay));
//! sensor.start_measurement()?;
//! match sensor.read_measurement() {
//!     Ok(m) => log::info!("PM2.5: {} µg/m³", m.mass_pm2_5),
//!     Err(sps30::Sps30Error::NoDataAvailable) => {}
//!     Err(e) => return Err(e),
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)] // no_std unless testing or `std` is enabled

pub mod common;
pub mod session;

// Re-export key types for convenience
pub use common::{
    ChecksumCodec, ChecksumParams, Command, DeviceStatus, Ident, Measurement, PollPolicy,
    SessionConfig, Sps30Error, Sps30Timer, Sps30Transport,
};
#[cfg(feature = "std")]
pub use common::StdTimer;
#[cfg(feature = "impl-generic-hal")]
pub use common::{HalDelay, HalTransport};
pub use session::Sps30;
