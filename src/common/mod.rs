// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod crc;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod measurement;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, CommandFrame};

// From config.rs
pub use config::{PollPolicy, SessionConfig, DEFAULT_ADDRESS};

// From crc.rs
pub use crc::{ChecksumCodec, ChecksumParams};

// From error.rs
pub use error::Sps30Error;

// From frame.rs
pub use frame::DecodedPayload;

// From hal_traits.rs
pub use hal_traits::{Sps30Timer, Sps30Transport};
#[cfg(feature = "std")]
pub use hal_traits::StdTimer;
#[cfg(feature = "impl-generic-hal")]
pub use hal_traits::{HalDelay, HalTransport};

// From measurement.rs
pub use measurement::{decode_float, decode_measurement, Measurement};

// From types.rs
pub use types::{DeviceStatus, Ident};
