// src/common/config.rs

use core::time::Duration;

use super::crc::{ChecksumParams, DEFAULT_CRC_INIT, DEFAULT_CRC_POLY};
use super::timing;

/// Default I2C address of the SPS30.
pub const DEFAULT_ADDRESS: u8 = 0x69;

/// Settings fixed when a session is built.
///
/// The defaults match every SPS30; the fields exist for boards that remap
/// the address and for related parts with a different CRC setup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub address: u8,
    pub checksum: ChecksumParams,
    pub poll: PollPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            checksum: ChecksumParams { init: DEFAULT_CRC_INIT, polynomial: DEFAULT_CRC_POLY },
            poll: PollPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_crc_init(mut self, init: u8) -> Self {
        self.checksum.init = init;
        self
    }

    pub fn with_crc_polynomial(mut self, polynomial: u16) -> Self {
        self.checksum.polynomial = polynomial;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}

/// Bounds of the data-ready polling loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Total data-ready queries, the first one included. Values below 1 are
    /// treated as 1.
    pub max_attempts: u32,
    /// Wait before every query except the first.
    pub backoff: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { max_attempts: timing::MAX_POLL_ATTEMPTS, backoff: timing::POLL_BACKOFF }
    }
}
