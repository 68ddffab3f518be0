// src/common/types.rs

use arrayvec::ArrayString;
use core::fmt;

use super::error::Sps30Error;

/// Capacity of the ASCII identifiers reported by the sensor.
pub const MAX_IDENT_LEN: usize = 32;

/// Serial number or product type string.
pub type Ident = ArrayString<MAX_IDENT_LEN>;

/// Keeps printable ASCII (0x21..=0x7E) in order and drops everything else,
/// including the NUL padding the sensor sends after the text.
pub fn printable_ascii(payload: &[u8]) -> Ident {
    let mut out = Ident::new();
    for &b in payload.iter().filter(|b| (0x21..=0x7E).contains(*b)) {
        if out.try_push(b as char).is_err() {
            break;
        }
    }
    out
}

/// Reads the data-ready flag from a decoded data-ready response.
pub fn data_ready_flag<E>(payload: &[u8]) -> Result<bool, Sps30Error<E>>
where
    E: core::fmt::Debug,
{
    payload
        .get(1)
        .map(|&flag| flag != 0)
        .ok_or(Sps30Error::PayloadTooShort { needed: 2, got: payload.len() })
}

/// Reads a big-endian `u32` from the first four bytes of a payload.
pub fn be_u32<E>(payload: &[u8]) -> Result<u32, Sps30Error<E>>
where
    E: core::fmt::Debug,
{
    match payload {
        [b0, b1, b2, b3, ..] => Ok(u32::from_be_bytes([*b0, *b1, *b2, *b3])),
        _ => Err(Sps30Error::PayloadTooShort { needed: 4, got: payload.len() }),
    }
}

/// Device status register.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatus(u32);

impl DeviceStatus {
    const SPEED_WARNING: u32 = 1 << 21;
    const LASER_ERROR: u32 = 1 << 5;
    const FAN_ERROR: u32 = 1 << 4;

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Fan speed out of range.
    pub fn speed_warning(&self) -> bool {
        self.0 & Self::SPEED_WARNING != 0
    }

    /// Laser current out of range.
    pub fn laser_error(&self) -> bool {
        self.0 & Self::LASER_ERROR != 0
    }

    /// Fan switched on but measured speed is 0 RPM.
    pub fn fan_error(&self) -> bool {
        self.0 & Self::FAN_ERROR != 0
    }

    pub fn is_ok(&self) -> bool {
        !(self.speed_warning() || self.laser_error() || self.fan_error())
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status {:#010x} (speed warning: {}, laser error: {}, fan error: {})",
            self.0,
            self.speed_warning(),
            self.laser_error(),
            self.fan_error()
        )
    }
}
