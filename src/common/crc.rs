// src/common/crc.rs

use crc::{Algorithm, Crc};

/// Default CRC initial value used by Sensirion sensors.
pub const DEFAULT_CRC_INIT: u8 = 0xFF;
/// Default CRC polynomial, including the implicit x^8 term (0x31 | 0x100).
pub const DEFAULT_CRC_POLY: u16 = 0x131;

/// CRC-8 algorithm used by Sensirion I2C sensors (same as CRC-8/NRSC-5).
/// Polynomial: 0x31 (x^8 + x^5 + x^4 + 1)
/// Initial Value: 0xFF
/// Input Reflected: false
/// Output Reflected: false
/// Final XOR: 0x00
/// Check Value: 0xF7 (for "123456789")
pub const SENSIRION_CRC8: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

// Table-driven engine for the default parameters.
const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&SENSIRION_CRC8);

/// Parameters of the CRC-8 register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChecksumParams {
    pub init: u8,
    /// 9-bit generator. The top bit cancels the bit shifted out of the
    /// register; an 8-bit value works the same way.
    pub polynomial: u16,
}

impl Default for ChecksumParams {
    fn default() -> Self {
        Self { init: DEFAULT_CRC_INIT, polynomial: DEFAULT_CRC_POLY }
    }
}

impl ChecksumParams {
    fn is_default(&self) -> bool {
        self.init == DEFAULT_CRC_INIT && (self.polynomial & 0xFF) == (DEFAULT_CRC_POLY & 0xFF)
    }
}

/// Computes and verifies the CRC-8 that follows every 16-bit word on the wire.
///
/// The parameters are fixed when the codec is built and cannot change
/// afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChecksumCodec {
    params: ChecksumParams,
}

impl Default for ChecksumCodec {
    fn default() -> Self {
        Self::new(ChecksumParams::default())
    }
}

impl ChecksumCodec {
    pub const fn new(params: ChecksumParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> ChecksumParams {
        self.params
    }

    /// Calculates the CRC-8 of `data`.
    ///
    /// Uses the `crc` crate's lookup table when the parameters are the
    /// Sensirion defaults, and the bitwise register otherwise.
    #[inline]
    pub fn compute(&self, data: &[u8]) -> u8 {
        if self.params.is_default() {
            CRC_COMPUTER.checksum(data)
        } else {
            compute_bitwise(self.params, data)
        }
    }

    /// Returns `true` if `expected` is the CRC-8 of `data`.
    #[inline]
    pub fn validate(&self, data: &[u8], expected: u8) -> bool {
        self.compute(data) == expected
    }
}

/// Bit-at-a-time CRC-8 register.
///
/// The accumulator is masked to 8 bits after each shift so that a 9-bit
/// polynomial cancels the carried-out bit instead of growing the register.
pub fn compute_bitwise(params: ChecksumParams, data: &[u8]) -> u8 {
    let mut crc = u16::from(params.init);
    for &byte in data {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                ((crc << 1) ^ params.polynomial) & 0xFF
            } else {
                (crc << 1) & 0xFF
            };
        }
    }
    crc as u8
}
