// src/common/error.rs

/// Errors produced by the SPS30 protocol core.
///
/// `E` is the error type of the underlying transport. It is carried through
/// unchanged in [`Sps30Error::Io`].
#[derive(Debug, thiserror::Error)]
pub enum Sps30Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the transport implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// Raw response length is not a multiple of the 3-byte checksum group.
    #[error("Malformed frame: {len} bytes is not a whole number of checksum groups")]
    MalformedFrame { len: usize },

    /// A checksum group failed validation. `offset` is the index of the
    /// group's first byte within the raw response.
    #[error("CRC mismatch at byte {offset}: expected {expected:#04x}, calculated {calculated:#04x}")]
    ChecksumMismatch { offset: usize, expected: u8, calculated: u8 },

    /// Decoded payload is shorter than the decoder needs.
    #[error("Payload too short: needed {needed}, got {got}")]
    PayloadTooShort { needed: usize, got: usize },

    /// Raw response is larger than any response this protocol defines.
    #[error("Payload too long: max {max}, got {got}")]
    PayloadTooLong { max: usize, got: usize },

    /// The sensor did not report new data within the polling budget.
    #[error("No measurement data available")]
    NoDataAvailable,
}

impl<E: core::fmt::Debug> Sps30Error<E> {
    /// Returns `true` for errors caused by corrupted or malformed bytes on
    /// the wire, as opposed to transport failures or an idle sensor.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Sps30Error::MalformedFrame { .. }
                | Sps30Error::ChecksumMismatch { .. }
                | Sps30Error::PayloadTooShort { .. }
                | Sps30Error::PayloadTooLong { .. }
        )
    }
}
