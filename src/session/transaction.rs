// src/session/transaction.rs

use log::{debug, trace, warn};

use crate::common::{
    command::Command,
    crc::ChecksumCodec,
    error::Sps30Error,
    frame::{self, DecodedPayload, MAX_RAW_LEN},
    hal_traits::Sps30Transport,
    measurement::{decode_measurement, Measurement},
    types::data_ready_flag,
};

use super::poller::MeasurementSource;

/// Exclusive hold on the bus for the duration of one exchange.
///
/// Acquired on creation, released on drop, so every exit path (including a
/// checksum failure while decoding) gives the bus back.
pub(crate) struct BusTransaction<'a, T: Sps30Transport> {
    transport: &'a mut T,
}

impl<'a, T: Sps30Transport> BusTransaction<'a, T> {
    pub(crate) fn begin(transport: &'a mut T) -> Result<Self, Sps30Error<T::Error>> {
        transport.acquire().map_err(Sps30Error::Io)?;
        trace!("bus acquired");
        Ok(Self { transport })
    }

    pub(crate) fn exchange(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Sps30Error<T::Error>> {
        self.transport.exchange(address, write, read).map_err(Sps30Error::Io)
    }

    pub(crate) fn write_only(&mut self, address: u8, write: &[u8]) -> Result<(), Sps30Error<T::Error>> {
        self.transport.write_only(address, write).map_err(Sps30Error::Io)
    }
}

impl<T: Sps30Transport> Drop for BusTransaction<'_, T> {
    fn drop(&mut self) {
        self.transport.release();
        trace!("bus released");
    }
}

/// The transport together with everything needed to frame and check bytes
/// for one device.
#[derive(Debug)]
pub(crate) struct Channel<T> {
    pub(crate) transport: T,
    pub(crate) codec: ChecksumCodec,
    pub(crate) address: u8,
}

impl<T: Sps30Transport> Channel<T> {
    /// Sends a command that has no response.
    pub(crate) fn send_command(&mut self, command: Command) -> Result<(), Sps30Error<T::Error>> {
        let frame = command.to_frame(&self.codec);
        debug!("sending {:?} ({:02X?})", command, frame.as_slice());

        let mut tx = BusTransaction::begin(&mut self.transport)?;
        tx.write_only(self.address, &frame)
    }

    /// Sends a command, reads its fixed-size response and strips the
    /// checksums.
    pub(crate) fn execute_transaction(&mut self, command: Command) -> Result<DecodedPayload, Sps30Error<T::Error>> {
        let frame = command.to_frame(&self.codec);
        let mut raw_buffer = [0u8; MAX_RAW_LEN];
        let raw = &mut raw_buffer[..command.response_len()];
        debug!("sending {:?} ({:02X?}), expecting {} bytes", command, frame.as_slice(), raw.len());

        let mut tx = BusTransaction::begin(&mut self.transport)?;
        tx.exchange(self.address, &frame, raw)?;
        trace!("received {:02X?}", raw);

        frame::decode(&self.codec, raw).map_err(|e| {
            warn!("{:?} response rejected: {:?}", command, e);
            e
        })
    }
}

impl<T: Sps30Transport> MeasurementSource for Channel<T> {
    type Error = T::Error;

    fn query_data_ready(&mut self) -> Result<bool, Sps30Error<T::Error>> {
        let payload = self.execute_transaction(Command::ReadDataReady)?;
        data_ready_flag(&payload)
    }

    fn read_measured_values(&mut self) -> Result<Measurement, Sps30Error<T::Error>> {
        let payload = self.execute_transaction(Command::ReadMeasuredValues)?;
        decode_measurement(&payload)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::{words, MockTransport, MockCommError};

    fn channel(transport: MockTransport) -> Channel<MockTransport> {
        Channel { transport, codec: ChecksumCodec::default(), address: 0x69 }
    }

    #[test]
    fn test_execute_transaction_success() {
        let mut mock = MockTransport::new();
        mock.stage_response(&[0xBE, 0xEF, 0x92]);
        let mut ch = channel(mock);

        let payload = ch.execute_transaction(Command::ReadDataReady).unwrap();
        assert_eq!(payload.as_slice(), &[0xBE, 0xEF]);
        assert_eq!(ch.transport.writes[0].as_slice(), &[0x02, 0x02]);
        assert_eq!(ch.transport.read_lens[0], 3);
        assert_eq!(ch.transport.last_address, Some(0x69));
        assert_eq!(ch.transport.acquires, 1);
        assert_eq!(ch.transport.releases, 1);
    }

    #[test]
    fn test_bus_released_after_crc_error() {
        let mut mock = MockTransport::new();
        mock.stage_response(&[0xBE, 0xEF, 0x00]);
        let mut ch = channel(mock);

        let result = ch.execute_transaction(Command::ReadDataReady);
        assert!(matches!(result, Err(Sps30Error::ChecksumMismatch { .. })));
        assert_eq!(ch.transport.acquires, 1);
        assert_eq!(ch.transport.releases, 1);
    }

    #[test]
    fn test_bus_released_after_io_error() {
        let mut mock = MockTransport::new();
        mock.fail_next_exchange = true;
        let mut ch = channel(mock);

        let result = ch.execute_transaction(Command::ReadSerialNumber);
        assert!(matches!(result, Err(Sps30Error::Io(MockCommError))));
        assert_eq!(ch.transport.releases, 1);
    }

    #[test]
    fn test_failed_acquire_skips_exchange_and_release() {
        let mut mock = MockTransport::new();
        mock.fail_acquire = true;
        let mut ch = channel(mock);

        let result = ch.send_command(Command::StopMeasurement);
        assert!(matches!(result, Err(Sps30Error::Io(MockCommError))));
        assert!(ch.transport.writes.is_empty());
        assert_eq!(ch.transport.releases, 0);
    }

    #[test]
    fn test_send_command_write_only() {
        let mut ch = channel(MockTransport::new());
        ch.send_command(Command::StartMeasurement).unwrap();
        assert_eq!(ch.transport.writes[0].as_slice(), &[0x00, 0x10, 0x03, 0x00, 0xAC]);
        assert!(ch.transport.read_lens.is_empty());
        assert_eq!(ch.transport.releases, 1);
    }

    #[test]
    fn test_query_data_ready() {
        let mut mock = MockTransport::new();
        mock.stage_response(&words(&[[0x00, 0x01]]));
        mock.stage_response(&words(&[[0x00, 0x00]]));
        let mut ch = channel(mock);
        assert!(ch.query_data_ready().unwrap());
        assert!(!ch.query_data_ready().unwrap());
    }
}
