// src/session/mod.rs

mod poller;
mod transaction;

#[cfg(test)]
mod test_support;

use log::{debug, info};

use crate::common::{
    command::Command,
    config::SessionConfig,
    crc::ChecksumCodec,
    error::Sps30Error,
    hal_traits::{Sps30Timer, Sps30Transport},
    measurement::Measurement,
    timing,
    types::{be_u32, data_ready_flag, printable_ascii, DeviceStatus, Ident},
};

use poller::ReadinessPoller;
use transaction::Channel;

/// A blocking session with one SPS30.
///
/// Owns the transport and the delay source. Every operation is one
/// command/response exchange, except [`read_measurement`](Self::read_measurement)
/// which polls a bounded number of times.
#[derive(Debug)]
pub struct Sps30<T, D>
where
    T: Sps30Transport,
    D: Sps30Timer,
{
    channel: Channel<T>,
    timer: D,
    config: SessionConfig,
}

impl<T, D> Sps30<T, D>
where
    T: Sps30Transport,
    D: Sps30Timer,
{
    /// Creates a session with the default address (0x69) and CRC settings.
    pub fn new(transport: T, timer: D) -> Self {
        Self::with_config(transport, timer, SessionConfig::default())
    }

    pub fn with_config(transport: T, timer: D, config: SessionConfig) -> Self {
        Sps30 {
            channel: Channel {
                transport,
                codec: ChecksumCodec::new(config.checksum),
                address: config.address,
            },
            timer,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Gives back the transport and timer.
    pub fn release(self) -> (T, D) {
        (self.channel.transport, self.timer)
    }

    // --- Public Blocking Methods ---

    /// Starts continuous measurement with big-endian float output.
    pub fn start_measurement(&mut self) -> Result<(), Sps30Error<T::Error>> {
        self.channel.send_command(Command::StartMeasurement)
    }

    /// Returns the sensor to idle mode.
    pub fn stop_measurement(&mut self) -> Result<(), Sps30Error<T::Error>> {
        self.channel.send_command(Command::StopMeasurement)
    }

    /// Queries the data-ready flag once, without polling.
    pub fn read_data_ready(&mut self) -> Result<bool, Sps30Error<T::Error>> {
        let payload = self.channel.execute_transaction(Command::ReadDataReady)?;
        data_ready_flag(&payload)
    }

    /// Waits for new data and reads it.
    ///
    /// Polls the data-ready flag up to the configured number of attempts,
    /// sleeping between polls. Returns [`Sps30Error::NoDataAvailable`] if
    /// the sensor never reports data, which is normal shortly after
    /// [`start_measurement`](Self::start_measurement).
    pub fn read_measurement(&mut self) -> Result<Measurement, Sps30Error<T::Error>> {
        ReadinessPoller::new(self.config.poll).run(&mut self.channel, &mut self.timer)
    }

    /// Runs the fan at full speed for 10 seconds. Only valid while measuring.
    pub fn start_fan_cleaning(&mut self) -> Result<(), Sps30Error<T::Error>> {
        self.channel.send_command(Command::StartFanCleaning)
    }

    pub fn serial_number(&mut self) -> Result<Ident, Sps30Error<T::Error>> {
        let payload = self.channel.execute_transaction(Command::ReadSerialNumber)?;
        let serial = printable_ascii(&payload);
        debug!("serial number {}", serial);
        Ok(serial)
    }

    pub fn product_type(&mut self) -> Result<Ident, Sps30Error<T::Error>> {
        let payload = self.channel.execute_transaction(Command::ReadProductType)?;
        Ok(printable_ascii(&payload))
    }

    /// Auto cleaning interval in seconds.
    pub fn read_auto_cleaning_interval(&mut self) -> Result<u32, Sps30Error<T::Error>> {
        let payload = self.channel.execute_transaction(Command::ReadAutoCleaningInterval)?;
        be_u32(&payload)
    }

    /// Sets the auto cleaning interval in seconds. Zero disables it.
    pub fn write_auto_cleaning_interval(&mut self, seconds: u32) -> Result<(), Sps30Error<T::Error>> {
        self.channel.send_command(Command::WriteAutoCleaningInterval { seconds })
    }

    pub fn read_device_status(&mut self) -> Result<DeviceStatus, Sps30Error<T::Error>> {
        let payload = self.channel.execute_transaction(Command::ReadDeviceStatus)?;
        be_u32(&payload).map(DeviceStatus::new)
    }

    /// Resets the sensor and ends the session.
    ///
    /// On success the transport and timer are handed back after the
    /// sensor's start-up time; build a new session to keep talking to it.
    /// If the reset command could not be sent the session is returned
    /// unchanged with the error.
    pub fn reset(mut self) -> Result<(T, D), (Self, Sps30Error<T::Error>)> {
        if let Err(e) = self.channel.send_command(Command::Reset) {
            return Err((self, e));
        }
        info!("sensor reset, session closed");
        self.timer.delay_ms(timing::as_delay_ms(timing::RESET_STARTUP));
        Ok(self.release())
    }
}
