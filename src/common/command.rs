//! SPS30 I2C command set.
//!
//! Every command starts with a 16-bit command code. Arguments, where a
//! command takes any, follow as checksummed 16-bit words.

use arrayvec::ArrayVec;

use super::crc::ChecksumCodec;
use super::frame::{encode_word, GROUP_LEN};

/// Output format argument of Start Measurement: big-endian IEEE-754 floats.
pub const OUTPUT_FORMAT_FLOAT: [u8; 2] = [0x03, 0x00];

/// Longest request: command code plus two checksummed words.
pub const MAX_COMMAND_LEN: usize = 2 + 2 * GROUP_LEN;

/// Bytes of an outgoing request.
pub type CommandFrame = ArrayVec<u8, MAX_COMMAND_LEN>;

/// Represents an SPS30 command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start Measurement (`0x0010`) with float output format. No response.
    StartMeasurement,
    /// Stop Measurement (`0x0104`). No response.
    StopMeasurement,
    /// Read Data-Ready Flag (`0x0202`). One word.
    ReadDataReady,
    /// Read Measured Values (`0x0300`). Twenty words in float mode.
    ReadMeasuredValues,
    /// Read Auto Cleaning Interval (`0x8004`). Two words.
    ReadAutoCleaningInterval,
    /// Write Auto Cleaning Interval (`0x8004`) in seconds. No response.
    WriteAutoCleaningInterval { seconds: u32 },
    /// Start Fan Cleaning (`0x5607`). Only accepted while measuring.
    StartFanCleaning,
    /// Read Product Type (`0xD002`). Four words of ASCII.
    ReadProductType,
    /// Read Serial Number (`0xD033`). Sixteen words of NUL-padded ASCII.
    ReadSerialNumber,
    /// Read Device Status Register (`0xD206`). Two words.
    ReadDeviceStatus,
    /// Device Reset (`0xD304`). No response.
    Reset,
}

impl Command {
    /// The 16-bit command code, most significant byte first.
    pub const fn opcode(&self) -> [u8; 2] {
        match self {
            Command::StartMeasurement => [0x00, 0x10],
            Command::StopMeasurement => [0x01, 0x04],
            Command::ReadDataReady => [0x02, 0x02],
            Command::ReadMeasuredValues => [0x03, 0x00],
            Command::ReadAutoCleaningInterval => [0x80, 0x04],
            Command::WriteAutoCleaningInterval { .. } => [0x80, 0x04],
            Command::StartFanCleaning => [0x56, 0x07],
            Command::ReadProductType => [0xD0, 0x02],
            Command::ReadSerialNumber => [0xD0, 0x33],
            Command::ReadDeviceStatus => [0xD2, 0x06],
            Command::Reset => [0xD3, 0x04],
        }
    }

    /// Raw response length in bytes, CRC bytes included. Zero means the
    /// command is write-only.
    pub const fn response_len(&self) -> usize {
        match self {
            Command::ReadDataReady => 3,
            Command::ReadMeasuredValues => 60,
            Command::ReadAutoCleaningInterval => 6,
            Command::ReadProductType => 12,
            Command::ReadSerialNumber => 48,
            Command::ReadDeviceStatus => 6,
            Command::StartMeasurement
            | Command::StopMeasurement
            | Command::WriteAutoCleaningInterval { .. }
            | Command::StartFanCleaning
            | Command::Reset => 0,
        }
    }

    pub const fn expects_response(&self) -> bool {
        self.response_len() > 0
    }

    /// Builds the request bytes, appending checksummed argument words.
    pub fn to_frame(&self, codec: &ChecksumCodec) -> CommandFrame {
        let mut frame = CommandFrame::new();
        frame.extend(self.opcode());
        match self {
            Command::StartMeasurement => {
                frame.extend(encode_word(codec, OUTPUT_FORMAT_FLOAT));
            }
            Command::WriteAutoCleaningInterval { seconds } => {
                let [b0, b1, b2, b3] = seconds.to_be_bytes();
                frame.extend(encode_word(codec, [b0, b1]));
                frame.extend(encode_word(codec, [b2, b3]));
            }
            _ => {}
        }
        frame
    }
}
