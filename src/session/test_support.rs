// src/session/test_support.rs

use heapless::{Deque, Vec};

use crate::common::{
    crc::ChecksumCodec,
    frame::{encode_word, MAX_RAW_LEN},
    hal_traits::{Sps30Timer, Sps30Transport},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

pub(crate) type Bytes = Vec<u8, MAX_RAW_LEN>;

/// Transport that replays staged responses and records what was sent.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    pub(crate) responses: Deque<Bytes, 16>,
    pub(crate) writes: Vec<Bytes, 32>,
    pub(crate) read_lens: Vec<usize, 32>,
    pub(crate) last_address: Option<u8>,
    pub(crate) acquires: u32,
    pub(crate) releases: u32,
    pub(crate) fail_next_exchange: bool,
    pub(crate) fail_acquire: bool,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stage_response(&mut self, raw: &[u8]) {
        let bytes = Bytes::from_slice(raw).expect("staged response too long");
        self.responses.push_back(bytes).expect("too many staged responses");
    }

    fn log_write(&mut self, address: u8, write: &[u8]) {
        self.last_address = Some(address);
        let bytes = Bytes::from_slice(write).expect("command too long");
        self.writes.push(bytes).expect("write log full");
    }

    /// Commands sent so far, as their 2-byte opcodes.
    pub(crate) fn opcodes(&self) -> std::vec::Vec<[u8; 2]> {
        self.writes.iter().map(|w| [w[0], w[1]]).collect()
    }
}

impl Sps30Transport for MockTransport {
    type Error = MockCommError;

    fn exchange(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        self.log_write(address, write);
        self.read_lens.push(read.len()).expect("read log full");
        if core::mem::take(&mut self.fail_next_exchange) {
            return Err(MockCommError);
        }
        let response = self.responses.pop_front().ok_or(MockCommError)?;
        assert_eq!(response.len(), read.len(), "staged response has the wrong length");
        read.copy_from_slice(&response);
        Ok(())
    }

    fn write_only(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.log_write(address, write);
        if core::mem::take(&mut self.fail_next_exchange) {
            return Err(MockCommError);
        }
        Ok(())
    }

    fn acquire(&mut self) -> Result<(), Self::Error> {
        if self.fail_acquire {
            return Err(MockCommError);
        }
        self.acquires += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

/// Timer that records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub(crate) struct MockTimer {
    pub(crate) delays: Vec<u32, 32>,
}

impl Sps30Timer for MockTimer {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms).expect("delay log full");
    }
}

/// Frames 16-bit words with the default CRC, as the sensor would send them.
pub(crate) fn words(words: &[[u8; 2]]) -> std::vec::Vec<u8> {
    let codec = ChecksumCodec::default();
    words.iter().flat_map(|w| encode_word(&codec, *w)).collect()
}

/// Frames an arbitrary even-length payload.
pub(crate) fn framed(payload: &[u8]) -> std::vec::Vec<u8> {
    let pairs: std::vec::Vec<[u8; 2]> = payload.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
    words(&pairs)
}
