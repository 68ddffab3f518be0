// src/common/frame.rs

//! Checksum framing.
//!
//! Every 16-bit word on the wire is followed by its CRC-8, so a response is a
//! sequence of 3-byte groups `[data, data, crc]`.

use arrayvec::ArrayVec;

use super::crc::ChecksumCodec;
use super::error::Sps30Error;

/// Bytes per checksum group (2 data + 1 CRC).
pub const GROUP_LEN: usize = 3;
/// Data bytes per checksum group.
pub const WORD_LEN: usize = 2;
/// Largest raw response the sensor produces (read measurement).
pub const MAX_RAW_LEN: usize = 60;
/// Largest decoded payload.
pub const MAX_PAYLOAD_LEN: usize = MAX_RAW_LEN / GROUP_LEN * WORD_LEN;

/// Data bytes recovered from a checksum-framed response.
pub type DecodedPayload = ArrayVec<u8, MAX_PAYLOAD_LEN>;

/// Validates and strips the checksum bytes of a raw response.
///
/// Decoding stops at the first group whose CRC does not match; nothing from
/// a corrupted response is returned.
pub fn decode<E>(codec: &ChecksumCodec, raw: &[u8]) -> Result<DecodedPayload, Sps30Error<E>>
where
    E: core::fmt::Debug,
{
    if raw.len() % GROUP_LEN != 0 {
        return Err(Sps30Error::MalformedFrame { len: raw.len() });
    }
    if raw.len() > MAX_RAW_LEN {
        return Err(Sps30Error::PayloadTooLong { max: MAX_RAW_LEN, got: raw.len() });
    }

    let mut payload = DecodedPayload::new();
    for (index, group) in raw.chunks_exact(GROUP_LEN).enumerate() {
        let word = &group[..WORD_LEN];
        let expected = group[WORD_LEN];
        let calculated = codec.compute(word);
        if calculated != expected {
            return Err(Sps30Error::ChecksumMismatch {
                offset: index * GROUP_LEN,
                expected,
                calculated,
            });
        }
        // Capacity was checked against MAX_RAW_LEN above.
        payload.extend(word.iter().copied());
    }
    Ok(payload)
}

/// Appends the CRC to a single 16-bit word.
#[inline]
pub fn encode_word(codec: &ChecksumCodec, word: [u8; WORD_LEN]) -> [u8; GROUP_LEN] {
    [word[0], word[1], codec.compute(&word)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> ChecksumCodec {
        ChecksumCodec::default()
    }

    #[test]
    fn test_decode_single_group() {
        let payload = decode::<()>(&codec(), &[0xBE, 0xEF, 0x92]).unwrap();
        assert_eq!(payload.as_slice(), &[0xBE, 0xEF]);
    }

    #[test]
    fn test_decode_bad_crc() {
        let result = decode::<()>(&codec(), &[0xBE, 0xEF, 0x00]);
        assert!(matches!(
            result,
            Err(Sps30Error::ChecksumMismatch { offset: 0, expected: 0x00, calculated: 0x92 })
        ));
    }

    #[test]
    fn test_decode_preserves_order() {
        let c = codec();
        let mut raw = [0u8; 12];
        let words = [[0x01, 0x02], [0x03, 0x04], [0x05, 0x06], [0x07, 0x08]];
        for (i, w) in words.iter().enumerate() {
            raw[i * 3..i * 3 + 3].copy_from_slice(&encode_word(&c, *w));
        }
        let payload = decode::<()>(&c, &raw).unwrap();
        assert_eq!(payload.len(), 8);
        assert_eq!(payload.as_slice(), &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn test_decode_aborts_on_any_corrupted_crc_byte() {
        let c = codec();
        let mut raw = [0u8; 9];
        for i in 0..3u8 {
            let g = encode_word(&c, [i, i.wrapping_mul(17)]);
            raw[i as usize * 3..i as usize * 3 + 3].copy_from_slice(&g);
        }
        for group in 0..3 {
            let mut corrupted = raw;
            corrupted[group * 3 + 2] ^= 0x01;
            match decode::<()>(&c, &corrupted) {
                Err(Sps30Error::ChecksumMismatch { offset, .. }) => assert_eq!(offset, group * 3),
                other => panic!("Expected checksum mismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_decode_malformed_length() {
        assert!(matches!(
            decode::<()>(&codec(), &[0xBE, 0xEF]),
            Err(Sps30Error::MalformedFrame { len: 2 })
        ));
        assert!(matches!(
            decode::<()>(&codec(), &[0xBE, 0xEF, 0x92, 0x00]),
            Err(Sps30Error::MalformedFrame { len: 4 })
        ));
    }

    #[test]
    fn test_decode_empty() {
        let payload = decode::<()>(&codec(), &[]).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_decode_too_long() {
        let raw = [0u8; MAX_RAW_LEN + GROUP_LEN];
        assert!(matches!(
            decode::<()>(&codec(), &raw),
            Err(Sps30Error::PayloadTooLong { max: MAX_RAW_LEN, got: 63 })
        ));
    }

    #[test]
    fn test_encode_word() {
        assert_eq!(encode_word(&codec(), [0x03, 0x00]), [0x03, 0x00, 0xAC]);
        assert_eq!(encode_word(&codec(), [0xBE, 0xEF]), [0xBE, 0xEF, 0x92]);
    }
}
