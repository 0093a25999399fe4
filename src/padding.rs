//! Strict PKCS#7 padding.
//!
//! `unpad` rejects malformed padding outright instead of silently stripping
//! whatever the last byte claims. A permissive version of this check is what
//! turns a decryption endpoint into a padding oracle.

use crate::error::Error;
use crate::modes::BLOCK_SIZE;

/// Pad `data` out to the next multiple of `block_size`.
///
/// Padding is never omitted: already-aligned input gains a full extra block
/// of `block_size` bytes, so the output is always the smallest multiple of
/// `block_size` strictly greater than the input length.
///
/// # Panics
///
/// If `block_size` is zero or greater than 255 -- a pad byte must encode
/// the whole pad length.
#[must_use]
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    assert!(
        (1..=255).contains(&block_size),
        "block_size must be in 1..=255"
    );

    let diff = block_size - data.len() % block_size;

    let mut padded = data.to_vec();
    #[allow(clippy::cast_possible_truncation)]
    padded.resize(data.len() + diff, diff as u8);
    padded
}

/// Validate and remove PKCS#7 padding from `data`.
///
/// The last byte names the pad length `n`; every one of the last `n` bytes
/// must equal `n`, with `1 <= n <= 16`. Anything else is an error, and no
/// partial result is returned.
///
/// # Errors
///
/// `PaddingMissing` on empty input; `PaddingByte` if the pad length is 0,
/// greater than the block size, or longer than the input itself;
/// `PaddingRun` if any byte of the claimed pad differs from the pad length.
pub fn unpad(data: &[u8]) -> Result<Vec<u8>, Error> {
    let &byte = data.last().ok_or(Error::PaddingMissing)?;
    let n = byte as usize;

    if n == 0 || n > BLOCK_SIZE || n > data.len() {
        return Err(Error::PaddingByte { byte });
    }

    let (rest, run) = data.split_at(data.len() - n);
    if run.iter().any(|&b| b != byte) {
        return Err(Error::PaddingRun { byte });
    }

    Ok(rest.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_partial_block() {
        let input = b"YELLOW SUBMARINE";
        let expected = b"YELLOW SUBMARINE\x04\x04\x04\x04";

        assert_eq!(pad(input, 20), expected);
    }

    #[test]
    fn test_pad_aligned_input_gains_full_block() {
        let input = [0u8; 16];

        let padded = pad(&input, 16);

        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn test_pad_strictly_increases_length() {
        for len in 0..=48 {
            let input = vec![b'A'; len];
            let padded = pad(&input, 16);
            assert!(padded.len() > len);
            assert_eq!(padded.len() % 16, 0);
        }
    }

    #[test]
    fn test_unpad_valid() {
        let input = b"ICE ICE BABY\x04\x04\x04\x04";

        assert_eq!(unpad(input).unwrap(), b"ICE ICE BABY");
    }

    #[test]
    fn test_unpad_rejects_short_run() {
        let input = b"ICE ICE BABY\x05\x05\x05\x05";

        assert!(matches!(
            unpad(input),
            Err(Error::PaddingRun { byte: 0x05 })
        ));
    }

    #[test]
    fn test_unpad_rejects_mixed_run() {
        let input = b"ICE ICE BABY\x01\x02\x03\x04";

        assert!(matches!(
            unpad(input),
            Err(Error::PaddingRun { byte: 0x04 })
        ));
    }

    #[test]
    fn test_unpad_rejects_unpadded_block() {
        // 16 bytes with no pad block: the last byte 'E' (0x45) is out of
        // range for a pad length.
        let input = b"YELLOW SUBMARINE";

        assert!(matches!(
            unpad(input),
            Err(Error::PaddingByte { byte: 0x45 })
        ));
    }

    #[test]
    fn test_unpad_rejects_zero_pad_byte() {
        assert!(matches!(
            unpad(b"AAAA\x00"),
            Err(Error::PaddingByte { byte: 0 })
        ));
    }

    #[test]
    fn test_unpad_empty_input_reported_distinctly() {
        assert!(matches!(unpad(b""), Err(Error::PaddingMissing)));
    }

    #[test]
    #[should_panic(expected = "block_size must be in 1..=255")]
    fn test_pad_rejects_zero_block_size() {
        let _ = pad(b"abc", 0);
    }

    #[test]
    #[should_panic(expected = "block_size must be in 1..=255")]
    fn test_pad_rejects_oversized_block_size() {
        let _ = pad(b"abc", 256);
    }

    #[test]
    fn test_round_trip() {
        for len in 0..=48 {
            let input = vec![b'x'; len];
            assert_eq!(unpad(&pad(&input, 16)).unwrap(), input);
        }
    }

    #[test]
    fn test_round_trip_plaintext_ending_in_pad_value() {
        // 15 bytes ending in 0x01 pads to "...\x01\x01". Only the final
        // byte belongs to the pad.
        let input = b"AAAAAAAAAAAAAA\x01";

        assert_eq!(unpad(&pad(input, 16)).unwrap(), input);
    }
}
