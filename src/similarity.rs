//! Hamming-distance block-similarity analysis.
//!
//! Repetition among ciphertext blocks is the structural fingerprint of ECB:
//! chaining modes destroy cross-block repetition with overwhelming
//! probability, so any pair of identical blocks is strong evidence that no
//! chaining happened.

use crate::error::Error;

/// Bitwise Hamming distance between two equal-length byte slices.
///
/// Two empty slices have distance 0.
///
/// # Errors
///
/// `LengthMismatch` if the slices differ in length.
pub fn hamming(a: &[u8], b: &[u8]) -> Result<usize, Error> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x ^ y).count_ones() as usize)
        .sum())
}

/// Count unordered pairs of `block_size` blocks in `data` whose Hamming
/// distance is at most `threshold`.
///
/// With `threshold = 0` this counts exact duplicate blocks. A trailing
/// partial block is ignored. The pair scan is quadratic in the number of
/// blocks, which is fine at the input sizes these attacks see.
#[must_use]
pub fn num_similar_blocks(data: &[u8], block_size: usize, threshold: usize) -> usize {
    let blocks: Vec<&[u8]> = data.chunks_exact(block_size).collect();

    let mut count = 0;
    for i in 0..blocks.len() {
        for j in i + 1..blocks.len() {
            // equal lengths by construction
            let distance = hamming(blocks[i], blocks[j]).unwrap_or(usize::MAX);
            if distance <= threshold {
                count += 1;
            }
        }
    }

    count
}
