//! Cipher-mode and block-size detection, from an oracle or from ciphertext
//! alone.

use crate::error::Error;
use crate::modes::BLOCK_SIZE;
use crate::oracle::Oracle;
use crate::similarity::num_similar_blocks;

/// A fixed plaintext long enough that its ciphertext spans the largest
/// probed window.
const BASELINE: &[u8] = b"0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDE";

/// Longest filler run (and block size) probed before giving up.
const MAX_PROBE: usize = 64;

fn trailing_window(ciphertext: &[u8], k: usize) -> Option<&[u8]> {
    ciphertext.len().checked_sub(k).map(|s| &ciphertext[s..])
}

fn windows_match(reference: &[u8], ciphertext: &[u8], k: usize) -> bool {
    match (trailing_window(reference, k), trailing_window(ciphertext, k)) {
        (Some(r), Some(n)) => r == n,
        _ => false,
    }
}

/// Probe an encryption oracle for ECB mode and its block size.
///
/// Encrypts [`BASELINE`] once for reference, then prepends 1..=64 filler
/// bytes and compares the trailing `k`-byte window of each new ciphertext
/// against the reference's trailing window. Under ECB, prepending exactly
/// one block of filler shifts the whole message by one block and leaves the
/// final block's plaintext unchanged, so the windows first agree at
/// `k == block size`; under a chaining mode the shifted chain state keeps
/// every block different. A candidate `k` only counts if it holds again
/// with two blocks of filler, which rules out the occasional short-window
/// coincidence between unrelated blocks. Returns `Some(block_size)` for an
/// ECB oracle, `None` if no window stabilizes within 64 bytes of filler.
///
/// The oracle must pad its input and hold its hidden state fixed across
/// calls.
///
/// # Errors
///
/// Any error surfaced by the oracle aborts the probe.
pub fn detect_ecb<O: Oracle + ?Sized>(oracle: &O) -> Result<Option<usize>, Error> {
    let reference = oracle.call(BASELINE)?;

    let mut probe = BASELINE.to_vec();
    for k in 1..=MAX_PROBE {
        probe.insert(0, b'A');
        let ciphertext = oracle.call(&probe)?;

        if windows_match(&reference, &ciphertext, k) {
            let mut confirm = vec![b'A'; 2 * k];
            confirm.extend_from_slice(BASELINE);
            let ciphertext = oracle.call(&confirm)?;

            if windows_match(&reference, &ciphertext, k) {
                return Ok(Some(k));
            }
        }
    }

    Ok(None)
}

/// Whether `ciphertext` was likely produced by ECB: any two identical
/// 16-byte blocks give it away, since a chaining mode repeats a block only
/// by accident (probability about 2^-128 per pair).
///
/// `false` also covers ciphertext too short to contain a duplicate, or a
/// plaintext that never repeated a block.
#[must_use]
pub fn is_likely_ecb(ciphertext: &[u8]) -> bool {
    num_similar_blocks(ciphertext, BLOCK_SIZE, 0) > 0
}

/// Guess the block size of an ECB ciphertext from block similarity alone.
///
/// Scans candidate sizes 4..=40 and keeps the largest with any pair of
/// blocks within Hamming distance 4. Largest, because similarity aliases
/// downward: one similar pair at size 16 shows up as two similar pairs at
/// size 8. Returns `None` when no candidate size has similar blocks.
#[must_use]
pub fn detect_block_size(ciphertext: &[u8]) -> Option<usize> {
    let mut best = None;

    for size in 4..=40 {
        if num_similar_blocks(ciphertext, size, 4) > 0 {
            best = Some(size);
        }
    }

    best
}
