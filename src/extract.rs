//! Byte-at-a-time ECB secret extraction.
//!
//! Given an oracle computing `Encrypt(input ++ secret, key)` in ECB, the
//! attacker lines the secret up against a block boundary so that exactly one
//! unknown byte lands at the end of a block, then brute-forces that byte by
//! comparing ciphertexts. ECB makes this possible: identical plaintext
//! blocks encrypt identically, so a ciphertext match proves a plaintext
//! match. The key is never learned.

use crate::error::Error;
use crate::oracle::Oracle;

/// Recover the hidden suffix of an ECB oracle, one byte per round.
///
/// `max_len` bounds the recoverable length (secret plus padding slack) and
/// must be a multiple of the block size; `oracle.call(b"")?.len()` is the
/// usual choice. Compensating for any hidden random prefix is the caller's
/// job, done before deriving `max_len`.
///
/// Each round fills all but one byte of the target region with filler,
/// takes a reference ciphertext, then tries candidate bytes in the last
/// position until the first `max_len` ciphertext bytes match the reference.
/// Extraction stops at the first round with no matching candidate, which is
/// the end of the secret (the pad byte under the comparison window changes
/// between calls, so at most one pad byte trails the recovered secret). It
/// also stops once `max_len` bytes are recovered: past that the trial byte
/// would sit outside the comparison window, and every candidate would
/// "match".
///
/// Costs `O(len * 256)` oracle calls; no alphabet assumption is made.
///
/// # Errors
///
/// The first oracle error aborts the run; nothing recovered so far is
/// returned with it.
///
/// # Panics
///
/// If `max_len` is zero or not a multiple of [`crate::modes::BLOCK_SIZE`].
pub fn crack_ecb_suffix<O: Oracle + ?Sized>(oracle: &O, max_len: usize) -> Result<Vec<u8>, Error> {
    assert!(
        max_len > 0 && max_len % crate::modes::BLOCK_SIZE == 0,
        "max_len must be a positive multiple of the block size"
    );

    let mut cracked: Vec<u8> = Vec::new();

    loop {
        if cracked.len() >= max_len {
            return Ok(cracked);
        }

        // Sized so exactly one unknown byte lands at the end of the
        // comparison window.
        let filler_len = max_len - cracked.len() - 1;
        let filler = vec![0u8; filler_len];

        let reference = oracle.call(&filler)?;
        if reference.len() < max_len {
            return Err(Error::Oracle(format!(
                "oracle returned {} bytes, expected at least {max_len}",
                reference.len()
            )));
        }

        let mut trial = filler;
        trial.extend_from_slice(&cracked);
        trial.push(0);
        let last = trial.len() - 1;

        let mut matched = false;
        // 0xff is never tried, so a secret byte of 255 is unrecoverable and
        // reads as end-of-secret instead.
        for candidate in 0..u8::MAX {
            trial[last] = candidate;
            let ciphertext = oracle.call(&trial)?;

            if ciphertext.len() >= max_len && ciphertext[..max_len] == reference[..max_len] {
                cracked.push(candidate);
                matched = true;
                break;
            }
        }

        if !matched {
            return Ok(cracked);
        }
    }
}
