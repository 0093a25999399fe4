//! Encryption oracles: the capability every attack in this crate consumes.
//!
//! An oracle is a function from attacker-chosen bytes to ciphertext. The
//! attacker never sees the key or the hidden data, only ciphertext, and the
//! oracle must answer deterministically for a fixed input within a session
//! (key, secret, and any prefix held constant). The concrete oracles here
//! are constructed with all of their hidden state passed in explicitly; the
//! only randomness is whatever `Rng` the caller injects at setup.

use rand::Rng;

use crate::error::Error;
use crate::modes::{encrypt_cbc, encrypt_ecb, BLOCK_SIZE};
use crate::padding::pad;

/// An opaque encryption capability.
pub trait Oracle {
    /// Encrypt attacker-chosen plaintext, together with whatever hidden
    /// data the oracle folds in.
    ///
    /// # Errors
    ///
    /// `Oracle` or any error of the underlying cipher. An error aborts the
    /// caller's current detection or extraction run.
    fn call(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error>;
}

/// Fill a buffer of `len` bytes from the given rng.
pub fn random_bytes<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

/// An ECB oracle that computes `Encrypt(prefix ++ input ++ secret, key)`,
/// PKCS#7-padded. This is the target of [`crate::extract::crack_ecb_suffix`].
pub struct SuffixOracle {
    key: Vec<u8>,
    secret: Vec<u8>,
    prefix: Vec<u8>,
}

impl SuffixOracle {
    /// Oracle with no prefix: `Encrypt(input ++ secret, key)`.
    ///
    /// # Errors
    ///
    /// `KeyLength` if `key` is not one block long.
    pub fn new(key: Vec<u8>, secret: Vec<u8>) -> Result<Self, Error> {
        Self::with_prefix(key, secret, Vec::new())
    }

    /// Oracle with a fixed hidden prefix ahead of the attacker's input.
    ///
    /// # Errors
    ///
    /// `KeyLength` if `key` is not one block long.
    pub fn with_prefix(key: Vec<u8>, secret: Vec<u8>, prefix: Vec<u8>) -> Result<Self, Error> {
        if key.len() != BLOCK_SIZE {
            return Err(Error::KeyLength {
                expected: BLOCK_SIZE,
                actual: key.len(),
            });
        }
        Ok(SuffixOracle {
            key,
            secret,
            prefix,
        })
    }
}

impl Oracle for SuffixOracle {
    fn call(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        let assembled = [self.prefix.as_slice(), plaintext, &self.secret].concat();
        encrypt_ecb(&pad(&assembled, BLOCK_SIZE), &self.key)
    }
}

enum Mode {
    Ecb,
    Cbc { iv: Vec<u8> },
}

/// An oracle that picks ECB or CBC by coin flip at construction and wraps
/// the attacker's input in short random affixes, like a server that sticks
/// session data around a request before encrypting it. The detection target
/// of [`crate::detect::detect_ecb`].
pub struct ModeOracle {
    mode: Mode,
    key: Vec<u8>,
    prefix: Vec<u8>,
    suffix: Vec<u8>,
}

impl ModeOracle {
    /// Fresh key, 5..=10 byte random affixes, fair coin for the mode.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mode = if rng.gen_bool(0.5) {
            Mode::Ecb
        } else {
            Mode::Cbc {
                iv: random_bytes(rng, BLOCK_SIZE),
            }
        };

        let prefix_len = rng.gen_range(5..=10);
        let suffix_len = rng.gen_range(5..=10);

        ModeOracle {
            mode,
            key: random_bytes(rng, BLOCK_SIZE),
            prefix: random_bytes(rng, prefix_len),
            suffix: random_bytes(rng, suffix_len),
        }
    }

    /// Whether the coin flip chose ECB. For checking a detector's verdict.
    #[must_use]
    pub fn is_ecb(&self) -> bool {
        matches!(self.mode, Mode::Ecb)
    }
}

impl Oracle for ModeOracle {
    fn call(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        let assembled = [self.prefix.as_slice(), plaintext, &self.suffix].concat();
        let padded = pad(&assembled, BLOCK_SIZE);

        match &self.mode {
            Mode::Ecb => encrypt_ecb(&padded, &self.key),
            Mode::Cbc { iv } => encrypt_cbc(&padded, &self.key, iv),
        }
    }
}
