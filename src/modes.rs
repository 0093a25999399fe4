//! ECB and CBC chaining modes built on a raw AES-128 block permutation.
//!
//! The permutation comes from openssl, driven one block at a time with its
//! own padding and IV support turned off: chaining and padding are this
//! crate's job, not the library's.

use crate::error::Error;

/// Block size of the underlying permutation, in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Handle over the raw block permutation for a borrowed key.
///
/// Construction validates the key length; after that, `encrypt_block` and
/// `decrypt_block` map exactly one block to one block. The key is never
/// inspected beyond its length.
pub struct BlockCipher<'k> {
    key: &'k [u8],
}

impl<'k> BlockCipher<'k> {
    /// # Errors
    ///
    /// `KeyLength` unless `key` is exactly [`BLOCK_SIZE`] bytes.
    pub fn new(key: &'k [u8]) -> Result<Self, Error> {
        if key.len() != BLOCK_SIZE {
            return Err(Error::KeyLength {
                expected: BLOCK_SIZE,
                actual: key.len(),
            });
        }
        Ok(BlockCipher { key })
    }

    fn process(&self, block: &[u8], mode: openssl::symm::Mode) -> Result<Vec<u8>, Error> {
        use openssl::symm::{Cipher, Crypter};

        debug_assert_eq!(block.len(), BLOCK_SIZE);

        // Raw ECB with padding disabled is the one-block permutation; a
        // Crypter in any other configuration would chain or pad behind our
        // back.
        let mut crypter = Crypter::new(Cipher::aes_128_ecb(), mode, self.key, None)?;
        crypter.pad(false);

        let mut out = vec![0; block.len() + BLOCK_SIZE];
        let mut count = crypter.update(block, &mut out)?;
        count += crypter.finalize(&mut out[count..])?;
        out.truncate(count);

        Ok(out)
    }

    /// Encrypt exactly one block.
    ///
    /// # Errors
    ///
    /// `Cipher` if the primitive rejects the input.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<Vec<u8>, Error> {
        self.process(block, openssl::symm::Mode::Encrypt)
    }

    /// Decrypt exactly one block.
    ///
    /// # Errors
    ///
    /// `Cipher` if the primitive rejects the input.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<Vec<u8>, Error> {
        self.process(block, openssl::symm::Mode::Decrypt)
    }
}

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

fn check_iv(iv: &[u8]) -> Result<(), Error> {
    if iv.len() != BLOCK_SIZE {
        return Err(Error::IvLength {
            expected: BLOCK_SIZE,
            actual: iv.len(),
        });
    }
    Ok(())
}

/// Encrypt with ECB: each block independently, no chaining.
///
/// No padding is applied here; callers pad first. A trailing partial block
/// is silently ignored, so identical block-aligned prefixes always produce
/// identical ciphertext prefixes -- the property every attack in this crate
/// leans on.
///
/// # Errors
///
/// `KeyLength` before any block is processed, or `Cipher` from the
/// primitive.
pub fn encrypt_ecb(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = BlockCipher::new(key)?;
    let mut ciphertext = Vec::with_capacity(plaintext.len());

    for block in plaintext.chunks_exact(BLOCK_SIZE) {
        ciphertext.extend_from_slice(&cipher.encrypt_block(block)?);
    }

    Ok(ciphertext)
}

/// Decrypt with ECB. Padding is not removed; a trailing partial block is
/// silently ignored.
///
/// # Errors
///
/// `KeyLength` before any block is processed, or `Cipher` from the
/// primitive.
pub fn decrypt_ecb(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = BlockCipher::new(key)?;
    let mut plaintext = Vec::with_capacity(ciphertext.len());

    for block in ciphertext.chunks_exact(BLOCK_SIZE) {
        plaintext.extend_from_slice(&cipher.decrypt_block(block)?);
    }

    Ok(plaintext)
}

/// Encrypt with CBC: each plaintext block is XORed with the previous
/// ciphertext block (the IV for the first) before the permutation.
///
/// # Errors
///
/// `KeyLength` or `IvLength` before any block is processed, or `Cipher`
/// from the primitive.
pub fn encrypt_cbc(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = BlockCipher::new(key)?;
    check_iv(iv)?;

    let mut ciphertext = Vec::with_capacity(plaintext.len());
    let mut chain_state = iv.to_vec();

    for block in plaintext.chunks_exact(BLOCK_SIZE) {
        xor_into(&mut chain_state, block);
        chain_state = cipher.encrypt_block(&chain_state)?;
        ciphertext.extend_from_slice(&chain_state);
    }

    Ok(ciphertext)
}

/// Decrypt with CBC.
///
/// Each decrypted block is XORed with the previous *ciphertext* block, not
/// with any state derived from decryption.
///
/// # Errors
///
/// `KeyLength` or `IvLength` before any block is processed, or `Cipher`
/// from the primitive.
pub fn decrypt_cbc(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = BlockCipher::new(key)?;
    check_iv(iv)?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut prev_cipher_block = iv;

    for block in ciphertext.chunks_exact(BLOCK_SIZE) {
        let mut decrypted = cipher.decrypt_block(block)?;
        xor_into(&mut decrypted, prev_cipher_block);
        plaintext.extend_from_slice(&decrypted);
        prev_cipher_block = block;
    }

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::{pad, unpad};

    const KEY: &[u8] = b"This is 16 bytes";
    const PLAINTEXTS: &[&[u8]] = &[
        // general
        b"My name is Ozymandias, King of Kings;\n\
        Look on my Works, ye Mighty, and despair!",
        // exactly 1 block
        b"0123456789abcdef",
        // empty
        b"",
    ];

    #[test]
    fn test_ecb_matches_openssl() {
        use openssl::symm::{encrypt, Cipher};

        for &plaintext in PLAINTEXTS {
            // openssl pads internally; we pad explicitly and compare.
            let expected = encrypt(Cipher::aes_128_ecb(), KEY, None, plaintext).unwrap();
            let actual = encrypt_ecb(&pad(plaintext, BLOCK_SIZE), KEY).unwrap();

            assert_eq!(
                actual,
                expected,
                r#"plaintext: "{}""#,
                plaintext.escape_ascii()
            );
        }
    }

    #[test]
    fn test_cbc_matches_openssl() {
        use openssl::symm::{encrypt, Cipher};

        let iv = [7u8; BLOCK_SIZE];

        for &plaintext in PLAINTEXTS {
            let expected = encrypt(Cipher::aes_128_cbc(), KEY, Some(&iv), plaintext).unwrap();
            let actual = encrypt_cbc(&pad(plaintext, BLOCK_SIZE), KEY, &iv).unwrap();

            assert_eq!(
                actual,
                expected,
                r#"plaintext: "{}""#,
                plaintext.escape_ascii()
            );
        }
    }

    #[test]
    fn test_ecb_round_trip() {
        for &plaintext in PLAINTEXTS {
            let padded = pad(plaintext, BLOCK_SIZE);
            let ciphertext = encrypt_ecb(&padded, KEY).unwrap();
            let decrypted = decrypt_ecb(&ciphertext, KEY).unwrap();

            assert_eq!(unpad(&decrypted).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_cbc_round_trip() {
        let iv = [0u8; BLOCK_SIZE];

        for &plaintext in PLAINTEXTS {
            let padded = pad(plaintext, BLOCK_SIZE);
            let ciphertext = encrypt_cbc(&padded, KEY, &iv).unwrap();
            let decrypted = decrypt_cbc(&ciphertext, KEY, &iv).unwrap();

            assert_eq!(unpad(&decrypted).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_ecb_repeats_identical_blocks() {
        let plaintext = [b"YELLOW SUBMARINE".as_slice(); 2].concat();

        let ciphertext = encrypt_ecb(&plaintext, KEY).unwrap();

        assert_eq!(ciphertext[..BLOCK_SIZE], ciphertext[BLOCK_SIZE..]);
    }

    #[test]
    fn test_cbc_does_not_repeat_identical_blocks() {
        let plaintext = [b"YELLOW SUBMARINE".as_slice(); 2].concat();
        let iv = [3u8; BLOCK_SIZE];

        let ciphertext = encrypt_cbc(&plaintext, KEY, &iv).unwrap();

        assert_ne!(ciphertext[..BLOCK_SIZE], ciphertext[BLOCK_SIZE..]);
    }

    #[test]
    fn test_ecb_ignores_trailing_partial_block() {
        let aligned = encrypt_ecb(b"0123456789abcdef", KEY).unwrap();
        let ragged = encrypt_ecb(b"0123456789abcdefXYZ", KEY).unwrap();

        assert_eq!(aligned, ragged);
    }

    #[test]
    fn test_short_key_rejected_before_processing() {
        assert!(matches!(
            encrypt_ecb(b"0123456789abcdef", b"short"),
            Err(Error::KeyLength { actual: 5, .. })
        ));
    }

    #[test]
    fn test_short_iv_rejected_before_processing() {
        assert!(matches!(
            encrypt_cbc(b"0123456789abcdef", KEY, b"short iv"),
            Err(Error::IvLength { actual: 8, .. })
        ));
    }
}
