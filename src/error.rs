/// Everything that can go wrong in this crate.
///
/// Cipher configuration problems (`KeyLength`, `IvLength`) are reported
/// before any block is processed, so a failed call never emits partial
/// output. Padding and length-mismatch errors are terminal for the call and
/// never retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("key must be {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    #[error("iv must be {expected} bytes, got {actual}")]
    IvLength { expected: usize, actual: usize },

    #[error("no padding to remove from empty input")]
    PaddingMissing,

    #[error("invalid padding byte {byte:#04x}")]
    PaddingByte { byte: u8 },

    #[error("padding run does not match pad byte {byte:#04x}")]
    PaddingRun { byte: u8 },

    #[error("length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Opaque failure surfaced from an oracle capability.
    #[error("oracle failure: {0}")]
    Oracle(String),

    #[error("cipher primitive failure")]
    Cipher(#[from] openssl::error::ErrorStack),
}
