//! Block-cipher chaining modes built on a raw AES-128 block permutation,
//! and chosen-plaintext attacks that exploit ECB's lack of chaining.
//!
//! The attacking side never touches a key: it works through an opaque
//! [`oracle::Oracle`] capability, probing it with chosen plaintext.
//! [`detect::detect_ecb`] identifies the mode and block size from
//! ciphertext shapes alone, and [`extract::crack_ecb_suffix`] recovers a
//! secret the oracle appends to the attacker's input, one byte at a time.
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod detect;
pub mod error;
pub mod extract;
pub mod modes;
pub mod oracle;
pub mod padding;
pub mod similarity;

pub use error::Error;
