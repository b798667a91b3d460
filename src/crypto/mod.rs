//! Cryptographic primitives for password hashing.
//!
//! Provides parameter resolution, salt generation and PBKDF2 key derivation.

pub mod kdf;
pub mod salt;

pub use kdf::{DEFAULT_PARAMS, HashFamily, Params, derive_key, keys_match};
pub use salt::generate_salt;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 120_000;
/// Default derived key length (32 bytes / 256 bits).
pub const DEFAULT_KEY_LEN: usize = 32;
/// Default salt length (16 bytes, the NIST SP 800-132 minimum).
pub const DEFAULT_SALT_LEN: usize = 16;
