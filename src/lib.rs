//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! [`hash`] produces a self-describing string that [`verify`] checks a
//! candidate password against:
//!
//! ```
//! let encoded = pbkdf::hash(b"securepassword").unwrap();
//! assert!(encoded.starts_with("$pbkdf2-sha256$i=120000,l=32$"));
//! assert!(pbkdf::verify(b"securepassword", &encoded).unwrap());
//! assert!(!pbkdf::verify(b"wrongpassword", &encoded).unwrap());
//! ```

mod crypto;
mod error;
mod format;

pub use crate::crypto::{
    DEFAULT_ITERATIONS, DEFAULT_KEY_LEN, DEFAULT_PARAMS, DEFAULT_SALT_LEN, HashFamily, Params,
    generate_salt,
};
pub use crate::error::HashError;
pub use crate::format::{ALGORITHM_ID, EncodedHash};

use crate::crypto::{derive_key, keys_match};

/// Hashes `password` with [`DEFAULT_PARAMS`].
///
/// # Errors
///
/// Returns [`HashError::RandomSourceUnavailable`] if no salt could be generated.
pub fn hash(password: &[u8]) -> Result<String, HashError> {
    DEFAULT_PARAMS.hash(password)
}

/// Checks `password` against an encoded hash.
///
/// Returns `Ok(false)` for a wrong password. The derived keys are compared in
/// constant time; the hash family is always SHA-256, the only one the format
/// names.
///
/// # Errors
///
/// Returns [`HashError::InvalidOrCorruptedHash`] if `encoded` cannot be parsed.
pub fn verify(password: &[u8], encoded: &str) -> Result<bool, HashError> {
    let parsed: EncodedHash = encoded.parse()?;

    // l= disagreeing with the stored key can never match; skip deriving an
    // attacker-sized buffer
    if parsed.key_len() != parsed.key().len() {
        return Ok(false);
    }

    let derived = derive_key(
        password,
        parsed.salt(),
        parsed.iterations(),
        parsed.key_len(),
        HashFamily::Sha256,
    );

    Ok(keys_match(&derived, parsed.key()))
}
