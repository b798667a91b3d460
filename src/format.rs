//! Encoded hash string format.
//!
//! ```text
//! $pbkdf2-sha256$i=<iterations>,l=<key length>$<base64 salt>$<base64 key>
//! ```
//!
//! Salt and key use the standard base64 alphabet without padding. The field
//! before the first `$` is always empty.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use zeroize::Zeroizing;

use crate::error::HashError;

/// Algorithm identifier carried in the second field.
pub const ALGORITHM_ID: &str = "pbkdf2-sha256";

const FIELD_SEP: char = '$';
const PARAM_SEP: char = ',';
const KV_SEP: char = '=';

/// A parsed (or about to be serialized) encoded hash.
///
/// `key_len` is the `l=` value from the string and is kept apart from the
/// decoded key, since a tampered string may disagree with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    iterations: u32,
    key_len: usize,
    salt: Zeroizing<Vec<u8>>,
    key: Zeroizing<Vec<u8>>,
}

impl EncodedHash {
    pub fn new(iterations: u32, salt: Vec<u8>, key: Vec<u8>) -> Self {
        Self {
            iterations,
            key_len: key.len(),
            salt: Zeroizing::new(salt),
            key: Zeroizing::new(key),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Declared derived key length in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn algorithm(&self) -> &'static str {
        ALGORITHM_ID
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${ALGORITHM_ID}$i={},l={}${}${}",
            self.iterations,
            self.key_len,
            STANDARD_NO_PAD.encode(self.salt.as_slice()),
            STANDARD_NO_PAD.encode(self.key.as_slice()),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = HashError;

    /// Every failure maps to [`HashError::InvalidOrCorruptedHash`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).ok_or(HashError::InvalidOrCorruptedHash)
    }
}

fn parse(s: &str) -> Option<EncodedHash> {
    let fields: Vec<&str> = s.split(FIELD_SEP).collect();
    let [leading, algorithm, params, salt, key] = fields.as_slice() else {
        return None;
    };

    if !leading.is_empty() || *algorithm != ALGORITHM_ID {
        return None;
    }

    let (iterations, key_len) = parse_params(params)?;

    let salt = Zeroizing::new(STANDARD_NO_PAD.decode(salt).ok()?);
    let key = Zeroizing::new(STANDARD_NO_PAD.decode(key).ok()?);

    Some(EncodedHash {
        iterations,
        key_len,
        salt,
        key,
    })
}

/// Parses `i=<n>,l=<n>`. Unknown keys are skipped; a repeated key keeps its last value.
fn parse_params(params: &str) -> Option<(u32, usize)> {
    let mut iterations = 0u32;
    let mut key_len = 0usize;

    for pair in params.split(PARAM_SEP) {
        let (name, value) = pair.split_once(KV_SEP)?;
        match name {
            "i" => iterations = value.parse().ok()?,
            "l" => key_len = value.parse().ok()?,
            _ => {}
        }
    }

    if iterations == 0 || key_len == 0 {
        return None;
    }

    Some((iterations, key_len))
}
