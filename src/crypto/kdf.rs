use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{DEFAULT_ITERATIONS, DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, salt};
use crate::error::HashError;
use crate::format::EncodedHash;

/// Hash function underlying the PBKDF2 HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFamily {
    #[default]
    Sha256,
}

impl HashFamily {
    pub fn name(&self) -> &'static str {
        match self {
            HashFamily::Sha256 => "sha256",
        }
    }
}

/// The parameter set used when a field of [`Params`] is left unset.
pub const DEFAULT_PARAMS: Params = Params {
    iterations: DEFAULT_ITERATIONS,
    key_len: DEFAULT_KEY_LEN,
    salt_len: DEFAULT_SALT_LEN,
    hash: Some(HashFamily::Sha256),
};

/// PBKDF2 tuning knobs.
///
/// A zero (or `None`) field means "use the default", so
/// `Params::default()` is the empty set and resolves to [`DEFAULT_PARAMS`]:
///
/// ```
/// let params = pbkdf::Params { iterations: 1000, ..Default::default() };
/// let encoded = params.hash(b"pw").unwrap();
/// assert!(encoded.contains("i=1000,l=32"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Params {
    pub iterations: u32,
    /// Derived key length in bytes.
    pub key_len: usize,
    /// Salt length in bytes.
    pub salt_len: usize,
    pub hash: Option<HashFamily>,
}

impl Params {
    /// Returns a copy with every unset field taken from [`DEFAULT_PARAMS`].
    pub fn resolve(&self) -> Self {
        Self {
            iterations: or_default(self.iterations, DEFAULT_PARAMS.iterations),
            key_len: or_default(self.key_len, DEFAULT_PARAMS.key_len),
            salt_len: or_default(self.salt_len, DEFAULT_PARAMS.salt_len),
            hash: self.hash.or(DEFAULT_PARAMS.hash),
        }
    }

    /// Hashes `password` with these parameters and returns the encoded hash string.
    ///
    /// # Errors
    ///
    /// Propagates salt generation failures.
    pub fn hash(&self, password: &[u8]) -> Result<String, HashError> {
        let params = self.resolve();
        let family = params.hash.unwrap_or_default();

        let salt = salt::generate_salt_zeroizing(params.salt_len)?;
        let key = derive_key(password, &salt, params.iterations, params.key_len, family);

        Ok(EncodedHash::new(params.iterations, salt.to_vec(), key.to_vec()).to_string())
    }
}

fn or_default<T: PartialEq + Default>(value: T, default: T) -> T {
    if value == T::default() { default } else { value }
}

/// Derive `key_len` bytes from `password` and `salt` with PBKDF2-HMAC.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_len: usize,
    family: HashFamily,
) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; key_len]);

    match family {
        HashFamily::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key),
    }

    key
}

/// Constant-time key comparison. Keys of different lengths never match.
pub fn keys_match(derived: &[u8], stored: &[u8]) -> bool {
    derived.ct_eq(stored).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_resolve_to_defaults() {
        assert_eq!(Params::default().resolve(), DEFAULT_PARAMS);
    }

    #[test]
    fn partial_params_keep_overrides() {
        let params = Params {
            iterations: 1000,
            ..Default::default()
        }
        .resolve();

        assert_eq!(params.iterations, 1000);
        assert_eq!(params.key_len, 32);
        assert_eq!(params.salt_len, 16);
        assert_eq!(params.hash, Some(HashFamily::Sha256));
    }

    #[test]
    fn full_params_are_untouched() {
        let params = Params {
            iterations: 5,
            key_len: 64,
            salt_len: 8,
            hash: Some(HashFamily::Sha256),
        };
        assert_eq!(params.resolve(), params);
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];

        let k1 = derive_key(b"password", &salt, 1000, 32, HashFamily::Sha256);
        let k2 = derive_key(b"password", &salt, 1000, 32, HashFamily::Sha256);

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn kdf_params_affect_output() {
        let salt = [7u8; 16];

        let k1 = derive_key(b"pw", &salt, 1000, 32, HashFamily::Sha256);
        let k2 = derive_key(b"pw", &salt, 1001, 32, HashFamily::Sha256);

        assert_ne!(k1, k2);
    }

    #[test]
    fn kdf_matches_rfc7914_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256 with c = 1, dkLen = 64
        let expected = [
            0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f, 0xec, 0x16, 0x91, 0xc2, 0x25, 0x44,
            0xb6, 0x05, 0xf9, 0x41, 0x85, 0x21, 0x6d, 0xde, 0x04, 0x65, 0xe6, 0x8b, 0x9d, 0x57,
            0xc2, 0x0d, 0xac, 0xbc, 0x49, 0xca, 0x9c, 0xcc, 0xf1, 0x79, 0xb6, 0x45, 0x99, 0x16,
            0x64, 0xb3, 0x9d, 0x77, 0xef, 0x31, 0x7c, 0x71, 0xb8, 0x45, 0xb1, 0xe3, 0x0b, 0xd5,
            0x09, 0x11, 0x20, 0x41, 0xd3, 0xa1, 0x97, 0x83,
        ];

        let key = derive_key(b"passwd", b"salt", 1, 64, HashFamily::Sha256);
        assert_eq!(key.as_slice(), &expected[..]);
    }

    #[test]
    fn keys_match_requires_equal_content_and_length() {
        assert!(keys_match(&[1, 2, 3], &[1, 2, 3]));
        assert!(!keys_match(&[1, 2, 3], &[1, 2, 4]));
        assert!(!keys_match(&[1, 2, 3], &[1, 2]));
        assert!(!keys_match(&[], &[0]));
    }
}
