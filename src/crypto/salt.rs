use getrandom::fill;
use zeroize::Zeroizing;

use crate::error::HashError;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), HashError> {
    fill(buf).map_err(|_| HashError::RandomSourceUnavailable)
}

/// Generate a fresh salt of `length` bytes.
///
/// # Errors
///
/// Returns [`HashError::InvalidArgument`] if `length` is zero and
/// [`HashError::RandomSourceUnavailable`] if the OS cannot supply entropy.
pub fn generate_salt(length: usize) -> Result<Vec<u8>, HashError> {
    if length == 0 {
        return Err(HashError::InvalidArgument);
    }

    let mut salt = vec![0u8; length];
    secure_random(&mut salt)?;
    Ok(salt)
}

pub(crate) fn generate_salt_zeroizing(length: usize) -> Result<Zeroizing<Vec<u8>>, HashError> {
    generate_salt(length).map(Zeroizing::new)
}
