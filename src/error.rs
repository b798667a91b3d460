use std::fmt;

/// Errors returned by hashing, verification and salt generation.
///
/// A wrong password is not an error: [`crate::verify`] reports it as `Ok(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    /// A salt length of zero (or less) was requested.
    InvalidArgument,
    /// The OS random generator could not provide entropy.
    RandomSourceUnavailable,
    /// The encoded hash failed to parse. Carries no detail about which check failed.
    InvalidOrCorruptedHash,
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::InvalidArgument => write!(f, "salt length must be positive"),
            HashError::RandomSourceUnavailable => write!(f, "OS random generator unavailable"),
            HashError::InvalidOrCorruptedHash => write!(f, "invalid or corrupted hash"),
        }
    }
}

impl std::error::Error for HashError {}
