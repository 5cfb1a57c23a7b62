//! Password hashing and verification.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The recommended cost for hashing passwords with bcrypt.
///
/// Tests should prefer a lower cost so that hashing does not dominate the
/// test run time.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// A bcrypt hash of a user's password.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `raw_password` with bcrypt at the given `cost`.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the underlying hashing library
    /// fails. The error string should only be logged on the server.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let hash =
            bcrypt::hash(raw_password, cost).map_err(|error| Error::HashingError(error.to_string()))?;

        Ok(Self(hash))
    }

    /// Wrap a string that is already a bcrypt hash, e.g. one read back from
    /// the database.
    ///
    /// The caller should ensure `hash` is a valid bcrypt hash, otherwise
    /// [PasswordHash::verify] will fail for every password.
    pub fn new_unchecked(hash: &str) -> Self {
        Self(hash.to_string())
    }

    /// Whether `raw_password` matches this hash.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the stored hash cannot be parsed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        bcrypt::verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Keep password hashes out of debug logs.
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PasswordHash(***)")
    }
}

#[cfg(test)]
mod password_hash_tests {
    use super::PasswordHash;

    const TEST_COST: u32 = 4;

    #[test]
    fn verify_accepts_matching_password() {
        let hash = PasswordHash::new("hunter2", TEST_COST).expect("Could not hash password");

        assert_eq!(hash.verify("hunter2"), Ok(true));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = PasswordHash::new("hunter2", TEST_COST).expect("Could not hash password");

        assert_eq!(hash.verify("hunter3"), Ok(false));
    }

    #[test]
    fn hash_does_not_contain_password() {
        let hash = PasswordHash::new("hunter2", TEST_COST).expect("Could not hash password");

        assert!(!hash.as_ref().contains("hunter2"));
    }

    #[test]
    fn debug_format_redacts_hash() {
        let hash = PasswordHash::new_unchecked("$2b$04$abcdefghijklmnopqrstuv");

        assert_eq!(format!("{hash:?}"), "PasswordHash(***)");
    }
}
