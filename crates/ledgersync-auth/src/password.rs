//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

/// A valid Argon2id digest of a throwaway value. Verified when no real
/// digest exists, so the unknown-account path pays the same hashing cost
/// as a wrong-password check.
const DUMMY_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$VE0e3g7DalWHgDwou3nuRA$uC6TER156UQpk0lNQ5+jHM0l5poVjPA1he8TZbLgL3U";

/// Hash a plaintext password to a PHC-format Argon2id string.
///
/// Parameters are the crate defaults (OWASP-recommended: memory 19 MiB,
/// iterations 2, parallelism 1); salt is random per hash.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("hashing failed: {e}")))
}

/// Verify a plaintext password against an Argon2id PHC-format digest.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored digest is malformed.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, AuthError> {
    let parsed = argon2::PasswordHash::new(digest)
        .map_err(|e| AuthError::Crypto(format!("invalid digest format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

/// Burn one verification against the dummy digest, discarding the result.
pub(crate) fn verify_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_DIGEST);
}
