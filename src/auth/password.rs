//! One-way salted password hashing.
//!
//! Argon2id with a fresh random salt per call; the work factor bounds
//! offline guessing against digests at rest.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Hash a plaintext password into a self-describing digest string
/// (algorithm, parameters, salt, and hash in one encoded value).
pub fn hash(plaintext: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
}

/// Check a plaintext password against a stored digest.
///
/// Returns false for a mismatch and for a malformed digest; it never
/// panics or errors.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    PasswordHash::new(digest)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
