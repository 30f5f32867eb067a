//! Password hashing and verification (Argon2id, PHC string format).
//!
//! Verification distinguishes "wrong password" (`Ok(false)`) from a stored
//! hash that cannot be parsed (`Err`) — the latter means data corruption,
//! not a failed login attempt.
use argon2::{
    Argon2,
    password_hash::{
        Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

pub fn hash(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(stored_hash: &str, candidate: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_matches() {
        let hash = hash("correct horse").unwrap();
        assert!(verify(&hash, "correct horse").unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash("correct horse").unwrap();
        assert!(!verify(&hash, "battery staple").unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify("not-a-phc-string", "anything").is_err());
    }
}
