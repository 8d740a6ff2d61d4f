use pbkdf2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};

/// PBKDF2-HMAC-SHA256 work factor for new hashes.
pub const ROUNDS: u32 = 600_000;

/// Hash a password with a fresh random salt into a PHC string
/// (`$pbkdf2-sha256$i=...,l=32$salt$hash`).
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    hash_password_with_rounds(password, ROUNDS)
}

/// Same as [`hash_password`] with an explicit work factor. The rounds are
/// recorded in the hash, so verification needs no configuration.
pub fn hash_password_with_rounds(
    password: &str,
    rounds: u32,
) -> Result<String, password_hash::Error> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())?;
    let params = Params {
        rounds,
        output_length: 32,
    };
    let hash = Pbkdf2.hash_password_customized(password.as_bytes(), None, None, params, &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let stored = hash_password("1234567890").unwrap();
        assert!(stored.starts_with("$pbkdf2-sha256$i=600000,"));
        assert!(verify_password("1234567890", &stored));
        assert!(!verify_password("1234567891", &stored));
    }

    #[test]
    fn rounds_are_read_back_from_the_hash() {
        let stored = hash_password_with_rounds("secret", 1_000).unwrap();
        assert!(stored.starts_with("$pbkdf2-sha256$i=1000,"));
        assert!(verify_password("secret", &stored));
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(
            hash_password_with_rounds("secret", 1_000).unwrap(),
            hash_password_with_rounds("secret", 1_000).unwrap()
        );
    }

    #[test]
    fn malformed_hashes_never_verify() {
        for stored in [
            "",
            "plain",
            "hs256$20000$00$00",
            "$pbkdf2-sha256$i=x$c2FsdA$aGFzaA",
            "$md5$c2FsdHNhbHQ$aGFzaGhhc2g",
        ] {
            assert!(!verify_password("anything", stored), "{stored}");
        }
    }
}
