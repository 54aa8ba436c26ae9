//! Credential representation and password hashing for Minimail.
//!
//! Current credentials are stored as `hex(salt) + ":" + hex(digest)` where
//! the digest is SHA-256 over the hex salt followed by the raw password.
//! Records written before hashing was introduced hold the bare plaintext
//! password; the colon is the discriminator between the two forms. Legacy
//! records are upgraded in place on their next successful verification (see
//! `CredentialStore`).

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// A stored credential, parsed from its database representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Current format: hex salt and hex SHA-256 digest.
    Hashed { salt: String, digest: String },
    /// Transitional plaintext record awaiting upgrade.
    Legacy(String),
}

impl Credential {
    /// Parse a stored credential string.
    ///
    /// Anything containing a colon is treated as `salt:digest`; anything
    /// else is a legacy plaintext record.
    pub fn parse(stored: &str) -> Self {
        match stored.split_once(':') {
            Some((salt, digest)) => Self::Hashed {
                salt: salt.to_string(),
                digest: digest.to_string(),
            },
            None => Self::Legacy(stored.to_string()),
        }
    }

    /// Check a raw password against this credential.
    pub fn matches(&self, password: &str) -> bool {
        match self {
            Self::Hashed { salt, digest } => {
                let computed = digest_with_salt(salt, password);
                constant_time_eq(computed.as_bytes(), digest.as_bytes())
            }
            Self::Legacy(plaintext) => {
                constant_time_eq(plaintext.as_bytes(), password.as_bytes())
            }
        }
    }

    /// Whether this credential still awaits the hashed-format upgrade.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Hash a password into the stored `salt:digest` representation with a
/// fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    let digest = digest_with_salt(&salt_hex, password);
    format!("{salt_hex}:{digest}")
}

/// SHA-256 over the hex salt followed by the password, hex encoded.
fn digest_with_salt(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let stored = hash_password("secret");
        let (salt, digest) = stored.split_once(':').unwrap();

        // 16 salt bytes and a 256-bit digest, both hex encoded
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_password_unique_salts() {
        let a = hash_password("same password");
        let b = hash_password("same password");
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_hashed() {
        let stored = hash_password("pw");
        let cred = Credential::parse(&stored);
        assert!(matches!(cred, Credential::Hashed { .. }));
        assert!(!cred.is_legacy());
    }

    #[test]
    fn test_parse_legacy() {
        let cred = Credential::parse("plain-old-password");
        assert_eq!(cred, Credential::Legacy("plain-old-password".to_string()));
        assert!(cred.is_legacy());
    }

    #[test]
    fn test_matches_hashed() {
        let stored = hash_password("correct horse");
        let cred = Credential::parse(&stored);

        assert!(cred.matches("correct horse"));
        assert!(!cred.matches("wrong horse"));
        assert!(!cred.matches(""));
    }

    #[test]
    fn test_matches_legacy() {
        let cred = Credential::Legacy("swordfish".to_string());
        assert!(cred.matches("swordfish"));
        assert!(!cred.matches("Swordfish"));
    }

    #[test]
    fn test_digest_matches_known_input() {
        // The digest covers the hex salt text, then the password bytes
        let expected = {
            let mut h = Sha256::new();
            h.update(b"00ff");
            h.update(b"pw");
            hex::encode(h.finalize())
        };
        assert_eq!(digest_with_salt("00ff", "pw"), expected);

        let cred = Credential::Hashed {
            salt: "00ff".to_string(),
            digest: expected,
        };
        assert!(cred.matches("pw"));
    }

    #[test]
    fn test_colon_in_stored_value_means_hashed() {
        // A plaintext record that happens to contain a colon is
        // indistinguishable from the hashed form and will fail verification
        let cred = Credential::parse("pass:word");
        assert!(!cred.is_legacy());
        assert!(!cred.matches("pass:word"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_password_with_unicode() {
        let stored = hash_password("パスワード123");
        let cred = Credential::parse(&stored);
        assert!(cred.matches("パスワード123"));
        assert!(!cred.matches("password123"));
    }
}
