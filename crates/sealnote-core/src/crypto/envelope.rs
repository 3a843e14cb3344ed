//! The encrypted-note envelope.
//!
//! An [`Envelope`] is everything needed to get a note back given its master
//! password: AES-256-GCM ciphertext (tag appended), the PBKDF2 salt, the GCM
//! nonce, and the PBKDF2 iteration count. Byte fields are carried as standard
//! padded base64 so the envelope can be stored in text columns or sent as
//! JSON unchanged.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::key::{derive_key, DEFAULT_ITERATIONS};
use crate::error::EnvelopeError;

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM nonce length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Ciphertext, salt, nonce and iteration count for one encrypted note.
///
/// Fields are private: an envelope is never edited in place. Re-encrypting a
/// note produces a new envelope with a new salt and nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    ciphertext: String,
    salt: String,
    nonce: String,
    iterations: u32,
}

impl Envelope {
    /// Rebuild an envelope from persisted parts.
    ///
    /// Nothing is validated here; malformed parts surface as
    /// [`EnvelopeError::InvalidEncoding`] when the envelope is decrypted.
    pub fn from_parts(
        ciphertext: impl Into<String>,
        salt: impl Into<String>,
        nonce: impl Into<String>,
        iterations: u32,
    ) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            salt: salt.into(),
            nonce: nonce.into(),
            iterations,
        }
    }

    /// Base64 ciphertext with the GCM tag appended.
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Base64 PBKDF2 salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Base64 GCM nonce.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// PBKDF2 iteration count this envelope was sealed with.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Decrypt using the iteration count recorded in the envelope.
    pub fn open(&self, password: &str) -> Result<String, EnvelopeError> {
        decrypt(password, self, self.iterations)
    }
}

/// Encrypt a note with [`DEFAULT_ITERATIONS`] rounds of key derivation.
///
/// # Examples
///
/// ```
/// use sealnote_core::crypto::{decrypt, encrypt, DEFAULT_ITERATIONS};
///
/// let envelope = encrypt("correct-horse", "meeting at 5pm").unwrap();
/// assert_eq!(envelope.iterations(), DEFAULT_ITERATIONS);
/// let plaintext = decrypt("correct-horse", &envelope, DEFAULT_ITERATIONS).unwrap();
/// assert_eq!(plaintext, "meeting at 5pm");
/// ```
pub fn encrypt(password: &str, plaintext: &str) -> Result<Envelope, EnvelopeError> {
    encrypt_with_iterations(password, plaintext, DEFAULT_ITERATIONS)
}

/// Encrypt a note with an explicit iteration count.
///
/// A fresh salt and nonce are drawn from the OS RNG on every call.
pub fn encrypt_with_iterations(
    password: &str,
    plaintext: &str,
    iterations: u32,
) -> Result<Envelope, EnvelopeError> {
    if iterations == 0 {
        return Err(EnvelopeError::InvalidParameters(
            "iteration count must be positive".to_string(),
        ));
    }

    let mut salt = [0u8; SALT_LENGTH];
    let mut nonce = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(password, &salt, iterations);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| {
            EnvelopeError::InvalidParameters("plaintext exceeds the AES-GCM limit".to_string())
        })?;

    Ok(Envelope {
        ciphertext: STANDARD.encode(ciphertext),
        salt: STANDARD.encode(salt),
        nonce: STANDARD.encode(nonce),
        iterations,
    })
}

/// Decrypt an envelope with the given password and iteration count.
///
/// # Errors
///
/// - [`EnvelopeError::InvalidEncoding`] if a field is not valid base64, the
///   salt or nonce has the wrong length, or `iterations` is zero
/// - [`EnvelopeError::AuthenticationFailure`] if the tag does not verify,
///   which covers a wrong password, a wrong iteration count and tampering
/// - [`EnvelopeError::InternalInvariantViolation`] if authenticated
///   plaintext is not UTF-8
pub fn decrypt(
    password: &str,
    envelope: &Envelope,
    iterations: u32,
) -> Result<String, EnvelopeError> {
    let salt = decode_field("salt", &envelope.salt, Some(SALT_LENGTH))?;
    let nonce = decode_field("nonce", &envelope.nonce, Some(NONCE_LENGTH))?;
    let ciphertext = decode_field("ciphertext", &envelope.ciphertext, None)?;
    if iterations == 0 {
        return Err(EnvelopeError::InvalidEncoding(
            "iteration count must be positive".to_string(),
        ));
    }

    let key = derive_key(password, &salt, iterations);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| EnvelopeError::AuthenticationFailure)?;

    String::from_utf8(plaintext).map_err(|e| {
        EnvelopeError::InternalInvariantViolation(format!(
            "authenticated plaintext is not UTF-8: {}",
            e.utf8_error()
        ))
    })
}

fn decode_field(
    name: &str,
    value: &str,
    expected_len: Option<usize>,
) -> Result<Vec<u8>, EnvelopeError> {
    let bytes = STANDARD
        .decode(value)
        .map_err(|e| EnvelopeError::InvalidEncoding(format!("{} is not valid base64: {}", name, e)))?;
    if let Some(expected) = expected_len {
        if bytes.len() != expected {
            return Err(EnvelopeError::InvalidEncoding(format!(
                "{} must be {} bytes (got {})",
                name,
                expected,
                bytes.len()
            )));
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ITERATIONS: u32 = 1_000;

    fn seal(password: &str, plaintext: &str) -> Envelope {
        encrypt_with_iterations(password, plaintext, TEST_ITERATIONS).unwrap()
    }

    /// Flip one bit of a base64 field, re-encoding so the structure stays valid.
    fn flip_bit(field: &str, byte: usize, bit: u8) -> String {
        let mut bytes = STANDARD.decode(field).unwrap();
        bytes[byte] ^= 1u8 << bit;
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let envelope = seal("test-passphrase-secure-123", "Hello, World! This is secret data.");
        let decrypted = decrypt("test-passphrase-secure-123", &envelope, TEST_ITERATIONS).unwrap();

        assert_eq!(decrypted, "Hello, World! This is secret data.");
    }

    #[test]
    fn test_round_trip_unicode_and_empty() {
        for plaintext in ["", "ü", "日本語のメモ 🔐", "line one\nline two\0"] {
            let envelope = seal("correct-horse", plaintext);
            assert_eq!(envelope.open("correct-horse").unwrap(), plaintext);
        }
    }

    #[test]
    fn test_default_iterations_concrete_scenario() {
        let envelope = encrypt("correct-horse", "meeting at 5pm").unwrap();
        assert_eq!(envelope.iterations(), 480_000);

        let plaintext = decrypt("correct-horse", &envelope, 480_000).unwrap();
        assert_eq!(plaintext, "meeting at 5pm");

        let result = decrypt("wrong-horse", &envelope, 480_000);
        assert_eq!(result, Err(EnvelopeError::AuthenticationFailure));
    }

    #[test]
    fn test_default_iterations_off_by_one_fails() {
        let envelope = encrypt("correct-horse", "meeting at 5pm").unwrap();

        let result = decrypt("correct-horse", &envelope, DEFAULT_ITERATIONS + 1);
        assert_eq!(result, Err(EnvelopeError::AuthenticationFailure));
    }

    #[test]
    fn test_envelope_field_sizes() {
        let envelope = seal("correct-horse", "meeting at 5pm");

        assert_eq!(STANDARD.decode(envelope.salt()).unwrap().len(), SALT_LENGTH);
        assert_eq!(STANDARD.decode(envelope.nonce()).unwrap().len(), NONCE_LENGTH);
        // 16-byte GCM tag is appended to the ciphertext.
        assert_eq!(
            STANDARD.decode(envelope.ciphertext()).unwrap().len(),
            "meeting at 5pm".len() + 16
        );
        assert_eq!(envelope.iterations(), TEST_ITERATIONS);
    }

    #[test]
    fn test_empty_plaintext_has_tag_only() {
        let envelope = seal("correct-horse", "");
        assert_eq!(STANDARD.decode(envelope.ciphertext()).unwrap().len(), 16);
    }

    #[test]
    fn test_wrong_passphrase_fails_decryption() {
        let envelope = seal("correct-passphrase-123", "secret data");

        let result = decrypt("wrong-passphrase-456", &envelope, TEST_ITERATIONS);
        assert_eq!(result, Err(EnvelopeError::AuthenticationFailure));
    }

    #[test]
    fn test_wrong_iteration_count_fails() {
        let envelope = seal("correct-horse", "secret data");

        let result = decrypt("correct-horse", &envelope, TEST_ITERATIONS + 1);
        assert_eq!(result, Err(EnvelopeError::AuthenticationFailure));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = encrypt_with_iterations("correct-horse", "secret", 0);
        assert!(matches!(result, Err(EnvelopeError::InvalidParameters(_))));

        let envelope = seal("correct-horse", "secret");
        let result = decrypt("correct-horse", &envelope, 0);
        assert!(matches!(result, Err(EnvelopeError::InvalidEncoding(_))));
    }

    #[test]
    fn test_every_ciphertext_bit_is_authenticated() {
        let envelope = seal("correct-horse", "meeting");
        let len = STANDARD.decode(envelope.ciphertext()).unwrap().len();

        for byte in 0..len {
            for bit in 0..8 {
                let tampered = Envelope::from_parts(
                    flip_bit(envelope.ciphertext(), byte, bit),
                    envelope.salt(),
                    envelope.nonce(),
                    envelope.iterations(),
                );
                assert_eq!(
                    tampered.open("correct-horse"),
                    Err(EnvelopeError::AuthenticationFailure),
                    "ciphertext byte {} bit {}",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_every_salt_and_nonce_bit_is_authenticated() {
        let envelope = seal("correct-horse", "meeting");

        for byte in 0..SALT_LENGTH {
            for bit in 0..8 {
                let tampered = Envelope::from_parts(
                    envelope.ciphertext(),
                    flip_bit(envelope.salt(), byte, bit),
                    envelope.nonce(),
                    envelope.iterations(),
                );
                assert_eq!(
                    tampered.open("correct-horse"),
                    Err(EnvelopeError::AuthenticationFailure),
                    "salt byte {} bit {}",
                    byte,
                    bit
                );
            }
        }

        for byte in 0..NONCE_LENGTH {
            for bit in 0..8 {
                let tampered = Envelope::from_parts(
                    envelope.ciphertext(),
                    envelope.salt(),
                    flip_bit(envelope.nonce(), byte, bit),
                    envelope.iterations(),
                );
                assert_eq!(
                    tampered.open("correct-horse"),
                    Err(EnvelopeError::AuthenticationFailure),
                    "nonce byte {} bit {}",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_malformed_base64_is_invalid_encoding() {
        let envelope = seal("correct-horse", "meeting");

        let broken = Envelope::from_parts(
            "not base64!!",
            envelope.salt(),
            envelope.nonce(),
            envelope.iterations(),
        );
        assert!(matches!(
            broken.open("correct-horse"),
            Err(EnvelopeError::InvalidEncoding(_))
        ));

        let broken = Envelope::from_parts(
            envelope.ciphertext(),
            "%%%%",
            envelope.nonce(),
            envelope.iterations(),
        );
        assert!(matches!(
            broken.open("correct-horse"),
            Err(EnvelopeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_wrong_length_salt_or_nonce_is_invalid_encoding() {
        let envelope = seal("correct-horse", "meeting");

        let short_salt = Envelope::from_parts(
            envelope.ciphertext(),
            STANDARD.encode([0u8; 8]),
            envelope.nonce(),
            envelope.iterations(),
        );
        let err = short_salt.open("correct-horse").unwrap_err();
        assert!(err.to_string().contains("salt must be 16 bytes"));

        let long_nonce = Envelope::from_parts(
            envelope.ciphertext(),
            envelope.salt(),
            STANDARD.encode([0u8; 24]),
            envelope.iterations(),
        );
        let err = long_nonce.open("correct-horse").unwrap_err();
        assert!(err.to_string().contains("nonce must be 12 bytes"));
    }

    #[test]
    fn test_non_utf8_plaintext_is_invariant_violation() {
        // Build an envelope around bytes that authenticate but are not UTF-8.
        let salt = [1u8; SALT_LENGTH];
        let nonce = [2u8; NONCE_LENGTH];
        let key = derive_key("correct-horse", &salt, TEST_ITERATIONS);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), [0xffu8, 0xfe, 0xfd].as_slice())
            .unwrap();
        let envelope = Envelope::from_parts(
            STANDARD.encode(ciphertext),
            STANDARD.encode(salt),
            STANDARD.encode(nonce),
            TEST_ITERATIONS,
        );

        let result = envelope.open("correct-horse");
        assert!(matches!(
            result,
            Err(EnvelopeError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn test_repeated_encryption_is_unique() {
        let first = seal("correct-horse", "same plaintext");
        let second = seal("correct-horse", "same plaintext");

        assert_ne!(first.salt(), second.salt());
        assert_ne!(first.nonce(), second.nonce());
        assert_ne!(first.ciphertext(), second.ciphertext());
    }

    #[test]
    fn test_envelope_json_shape() {
        let envelope = Envelope::from_parts("Y3Q=", "c2FsdA==", "bm9uY2U=", 480_000);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "ciphertext": "Y3Q=",
                "salt": "c2FsdA==",
                "nonce": "bm9uY2U=",
                "iterations": 480_000,
            })
        );
    }

    #[test]
    fn test_concurrent_encryption() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let plaintext = format!("note {}", i);
                    let envelope = seal("correct-horse", &plaintext);
                    (plaintext, envelope.open("correct-horse").unwrap())
                })
            })
            .collect();

        for handle in handles {
            let (expected, actual) = handle.join().unwrap();
            assert_eq!(expected, actual);
        }
    }
}
