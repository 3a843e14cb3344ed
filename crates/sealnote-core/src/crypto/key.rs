//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Master passwords are low-entropy, so every key is stretched through a
//! large, explicit number of HMAC rounds. The round count travels with each
//! envelope; [`DEFAULT_ITERATIONS`] is only what new envelopes get when the
//! caller does not choose.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

/// Iteration count used for new envelopes unless configured otherwise.
pub const DEFAULT_ITERATIONS: u32 = 480_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a master password.
///
/// Key material is zeroized when dropped and never printed.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a 32-byte key from a password, salt and iteration count.
///
/// Deterministic: the same three inputs always produce the same key. No
/// password policy is applied here; see [`super::validate_master_password`].
///
/// # Examples
///
/// ```
/// use sealnote_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let a = derive_key("correct-horse", &salt, 1_000);
/// let b = derive_key("correct-horse", &salt, 1_000);
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key = DerivedKey {
        key: [0u8; KEY_LENGTH],
    };
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key.key);
    key
}
