//! Cryptographic operations for Sealnote.
//!
//! This module is the encryption-at-rest envelope:
//! - **PBKDF2-HMAC-SHA256**: stretches a master password into a 256-bit key
//! - **AES-256-GCM**: authenticated encryption of the note body
//!
//! ## Security Model
//!
//! - Only ciphertext and the parameters needed to re-derive the key are stored
//! - Every envelope has its own random salt and nonce
//! - Derived keys are zeroized on drop and never leave a single call
//! - Wrong password and tampered data fail the same way
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the note database
//! - Offline brute-force attacks on the master password (slowed by PBKDF2)
//!
//! We do NOT defend against:
//! - Compromised host / keylogger
//! - An attacker who observes the password in transit

pub mod envelope;
pub mod key;
pub mod password;

pub use envelope::{
    decrypt, encrypt, encrypt_with_iterations, Envelope, NONCE_LENGTH, SALT_LENGTH,
};
pub use key::{derive_key, DerivedKey, DEFAULT_ITERATIONS, KEY_LENGTH};
pub use password::{validate_master_password, MIN_PASSWORD_LENGTH};
