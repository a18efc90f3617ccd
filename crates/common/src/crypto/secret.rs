//! Password-derived key encryption using ChaCha20-Poly1305
//!
//! Wallet accounts keep their signing key encrypted under a [`Secret`] derived
//! from the account password with Argon2id. The salt is stored next to the
//! ciphertext; the KDF cost lives in the wallet header as [`KdfParams`].

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use serde::{Deserialize, Serialize};

/// Size of ChaCha20-Poly1305 nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of ChaCha20-Poly1305 key in bytes (256 bits)
pub const SECRET_SIZE: usize = 32;
/// Size of the random salt fed to the KDF
pub const SALT_SIZE: usize = 16;

/// Errors that can occur during key derivation, encryption or decryption
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("decryption failed: wrong key or corrupted ciphertext")]
    Decrypt,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// A 256-bit symmetric encryption key
///
/// The encrypted format is: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
#[derive(Debug, PartialEq, Clone)]
pub struct Secret([u8; SECRET_SIZE]);

impl From<[u8; SECRET_SIZE]> for Secret {
    fn from(bytes: [u8; SECRET_SIZE]) -> Self {
        Secret(bytes)
    }
}

impl Secret {
    /// Derive a secret from a password and salt with Argon2id
    pub fn derive(password: &str, salt: &[u8], params: &KdfParams) -> Result<Self, SecretError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            Some(SECRET_SIZE),
        )
        .map_err(|e| anyhow::anyhow!("invalid kdf params: {}", e))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut buff = [0u8; SECRET_SIZE];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut buff)
            .map_err(|e| anyhow::anyhow!("key derivation failed: {}", e))?;
        Ok(Self(buff))
    }

    /// Generate a fresh random salt for [`Secret::derive`]
    pub fn generate_salt() -> Result<[u8; SALT_SIZE], SecretError> {
        let mut salt = [0u8; SALT_SIZE];
        getrandom::getrandom(&mut salt)
            .map_err(|e| anyhow::anyhow!("failed to generate salt: {}", e))?;
        Ok(salt)
    }

    /// Get a reference to the secret key bytes
    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Encrypt data using ChaCha20-Poly1305 AEAD with a random nonce
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(self.bytes()));

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce_bytes)
            .map_err(|e| anyhow::anyhow!("failed to generate nonce: {}", e))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, data)
            .map_err(|e| anyhow::anyhow!("encryption failed: {}", e))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt data produced by [`Secret::encrypt`]
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Decrypt`] if the tag does not verify, which covers both
    /// a wrong key and tampered data.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        if data.len() < NONCE_SIZE {
            return Err(anyhow::anyhow!("ciphertext too short").into());
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(self.bytes()));
        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| SecretError::Decrypt)
    }
}
