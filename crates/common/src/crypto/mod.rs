//! Cryptographic primitives
//!
//! - **Identity & Authentication**: Ed25519 keypairs. A public key is a principal that
//!   eACL records can target, and the container owner's secret key signs every table
//!   submitted to the policy store.
//! - **Key Storage**: ChaCha20-Poly1305 with an Argon2id password-derived `Secret`
//!   protects signing keys inside wallet files.

mod keys;
mod secret;

pub use ed25519_dalek::Signature;
pub use keys::{KeyError, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
pub use secret::{KdfParams, Secret, SecretError, SALT_SIZE};
