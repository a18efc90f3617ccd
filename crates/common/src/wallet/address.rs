use std::fmt;
use std::str::FromStr;

use multibase::Base;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::crypto::PublicKey;

/// Size of the key hash inside an address
pub const ADDRESS_HASH_SIZE: usize = 20;
/// Leading byte of every encoded address
pub const ADDRESS_VERSION: u8 = 0x35;

const CHECKSUM_SIZE: usize = 4;
const ENCODED_SIZE: usize = 1 + ADDRESS_HASH_SIZE + CHECKSUM_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("address is not valid base58: {0}")]
    Decode(String),
    #[error("invalid address length, expected 25 bytes, got {0}")]
    Size(usize),
    #[error("unsupported address version {0:#04x}")]
    Version(u8),
    #[error("address checksum mismatch")]
    Checksum,
}

/// Short, checksummed handle for an account, derived from its public key.
///
/// Encoded as base58 of `version || sha256(public_key)[..20] || checksum`,
/// where the checksum is the first four bytes of a double SHA-256 over the
/// preceding bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_HASH_SIZE]);

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&digest[..CHECKSUM_SIZE]);
    out
}

impl From<&PublicKey> for Address {
    fn from(key: &PublicKey) -> Self {
        let digest = Sha256::digest(key.to_bytes());
        let mut hash = [0u8; ADDRESS_HASH_SIZE];
        hash.copy_from_slice(&digest[..ADDRESS_HASH_SIZE]);
        Address(hash)
    }
}

impl Address {
    pub fn encode(&self) -> String {
        let mut buff = Vec::with_capacity(ENCODED_SIZE);
        buff.push(ADDRESS_VERSION);
        buff.extend_from_slice(&self.0);
        let sum = checksum(&buff);
        buff.extend_from_slice(&sum);
        Base::Base58Btc.encode(buff)
    }

    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let bytes = Base::Base58Btc
            .decode(s.trim())
            .map_err(|e| AddressError::Decode(e.to_string()))?;
        if bytes.len() != ENCODED_SIZE {
            return Err(AddressError::Size(bytes.len()));
        }
        if bytes[0] != ADDRESS_VERSION {
            return Err(AddressError::Version(bytes[0]));
        }

        let (payload, sum) = bytes.split_at(1 + ADDRESS_HASH_SIZE);
        if checksum(payload).as_slice() != sum {
            return Err(AddressError::Checksum);
        }

        let mut hash = [0u8; ADDRESS_HASH_SIZE];
        hash.copy_from_slice(&payload[1..]);
        Ok(Address(hash))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::decode(&s).map_err(serde::de::Error::custom)
    }
}
