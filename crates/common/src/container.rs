use std::fmt;
use std::str::FromStr;

use multibase::Base;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Size of a container identifier in bytes
pub const CONTAINER_ID_SIZE: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ContainerIdError {
    #[error("container id is not valid base58: {0}")]
    Decode(String),
    #[error("invalid container id size, expected 32 bytes, got {0}")]
    Size(usize),
}

/// Identifier of the container a table is attached to.
///
/// Opaque 32 bytes (the hash of the container's definition on the storage
/// side). Rendered and parsed as base58 with the Bitcoin alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId([u8; CONTAINER_ID_SIZE]);

impl From<[u8; CONTAINER_ID_SIZE]> for ContainerId {
    fn from(bytes: [u8; CONTAINER_ID_SIZE]) -> Self {
        ContainerId(bytes)
    }
}

impl ContainerId {
    pub fn to_base58(&self) -> String {
        Base::Base58Btc.encode(self.0)
    }

    pub fn from_base58(s: &str) -> Result<Self, ContainerIdError> {
        let bytes = Base::Base58Btc
            .decode(s.trim())
            .map_err(|e| ContainerIdError::Decode(e.to_string()))?;
        if bytes.len() != CONTAINER_ID_SIZE {
            return Err(ContainerIdError::Size(bytes.len()));
        }
        let mut buff = [0u8; CONTAINER_ID_SIZE];
        buff.copy_from_slice(&bytes);
        Ok(ContainerId(buff))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl FromStr for ContainerId {
    type Err = ContainerIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for ContainerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for ContainerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContainerId::from_base58(&s).map_err(serde::de::Error::custom)
    }
}
