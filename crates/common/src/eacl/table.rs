use serde::{Deserialize, Serialize};

use crate::container::ContainerId;
use crate::crypto::{PublicKey, SecretKey, Signature};

use super::record::Record;
use super::request::AccessRequest;
use super::types::Action;
use super::EaclError;

/// Ordered list of records attached to one container.
///
/// Evaluation is first-match-wins, so a record only has an effect if no
/// earlier record matched the same request. [`Table::validate`] rejects
/// tables where that ordering silently reverses a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    container_id: ContainerId,
    records: Vec<Record>,
}

impl Table {
    pub fn new(container_id: ContainerId, records: Vec<Record>) -> Self {
        Self {
            container_id,
            records,
        }
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn container_id(&self) -> &ContainerId {
        &self.container_id
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The first record matching the request, with its position
    pub fn matching_record(&self, request: &AccessRequest) -> Option<(usize, &Record)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, record)| record.matches(request))
    }

    /// Decision of the first matching record, or `None` when the table is silent
    /// and the store's default applies.
    pub fn evaluate(&self, request: &AccessRequest) -> Option<Action> {
        self.matching_record(request).map(|(_, record)| record.action)
    }

    /// Check the table is well formed.
    ///
    /// # Errors
    ///
    /// - [`EaclError::Empty`] if there are no records
    /// - [`EaclError::NoTargets`] if a record can never match anybody
    /// - [`EaclError::Shadowed`] if a record is fully covered by an earlier record
    ///   carrying the opposite action, which means it can never take effect
    pub fn validate(&self) -> Result<(), EaclError> {
        if self.records.is_empty() {
            return Err(EaclError::Empty);
        }

        for (index, record) in self.records.iter().enumerate() {
            if record.targets.is_empty() {
                return Err(EaclError::NoTargets { index });
            }

            let shadowing = self.records[..index]
                .iter()
                .position(|earlier| earlier.action != record.action && earlier.shadows(record));
            if let Some(by) = shadowing {
                return Err(EaclError::Shadowed {
                    index,
                    action: record.action,
                    by,
                });
            }
        }

        Ok(())
    }

    /// Canonical bytes covered by the owner's signature
    pub fn signed_payload(&self) -> Result<Vec<u8>, EaclError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Sign the table with the container owner's key
    pub fn sign(self, key: &SecretKey) -> Result<SignedTable, EaclError> {
        let signature = key.sign(&self.signed_payload()?);
        Ok(SignedTable {
            table: self,
            public_key: key.public(),
            signature,
        })
    }
}

/// A table together with the key that signed it and the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTable {
    pub table: Table,
    pub public_key: PublicKey,
    #[serde(with = "signature_hex")]
    pub signature: Signature,
}

impl SignedTable {
    pub fn verify(&self) -> Result<(), EaclError> {
        let payload = self.table.signed_payload()?;
        self.public_key
            .verify(&payload, &self.signature)
            .map_err(|_| EaclError::BadSignature)
    }
}

mod signature_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::crypto::Signature;

    pub fn serialize<S: Serializer>(signature: &Signature, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(signature.to_bytes()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Signature, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut buff = [0u8; 64];
        hex::decode_to_slice(&s, &mut buff).map_err(serde::de::Error::custom)?;
        Ok(Signature::from_bytes(&buff))
    }
}
