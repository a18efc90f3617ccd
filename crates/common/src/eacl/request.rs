use std::collections::BTreeMap;

use crate::crypto::PublicKey;

use super::types::{HeaderType, Operation, Role};

/// The facts a table is evaluated against: who asks, for what, on which object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub operation: Operation,
    pub sender: PublicKey,
    pub role: Role,
    pub object_headers: BTreeMap<String, String>,
    pub request_headers: BTreeMap<String, String>,
}

impl AccessRequest {
    pub fn new(operation: Operation, sender: PublicKey, role: Role) -> Self {
        Self {
            operation,
            sender,
            role,
            object_headers: BTreeMap::new(),
            request_headers: BTreeMap::new(),
        }
    }

    pub fn with_object_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.object_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_request_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.insert(key.into(), value.into());
        self
    }

    pub fn header(&self, header_type: HeaderType, key: &str) -> Option<&str> {
        let headers = match header_type {
            HeaderType::Object => &self.object_headers,
            HeaderType::Request => &self.request_headers,
        };
        headers.get(key).map(String::as_str)
    }
}
