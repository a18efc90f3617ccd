use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;

use super::filter::Filter;
use super::request::AccessRequest;
use super::types::{Action, Operation, Role};

/// Who a record applies to: one key, or everyone holding a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    Key(PublicKey),
    Role(Role),
}

impl Principal {
    pub fn matches(&self, request: &AccessRequest) -> bool {
        match self {
            Principal::Key(key) => *key == request.sender,
            Principal::Role(role) => *role == request.role,
        }
    }

    /// Whether every requester matched by `other` is also matched by `self`.
    ///
    /// `Role(Others)` is treated as covering any explicit key, since a key that
    /// is neither the owner nor a storage node falls into that role.
    ///
    /// This is an over-approximation. A request is matched by role, so a key
    /// that asks as `User` or `System` escapes `Role(Others)`. A table like
    /// `[Deny -> role:others, Allow -> key:K]` is reported as shadowed even
    /// though K asking as `User` still reaches the Allow record. `validate`
    /// can therefore reject tables that `evaluate` would honour, never the
    /// other way round.
    pub fn covers(&self, other: &Principal) -> bool {
        match (self, other) {
            (a, b) if a == b => true,
            (Principal::Role(Role::Others), Principal::Key(_)) => true,
            _ => false,
        }
    }
}

impl From<PublicKey> for Principal {
    fn from(key: PublicKey) -> Self {
        Principal::Key(key)
    }
}

impl From<Role> for Principal {
    fn from(role: Role) -> Self {
        Principal::Role(role)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Key(key) => write!(f, "key:{}", key),
            Principal::Role(role) => write!(f, "role:{}", role),
        }
    }
}

/// One row of a table.
///
/// A record applies to a request when the operation matches, all filters
/// match, and any target matches. Records are values: the `with_*` methods
/// consume and return a new record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub action: Action,
    pub operation: Operation,
    #[serde(default)]
    pub filters: Vec<Filter>,
    pub targets: Vec<Principal>,
}

impl Record {
    pub fn new(action: Action, operation: Operation) -> Self {
        Self {
            action,
            operation,
            filters: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_target(mut self, target: impl Into<Principal>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn matches(&self, request: &AccessRequest) -> bool {
        self.operation == request.operation
            && self.filters.iter().all(|f| f.matches(request))
            && self.targets.iter().any(|t| t.matches(request))
    }

    /// Whether every request matched by `later` is already matched by `self`.
    pub fn shadows(&self, later: &Record) -> bool {
        self.operation == later.operation
            && self.filters.iter().all(|f| later.filters.contains(f))
            && later
                .targets
                .iter()
                .all(|t| self.targets.iter().any(|mine| mine.covers(t)))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.operation)?;
        let filters: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
        write!(f, " [{}]", filters.join(" && "))?;
        let targets: Vec<String> = self.targets.iter().map(ToString::to_string).collect();
        write!(f, " -> {{{}}}", targets.join(", "))
    }
}
