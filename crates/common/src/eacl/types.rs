use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EaclError;

/// Decision applied when a record matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Allow,
    Deny,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Allow => write!(f, "ALLOW"),
            Action::Deny => write!(f, "DENY"),
        }
    }
}

/// Object service operation a record authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Get,
    Head,
    Put,
    Delete,
    Search,
    GetRange,
    GetRangeHash,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Get,
        Operation::Head,
        Operation::Put,
        Operation::Delete,
        Operation::Search,
        Operation::GetRange,
        Operation::GetRangeHash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "GET",
            Operation::Head => "HEAD",
            Operation::Put => "PUT",
            Operation::Delete => "DELETE",
            Operation::Search => "SEARCH",
            Operation::GetRange => "GET_RANGE",
            Operation::GetRangeHash => "GET_RANGE_HASH",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = EaclError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| EaclError::UnknownOperation(s.to_string()))
    }
}

/// Symbolic group of requesters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The container owner
    User,
    /// Storage nodes and the network itself
    System,
    /// Everybody not covered by the other roles
    Others,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::System => write!(f, "system"),
            Role::Others => write!(f, "others"),
        }
    }
}

impl FromStr for Role {
    type Err = EaclError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "system" => Ok(Role::System),
            "others" => Ok(Role::Others),
            _ => Err(EaclError::UnknownRole(s.to_string())),
        }
    }
}

/// How a filter compares a header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    StringEqual,
    StringNotEqual,
}

impl MatchType {
    pub fn matches(&self, actual: &str, expected: &str) -> bool {
        match self {
            MatchType::StringEqual => actual == expected,
            MatchType::StringNotEqual => actual != expected,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::StringEqual => write!(f, "=="),
            MatchType::StringNotEqual => write!(f, "!="),
        }
    }
}

/// Which set of headers a filter reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderType {
    /// Attributes stored on the object
    Object,
    /// Headers carried by the request
    Request,
}
