use std::fmt;

use serde::{Deserialize, Serialize};

use super::request::AccessRequest;
use super::types::{HeaderType, MatchType};

/// Well-known object attribute holding the original file name.
pub const ATTRIBUTE_FILE_NAME: &str = "FileName";

/// Predicate over one named header of a request.
///
/// Filters of a record are combined with logical AND. A filter whose header
/// is absent from the request never matches, regardless of its match type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub header_type: HeaderType,
    pub matcher: MatchType,
    pub key: String,
    pub value: String,
}

impl Filter {
    pub fn new(
        header_type: HeaderType,
        matcher: MatchType,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            header_type,
            matcher,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter on an object attribute
    pub fn object_attribute(
        matcher: MatchType,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(HeaderType::Object, matcher, key, value)
    }

    pub fn matches(&self, request: &AccessRequest) -> bool {
        request
            .header(self.header_type, &self.key)
            .is_some_and(|actual| self.matcher.matches(actual, &self.value))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = match self.header_type {
            HeaderType::Object => "object",
            HeaderType::Request => "request",
        };
        write!(
            f,
            "{}:{} {} {:?}",
            scope, self.key, self.matcher, self.value
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::SecretKey;
    use crate::eacl::{Operation, Role};

    fn request_for(file_name: Option<&str>) -> AccessRequest {
        let sender = SecretKey::generate().unwrap().public();
        let request = AccessRequest::new(Operation::Get, sender, Role::Others);
        match file_name {
            Some(name) => request.with_object_attribute(ATTRIBUTE_FILE_NAME, name),
            None => request,
        }
    }

    #[test]
    fn test_string_equal() {
        let filter = Filter::object_attribute(MatchType::StringEqual, ATTRIBUTE_FILE_NAME, "a.jpg");
        assert!(filter.matches(&request_for(Some("a.jpg"))));
        assert!(!filter.matches(&request_for(Some("b.jpg"))));
    }

    #[test]
    fn test_missing_header_never_matches() {
        let eq = Filter::object_attribute(MatchType::StringEqual, ATTRIBUTE_FILE_NAME, "a.jpg");
        let ne = Filter::object_attribute(MatchType::StringNotEqual, ATTRIBUTE_FILE_NAME, "a.jpg");
        assert!(!eq.matches(&request_for(None)));
        assert!(!ne.matches(&request_for(None)));
    }

    #[test]
    fn test_header_scope_is_respected() {
        let filter = Filter::new(
            HeaderType::Request,
            MatchType::StringEqual,
            ATTRIBUTE_FILE_NAME,
            "a.jpg",
        );
        // the object attribute is set, the request header is not
        assert!(!filter.matches(&request_for(Some("a.jpg"))));
    }
}
