// Dweve Cypher Fluent - Immutable Cypher query builder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for building and executing Cypher queries.

use thiserror::Error;

/// Boxed error returned by a [`GraphClient`](crate::GraphClient) transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for query building operations.
///
/// Every variant is raised by the call that detects the condition, before
/// anything is appended to the query being built.
#[derive(Debug, Error)]
pub enum CypherError {
    /// A parameter with this key is already bound on the query.
    #[error("a parameter with the key '{0}' has already been defined on this query")]
    DuplicateParameterKey(String),

    /// The operation is not available, either for the connected server
    /// version or because the overload has been retired.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An argument was rejected before it reached the query text.
    #[error("invalid argument '{argument}': {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: String,
        /// Description of what was wrong.
        message: String,
    },

    /// An object failed its declared field constraints.
    #[error("{type_name} failed validation on members: {}", .members.join(", "))]
    ValidationFailure {
        /// Type name of the object that failed validation.
        type_name: String,
        /// Names of the members that failed.
        members: Vec<String>,
    },

    /// A server version string could not be parsed.
    #[error("invalid server version '{0}'")]
    InvalidVersion(String),

    /// Invalid Cypher identifier.
    #[error("invalid Cypher identifier: '{0}'")]
    InvalidIdentifier(String),

    /// String length limit exceeded for an inlined property.
    #[error("String length {length} exceeds maximum allowed length {max_length} for property '{property}'")]
    StringLengthExceeded {
        /// Actual length of the string.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
        /// Property name where the violation occurred.
        property: String,
    },

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The transport failed to execute a compiled query.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
}

impl CypherError {
    /// Shorthand for [`CypherError::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        CypherError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for query building operations.
pub type Result<T> = std::result::Result<T, CypherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_duplicate_parameter() {
        let err = CypherError::DuplicateParameterKey("foo".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'foo'"));
        assert!(msg.contains("already been defined"));
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let err = CypherError::invalid_argument("objects", "null values are not allowed");
        let msg = err.to_string();
        assert!(msg.contains("objects"));
        assert!(msg.contains("null values"));
    }

    #[test]
    fn test_error_display_validation_failure() {
        let err = CypherError::ValidationFailure {
            type_name: "Person".to_string(),
            members: vec!["name".to_string(), "age".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Person failed validation on members: name, age"
        );
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: CypherError = json_err.into();
        assert!(matches!(err, CypherError::JsonError(_)));
    }

    #[test]
    fn test_transport_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = CypherError::Transport(Box::new(io));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("refused"));
    }
}
