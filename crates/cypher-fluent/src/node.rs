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

//! Objects written into CREATE clauses.
//!
//! Anything implementing [`NodeData`] can be inlined as a map literal. A
//! [`Node<T>`] is what a client hands back for a node that already exists;
//! it is rejected by CREATE, which wants the bare `T`.

use serde::{Serialize, Serializer};
use std::any::type_name;
use std::fmt;

use crate::config::QueryConfig;
use crate::cypher::to_map_literal;
use crate::error::{CypherError, Result};
use crate::reference::NodeReference;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    member: String,
    message: String,
}

impl FieldViolation {
    /// Report that `member` failed with `message`.
    pub fn new(member: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            message: message.into(),
        }
    }

    /// Name of the failing member.
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Why it failed.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.member, self.message)
    }
}

/// Data that can be written into a CREATE clause.
///
/// The default [`validate`](NodeData::validate) accepts everything; override
/// it to declare field constraints.
///
/// ```
/// use cypher_fluent::{FieldViolation, NodeData};
///
/// #[derive(serde::Serialize)]
/// struct Person { name: String }
///
/// impl NodeData for Person {
///     fn validate(&self) -> Result<(), Vec<FieldViolation>> {
///         if self.name.is_empty() {
///             return Err(vec![FieldViolation::new("name", "must not be empty")]);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait NodeData: Serialize {
    /// Check declared field constraints.
    fn validate(&self) -> std::result::Result<(), Vec<FieldViolation>> {
        Ok(())
    }

    /// The type wrapped by a node handle, if this is one.
    #[doc(hidden)]
    fn wrapped_type_name(&self) -> Option<&'static str> {
        None
    }
}

impl NodeData for serde_json::Value {}

/// A node that exists on the server: its reference plus its data.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    reference: NodeReference,
    data: T,
}

impl<T> Node<T> {
    /// Wrap `data` loaded from the node at `reference`.
    pub fn new(reference: NodeReference, data: T) -> Self {
        Self { reference, data }
    }

    /// The node's reference.
    pub fn reference(&self) -> NodeReference {
        self.reference
    }

    /// The node's data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Unwrap into the node's data.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T: Serialize> Serialize for Node<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<T: NodeData> NodeData for Node<T> {
    fn wrapped_type_name(&self) -> Option<&'static str> {
        Some(type_name::<T>())
    }
}

trait ErasedNode {
    fn type_name(&self) -> &'static str;
    fn wrapped_type_name(&self) -> Option<&'static str>;
    fn validate(&self) -> std::result::Result<(), Vec<FieldViolation>>;
    fn to_map_literal(&self, config: &QueryConfig) -> Result<String>;
}

impl<T: NodeData> ErasedNode for T {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn wrapped_type_name(&self) -> Option<&'static str> {
        NodeData::wrapped_type_name(self)
    }

    fn validate(&self) -> std::result::Result<(), Vec<FieldViolation>> {
        NodeData::validate(self)
    }

    fn to_map_literal(&self, config: &QueryConfig) -> Result<String> {
        to_map_literal(self, config)
    }
}

/// One positional object for [`CypherFluentQuery::create`](crate::CypherFluentQuery::create).
///
/// Holds a borrowed object of any [`NodeData`] type, or nothing.
#[derive(Clone, Copy)]
pub struct NodeArg<'a> {
    node: Option<&'a dyn ErasedNode>,
}

impl<'a> NodeArg<'a> {
    /// An argument holding `node`.
    pub fn new<T: NodeData>(node: &'a T) -> Self {
        Self {
            node: Some(node as &dyn ErasedNode),
        }
    }

    /// An empty argument. CREATE rejects it.
    pub fn null() -> Self {
        Self { node: None }
    }

    /// Check whether this argument is empty.
    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }

    /// Run every check and serialize to a map literal.
    ///
    /// Order matters: null, then node handles, then field constraints, then
    /// serialization.
    pub(crate) fn to_checked_literal(&self, position: usize, config: &QueryConfig) -> Result<String> {
        let argument = format!("objects[{}]", position);
        let node = self.node.ok_or_else(|| {
            CypherError::invalid_argument(&argument, "null objects cannot be created")
        })?;
        if let Some(inner) = node.wrapped_type_name() {
            return Err(CypherError::invalid_argument(
                argument,
                format!(
                    "you're trying to pass in a Node<{0}> instance; pass the {0} instance instead",
                    inner
                ),
            ));
        }
        if let Err(violations) = node.validate() {
            return Err(CypherError::ValidationFailure {
                type_name: node.type_name().to_string(),
                members: violations.into_iter().map(|v| v.member).collect(),
            });
        }
        node.to_map_literal(config)
    }
}

impl<'a, T: NodeData> From<&'a T> for NodeArg<'a> {
    fn from(node: &'a T) -> Self {
        Self::new(node)
    }
}

impl<'a, T: NodeData> From<Option<&'a T>> for NodeArg<'a> {
    fn from(node: Option<&'a T>) -> Self {
        node.map_or_else(Self::null, Self::new)
    }
}

impl fmt::Debug for NodeArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(node) => write!(f, "NodeArg({})", node.type_name()),
            None => write!(f, "NodeArg(null)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: Option<u32>,
    }

    impl NodeData for Person {
        fn validate(&self) -> std::result::Result<(), Vec<FieldViolation>> {
            let mut violations = Vec::new();
            if self.name.is_empty() {
                violations.push(FieldViolation::new("name", "required"));
            }
            if self.age == Some(0) {
                violations.push(FieldViolation::new("age", "must be positive"));
            }
            if violations.is_empty() {
                Ok(())
            } else {
                Err(violations)
            }
        }
    }

    fn person(name: &str, age: Option<u32>) -> Person {
        Person {
            name: name.to_string(),
            age,
        }
    }

    #[test]
    fn test_literal_for_valid_object() {
        let bob = person("Bob", None);
        let literal = NodeArg::new(&bob)
            .to_checked_literal(0, &QueryConfig::default())
            .unwrap();
        assert_eq!(literal, "{name: 'Bob'}");
    }

    #[test]
    fn test_null_argument_names_position() {
        match NodeArg::null().to_checked_literal(2, &QueryConfig::default()) {
            Err(CypherError::InvalidArgument { argument, .. }) => assert_eq!(argument, "objects[2]"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_node_handle_rejected_with_inner_type() {
        let node = Node::new(NodeReference::new(1), person("Bob", None));
        let err = NodeArg::new(&node)
            .to_checked_literal(0, &QueryConfig::default())
            .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, CypherError::InvalidArgument { .. }));
        assert!(msg.contains("Person"), "{msg}");
        assert!(msg.contains("Node<"), "{msg}");
    }

    #[test]
    fn test_validation_failure_lists_members() {
        let nobody = person("", Some(0));
        match NodeArg::new(&nobody).to_checked_literal(0, &QueryConfig::default()) {
            Err(CypherError::ValidationFailure { type_name, members }) => {
                assert!(type_name.ends_with("Person"));
                assert_eq!(members, ["name", "age"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_from_option() {
        let bob = person("Bob", Some(3));
        assert!(!NodeArg::from(Some(&bob)).is_null());
        assert!(NodeArg::from(None::<&Person>).is_null());
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::new(NodeReference::new(4), person("Ann", None));
        assert_eq!(node.reference().id(), 4);
        assert_eq!(node.data().name, "Ann");
        assert_eq!(node.into_data().name, "Ann");
    }

    #[test]
    fn test_json_values_are_node_data() {
        let value = serde_json::json!({"name": "Eve", "age": null});
        let literal = NodeArg::new(&value)
            .to_checked_literal(0, &QueryConfig::default())
            .unwrap();
        assert_eq!(literal, "{name: 'Eve'}");
    }
}
