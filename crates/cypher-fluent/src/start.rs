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

//! Structured START clauses.
//!
//! A [`StartBindings`] is an ordered, named bag of start points. Each entry
//! renders as `identity=<lookup>` and entries are joined with `, ` in the
//! order they were added:
//!
//! | Binding | Rendered |
//! |---------|----------|
//! | [`StartBinding::Nodes`] | `n=node(1, 2)` |
//! | [`StartBinding::Relationships`] | `r=relationship(3)` |
//! | [`StartBinding::AllNodes`] | `n=node(*)` |
//! | [`StartBinding::IndexLookup`] | `n=node:people(Name = {p0})` |
//! | [`StartBinding::IndexQuery`] | `n=node:people({p0})` |
//!
//! Index values are always bound as freshly minted parameters, never inlined.

use std::collections::HashSet;

use crate::cypher::{escape_identifier, is_valid_identifier, validate_property_key, CypherValue};
use crate::error::{CypherError, Result};
use crate::reference::{NodeReference, RelationshipReference};
use crate::writer::QueryWriter;

/// One start point.
#[derive(Debug, Clone, PartialEq)]
pub enum StartBinding {
    /// One or more nodes by id.
    Nodes(Vec<NodeReference>),
    /// One or more relationships by id.
    Relationships(Vec<RelationshipReference>),
    /// Every node in the graph.
    AllNodes,
    /// Nodes found in an index under an exact key/value pair.
    IndexLookup {
        /// Index name.
        index: String,
        /// Indexed key.
        key: String,
        /// Value to look up; bound as a parameter.
        value: CypherValue,
    },
    /// Nodes matching an index query string (e.g. `"name:B*"`).
    IndexQuery {
        /// Index name.
        index: String,
        /// Query passed to the index; bound as a parameter.
        query: String,
    },
}

impl StartBinding {
    /// A single node.
    pub fn node(reference: impl Into<NodeReference>) -> Self {
        StartBinding::Nodes(vec![reference.into()])
    }

    /// Several nodes.
    pub fn nodes<R: Into<NodeReference>>(references: impl IntoIterator<Item = R>) -> Self {
        StartBinding::Nodes(references.into_iter().map(Into::into).collect())
    }

    /// A single relationship.
    pub fn relationship(reference: impl Into<RelationshipReference>) -> Self {
        StartBinding::Relationships(vec![reference.into()])
    }

    /// Several relationships.
    pub fn relationships<R: Into<RelationshipReference>>(
        references: impl IntoIterator<Item = R>,
    ) -> Self {
        StartBinding::Relationships(references.into_iter().map(Into::into).collect())
    }

    /// An exact index lookup.
    pub fn index_lookup(
        index: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<CypherValue>,
    ) -> Self {
        StartBinding::IndexLookup {
            index: index.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// An index query.
    pub fn index_query(index: impl Into<String>, query: impl Into<String>) -> Self {
        StartBinding::IndexQuery {
            index: index.into(),
            query: query.into(),
        }
    }

    fn check(&self, identity: &str) -> Result<()> {
        let reject = |message: &str| -> Result<()> {
            Err(CypherError::invalid_argument(identity, message))
        };
        match self {
            StartBinding::Nodes(refs) if refs.is_empty() => reject("no node references given"),
            StartBinding::Relationships(refs) if refs.is_empty() => {
                reject("no relationship references given")
            }
            StartBinding::IndexLookup { index, key, .. } => {
                if index.trim().is_empty() {
                    reject("index name is empty")
                } else if key.trim().is_empty() {
                    reject("index key is empty")
                } else {
                    validate_property_key(index)?;
                    validate_property_key(key).map(|_| ())
                }
            }
            StartBinding::IndexQuery { index, .. } => {
                if index.trim().is_empty() {
                    reject("index name is empty")
                } else {
                    validate_property_key(index).map(|_| ())
                }
            }
            _ => Ok(()),
        }
    }

    fn render(&self, identity: &str, writer: &mut QueryWriter) -> String {
        match self {
            StartBinding::Nodes(refs) => format!("{}=node({})", identity, join_ids(refs)),
            StartBinding::Relationships(refs) => {
                format!("{}=relationship({})", identity, join_ids(refs))
            }
            StartBinding::AllNodes => format!("{}=node(*)", identity),
            StartBinding::IndexLookup { index, key, value } => {
                let param = writer.create_auto_parameter(value.clone());
                format!(
                    "{}=node:{}({} = {{{}}})",
                    identity,
                    escape_identifier(index),
                    escape_identifier(key),
                    param
                )
            }
            StartBinding::IndexQuery { index, query } => {
                let param = writer.create_auto_parameter(CypherValue::String(query.clone()));
                format!("{}=node:{}({{{}}})", identity, escape_identifier(index), param)
            }
        }
    }
}

fn join_ids<T: std::fmt::Display>(refs: &[T]) -> String {
    refs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Named start points in declared order.
///
/// ```
/// # use cypher_fluent::StartBindings;
/// let bindings = StartBindings::new()
///     .node("a", 1u64)
///     .index_lookup("b", "people", "Name", "Bob");
/// assert_eq!(bindings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartBindings {
    entries: Vec<(String, StartBinding)>,
}

impl StartBindings {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `binding` under `identity`.
    pub fn bind(mut self, identity: impl Into<String>, binding: StartBinding) -> Self {
        self.entries.push((identity.into(), binding));
        self
    }

    /// Add a single node.
    pub fn node(self, identity: impl Into<String>, reference: impl Into<NodeReference>) -> Self {
        self.bind(identity, StartBinding::node(reference))
    }

    /// Add several nodes under one identity.
    pub fn nodes<R: Into<NodeReference>>(
        self,
        identity: impl Into<String>,
        references: impl IntoIterator<Item = R>,
    ) -> Self {
        self.bind(identity, StartBinding::nodes(references))
    }

    /// Add a single relationship.
    pub fn relationship(
        self,
        identity: impl Into<String>,
        reference: impl Into<RelationshipReference>,
    ) -> Self {
        self.bind(identity, StartBinding::relationship(reference))
    }

    /// Add every node.
    pub fn all_nodes(self, identity: impl Into<String>) -> Self {
        self.bind(identity, StartBinding::AllNodes)
    }

    /// Add an exact index lookup.
    pub fn index_lookup(
        self,
        identity: impl Into<String>,
        index: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<CypherValue>,
    ) -> Self {
        self.bind(identity, StartBinding::index_lookup(index, key, value))
    }

    /// Add an index query.
    pub fn index_query(
        self,
        identity: impl Into<String>,
        index: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        self.bind(identity, StartBinding::index_query(index, query))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(identity, binding)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StartBinding)> {
        self.entries.iter().map(|(id, b)| (id.as_str(), b))
    }

    /// Check every entry without touching a writer.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(CypherError::invalid_argument(
                "bindings",
                "at least one start binding is required",
            ));
        }
        let mut seen = HashSet::new();
        for (identity, binding) in &self.entries {
            if !is_valid_identifier(identity) {
                return Err(CypherError::invalid_argument(
                    identity.as_str(),
                    "start identities must be plain Cypher identifiers",
                ));
            }
            if !seen.insert(identity.as_str()) {
                return Err(CypherError::invalid_argument(
                    identity.as_str(),
                    "identity is bound more than once",
                ));
            }
            binding.check(identity)?;
        }
        Ok(())
    }

    /// Render the body of a START clause, minting parameters on `writer`.
    ///
    /// Everything is validated before the first parameter is minted.
    pub(crate) fn render(&self, writer: &mut QueryWriter) -> Result<String> {
        self.validate()?;
        Ok(self
            .entries
            .iter()
            .map(|(identity, binding)| binding.render(identity, writer))
            .collect::<Vec<_>>()
            .join(", "))
    }
}

impl<S: Into<String>> FromIterator<(S, StartBinding)> for StartBindings {
    fn from_iter<I: IntoIterator<Item = (S, StartBinding)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(id, b)| (id.into(), b)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bindings: &StartBindings) -> (String, QueryWriter) {
        let mut writer = QueryWriter::default();
        let text = bindings.render(&mut writer).unwrap();
        (text, writer)
    }

    #[test]
    fn test_direct_references() {
        let bindings = StartBindings::new()
            .node("a", 1u64)
            .nodes("b", [2u64, 3])
            .relationship("r", 4u64)
            .all_nodes("all");
        let (text, writer) = render(&bindings);
        assert_eq!(text, "a=node(1), b=node(2, 3), r=relationship(4), all=node(*)");
        assert!(writer.parameters().is_empty());
    }

    #[test]
    fn test_index_lookups_mint_parameters() {
        let bindings = StartBindings::new()
            .index_lookup("a", "people", "Name", "Bob")
            .index_query("b", "people", "Name:A*");
        let (text, writer) = render(&bindings);
        assert_eq!(
            text,
            "a=node:people(Name = {p0}), b=node:people({p1})"
        );
        assert_eq!(writer.parameters()["p0"].as_str(), Some("Bob"));
        assert_eq!(writer.parameters()["p1"].as_str(), Some("Name:A*"));
    }

    #[test]
    fn test_index_values_never_inlined() {
        let bindings = StartBindings::new().index_lookup("a", "people", "Name", "') DELETE n //");
        let (text, _) = render(&bindings);
        assert!(!text.contains("DELETE"));
    }

    #[test]
    fn test_odd_index_names_are_escaped() {
        let bindings = StartBindings::new().index_lookup("a", "my index", "first name", 1);
        let (text, _) = render(&bindings);
        assert_eq!(text, "a=node:`my index`(`first name` = {p0})");
    }

    #[test]
    fn test_hidden_characters_in_index_names_rejected() {
        let cases = vec![
            StartBindings::new().index_lookup("a", "peo\u{200B}ple", "Name", 1),
            StartBindings::new().index_lookup("a", "people", "Na\u{202E}me", 1),
            StartBindings::new().index_query("a", "people\n", "name:Bob"),
        ];
        for bindings in cases {
            let mut writer = QueryWriter::default();
            let err = bindings.render(&mut writer).unwrap_err();
            assert!(matches!(err, CypherError::InvalidIdentifier(_)), "{err:?}");
            assert!(writer.parameters().is_empty());
        }
    }

    #[test]
    fn test_declared_order_is_kept() {
        let bindings: StartBindings = vec![
            ("z", StartBinding::node(1u64)),
            ("a", StartBinding::node(2u64)),
        ]
        .into_iter()
        .collect();
        let (text, _) = render(&bindings);
        assert_eq!(text, "z=node(1), a=node(2)");
    }

    #[test]
    fn test_malformed_entries_rejected_before_minting() {
        let cases = vec![
            StartBindings::new(),
            StartBindings::new().nodes("a", Vec::<u64>::new()),
            StartBindings::new().bind("r", StartBinding::Relationships(vec![])),
            StartBindings::new().index_lookup("a", "", "Name", 1),
            StartBindings::new().index_lookup("a", "people", " ", 1),
            StartBindings::new().index_query("a", "", "x"),
            StartBindings::new().node("a b", 1u64),
            StartBindings::new().node("a", 1u64).node("a", 2u64),
            StartBindings::new().index_lookup("ok", "people", "Name", 1).node("", 2u64),
        ];
        for bindings in cases {
            let mut writer = QueryWriter::default();
            let err = bindings.render(&mut writer).unwrap_err();
            assert!(
                matches!(err, CypherError::InvalidArgument { .. }),
                "{bindings:?} gave {err:?}"
            );
            assert!(writer.parameters().is_empty());
        }
    }
}
