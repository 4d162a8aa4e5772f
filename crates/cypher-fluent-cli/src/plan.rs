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

//! JSON query plans.
//!
//! A plan is a JSON array of steps, one builder call each, applied in order:
//!
//! ```json
//! [
//!   {"start_bindings": [
//!     {"kind": "index_lookup", "identity": "n", "index": "people", "key": "Name", "value": "Bob"}
//!   ]},
//!   {"match": ["n-[:KNOWS]->friend"]},
//!   {"create": {"template": "(m {0})", "objects": [{"name": "Carol"}]}},
//!   {"create_unique": "n-[:KNOWS]->m"},
//!   {"return": "friend"},
//!   {"limit": 10}
//! ]
//! ```

use cypher_fluent::{
    CypherFluentQuery, CypherQuery, CypherValue, GraphClient, NodeArg, ServerVersion,
    StartBinding, StartBindings, TransportError,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::CliError;

/// One builder call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    /// `with_param(key, value)`
    WithParam {
        /// Parameter key
        key: String,
        /// Parameter value
        value: Value,
    },
    /// `start(text)`
    Start(String),
    /// `start_bindings(bindings)`
    StartBindings(Vec<BindingEntry>),
    /// `match_(patterns)`
    Match(Vec<String>),
    /// `relate(text)`
    Relate(String),
    /// `create_unique(text)`
    CreateUnique(String),
    /// `create(template, objects)`; a JSON `null` object is passed as a null
    /// argument.
    Create {
        /// Template with `{0}`, `{1}`, ... placeholders
        template: String,
        /// One JSON object per placeholder
        #[serde(default)]
        objects: Vec<Value>,
    },
    /// `create_node(identity, properties)`
    CreateNode {
        /// Identity bound to the new node
        identity: String,
        /// Node properties
        properties: Value,
    },
    /// `delete(text)`
    Delete(String),
    /// `with(text)`
    With(String),
    /// `set(text)`
    Set(String),
    /// `where_(text)`
    Where(String),
    /// `return_(text)`
    Return(String),
    /// `return_distinct(text)`
    ReturnDistinct(String),
    /// `order_by(properties)`
    OrderBy(Vec<String>),
    /// `order_by_descending(properties)`
    OrderByDescending(Vec<String>),
    /// `skip(count)`
    Skip(u32),
    /// `limit(count)`
    Limit(u32),
}

impl Step {
    /// The step's name as written in a plan.
    pub fn name(&self) -> &'static str {
        match self {
            Step::WithParam { .. } => "with_param",
            Step::Start(_) => "start",
            Step::StartBindings(_) => "start_bindings",
            Step::Match(_) => "match",
            Step::Relate(_) => "relate",
            Step::CreateUnique(_) => "create_unique",
            Step::Create { .. } => "create",
            Step::CreateNode { .. } => "create_node",
            Step::Delete(_) => "delete",
            Step::With(_) => "with",
            Step::Set(_) => "set",
            Step::Where(_) => "where",
            Step::Return(_) => "return",
            Step::ReturnDistinct(_) => "return_distinct",
            Step::OrderBy(_) => "order_by",
            Step::OrderByDescending(_) => "order_by_descending",
            Step::Skip(_) => "skip",
            Step::Limit(_) => "limit",
        }
    }

    /// Apply this step to `query`.
    pub fn apply<'c>(
        &self,
        query: &CypherFluentQuery<'c>,
    ) -> cypher_fluent::Result<CypherFluentQuery<'c>> {
        match self {
            Step::WithParam { key, value } => {
                query.with_param(key, CypherValue::from(value.clone()))
            }
            Step::Start(text) => Ok(query.start(text)),
            Step::StartBindings(entries) => {
                let bindings: StartBindings =
                    entries.iter().map(BindingEntry::to_binding).collect();
                query.start_bindings(&bindings)
            }
            Step::Match(patterns) => Ok(query.match_(&as_strs(patterns))),
            Step::Relate(text) => query.relate(text),
            Step::CreateUnique(text) => query.create_unique(text),
            Step::Create { template, objects } => {
                let args: Vec<NodeArg<'_>> = objects
                    .iter()
                    .map(|object| {
                        if object.is_null() {
                            NodeArg::null()
                        } else {
                            NodeArg::new(object)
                        }
                    })
                    .collect();
                query.create(template, &args)
            }
            Step::CreateNode {
                identity,
                properties,
            } => query.create_node(identity, properties),
            Step::Delete(text) => Ok(query.delete(text)),
            Step::With(text) => Ok(query.with(text)),
            Step::Set(text) => Ok(query.set(text)),
            Step::Where(text) => Ok(query.where_(text)),
            Step::Return(text) => Ok(query.return_(text)),
            Step::ReturnDistinct(text) => Ok(query.return_distinct(text)),
            Step::OrderBy(properties) => Ok(query.order_by(&as_strs(properties))),
            Step::OrderByDescending(properties) => {
                Ok(query.order_by_descending(&as_strs(properties)))
            }
            Step::Skip(count) => Ok(query.skip(*count)),
            Step::Limit(count) => Ok(query.limit(*count)),
        }
    }
}

fn as_strs(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}

/// One START entry in a `start_bindings` step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum BindingEntry {
    /// `identity=node(ids...)`
    Nodes {
        /// Start identity
        identity: String,
        /// Node ids
        ids: Vec<u64>,
    },
    /// `identity=relationship(ids...)`
    Relationships {
        /// Start identity
        identity: String,
        /// Relationship ids
        ids: Vec<u64>,
    },
    /// `identity=node(*)`
    AllNodes {
        /// Start identity
        identity: String,
    },
    /// `identity=node:index(key = {pN})`
    IndexLookup {
        /// Start identity
        identity: String,
        /// Index name
        index: String,
        /// Indexed key
        key: String,
        /// Value to look up
        value: Value,
    },
    /// `identity=node:index({pN})`
    IndexQuery {
        /// Start identity
        identity: String,
        /// Index name
        index: String,
        /// Index query string
        query: String,
    },
}

impl BindingEntry {
    fn to_binding(&self) -> (String, StartBinding) {
        match self {
            BindingEntry::Nodes { identity, ids } => {
                (identity.clone(), StartBinding::nodes(ids.iter().copied()))
            }
            BindingEntry::Relationships { identity, ids } => {
                (identity.clone(), StartBinding::relationships(ids.iter().copied()))
            }
            BindingEntry::AllNodes { identity } => (identity.clone(), StartBinding::AllNodes),
            BindingEntry::IndexLookup {
                identity,
                index,
                key,
                value,
            } => (
                identity.clone(),
                StartBinding::index_lookup(
                    index.as_str(),
                    key.as_str(),
                    CypherValue::from(value.clone()),
                ),
            ),
            BindingEntry::IndexQuery {
                identity,
                index,
                query,
            } => (
                identity.clone(),
                StartBinding::index_query(index.as_str(), query.as_str()),
            ),
        }
    }
}

/// A parsed plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    /// Parse a plan from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Apply every step to `query`, stopping at the first failure.
    pub fn apply<'c>(&self, query: CypherFluentQuery<'c>) -> Result<CypherFluentQuery<'c>, CliError> {
        self.steps
            .iter()
            .enumerate()
            .try_fold(query, |query, (index, step)| {
                debug!(step = index, name = step.name(), "applying plan step");
                step.apply(&query)
                    .map_err(|err| CliError::step(index, step.name(), err))
            })
    }
}

/// A client that only reports a server version. Plans are compiled, never
/// sent anywhere.
#[derive(Debug, Clone, Copy)]
pub struct OfflineClient {
    version: ServerVersion,
}

impl OfflineClient {
    /// A client claiming to be `version`.
    pub fn new(version: ServerVersion) -> Self {
        Self { version }
    }
}

impl GraphClient for OfflineClient {
    fn server_version(&self) -> &ServerVersion {
        &self.version
    }

    fn execute_cypher(&self, _query: &CypherQuery) -> Result<(), TransportError> {
        Err("offline client cannot execute queries".into())
    }
}
