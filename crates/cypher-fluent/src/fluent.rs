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

//! The fluent query surface.
//!
//! Every method takes `&self` and returns a new query. The receiver is never
//! changed, so a shared prefix can be branched freely:
//!
//! ```
//! # use cypher_fluent::{CypherQuery, GraphClient, ServerVersion, TransportError};
//! # struct Client(ServerVersion);
//! # impl GraphClient for Client {
//! #     fn server_version(&self) -> &ServerVersion { &self.0 }
//! #     fn execute_cypher(&self, _: &CypherQuery) -> Result<(), TransportError> { Ok(()) }
//! # }
//! # let client = Client(ServerVersion::new(1, 8));
//! let prefix = client.cypher().start("n=node(1)");
//! let names = prefix.return_("n.Name");
//! let removal = prefix.delete("n");
//!
//! assert_eq!(names.query().text(), "START n=node(1)\nRETURN n.Name");
//! assert_eq!(removal.query().text(), "START n=node(1)\nDELETE n");
//! assert_eq!(prefix.query().text(), "START n=node(1)");
//! ```
//!
//! Calls that can fail return `Result<Self>`; on error nothing has been
//! appended and the receiver is still usable.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::GraphClient;
use crate::config::QueryConfig;
use crate::cypher::{CypherQuery, CypherValue};
use crate::error::{CypherError, Result};
use crate::node::{NodeArg, NodeData};
use crate::reference::NodeReference;
use crate::start::StartBindings;
use crate::version::ClauseGate;
use crate::writer::{format_positional, QueryWriter};

/// An immutable, partially built Cypher query bound to a client.
#[derive(Clone)]
pub struct CypherFluentQuery<'c> {
    client: &'c dyn GraphClient,
    config: Arc<QueryConfig>,
    writer: QueryWriter,
}

impl<'c> CypherFluentQuery<'c> {
    /// An empty query with the default configuration.
    pub fn new(client: &'c dyn GraphClient) -> Self {
        let config = QueryConfig::default();
        Self {
            client,
            writer: QueryWriter::new(&config),
            config: Arc::new(config),
        }
    }

    /// An empty query with `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` if the parameter prefix is not a valid
    /// identifier.
    pub fn with_config(client: &'c dyn GraphClient, config: QueryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            writer: QueryWriter::new(&config),
            config: Arc::new(config),
        })
    }

    /// The configuration this query was started with.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The accumulated clauses and parameters.
    pub fn writer(&self) -> &QueryWriter {
        &self.writer
    }

    fn derive(&self, writer: QueryWriter) -> Self {
        Self {
            client: self.client,
            config: Arc::clone(&self.config),
            writer,
        }
    }

    /// Clone the writer, apply `change` and wrap the result. On error the
    /// clone is dropped.
    fn mutate<F>(&self, change: F) -> Result<Self>
    where
        F: FnOnce(&mut QueryWriter, &QueryConfig) -> Result<()>,
    {
        let mut writer = self.writer.clone();
        change(&mut writer, &self.config)?;
        Ok(self.derive(writer))
    }

    fn append(&self, clause: String) -> Self {
        let mut writer = self.writer.clone();
        writer.append_clause(clause);
        self.derive(writer)
    }

    /// Bind a parameter that clause text can reference as `{key}`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateParameterKey` if `key` is already bound.
    pub fn with_param(&self, key: &str, value: impl Into<CypherValue>) -> Result<Self> {
        if self.writer.contains_parameter_with_key(key) {
            return Err(CypherError::DuplicateParameterKey(key.to_string()));
        }
        let value = value.into();
        self.mutate(|writer, _| writer.create_parameter(key, value))
    }

    /// `START <text>`, verbatim.
    pub fn start(&self, text: &str) -> Self {
        self.append(format!("START {}", text))
    }

    /// `START` built from structured bindings.
    ///
    /// Index lookups are bound through freshly minted parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a malformed entry.
    pub fn start_bindings(&self, bindings: &StartBindings) -> Result<Self> {
        self.mutate(|writer, _| {
            let body = bindings.render(writer)?;
            writer.append_clause(format!("START {}", body));
            Ok(())
        })
    }

    /// Retired. Always fails; use [`start_bindings`](Self::start_bindings).
    #[deprecated(note = "use start_bindings with StartBindings::nodes")]
    pub fn start_with_nodes(&self, _identity: &str, _nodes: &[NodeReference]) -> Result<Self> {
        Err(retired("start_with_nodes"))
    }

    /// Retired. Always fails; use [`start_bindings`](Self::start_bindings).
    #[deprecated(note = "use start_bindings with one entry per start point")]
    pub fn add_start_point(&self, _identity: &str, _nodes: &[NodeReference]) -> Result<Self> {
        Err(retired("add_start_point"))
    }

    /// `MATCH <patterns>`, comma-joined.
    pub fn match_(&self, patterns: &[&str]) -> Self {
        self.append(format!("MATCH {}", patterns.join(", ")))
    }

    /// `RELATE <text>`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` against 1.8 and anything from 1.8.M07
    /// on; see [`ClauseGate::RELATE`].
    pub fn relate(&self, text: &str) -> Result<Self> {
        self.gated(&ClauseGate::RELATE, text)
    }

    /// `CREATE UNIQUE <text>`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` before 1.8 and on 1.8.M01 to 1.8.M06;
    /// see [`ClauseGate::CREATE_UNIQUE`].
    pub fn create_unique(&self, text: &str) -> Result<Self> {
        self.gated(&ClauseGate::CREATE_UNIQUE, text)
    }

    fn gated(&self, gate: &ClauseGate, text: &str) -> Result<Self> {
        let version = self.client.server_version();
        if let Err(err) = gate.check(version) {
            warn!(clause = gate.keyword(), %version, "clause rejected for server version");
            return Err(err);
        }
        Ok(self.append(format!("{} {}", gate.keyword(), text)))
    }

    /// `CREATE <template>` with `{0}`, `{1}`, ... replaced by map literals
    /// of the matching `objects`.
    ///
    /// Substitution is textual: the template must not contain `{n}` tokens
    /// for any other reason.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a null argument, a [`Node<T>`](crate::Node)
    ///   handle, or a placeholder without an argument
    /// - `ValidationFailure` if an object fails its field constraints
    /// - `StringLengthExceeded` or `JsonError` from serialization
    pub fn create(&self, template: &str, objects: &[NodeArg<'_>]) -> Result<Self> {
        self.mutate(|writer, config| {
            let literals = objects
                .iter()
                .enumerate()
                .map(|(position, object)| object.to_checked_literal(position, config))
                .collect::<Result<Vec<_>>>()?;
            let text = format_positional(template, &literals)?;
            writer.append_clause(format!("CREATE {}", text));
            Ok(())
        })
    }

    /// `CREATE (<identity> <map literal>)` for a single object.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub fn create_node<T: NodeData>(&self, identity: &str, node: &T) -> Result<Self> {
        self.mutate(|writer, config| {
            let literal = NodeArg::new(node).to_checked_literal(0, config)?;
            writer.append_clause(format!("CREATE ({} {})", identity, literal));
            Ok(())
        })
    }

    /// `DELETE <identities>`.
    pub fn delete(&self, identities: &str) -> Self {
        self.append(format!("DELETE {}", identities))
    }

    /// `WITH <text>`.
    pub fn with(&self, text: &str) -> Self {
        self.append(format!("WITH {}", text))
    }

    /// `SET <text>`.
    pub fn set(&self, text: &str) -> Self {
        self.append(format!("SET {}", text))
    }

    /// `WHERE <text>`.
    pub fn where_(&self, text: &str) -> Self {
        self.append(format!("WHERE {}", text))
    }

    /// `RETURN <text>`.
    pub fn return_(&self, text: &str) -> Self {
        self.append(format!("RETURN {}", text))
    }

    /// `RETURN distinct <text>`.
    pub fn return_distinct(&self, text: &str) -> Self {
        self.append(format!("RETURN distinct {}", text))
    }

    /// `ORDER BY <properties>`.
    pub fn order_by(&self, properties: &[&str]) -> Self {
        self.append(format!("ORDER BY {}", properties.join(", ")))
    }

    /// `ORDER BY <p1> DESC, <p2> DESC, ...`.
    pub fn order_by_descending(&self, properties: &[&str]) -> Self {
        let descending: Vec<String> = properties.iter().map(|p| format!("{} DESC", p)).collect();
        self.append(format!("ORDER BY {}", descending.join(", ")))
    }

    /// `SKIP {pN}`, with the count bound as a parameter.
    pub fn skip(&self, count: u32) -> Self {
        self.parameterized("SKIP {0}", count)
    }

    /// `LIMIT {pN}`, with the count bound as a parameter.
    pub fn limit(&self, count: u32) -> Self {
        self.parameterized("LIMIT {0}", count)
    }

    fn parameterized(&self, template: &str, count: u32) -> Self {
        let mut writer = self.writer.clone();
        let name = writer.create_auto_parameter(CypherValue::from(count));
        writer.append_clause(template.replace("{0}", &format!("{{{}}}", name)));
        self.derive(writer)
    }

    /// Compile the current state. Callable any number of times.
    pub fn query(&self) -> CypherQuery {
        self.writer.to_cypher_query()
    }

    /// Compile and hand the query to the client once.
    ///
    /// # Errors
    ///
    /// Returns `Transport` with whatever the client reported.
    pub fn execute_without_results(&self) -> Result<()> {
        let query = self.query();
        debug!(text = %query.text(), parameters = query.parameters().len(), "executing query");
        self.client
            .execute_cypher(&query)
            .map_err(CypherError::Transport)
    }
}

fn retired(method: &str) -> CypherError {
    warn!(method, "retired start overload called");
    CypherError::UnsupportedOperation(format!(
        "{} is no longer supported; build a StartBindings and call start_bindings instead",
        method
    ))
}

impl fmt::Debug for CypherFluentQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CypherFluentQuery")
            .field("server_version", self.client.server_version())
            .field("config", &self.config)
            .field("writer", &self.writer)
            .finish()
    }
}
