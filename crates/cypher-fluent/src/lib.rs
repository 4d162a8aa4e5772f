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

//! Immutable, parameter-safe builder for Neo4j Cypher queries.
//!
//! Queries are built by chaining calls on a [`CypherFluentQuery`]. Each call
//! returns a new query and leaves the receiver unchanged, so several queries
//! can grow from one shared prefix without stepping on each other. When the
//! query is complete, [`CypherFluentQuery::query`] compiles it into a
//! [`CypherQuery`]: the text plus the parameters it references.
//!
//! # Example
//!
//! ```rust
//! use cypher_fluent::{
//!     CypherQuery, GraphClient, NodeData, ServerVersion, StartBindings, TransportError,
//! };
//!
//! struct Client(ServerVersion);
//!
//! impl GraphClient for Client {
//!     fn server_version(&self) -> &ServerVersion {
//!         &self.0
//!     }
//!     fn execute_cypher(&self, _query: &CypherQuery) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! #[derive(serde::Serialize)]
//! struct Person {
//!     name: String,
//!     nickname: Option<String>,
//! }
//!
//! impl NodeData for Person {}
//!
//! fn example() -> Result<(), cypher_fluent::CypherError> {
//!     let client = Client(ServerVersion::parse("1.8.0.8")?);
//!
//!     let start = StartBindings::new().index_lookup("owner", "people", "Name", "Alice");
//!     let bob = Person { name: "Bob".into(), nickname: None };
//!
//!     let query = client
//!         .cypher()
//!         .start_bindings(&start)?
//!         .create_node("friend", &bob)?
//!         .create_unique("owner-[:KNOWS]->friend")?
//!         .return_("friend")
//!         .query();
//!
//!     assert_eq!(
//!         query.text(),
//!         "START owner=node:people(Name = {p0})\n\
//!          CREATE (friend {name: 'Bob'})\n\
//!          CREATE UNIQUE owner-[:KNOWS]->friend\n\
//!          RETURN friend"
//!     );
//!     assert_eq!(query.parameter("p0").and_then(|v| v.as_str()), Some("Alice"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Query text
//!
//! - Clauses appear in the order they were added, one per line by default
//!   (see [`ClauseSeparator`]).
//! - Parameters are referenced with the `{name}` syntax. Names minted by the
//!   builder are `p0`, `p1`, ... and never collide with names bound through
//!   [`CypherFluentQuery::with_param`].
//! - Only CREATE inlines values, as escaped map literals. Everything else
//!   (index lookups, SKIP, LIMIT) goes through parameters.
//!
//! # Version-gated clauses
//!
//! `RELATE` and `CREATE UNIQUE` are checked against the server version the
//! client reports; see [`ClauseGate`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod config;
pub mod cypher;
pub mod error;
pub mod fluent;
pub mod node;
pub mod reference;
pub mod start;
pub mod version;
pub mod writer;

// Re-export main types at crate root for convenience
pub use client::GraphClient;
pub use config::{
    ClauseSeparator, QueryConfig, QueryConfigBuilder, DEFAULT_MAX_STRING_LENGTH,
    DEFAULT_PARAMETER_PREFIX,
};
pub use cypher::{CypherQuery, CypherValue};
pub use error::{CypherError, Result, TransportError};
pub use fluent::CypherFluentQuery;
pub use node::{FieldViolation, Node, NodeArg, NodeData};
pub use reference::{NodeReference, RelationshipReference};
pub use start::{StartBinding, StartBindings};
pub use version::{ClauseGate, ServerVersion, VersionRange};
pub use writer::QueryWriter;
