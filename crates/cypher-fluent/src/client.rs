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

//! The seam to whatever actually talks to the server.

use crate::cypher::CypherQuery;
use crate::error::TransportError;
use crate::fluent::CypherFluentQuery;
use crate::version::ServerVersion;

/// A connected graph client.
///
/// The builder needs two things from it: the server version, to gate
/// version-specific clauses, and a way to run a compiled query.
pub trait GraphClient: Send + Sync {
    /// The version reported by the connected server.
    fn server_version(&self) -> &ServerVersion;

    /// Run a compiled query, discarding any results.
    fn execute_cypher(&self, query: &CypherQuery) -> std::result::Result<(), TransportError>;

    /// Start a new query against this client with the default configuration.
    fn cypher(&self) -> CypherFluentQuery<'_>
    where
        Self: Sized,
    {
        CypherFluentQuery::new(self)
    }
}
