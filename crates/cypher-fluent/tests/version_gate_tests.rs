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

//! RELATE and CREATE UNIQUE against the server versions either clause was
//! or was not available on, driven through the builder.

use cypher_fluent::{
    ClauseGate, CypherError, CypherQuery, GraphClient, ServerVersion, TransportError,
};

struct VersionedClient(ServerVersion);

impl VersionedClient {
    fn new(version: &str) -> Self {
        Self(ServerVersion::parse(version).unwrap())
    }
}

impl GraphClient for VersionedClient {
    fn server_version(&self) -> &ServerVersion {
        &self.0
    }

    fn execute_cypher(&self, _query: &CypherQuery) -> Result<(), TransportError> {
        Ok(())
    }
}

fn relate_allowed(version: &str) -> bool {
    let client = VersionedClient::new(version);
    client.cypher().relate("a-[:X]->b").is_ok()
}

fn create_unique_allowed(version: &str) -> bool {
    let client = VersionedClient::new(version);
    client.cypher().create_unique("a-[:X]->b").is_ok()
}

// ============================================================================
// RELATE
// ============================================================================

#[test]
fn test_relate_on_older_server() {
    let client = VersionedClient::new("1.7.0");
    let query = client
        .cypher()
        .start("a=node(1), b=node(2)")
        .relate("a-[:X]->b")
        .unwrap()
        .query();
    assert_eq!(query.text(), "START a=node(1), b=node(2)\nRELATE a-[:X]->b");
}

#[test]
fn test_relate_rejected_on_newer_server() {
    let client = VersionedClient::new("1.9.0");
    let root = client.cypher().start("a=node(1), b=node(2)");

    let err = root.relate("a-[:X]->b").unwrap_err();
    assert!(matches!(err, CypherError::UnsupportedOperation(_)));
    let message = err.to_string();
    assert!(message.contains("RELATE"), "{message}");
    assert!(message.contains("1.9.0"), "{message}");

    assert_eq!(root.query().text(), "START a=node(1), b=node(2)");
}

#[test]
fn test_relate_windows() {
    let table = [
        ("1.6", true),
        ("1.7.0", true),
        ("1.7.2", true),
        ("1.8", false),
        ("1.8.0", true),
        ("1.8.M01", true),
        ("1.8.0.6", true),
        ("1.8.M07", false),
        ("1.8.0.7", false),
        ("1.8.1", false),
        ("1.9.0", false),
        ("2.0", false),
    ];
    for (version, allowed) in table {
        assert_eq!(relate_allowed(version), allowed, "RELATE on {version}");
    }
}

// ============================================================================
// CREATE UNIQUE
// ============================================================================

#[test]
fn test_create_unique_on_released_server() {
    let client = VersionedClient::new("1.8.0.8");
    let query = client.cypher().create_unique("a-[:X]->b").unwrap().query();
    assert_eq!(query.text(), "CREATE UNIQUE a-[:X]->b");
}

#[test]
fn test_create_unique_rejected_on_early_milestone() {
    let client = VersionedClient::new("1.8.0.4");
    let err = client.cypher().create_unique("a-[:X]->b").unwrap_err();
    assert!(matches!(err, CypherError::UnsupportedOperation(_)));
    assert!(err.to_string().contains("CREATE UNIQUE"));
}

#[test]
fn test_create_unique_windows() {
    let table = [
        ("1.7", false),
        ("1.7.2", false),
        ("1.8", true),
        ("1.8.0", true),
        ("1.8.0.0", true),
        ("1.8.M01", false),
        ("1.8.0.6", false),
        ("1.8.M06", false),
        ("1.8.M07", true),
        ("1.8.0.7", true),
        ("1.8.2", true),
        ("1.9.0", true),
    ];
    for (version, allowed) in table {
        assert_eq!(
            create_unique_allowed(version),
            allowed,
            "CREATE UNIQUE on {version}"
        );
    }
}

// ============================================================================
// Gate table
// ============================================================================

#[test]
fn test_gates_agree_with_builder() {
    for version in ["1.7", "1.8", "1.8.0", "1.8.0.3", "1.8.0.7", "1.9.0"] {
        let parsed = ServerVersion::parse(version).unwrap();
        assert_eq!(ClauseGate::RELATE.is_supported(&parsed), relate_allowed(version));
        assert_eq!(
            ClauseGate::CREATE_UNIQUE.is_supported(&parsed),
            create_unique_allowed(version)
        );
    }
}

#[test]
fn test_some_clause_is_always_available_after_release() {
    for version in ["1.8", "1.8.0.7", "1.8.1", "1.9.0", "2.0"] {
        assert!(
            relate_allowed(version) || create_unique_allowed(version),
            "no uniqueness clause on {version}"
        );
    }
}
