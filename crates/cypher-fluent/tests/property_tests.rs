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

//! Property-based tests for the query builder.
//!
//! Test coverage:
//! - Parameter names stay unique however they are minted or bound
//! - Branches never see each other's clauses or parameters
//! - Inlined strings cannot break out of their literal
//! - Version ordering and parsing
//! - START validation happens before anything is minted

use cypher_fluent::{
    cypher::{escape_identifier, escape_string, is_valid_identifier, quote_string},
    CypherError, CypherQuery, GraphClient, NodeData, QueryWriter, ServerVersion, StartBindings,
    TransportError,
};
use proptest::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

struct Client(ServerVersion);

impl GraphClient for Client {
    fn server_version(&self) -> &ServerVersion {
        &self.0
    }

    fn execute_cypher(&self, _query: &CypherQuery) -> Result<(), TransportError> {
        Ok(())
    }
}

fn client() -> Client {
    Client(ServerVersion::new(1, 8))
}

#[derive(Serialize)]
struct Named {
    name: String,
}

impl NodeData for Named {}

/// Every `{name}` reference in `text`.
fn referenced_parameters(text: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                if is_valid_identifier(name) {
                    names.insert(name.to_string());
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    names
}

// ============================================================================
// Parameter Properties
// ============================================================================

proptest! {
    /// Minted names never repeat and never shadow caller keys
    #[test]
    fn prop_minted_names_unique(
        caller_keys in prop::collection::btree_set("p[0-9]{1,2}", 0..8),
        minted in 1usize..24,
    ) {
        let mut writer = QueryWriter::default();
        for key in &caller_keys {
            writer.create_parameter(key.clone(), 0.into()).unwrap();
        }

        let mut names = BTreeSet::new();
        for i in 0..minted {
            let name = writer.create_auto_parameter((i as i64).into());
            prop_assert!(!caller_keys.contains(&name), "{} shadows a caller key", name);
            prop_assert!(names.insert(name));
        }
        prop_assert_eq!(writer.parameters().len(), caller_keys.len() + minted);
    }

    /// Binding a key twice always fails and keeps the first value
    #[test]
    fn prop_duplicate_key_rejected(key in "[a-z][a-z0-9_]{0,10}", first in any::<i64>(), second in any::<i64>()) {
        let client = client();
        let query = client.cypher().with_param(&key, first).unwrap();
        let is_duplicate = matches!(
            query.with_param(&key, second),
            Err(CypherError::DuplicateParameterKey(_))
        );
        prop_assert!(is_duplicate);
        let bound = query.query().parameter(&key).and_then(|v| v.as_int());
        prop_assert_eq!(bound, Some(first));
    }

    /// Every parameter referenced by START text is bound, and vice versa
    #[test]
    fn prop_start_references_match_bindings(values in prop::collection::vec(".*", 1..6)) {
        let bindings: StartBindings = values
            .iter()
            .enumerate()
            .fold(StartBindings::new(), |acc, (i, value)| {
                acc.index_lookup(format!("n{}", i), "people", "Name", value.as_str())
            });

        let client = client();
        let query = client.cypher().start_bindings(&bindings).unwrap().query();

        let referenced = referenced_parameters(query.text());
        let bound: BTreeSet<String> = query.parameters().keys().cloned().collect();
        prop_assert_eq!(referenced, bound);
        prop_assert_eq!(query.parameters().len(), values.len());
    }
}

// ============================================================================
// Immutability Properties
// ============================================================================

proptest! {
    /// Sibling branches only share their common prefix
    #[test]
    fn prop_branches_isolated(
        left in prop::collection::vec("[a-z]{1,6}", 1..5),
        right in prop::collection::vec("[a-z]{1,6}", 1..5),
    ) {
        let client = client();
        let root = client.cypher().start("n=node(1)");

        let left_query = left.iter().fold(root.clone(), |q, ident| q.with(ident));
        let right_query = right.iter().fold(root.clone(), |q, ident| q.delete(ident));

        let root_query = root.query();
        prop_assert_eq!(root_query.text(), "START n=node(1)");
        prop_assert_eq!(left_query.writer().clauses().len(), 1 + left.len());
        prop_assert_eq!(right_query.writer().clauses().len(), 1 + right.len());
        prop_assert!(left_query.writer().clauses().iter().all(|c| !c.starts_with("DELETE")));
        prop_assert!(right_query.writer().clauses().iter().all(|c| !c.starts_with("WITH")));
    }

    /// Compiling twice yields the same query
    #[test]
    fn prop_compile_deterministic(skip in any::<u32>(), limit in any::<u32>()) {
        let client = client();
        let query = client.cypher().start("n=node(*)").return_("n").skip(skip).limit(limit);
        prop_assert_eq!(query.query(), query.query());
    }
}

// ============================================================================
// Escaping Properties
// ============================================================================

proptest! {
    /// Quoted strings open and close with a single quote
    #[test]
    fn prop_quote_string_format(s in ".*") {
        let quoted = quote_string(&s);
        prop_assert!(quoted.starts_with('\''));
        prop_assert!(quoted.ends_with('\''));
    }

    /// Safe strings pass through unchanged
    #[test]
    fn prop_escape_safe_string_unchanged(s in "[a-zA-Z0-9 ]*") {
        let escaped = escape_string(&s);
        prop_assert_eq!(escaped.as_ref(), s.as_str());
    }

    /// Every quote inside an escaped literal is preceded by an odd run of
    /// backslashes
    #[test]
    fn prop_escaped_quotes_are_escaped(s in ".*") {
        let escaped = escape_string(&s);
        let chars: Vec<char> = escaped.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if *c == '\'' {
                let backslashes = chars[..i].iter().rev().take_while(|c| **c == '\\').count();
                prop_assert!(backslashes % 2 == 1, "bare quote at {} in {:?}", i, escaped);
            }
        }
    }

    /// A CREATE literal always holds exactly the one property it was given
    #[test]
    fn prop_create_literal_contained(name in ".*") {
        let client = client();
        let query = client
            .cypher()
            .create_node("n", &Named { name: name.clone() })
            .unwrap()
            .query();
        let expected = format!("CREATE (n {{name: {}}})", quote_string(&name));
        prop_assert_eq!(query.text(), expected.as_str());
        prop_assert!(!query.has_parameters());
    }

    /// Escaped identifiers are either plain or fully backtick-wrapped
    #[test]
    fn prop_escape_identifier_wrapped(s in ".+") {
        let escaped = escape_identifier(&s);
        prop_assert!(is_valid_identifier(&escaped) || (escaped.starts_with('`') && escaped.ends_with('`')));
    }

    /// Distinct keys never escape to the same text
    #[test]
    fn prop_escape_identifier_distinct(a in ".+", b in ".+") {
        prop_assume!(a != b);
        prop_assert_ne!(escape_identifier(&a), escape_identifier(&b));
    }
}

// ============================================================================
// Version Properties
// ============================================================================

proptest! {
    /// Display output parses back to the same version
    #[test]
    fn prop_version_display_parses(
        major in 0u32..10,
        minor in 0u32..20,
        build in prop::option::of(0u32..10),
        revision in 0u32..10,
    ) {
        let version = match build {
            Some(build) => ServerVersion::with_revision(major, minor, build, revision),
            None => ServerVersion::new(major, minor),
        };
        let parsed = ServerVersion::parse(&version.to_string()).unwrap();
        prop_assert_eq!(parsed, version);
    }

    /// Milestone notation is the same as a zero build with that revision
    #[test]
    fn prop_milestone_is_revision(minor in 0u32..20, milestone in 1u32..20) {
        let parsed = ServerVersion::parse(&format!("1.{}.M{:02}", minor, milestone)).unwrap();
        prop_assert_eq!(parsed, ServerVersion::with_revision(1, minor, 0, milestone));
    }

    /// Adding a trailing component always sorts higher
    #[test]
    fn prop_longer_version_sorts_higher(major in 0u32..5, minor in 0u32..20, build in 0u32..5) {
        let short = ServerVersion::new(major, minor);
        let longer = ServerVersion::with_build(major, minor, build);
        prop_assert!(short < longer);
    }
}
