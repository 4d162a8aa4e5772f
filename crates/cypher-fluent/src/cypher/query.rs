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

//! The compiled query handed to a transport.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value::CypherValue;

/// A compiled Cypher query: the final text and the parameters it references.
///
/// This is the only thing a [`GraphClient`](crate::GraphClient) receives.
/// It is produced by [`QueryWriter::to_cypher_query`](crate::QueryWriter::to_cypher_query)
/// and never changes afterwards, so it can be resubmitted as often as needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherQuery {
    text: String,
    parameters: BTreeMap<String, CypherValue>,
}

impl CypherQuery {
    /// Create a compiled query from text and parameters.
    pub fn new(text: impl Into<String>, parameters: BTreeMap<String, CypherValue>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }

    /// The query text, clauses in the order they were added.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The bound parameters, keyed by name.
    pub fn parameters(&self) -> &BTreeMap<String, CypherValue> {
        &self.parameters
    }

    /// Look up a single parameter.
    pub fn parameter(&self, key: &str) -> Option<&CypherValue> {
        self.parameters.get(key)
    }

    /// Check if this query has parameters.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Split into text and parameters.
    pub fn into_parts(self) -> (String, BTreeMap<String, CypherValue>) {
        (self.text, self.parameters)
    }

    /// Render the text with every `{name}` parameter reference replaced by
    /// its literal value.
    ///
    /// The text is scanned once, so a substituted literal is never itself
    /// searched for references. A `{name}` with no bound parameter is left
    /// as written.
    ///
    /// For logs and diagnostics only. Never send this to a server: the
    /// literals are not a substitute for parameter binding.
    pub fn debug_text(&self) -> String {
        let mut result = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let bound = after
                .find('}')
                .and_then(|close| Some((close, self.parameters.get(&after[..close])?)));
            match bound {
                Some((close, value)) => {
                    result.push_str(&value.to_cypher_literal());
                    rest = &after[close + 1..];
                }
                None => {
                    result.push('{');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }
}
