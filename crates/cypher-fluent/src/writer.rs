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

//! The clause and parameter accumulator behind every fluent query.
//!
//! A [`QueryWriter`] is plain owned data: a `Vec` of clauses and a
//! `BTreeMap` of parameters. Cloning it duplicates both, so a fluent call
//! can clone, mutate and return without the original ever observing the
//! change. Clauses are only ever appended.

use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::config::{ClauseSeparator, QueryConfig};
use crate::cypher::{CypherQuery, CypherValue};
use crate::error::{CypherError, Result};

/// Ordered clauses plus uniquely keyed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryWriter {
    clauses: Vec<String>,
    parameters: BTreeMap<String, CypherValue>,
    next_parameter: usize,
    separator: ClauseSeparator,
    parameter_prefix: String,
}

impl Default for QueryWriter {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}

impl QueryWriter {
    /// Create an empty writer.
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            clauses: Vec::new(),
            parameters: BTreeMap::new(),
            next_parameter: 0,
            separator: config.clause_separator,
            parameter_prefix: config.parameter_prefix.clone(),
        }
    }

    /// The clauses appended so far, in order.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// The parameters bound so far.
    pub fn parameters(&self) -> &BTreeMap<String, CypherValue> {
        &self.parameters
    }

    /// Append one clause to the end of the query. The text is not checked.
    pub fn append_clause(&mut self, text: impl Into<String>) {
        let text = text.into();
        trace!(clause = %text, "appending clause");
        self.clauses.push(text);
    }

    /// Append a clause whose `{0}`, `{1}`, ... placeholders are replaced by
    /// references to freshly minted parameters holding `args`.
    ///
    /// ```
    /// # use cypher_fluent::{CypherValue, QueryWriter};
    /// let mut writer = QueryWriter::default();
    /// writer.append_clause_with("SKIP {0} LIMIT {1}", vec![5.into(), 10.into()])?;
    /// let query = writer.to_cypher_query();
    /// assert_eq!(query.text(), "SKIP {p0} LIMIT {p1}");
    /// assert_eq!(query.parameter("p1"), Some(&CypherValue::Int(10)));
    /// # Ok::<(), cypher_fluent::CypherError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a placeholder has no matching argument.
    /// Nothing is appended or bound in that case.
    pub fn append_clause_with(&mut self, template: &str, args: Vec<CypherValue>) -> Result<()> {
        check_placeholders(template, args.len())?;
        let references: Vec<String> = args
            .into_iter()
            .map(|value| format!("{{{}}}", self.create_auto_parameter(value)))
            .collect();
        let text = format_positional(template, &references)?;
        self.append_clause(text);
        Ok(())
    }

    /// Bind `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateParameterKey` if `key` is already bound.
    pub fn create_parameter(&mut self, key: impl Into<String>, value: CypherValue) -> Result<()> {
        let key = key.into();
        if self.parameters.contains_key(&key) {
            return Err(CypherError::DuplicateParameterKey(key));
        }
        debug!(parameter = %key, "binding parameter");
        self.parameters.insert(key, value);
        Ok(())
    }

    /// Bind `value` under a newly minted name and return that name.
    ///
    /// Minted names are `<prefix><n>`; names the caller already bound are
    /// skipped, so this never collides.
    pub fn create_auto_parameter(&mut self, value: CypherValue) -> String {
        let key = self.next_parameter_name();
        debug!(parameter = %key, "minting parameter");
        self.parameters.insert(key.clone(), value);
        key
    }

    /// Check whether `key` is already bound.
    pub fn contains_parameter_with_key(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    fn next_parameter_name(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.parameter_prefix, self.next_parameter);
            self.next_parameter += 1;
            if !self.parameters.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Join the clauses and snapshot the parameters.
    ///
    /// Read-only: calling this repeatedly yields identical queries.
    pub fn to_cypher_query(&self) -> CypherQuery {
        let text = self.clauses.join(self.separator.as_str());
        debug!(
            clauses = self.clauses.len(),
            parameters = self.parameters.len(),
            "compiled query"
        );
        CypherQuery::new(text, self.parameters.clone())
    }
}

/// Find every `{n}` placeholder in `template`, returning `(byte_range, n)`.
///
/// Braces not enclosing a plain decimal index (map literals, parameter
/// references such as `{p0}`) are not placeholders.
fn placeholders(template: &str) -> Vec<(std::ops::Range<usize>, usize)> {
    let bytes = template.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            let digits_start = i + 1;
            let mut j = digits_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start && j < bytes.len() && bytes[j] == b'}' {
                if let Ok(index) = template[digits_start..j].parse::<usize>() {
                    found.push((i..j + 1, index));
                    i = j + 1;
                    continue;
                }
            }
        }
        i += 1;
    }
    found
}

fn check_placeholders(template: &str, available: usize) -> Result<()> {
    match placeholders(template)
        .into_iter()
        .find(|(_, index)| *index >= available)
    {
        Some((_, index)) => Err(CypherError::invalid_argument(
            "template",
            format!(
                "placeholder {{{}}} has no matching argument ({} supplied)",
                index, available
            ),
        )),
        None => Ok(()),
    }
}

/// Replace `{0}`, `{1}`, ... in `template` with `values[0]`, `values[1]`, ...
///
/// Substitution is purely textual and single pass: substituted text is never
/// scanned again.
pub(crate) fn format_positional(template: &str, values: &[String]) -> Result<String> {
    check_placeholders(template, values.len())?;
    let mut result = String::with_capacity(template.len());
    let mut last = 0;
    for (range, index) in placeholders(template) {
        result.push_str(&template[last..range.start]);
        result.push_str(&values[index]);
        last = range.end;
    }
    result.push_str(&template[last..]);
    Ok(result)
}
