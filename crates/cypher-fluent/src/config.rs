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

//! Configuration for query building.

use serde::{Deserialize, Serialize};

use crate::cypher::validate_identifier;
use crate::error::Result;

/// Default maximum length of a string property inlined into a map literal: 100 MB.
///
/// Values bound as parameters are not subject to this limit; it only applies
/// to text that ends up inside the query itself (CREATE map literals).
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024; // 100 MB

/// Default prefix for automatically minted parameter names (`p0`, `p1`, ...).
pub const DEFAULT_PARAMETER_PREFIX: &str = "p";

/// Text placed between clauses when a query is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseSeparator {
    /// One clause per line (default).
    #[default]
    Newline,
    /// All clauses on a single line, separated by a space.
    Space,
}

impl ClauseSeparator {
    /// The separator text.
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseSeparator::Newline => "\n",
            ClauseSeparator::Space => " ",
        }
    }
}

/// Configuration for a fluent query and the writer behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Separator used when joining clauses into the final text.
    pub clause_separator: ClauseSeparator,

    /// Drop null-valued properties from CREATE map literals (default: true).
    pub omit_null_properties: bool,

    /// Prefix for minted parameter names (default: `"p"`).
    ///
    /// Must be a valid Cypher identifier.
    pub parameter_prefix: String,

    /// Maximum length of a string property inlined into a map literal
    /// (default: 100MB, None = unlimited).
    pub max_string_length: Option<usize>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            clause_separator: ClauseSeparator::Newline,
            omit_null_properties: true,
            parameter_prefix: DEFAULT_PARAMETER_PREFIX.to_string(),
            max_string_length: Some(DEFAULT_MAX_STRING_LENGTH),
        }
    }
}

/// Builder for QueryConfig.
///
/// # Examples
///
/// ```
/// # use cypher_fluent::{ClauseSeparator, QueryConfig};
/// let config = QueryConfig::builder()
///     .clause_separator(ClauseSeparator::Space)
///     .omit_null_properties(false)
///     .build();
/// assert_eq!(config.clause_separator, ClauseSeparator::Space);
/// ```
#[derive(Default)]
pub struct QueryConfigBuilder {
    clause_separator: Option<ClauseSeparator>,
    omit_null_properties: Option<bool>,
    parameter_prefix: Option<String>,
    max_string_length: Option<Option<usize>>,
}

impl QueryConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clause separator.
    pub fn clause_separator(mut self, separator: ClauseSeparator) -> Self {
        self.clause_separator = Some(separator);
        self
    }

    /// Set whether null-valued properties are dropped from map literals.
    pub fn omit_null_properties(mut self, omit: bool) -> Self {
        self.omit_null_properties = Some(omit);
        self
    }

    /// Set the prefix for minted parameter names.
    pub fn parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = Some(prefix.into());
        self
    }

    /// Set maximum string length for inlined properties.
    pub fn max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(Some(max));
        self
    }

    /// Remove the string length limit.
    pub fn no_string_length_limit(mut self) -> Self {
        self.max_string_length = Some(None);
        self
    }

    /// Build the QueryConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> QueryConfig {
        let defaults = QueryConfig::default();
        QueryConfig {
            clause_separator: self.clause_separator.unwrap_or(defaults.clause_separator),
            omit_null_properties: self
                .omit_null_properties
                .unwrap_or(defaults.omit_null_properties),
            parameter_prefix: self.parameter_prefix.unwrap_or(defaults.parameter_prefix),
            max_string_length: self.max_string_length.unwrap_or(defaults.max_string_length),
        }
    }
}

impl QueryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for QueryConfig.
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::default()
    }

    /// Put every clause on a single line.
    pub fn with_single_line(mut self) -> Self {
        self.clause_separator = ClauseSeparator::Space;
        self
    }

    /// Keep null-valued properties in map literals.
    pub fn with_null_properties(mut self) -> Self {
        self.omit_null_properties = false;
        self
    }

    /// Set the prefix for minted parameter names.
    pub fn with_parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = prefix.into();
        self
    }

    /// Set maximum string length for inlined properties.
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(max);
        self
    }

    /// Remove string length limit (use with caution).
    pub fn without_string_length_limit(mut self) -> Self {
        self.max_string_length = None;
        self
    }

    /// Create a configuration suitable for untrusted input.
    ///
    /// Limits inlined strings to 1MB.
    pub fn for_untrusted_input() -> Self {
        Self {
            max_string_length: Some(1_000_000),
            ..Default::default()
        }
    }

    /// Check that the configuration can be used to mint parameter names.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.parameter_prefix)?;
        Ok(())
    }
}
