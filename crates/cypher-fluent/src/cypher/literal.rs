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

//! Map-literal serialization for CREATE clauses.
//!
//! Objects handed to CREATE are inlined into the query text as Cypher map
//! literals (`{name: 'Bob', age: 3}`). Keys are written unquoted unless
//! they need backticks and strings are single-quoted and escaped. Keys come
//! out in the order the value serializes them, which for a struct is field
//! declaration order.

use serde::Serialize;

use super::escape::{validate_property_key, validate_string_length};
use super::value::CypherValue;
use crate::config::QueryConfig;
use crate::error::{CypherError, Result};

/// Serialize a value into a Cypher map literal.
///
/// Null-valued properties are dropped when
/// [`QueryConfig::omit_null_properties`] is set. Inlined strings are checked
/// against [`QueryConfig::max_string_length`].
///
/// # Errors
///
/// Returns `InvalidArgument` if the value does not serialize to a map,
/// `InvalidIdentifier` for a key with invisible characters or one that is
/// not in NFC form, `StringLengthExceeded` for oversized strings and
/// `JsonError` if serialization itself fails.
///
/// # Examples
///
/// ```
/// # use cypher_fluent::{cypher::to_map_literal, QueryConfig};
/// #[derive(serde::Serialize)]
/// struct Person { name: &'static str, nickname: Option<&'static str> }
///
/// let literal = to_map_literal(&Person { name: "Bob", nickname: None }, &QueryConfig::default())?;
/// assert_eq!(literal, "{name: 'Bob'}");
/// # Ok::<(), cypher_fluent::CypherError>(())
/// ```
pub fn to_map_literal<T: Serialize + ?Sized>(value: &T, config: &QueryConfig) -> Result<String> {
    let mut value = CypherValue::from_serializable(value)?;
    if !matches!(value, CypherValue::Map(_)) {
        return Err(CypherError::invalid_argument(
            "value",
            "only objects that serialize to a map can be written as a map literal",
        ));
    }
    if config.omit_null_properties {
        value = value.without_null_properties();
    }
    check_properties(&value, "", config)?;
    Ok(value.to_cypher_literal())
}

fn check_properties(value: &CypherValue, path: &str, config: &QueryConfig) -> Result<()> {
    match value {
        CypherValue::String(s) => validate_string_length(s, path, config),
        CypherValue::List(items) => items
            .iter()
            .try_for_each(|item| check_properties(item, path, config)),
        CypherValue::Map(map) => map.iter().try_for_each(|(key, item)| {
            validate_property_key(key)?;
            let nested = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            check_properties(item, &nested, config)
        }),
        _ => Ok(()),
    }
}
